//! INSERT / UPSERT / REPLACE query builder.

use crate::error::{YdbError, YdbResult};
use crate::qb::traits::{MutationQb, SqlQb};
use crate::sql::Sql;
use crate::types::NativeValue;

/// How rows are written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InsertMode {
    /// `INSERT INTO`: fails if the primary key exists.
    #[default]
    Insert,
    /// `UPSERT INTO`: overwrites the given columns of existing rows.
    Upsert,
    /// `REPLACE INTO`: replaces existing rows entirely.
    Replace,
}

impl InsertMode {
    fn keyword(self) -> &'static str {
        match self {
            InsertMode::Insert => "INSERT INTO ",
            InsertMode::Upsert => "UPSERT INTO ",
            InsertMode::Replace => "REPLACE INTO ",
        }
    }
}

/// INSERT query builder.
///
/// Use `set` for a single row, or `columns` + `values` for several rows.
#[derive(Clone, Debug)]
pub struct InsertQb {
    mode: InsertMode,
    /// Table name
    table: String,
    /// Column names
    columns: Vec<String>,
    /// One entry per row
    rows: Vec<Vec<NativeValue>>,
    /// Set when `set` and `values` are mixed
    build_error: Option<String>,
}

impl InsertQb {
    /// Create a new INSERT query builder.
    pub fn new(table: &str) -> Self {
        Self::with_mode(table, InsertMode::Insert)
    }

    pub fn with_mode(table: &str, mode: InsertMode) -> Self {
        Self {
            mode,
            table: table.to_string(),
            columns: Vec::new(),
            rows: Vec::new(),
            build_error: None,
        }
    }

    pub fn mode(&self) -> InsertMode {
        self.mode
    }

    /// Set a column value on the single row.
    pub fn set(mut self, column: &str, value: impl Into<NativeValue>) -> Self {
        if self.rows.len() > 1 {
            self.build_error = Some("cannot mix set() with multi-row values()".to_string());
            return self;
        }
        if self.rows.is_empty() {
            self.rows.push(Vec::new());
        }
        self.columns.push(column.to_string());
        self.rows[0].push(value.into());
        self
    }

    /// Set an optional column value (None => skip).
    pub fn set_opt<T: Into<NativeValue>>(self, column: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.set(column, v),
            None => self,
        }
    }

    /// Set the column list for `values`.
    pub fn columns(mut self, cols: &[&str]) -> Self {
        if !self.rows.is_empty() {
            self.build_error = Some("columns() must be called before values()".to_string());
            return self;
        }
        self.columns = cols.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Append a row of values matching `columns`.
    pub fn values<T: Into<NativeValue>>(mut self, row: impl IntoIterator<Item = T>) -> Self {
        self.rows.push(row.into_iter().map(Into::into).collect());
        self
    }

    fn validate(&self) -> YdbResult<()> {
        if let Some(err) = &self.build_error {
            return Err(YdbError::validation(format!("InsertQb: {err}")));
        }
        if self.columns.is_empty() {
            return Err(YdbError::validation("InsertQb: no columns to insert"));
        }
        if self.rows.is_empty() {
            return Err(YdbError::validation("InsertQb: no rows to insert"));
        }
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != self.columns.len() {
                return Err(YdbError::validation(format!(
                    "InsertQb: row {i} has {} values, expected {}",
                    row.len(),
                    self.columns.len()
                )));
            }
        }
        Ok(())
    }
}

impl SqlQb for InsertQb {
    fn build(&self) -> YdbResult<Sql> {
        self.validate()?;

        let mut out = Sql::new(self.mode.keyword());
        out.push_ident(&self.table)?.push(" (");
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                out.push(", ");
            }
            out.push_ident(col)?;
        }
        out.push(") VALUES ");

        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                out.push(", ");
            }
            out.push("(");
            out.push_bind_list(row.iter().cloned());
            out.push(")");
        }
        Ok(out)
    }
}

impl MutationQb for InsertQb {}
