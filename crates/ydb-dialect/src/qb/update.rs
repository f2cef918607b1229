//! UPDATE query builder using the unified expression layer.

use crate::error::{YdbError, YdbResult};
use crate::qb::expr::ExprGroup;
use crate::qb::traits::{MutationQb, SqlQb};
use crate::sql::Sql;
use crate::types::NativeValue;

/// SET field value type.
#[derive(Clone, Debug, PartialEq)]
enum SetField {
    /// Parameterized value
    Value(NativeValue),
    /// Raw SQL expression
    Raw(String),
}

/// UPDATE query builder with unified expression-based WHERE.
#[derive(Clone, Debug)]
pub struct UpdateQb {
    /// Table name
    table: String,
    /// SET clauses
    set_fields: Vec<(String, SetField)>,
    /// WHERE conditions
    where_group: ExprGroup,
}

impl UpdateQb {
    /// Create a new UPDATE query builder.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            set_fields: Vec::new(),
            where_group: ExprGroup::new(),
        }
    }

    /// Set a column value.
    pub fn set(mut self, column: &str, value: impl Into<NativeValue>) -> Self {
        self.set_fields
            .push((column.to_string(), SetField::Value(value.into())));
        self
    }

    /// Set an optional column value (None => skip).
    pub fn set_opt<T: Into<NativeValue>>(self, column: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.set(column, v),
            None => self,
        }
    }

    /// Set a column to a raw SQL expression (e.g. `views + 1`).
    pub fn set_raw(mut self, column: &str, expr: &str) -> Self {
        self.set_fields
            .push((column.to_string(), SetField::Raw(expr.to_string())));
        self
    }

    impl_where_methods!();
}

impl SqlQb for UpdateQb {
    fn build(&self) -> YdbResult<Sql> {
        if self.set_fields.is_empty() {
            return Err(YdbError::validation("UpdateQb: SET clause cannot be empty"));
        }

        let mut out = Sql::new("UPDATE ");
        out.push_ident(&self.table)?.push(" SET ");
        for (i, (col, field)) in self.set_fields.iter().enumerate() {
            if i > 0 {
                out.push(", ");
            }
            out.push_ident(col)?.push(" = ");
            match field {
                SetField::Value(v) => {
                    out.push_bind(v.clone());
                }
                SetField::Raw(expr) => {
                    out.push(expr);
                }
            }
        }

        self.where_group.write_where(&mut out)?;
        Ok(out)
    }
}

impl MutationQb for UpdateQb {}
