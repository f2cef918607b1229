//! DELETE query builder using the unified expression layer.

use crate::error::YdbResult;
use crate::qb::expr::ExprGroup;
use crate::qb::traits::{MutationQb, SqlQb};
use crate::sql::Sql;

/// DELETE query builder with unified expression-based WHERE.
#[derive(Clone, Debug)]
pub struct DeleteQb {
    /// Table name
    table: String,
    /// WHERE conditions
    where_group: ExprGroup,
    /// Whether to allow DELETE without WHERE
    allow_delete_all: bool,
}

impl DeleteQb {
    /// Create a new DELETE query builder.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            where_group: ExprGroup::new(),
            allow_delete_all: false,
        }
    }

    /// Allow DELETE without WHERE conditions.
    ///
    /// By default, DELETE without WHERE generates `WHERE 1=0` (no-op).
    pub fn allow_delete_all(mut self, allow: bool) -> Self {
        self.allow_delete_all = allow;
        self
    }

    impl_where_methods!();
}

impl SqlQb for DeleteQb {
    fn build(&self) -> YdbResult<Sql> {
        let mut out = Sql::new("DELETE FROM ");
        out.push_ident(&self.table)?;

        if self.where_group.is_empty() {
            if !self.allow_delete_all {
                out.push(" WHERE 1=0");
            }
        } else {
            self.where_group.write_where(&mut out)?;
        }
        Ok(out)
    }
}

impl MutationQb for DeleteQb {}
