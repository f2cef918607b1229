use crate::compiler::CompiledQuery;
use crate::error::YdbResult;
use crate::types::{NativeValue, value_to_typed};

/// A SQL string with pre-numbered placeholders (`$p1, $p2, ...`) plus bound values.
///
/// Use this when you already have a complete statement and just want to bind
/// values. Each bound value is classified like any other parameter; the
/// declaration preamble is added at execution time.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    sql: String,
    params: Vec<NativeValue>,
}

impl Query {
    /// Create a new pre-numbered query.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Bind the value for the next placeholder.
    ///
    /// This does not modify the SQL string; the first bound value is `$p1`.
    pub fn bind(mut self, value: impl Into<NativeValue>) -> Self {
        self.params.push(value.into());
        self
    }

    /// Access the SQL string.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[NativeValue] {
        &self.params
    }

    /// Classify the bound values.
    pub fn compile(&self) -> YdbResult<CompiledQuery> {
        let parameters = self
            .params
            .iter()
            .map(value_to_typed)
            .collect::<YdbResult<Vec<_>>>()?;
        Ok(CompiledQuery::new(self.sql.clone(), parameters))
    }

    impl_query_exec! {
        compile(self) {
            self.compile()
        }
    }
}
