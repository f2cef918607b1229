//! Compiling builder fragments into query text plus typed parameters.
//!
//! [`QueryCompiler`] walks a [`Sql`] fragment once, left to right: raw text is
//! copied, identifiers are wrapped and escaped, values are appended as
//! parameters. Dialects override the identifier wrappers and
//! [`QueryCompiler::append_value`]; [`YdbQueryCompiler`] quotes with backticks
//! and emits `$p1, $p2, ...`.

use crate::error::YdbResult;
use crate::ident::Ident;
use crate::render::param_name;
use crate::sql::{Sql, SqlPart};
use crate::types::{NativeValue, TypedValue, value_to_typed};

/// Query text with its positional parameters.
///
/// `parameters()[i]` belongs to the placeholder `$p{i + 1}`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    sql: String,
    parameters: Vec<TypedValue>,
}

impl CompiledQuery {
    /// Pair hand-written text with already typed parameters.
    ///
    /// The text is expected to reference `$p1..$pN` in parameter order.
    pub fn new(sql: impl Into<String>, parameters: Vec<TypedValue>) -> Self {
        Self {
            sql: sql.into(),
            parameters,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn parameters(&self) -> &[TypedValue] {
        &self.parameters
    }

    pub fn into_parts(self) -> (String, Vec<TypedValue>) {
        (self.sql, self.parameters)
    }
}

/// Output buffer of a single compilation.
#[derive(Debug, Default)]
pub struct CompileState {
    sql: String,
    parameters: Vec<TypedValue>,
}

impl CompileState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, s: &str) {
        self.sql.push_str(s);
    }

    /// Record a parameter and return its 1-based position.
    pub fn push_parameter(&mut self, value: TypedValue) -> usize {
        self.parameters.push(value);
        self.parameters.len()
    }

    pub fn num_parameters(&self) -> usize {
        self.parameters.len()
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn finish(self) -> CompiledQuery {
        CompiledQuery {
            sql: self.sql,
            parameters: self.parameters,
        }
    }
}

/// A dialect's compiler.
///
/// Only [`append_value`](Self::append_value) is required; the identifier
/// hooks default to standard double quotes.
pub trait QueryCompiler {
    fn left_identifier_wrapper(&self) -> &'static str {
        "\""
    }

    fn right_identifier_wrapper(&self) -> &'static str {
        "\""
    }

    /// Escape a raw identifier segment by doubling the closing wrapper.
    fn sanitize_identifier(&self, name: &str) -> String {
        let right = self.right_identifier_wrapper();
        name.replace(right, &right.repeat(2))
    }

    /// Append every segment of `ident`, wrapped, joined with `.`.
    fn append_identifier(&self, ident: &Ident, state: &mut CompileState) {
        for (i, part) in ident.parts().iter().enumerate() {
            if i > 0 {
                state.append(".");
            }
            state.append(self.left_identifier_wrapper());
            state.append(&self.sanitize_identifier(part));
            state.append(self.right_identifier_wrapper());
        }
    }

    /// Record `value` as a parameter and append its placeholder.
    fn append_value(&self, value: &NativeValue, state: &mut CompileState) -> YdbResult<()>;

    /// Compile a fragment in one pass.
    ///
    /// The first failing value aborts compilation; no partial query escapes.
    fn compile(&self, sql: &Sql) -> YdbResult<CompiledQuery> {
        let mut state = CompileState::new();
        for part in sql.parts() {
            match part {
                SqlPart::Raw(s) => state.append(s),
                SqlPart::Ident(ident) => self.append_identifier(ident, &mut state),
                SqlPart::Value(value) => self.append_value(value, &mut state)?,
            }
        }
        Ok(state.finish())
    }
}

/// The YDB compiler: backtick identifiers and `$p<n>` typed parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct YdbQueryCompiler;

impl YdbQueryCompiler {
    pub fn new() -> Self {
        Self
    }
}

impl QueryCompiler for YdbQueryCompiler {
    fn left_identifier_wrapper(&self) -> &'static str {
        "`"
    }

    fn right_identifier_wrapper(&self) -> &'static str {
        "`"
    }

    fn append_value(&self, value: &NativeValue, state: &mut CompileState) -> YdbResult<()> {
        let typed = value_to_typed(value)?;
        let n = state.push_parameter(typed);
        state.append("$");
        state.append(&param_name(n));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::YdbError;
    use crate::sql::sql;
    use crate::types::PrimitiveType;

    struct QuestionMarkCompiler;

    impl QueryCompiler for QuestionMarkCompiler {
        fn append_value(&self, value: &NativeValue, state: &mut CompileState) -> YdbResult<()> {
            state.push_parameter(value_to_typed(value)?);
            state.append("?");
            Ok(())
        }
    }

    #[test]
    fn placeholders_are_contiguous_and_match_parameters() {
        let mut q = sql("SELECT * FROM ");
        q.push_ident("series").unwrap();
        q.push(" WHERE ")
            .push_ident("series_id")
            .unwrap()
            .push(" = ")
            .push_bind(1u32)
            .push(" AND ")
            .push_ident("title")
            .unwrap()
            .push(" = ")
            .push_bind("IT Crowd");

        let compiled = YdbQueryCompiler.compile(&q).unwrap();
        assert_eq!(
            compiled.sql(),
            "SELECT * FROM `series` WHERE `series_id` = $p1 AND `title` = $p2"
        );
        assert_eq!(
            compiled.parameters(),
            [TypedValue::uint32(1), TypedValue::utf8("IT Crowd")]
        );
    }

    #[test]
    fn every_segment_is_wrapped() {
        let mut q = sql("SELECT ");
        q.push_ident("series.title").unwrap();
        let compiled = YdbQueryCompiler.compile(&q).unwrap();
        assert_eq!(compiled.sql(), "SELECT `series`.`title`");
    }

    #[test]
    fn backticks_inside_names_are_doubled() {
        let mut q = sql("SELECT ");
        q.push_identifier(Ident::new("odd`name").unwrap());
        let compiled = YdbQueryCompiler.compile(&q).unwrap();
        assert_eq!(compiled.sql(), "SELECT `odd``name`");
    }

    #[test]
    fn default_wrappers_are_double_quotes() {
        let mut q = sql("SELECT ");
        q.push_ident("title").unwrap().push(" WHERE x = ").push_bind(true);
        let compiled = QuestionMarkCompiler.compile(&q).unwrap();
        assert_eq!(compiled.sql(), "SELECT \"title\" WHERE x = ?");
        assert_eq!(compiled.parameters().len(), 1);
    }

    #[test]
    fn unsupported_value_aborts_compilation() {
        let mut q = sql("SELECT * FROM t WHERE a = ");
        q.push_bind(1u32)
            .push(" AND b = ")
            .push_bind(NativeValue::Bytes(vec![0xff]));
        let err = YdbQueryCompiler.compile(&q).unwrap_err();
        assert!(matches!(err, YdbError::UnsupportedParameter(_)));
    }

    #[test]
    fn typed_values_keep_their_type() {
        let mut q = sql("SELECT ");
        q.push_bind(TypedValue::int64(-1));
        let compiled = YdbQueryCompiler.compile(&q).unwrap();
        assert_eq!(compiled.sql(), "SELECT $p1");
        assert_eq!(
            compiled.parameters()[0].ty(),
            &PrimitiveType::Int64.into()
        );
    }

    #[test]
    fn no_values_no_parameters() {
        let compiled = YdbQueryCompiler.compile(&sql("SELECT 1")).unwrap();
        assert_eq!(compiled.sql(), "SELECT 1");
        assert!(compiled.parameters().is_empty());
    }
}
