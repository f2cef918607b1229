use crate::compiler::{CompiledQuery, QueryCompiler, YdbQueryCompiler};
use crate::error::YdbResult;
use crate::ident::Ident;
use crate::types::NativeValue;

/// A piece of a [`Sql`] fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlPart {
    /// Text copied verbatim.
    Raw(String),
    /// An identifier, quoted by the compiler.
    Ident(Ident),
    /// A value, emitted as a typed parameter.
    Value(NativeValue),
}

/// A SQL fragment with identifiers and values kept apart from the text.
///
/// Placeholders are assigned only when the fragment is compiled, so pieces can
/// be composed freely without tracking parameter numbers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sql {
    parts: Vec<SqlPart>,
}

impl Sql {
    /// Create a new builder with an initial SQL fragment.
    pub fn new(initial_sql: impl Into<String>) -> Self {
        let initial_sql = initial_sql.into();
        let mut parts = Vec::new();
        if !initial_sql.is_empty() {
            parts.push(SqlPart::Raw(initial_sql));
        }
        Self { parts }
    }

    /// Create an empty builder.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn parts(&self) -> &[SqlPart] {
        &self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Append raw SQL (no parameters).
    pub fn push(&mut self, sql: &str) -> &mut Self {
        if sql.is_empty() {
            return self;
        }

        match self.parts.last_mut() {
            Some(SqlPart::Raw(last)) => last.push_str(sql),
            _ => self.parts.push(SqlPart::Raw(sql.to_string())),
        }
        self
    }

    /// Append a value as a parameter placeholder.
    pub fn push_bind(&mut self, value: impl Into<NativeValue>) -> &mut Self {
        self.parts.push(SqlPart::Value(value.into()));
        self
    }

    /// Append a comma-separated list of parameters.
    ///
    /// If `values` is empty, this appends `NULL` (so `IN (NULL)` is valid SQL).
    pub fn push_bind_list<T: Into<NativeValue>>(
        &mut self,
        values: impl IntoIterator<Item = T>,
    ) -> &mut Self {
        let mut iter = values.into_iter();
        let Some(first) = iter.next() else {
            return self.push("NULL");
        };

        self.push_bind(first);
        for v in iter {
            self.push(", ");
            self.push_bind(v);
        }
        self
    }

    /// Append another `Sql` fragment, consuming it.
    pub fn push_sql(&mut self, other: Sql) -> &mut Self {
        for part in other.parts {
            match part {
                SqlPart::Raw(s) => {
                    self.push(&s);
                }
                part => self.parts.push(part),
            }
        }
        self
    }

    /// Parse and append an identifier (`series`, `tv.series`, `` `odd name` ``).
    pub fn push_ident(&mut self, ident: &str) -> YdbResult<&mut Self> {
        let ident = Ident::parse(ident)?;
        Ok(self.push_identifier(ident))
    }

    /// Append an already parsed identifier.
    pub fn push_identifier(&mut self, ident: Ident) -> &mut Self {
        self.parts.push(SqlPart::Ident(ident));
        self
    }

    /// Compile with the YDB compiler.
    pub fn compile(&self) -> YdbResult<CompiledQuery> {
        YdbQueryCompiler.compile(self)
    }

    /// Compile with another dialect's compiler.
    pub fn compile_with(&self, compiler: &impl QueryCompiler) -> YdbResult<CompiledQuery> {
        compiler.compile(self)
    }

    /// Debug helper: the compiled text, or the compile error message.
    pub fn to_sql(&self) -> String {
        match self.compile() {
            Ok(query) => query.sql().to_string(),
            Err(e) => format!("<invalid: {e}>"),
        }
    }

    impl_query_exec! {
        compile(self) {
            self.compile()
        }
    }
}
