//! Turning compiled queries into the YDB wire text and parameter map.
//!
//! Every parameter is declared before the statement:
//!
//! ```text
//! declare $p1 AS Uint32;
//! SELECT * FROM `series` WHERE `series_id` = $p1;
//! ```
//!
//! A query without parameters is sent as `<sql>;`.

use crate::error::YdbResult;
use crate::types::{TypedValue, type_keyword};

/// The positional name of the `i`-th parameter (1-based), without the `$`.
pub fn param_name(i: usize) -> String {
    format!("p{i}")
}

/// Render the declaration preamble and the statement.
///
/// Fails if any parameter type has no declaration keyword; nothing is
/// returned in that case.
pub fn render(sql: &str, parameters: &[TypedValue]) -> YdbResult<String> {
    if parameters.is_empty() {
        return Ok(format!("{sql};"));
    }

    let mut statements = Vec::with_capacity(parameters.len() + 2);
    for (i, parameter) in parameters.iter().enumerate() {
        let keyword = type_keyword(parameter.ty())?;
        statements.push(format!("declare ${} AS {keyword}", param_name(i + 1)));
    }
    statements.push(sql.to_string());
    statements.push(String::new());
    Ok(statements.join(";\n"))
}

/// A parameter bound by name.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedParameter {
    name: String,
    value: TypedValue,
}

impl NamedParameter {
    /// The bare name, e.g. `p1`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The session key, e.g. `$p1`.
    pub fn key(&self) -> String {
        format!("${}", self.name)
    }

    pub fn value(&self) -> &TypedValue {
        &self.value
    }
}

/// Parameters keyed `$p1..$pN`, in position order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryParams(Vec<NamedParameter>);

impl QueryParams {
    /// Look up a parameter by its session key (`$p1`) or bare name (`p1`).
    pub fn get(&self, key: &str) -> Option<&TypedValue> {
        let name = key.strip_prefix('$').unwrap_or(key);
        self.0.iter().find(|p| p.name == name).map(|p| &p.value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedParameter> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a QueryParams {
    type Item = &'a NamedParameter;
    type IntoIter = std::slice::Iter<'a, NamedParameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Name parameters by position: the first becomes `$p1`.
pub fn named_params(parameters: impl IntoIterator<Item = TypedValue>) -> QueryParams {
    QueryParams(
        parameters
            .into_iter()
            .enumerate()
            .map(|(i, value)| NamedParameter {
                name: param_name(i + 1),
                value,
            })
            .collect(),
    )
}

pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}
