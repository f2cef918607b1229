//! Unified expression layer for WHERE conditions.
//!
//! This module provides the `Expr` enum which supports:
//! - AND/OR/NOT grouping
//! - comparison operators (eq, ne, gt, lt, like, ...)
//! - template expressions with `?` placeholders
//! - raw SQL fragments
//!
//! Expressions are written into a [`Sql`] fragment: column names become
//! identifiers and values become parameters, so numbering is settled only
//! when the whole statement is compiled.

use crate::error::YdbResult;
use crate::sql::Sql;
use crate::types::NativeValue;

/// Expression node for building WHERE clauses.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// AND group: all conditions must be true.
    And(Vec<Expr>),

    /// OR group: at least one condition must be true.
    Or(Vec<Expr>),

    /// NOT: negate the inner expression.
    Not(Box<Expr>),

    /// Simple comparison: column op value
    Compare {
        column: String,
        op: &'static str,
        value: NativeValue,
    },

    /// NULL check: column IS NULL or column IS NOT NULL
    NullCheck { column: String, is_null: bool },

    /// IN list: column IN (...) or column NOT IN (...)
    InList {
        column: String,
        values: Vec<NativeValue>,
        negated: bool,
    },

    /// BETWEEN: column BETWEEN from AND to
    Between {
        column: String,
        from: NativeValue,
        to: NativeValue,
        negated: bool,
    },

    /// Raw SQL where each `?` is replaced by the next value.
    /// Example: `Template { sql: "a = ? OR b = ?", params: [1, 2] }` -> `a = $p1 OR b = $p2`
    Template {
        sql: String,
        params: Vec<NativeValue>,
    },

    /// Raw SQL fragment without parameters.
    Raw(String),

    /// Always true (used for empty NOT IN lists).
    True,

    /// Always false (used for empty IN lists).
    False,
}

fn compare(column: impl Into<String>, op: &'static str, value: impl Into<NativeValue>) -> Expr {
    Expr::Compare {
        column: column.into(),
        op,
        value: value.into(),
    }
}

impl Expr {
    pub fn and(exprs: Vec<Expr>) -> Self {
        Expr::And(exprs)
    }

    pub fn or(exprs: Vec<Expr>) -> Self {
        Expr::Or(exprs)
    }

    pub fn not(expr: Expr) -> Self {
        Expr::Not(Box::new(expr))
    }

    pub fn eq(column: impl Into<String>, value: impl Into<NativeValue>) -> Self {
        compare(column, "=", value)
    }

    pub fn ne(column: impl Into<String>, value: impl Into<NativeValue>) -> Self {
        compare(column, "!=", value)
    }

    pub fn gt(column: impl Into<String>, value: impl Into<NativeValue>) -> Self {
        compare(column, ">", value)
    }

    pub fn gte(column: impl Into<String>, value: impl Into<NativeValue>) -> Self {
        compare(column, ">=", value)
    }

    pub fn lt(column: impl Into<String>, value: impl Into<NativeValue>) -> Self {
        compare(column, "<", value)
    }

    pub fn lte(column: impl Into<String>, value: impl Into<NativeValue>) -> Self {
        compare(column, "<=", value)
    }

    pub fn like(column: impl Into<String>, pattern: impl Into<NativeValue>) -> Self {
        compare(column, "LIKE", pattern)
    }

    /// Case-insensitive LIKE.
    pub fn ilike(column: impl Into<String>, pattern: impl Into<NativeValue>) -> Self {
        compare(column, "ILIKE", pattern)
    }

    pub fn not_like(column: impl Into<String>, pattern: impl Into<NativeValue>) -> Self {
        compare(column, "NOT LIKE", pattern)
    }

    pub fn is_null(column: impl Into<String>) -> Self {
        Expr::NullCheck {
            column: column.into(),
            is_null: true,
        }
    }

    pub fn is_not_null(column: impl Into<String>) -> Self {
        Expr::NullCheck {
            column: column.into(),
            is_null: false,
        }
    }

    /// `column IN (...)`; an empty list is always false.
    pub fn in_list<T: Into<NativeValue>>(
        column: impl Into<String>,
        values: impl IntoIterator<Item = T>,
    ) -> Self {
        let values: Vec<NativeValue> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Expr::False;
        }
        Expr::InList {
            column: column.into(),
            values,
            negated: false,
        }
    }

    /// `column NOT IN (...)`; an empty list is always true.
    pub fn not_in<T: Into<NativeValue>>(
        column: impl Into<String>,
        values: impl IntoIterator<Item = T>,
    ) -> Self {
        let values: Vec<NativeValue> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Expr::True;
        }
        Expr::InList {
            column: column.into(),
            values,
            negated: true,
        }
    }

    pub fn between(
        column: impl Into<String>,
        from: impl Into<NativeValue>,
        to: impl Into<NativeValue>,
    ) -> Self {
        Expr::Between {
            column: column.into(),
            from: from.into(),
            to: to.into(),
            negated: false,
        }
    }

    pub fn not_between(
        column: impl Into<String>,
        from: impl Into<NativeValue>,
        to: impl Into<NativeValue>,
    ) -> Self {
        Expr::Between {
            column: column.into(),
            from: from.into(),
            to: to.into(),
            negated: true,
        }
    }

    /// Create a template expression with `?` placeholders.
    ///
    /// # Example
    /// ```ignore
    /// Expr::template("`season_id` = ? OR `episode_id` = ?", vec![1u32, 2u32])
    /// ```
    pub fn template<T: Into<NativeValue>>(
        sql: impl Into<String>,
        values: impl IntoIterator<Item = T>,
    ) -> Self {
        Expr::Template {
            sql: sql.into(),
            params: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn raw(sql: impl Into<String>) -> Self {
        Expr::Raw(sql.into())
    }

    /// Check if this expression is empty (contains no conditions).
    pub fn is_empty(&self) -> bool {
        match self {
            Expr::And(exprs) | Expr::Or(exprs) => exprs.iter().all(Expr::is_empty),
            Expr::Not(inner) => inner.is_empty(),
            _ => false,
        }
    }

    /// Append this expression to `out`.
    ///
    /// Fails if a column name is not a valid identifier.
    pub fn write(&self, out: &mut Sql) -> YdbResult<()> {
        match self {
            Expr::And(exprs) | Expr::Or(exprs) => {
                let sep = if matches!(self, Expr::And(_)) { " AND " } else { " OR " };
                for (i, e) in exprs.iter().filter(|e| !e.is_empty()).enumerate() {
                    if i > 0 {
                        out.push(sep);
                    }
                    // Mixed AND/OR nesting is parenthesized.
                    let wrap = matches!(
                        (self, e),
                        (Expr::And(_), Expr::Or(_)) | (Expr::Or(_), Expr::And(_))
                    );
                    if wrap {
                        out.push("(");
                    }
                    e.write(out)?;
                    if wrap {
                        out.push(")");
                    }
                }
            }
            Expr::Not(inner) => {
                if !inner.is_empty() {
                    out.push("NOT (");
                    inner.write(out)?;
                    out.push(")");
                }
            }
            Expr::Compare { column, op, value } => {
                out.push_ident(column)?
                    .push(" ")
                    .push(op)
                    .push(" ")
                    .push_bind(value.clone());
            }
            Expr::NullCheck { column, is_null } => {
                out.push_ident(column)?;
                out.push(if *is_null { " IS NULL" } else { " IS NOT NULL" });
            }
            Expr::InList {
                column,
                values,
                negated,
            } => {
                out.push_ident(column)?;
                out.push(if *negated { " NOT IN (" } else { " IN (" });
                out.push_bind_list(values.iter().cloned());
                out.push(")");
            }
            Expr::Between {
                column,
                from,
                to,
                negated,
            } => {
                out.push_ident(column)?;
                out.push(if *negated { " NOT BETWEEN " } else { " BETWEEN " });
                out.push_bind(from.clone())
                    .push(" AND ")
                    .push_bind(to.clone());
            }
            Expr::Template { sql, params } => {
                let mut params = params.iter();
                let mut rest = sql.as_str();
                while let Some(pos) = rest.find('?') {
                    let Some(value) = params.next() else {
                        break;
                    };
                    out.push(&rest[..pos]).push_bind(value.clone());
                    rest = &rest[pos + 1..];
                }
                out.push(rest);
            }
            Expr::Raw(sql) => {
                out.push(sql);
            }
            Expr::True => {
                out.push("1=1");
            }
            Expr::False => {
                out.push("1=0");
            }
        }
        Ok(())
    }
}

/// A list of conditions ANDed together.
///
/// This is the main interface for building conditions in query builders.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExprGroup {
    exprs: Vec<Expr>,
}

impl ExprGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.iter().all(Expr::is_empty)
    }

    /// Add an expression to be ANDed.
    pub fn push(&mut self, expr: Expr) {
        self.exprs.push(expr);
    }

    pub fn exprs(&self) -> &[Expr] {
        &self.exprs
    }

    /// Append the conditions, without the `WHERE` keyword.
    pub fn write(&self, out: &mut Sql) -> YdbResult<()> {
        Expr::And(self.exprs.clone()).write(out)
    }

    /// Append ` WHERE <conditions>` unless the group is empty.
    pub fn write_where(&self, out: &mut Sql) -> YdbResult<()> {
        if self.is_empty() {
            return Ok(());
        }
        out.push(" WHERE ");
        self.write(out)
    }
}

/// WHERE helpers shared by the SELECT, UPDATE and DELETE builders.
///
/// Expects a `where_group: ExprGroup` field on the builder.
macro_rules! impl_where_methods {
    () => {
        /// Add WHERE: column = value
        pub fn eq(mut self, column: &str, value: impl Into<$crate::types::NativeValue>) -> Self {
            self.where_group.push($crate::qb::Expr::eq(column, value));
            self
        }

        /// Add WHERE: column != value
        pub fn ne(mut self, column: &str, value: impl Into<$crate::types::NativeValue>) -> Self {
            self.where_group.push($crate::qb::Expr::ne(column, value));
            self
        }

        /// Add WHERE: column > value
        pub fn gt(mut self, column: &str, value: impl Into<$crate::types::NativeValue>) -> Self {
            self.where_group.push($crate::qb::Expr::gt(column, value));
            self
        }

        /// Add WHERE: column >= value
        pub fn gte(mut self, column: &str, value: impl Into<$crate::types::NativeValue>) -> Self {
            self.where_group.push($crate::qb::Expr::gte(column, value));
            self
        }

        /// Add WHERE: column < value
        pub fn lt(mut self, column: &str, value: impl Into<$crate::types::NativeValue>) -> Self {
            self.where_group.push($crate::qb::Expr::lt(column, value));
            self
        }

        /// Add WHERE: column <= value
        pub fn lte(mut self, column: &str, value: impl Into<$crate::types::NativeValue>) -> Self {
            self.where_group.push($crate::qb::Expr::lte(column, value));
            self
        }

        /// Add WHERE: column LIKE pattern
        pub fn like(mut self, column: &str, pattern: impl Into<$crate::types::NativeValue>) -> Self {
            self.where_group.push($crate::qb::Expr::like(column, pattern));
            self
        }

        /// Add WHERE: column ILIKE pattern
        pub fn ilike(mut self, column: &str, pattern: impl Into<$crate::types::NativeValue>) -> Self {
            self.where_group.push($crate::qb::Expr::ilike(column, pattern));
            self
        }

        /// Add WHERE: column IS NULL
        pub fn is_null(mut self, column: &str) -> Self {
            self.where_group.push($crate::qb::Expr::is_null(column));
            self
        }

        /// Add WHERE: column IS NOT NULL
        pub fn is_not_null(mut self, column: &str) -> Self {
            self.where_group.push($crate::qb::Expr::is_not_null(column));
            self
        }

        /// Add WHERE: column IN (values...)
        pub fn in_list<T: Into<$crate::types::NativeValue>>(
            mut self,
            column: &str,
            values: impl IntoIterator<Item = T>,
        ) -> Self {
            self.where_group.push($crate::qb::Expr::in_list(column, values));
            self
        }

        /// Add WHERE: column NOT IN (values...)
        pub fn not_in<T: Into<$crate::types::NativeValue>>(
            mut self,
            column: &str,
            values: impl IntoIterator<Item = T>,
        ) -> Self {
            self.where_group.push($crate::qb::Expr::not_in(column, values));
            self
        }

        /// Add WHERE: column BETWEEN from AND to
        pub fn between(
            mut self,
            column: &str,
            from: impl Into<$crate::types::NativeValue>,
            to: impl Into<$crate::types::NativeValue>,
        ) -> Self {
            self.where_group.push($crate::qb::Expr::between(column, from, to));
            self
        }

        /// Add WHERE if value is Some: column = value
        pub fn eq_opt<T: Into<$crate::types::NativeValue>>(self, column: &str, value: Option<T>) -> Self {
            match value {
                Some(v) => self.eq(column, v),
                None => self,
            }
        }

        /// Add a raw WHERE condition without params.
        pub fn raw(mut self, sql: &str) -> Self {
            self.where_group.push($crate::qb::Expr::raw(sql));
            self
        }

        /// Add a WHERE condition with `?` placeholders.
        pub fn where_template<T: Into<$crate::types::NativeValue>>(
            mut self,
            sql: &str,
            values: impl IntoIterator<Item = T>,
        ) -> Self {
            self.where_group.push($crate::qb::Expr::template(sql, values));
            self
        }

        /// Add a custom expression.
        pub fn and_expr(mut self, expr: $crate::qb::Expr) -> Self {
            self.where_group.push(expr);
            self
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(expr: &Expr) -> (String, usize) {
        let mut out = Sql::empty();
        expr.write(&mut out).unwrap();
        let compiled = out.compile().unwrap();
        (compiled.sql().to_string(), compiled.parameters().len())
    }

    #[test]
    fn simple_eq() {
        assert_eq!(render(&Expr::eq("title", "IT Crowd")), ("`title` = $p1".into(), 1));
    }

    #[test]
    fn and_group() {
        let expr = Expr::and(vec![Expr::eq("series_id", 1u32), Expr::gt("season_id", 1u32)]);
        assert_eq!(
            render(&expr),
            ("`series_id` = $p1 AND `season_id` > $p2".into(), 2)
        );
    }

    #[test]
    fn nested_and_or() {
        let expr = Expr::and(vec![
            Expr::eq("series_id", 1u32),
            Expr::or(vec![Expr::eq("season_id", 1u32), Expr::eq("season_id", 2u32)]),
        ]);
        assert_eq!(
            render(&expr).0,
            "`series_id` = $p1 AND (`season_id` = $p2 OR `season_id` = $p3)"
        );
    }

    #[test]
    fn in_lists() {
        assert_eq!(
            render(&Expr::in_list("episode_id", [1u32, 2, 3])),
            ("`episode_id` IN ($p1, $p2, $p3)".into(), 3)
        );
        assert_eq!(render(&Expr::in_list("id", Vec::<u32>::new())), ("1=0".into(), 0));
        assert_eq!(render(&Expr::not_in("id", Vec::<u32>::new())), ("1=1".into(), 0));
    }

    #[test]
    fn between_and_null_check() {
        assert_eq!(
            render(&Expr::between("views", 10u32, 20u32)).0,
            "`views` BETWEEN $p1 AND $p2"
        );
        assert_eq!(render(&Expr::is_null("series_info")).0, "`series_info` IS NULL");
    }

    #[test]
    fn template_binds_in_order() {
        let expr = Expr::template("`a` = ? OR `b` = ?", [1u32, 2u32]);
        assert_eq!(render(&expr), ("`a` = $p1 OR `b` = $p2".into(), 2));
    }

    #[test]
    fn template_keeps_extra_question_marks() {
        let expr = Expr::template("a = ? OR b = ?", [1u32]);
        assert_eq!(render(&expr), ("a = $p1 OR b = ?".into(), 1));
    }

    #[test]
    fn not_wraps_inner() {
        assert_eq!(render(&Expr::not(Expr::eq("banned", true))).0, "NOT (`banned` = $p1)");
        assert!(Expr::not(Expr::and(vec![])).is_empty());
    }

    #[test]
    fn invalid_column_fails() {
        let mut out = Sql::empty();
        assert!(Expr::eq("bad column", 1u32).write(&mut out).is_err());
    }

    #[test]
    fn group_where_clause() {
        let mut group = ExprGroup::new();
        let mut out = Sql::empty();
        group.write_where(&mut out).unwrap();
        assert!(out.is_empty());

        group.push(Expr::eq("title", "IT Crowd"));
        group.push(Expr::in_list("series_id", [1u32, 2]));
        group.write_where(&mut out).unwrap();
        assert_eq!(
            out.to_sql(),
            " WHERE `title` = $p1 AND `series_id` IN ($p2, $p3)"
        );
    }
}
