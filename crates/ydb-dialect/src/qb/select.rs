//! SELECT query builder using the unified expression layer.

use crate::error::YdbResult;
use crate::qb::expr::ExprGroup;
use crate::qb::traits::SqlQb;
use crate::sql::Sql;

/// Sort direction for ORDER BY.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

impl Order {
    fn keyword(self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum SelectItem {
    Column(String),
    Raw(String),
}

#[derive(Clone, Debug, PartialEq)]
struct Join {
    kind: &'static str,
    table: String,
    on: String,
}

/// SELECT query builder.
///
/// Table and column names are quoted with backticks; values become `$pN`
/// parameters.
#[derive(Clone, Debug)]
pub struct SelectQb {
    /// FROM table
    table: String,
    /// SELECT columns (empty means `*`)
    select_items: Vec<SelectItem>,
    /// JOIN clauses
    joins: Vec<Join>,
    /// WHERE conditions
    where_group: ExprGroup,
    /// GROUP BY columns
    group_by: Vec<String>,
    /// ORDER BY columns
    order_by: Vec<(String, Order)>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl SelectQb {
    /// Create a new SELECT query builder for a table.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            select_items: Vec::new(),
            joins: Vec::new(),
            where_group: ExprGroup::new(),
            group_by: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    // ==================== SELECT columns ====================

    /// Set SELECT columns, replacing any previous selection.
    pub fn select_cols(mut self, cols: &[&str]) -> Self {
        self.select_items = cols.iter().map(|c| SelectItem::Column(c.to_string())).collect();
        self
    }

    /// Append one SELECT column.
    pub fn add_select(mut self, col: &str) -> Self {
        self.select_items.push(SelectItem::Column(col.to_string()));
        self
    }

    /// Append a raw SELECT expression (e.g. `COUNT(*) AS cnt`).
    pub fn select_raw(mut self, expr: &str) -> Self {
        self.select_items.push(SelectItem::Raw(expr.to_string()));
        self
    }

    // ==================== JOIN ====================

    /// Add INNER JOIN with a raw ON condition.
    pub fn inner_join(mut self, table: &str, on: &str) -> Self {
        self.joins.push(Join {
            kind: "INNER JOIN",
            table: table.to_string(),
            on: on.to_string(),
        });
        self
    }

    /// Add LEFT JOIN with a raw ON condition.
    pub fn left_join(mut self, table: &str, on: &str) -> Self {
        self.joins.push(Join {
            kind: "LEFT JOIN",
            table: table.to_string(),
            on: on.to_string(),
        });
        self
    }

    // ==================== WHERE conditions ====================

    impl_where_methods!();

    // ==================== GROUP / ORDER / pagination ====================

    /// Add GROUP BY columns.
    pub fn group_by(mut self, cols: &[&str]) -> Self {
        self.group_by.extend(cols.iter().map(|c| c.to_string()));
        self
    }

    /// Add an ORDER BY column.
    pub fn order_by(mut self, col: &str, order: Order) -> Self {
        self.order_by.push((col.to_string(), order));
        self
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Set LIMIT and OFFSET from a 1-based page number.
    pub fn paginate(self, page: u64, per_page: u64) -> Self {
        let page = page.max(1);
        self.limit(per_page).offset((page - 1) * per_page)
    }
}

fn push_ident_list<'a>(out: &mut Sql, cols: impl IntoIterator<Item = &'a String>) -> YdbResult<()> {
    for (i, col) in cols.into_iter().enumerate() {
        if i > 0 {
            out.push(", ");
        }
        out.push_ident(col)?;
    }
    Ok(())
}

impl SqlQb for SelectQb {
    fn build(&self) -> YdbResult<Sql> {
        let mut out = Sql::new("SELECT ");

        if self.select_items.is_empty() {
            out.push("*");
        }
        for (i, item) in self.select_items.iter().enumerate() {
            if i > 0 {
                out.push(", ");
            }
            match item {
                SelectItem::Column(col) => {
                    out.push_ident(col)?;
                }
                SelectItem::Raw(expr) => {
                    out.push(expr);
                }
            }
        }

        out.push(" FROM ").push_ident(&self.table)?;

        for join in &self.joins {
            out.push(" ").push(join.kind).push(" ").push_ident(&join.table)?;
            out.push(" ON ").push(&join.on);
        }

        self.where_group.write_where(&mut out)?;

        if !self.group_by.is_empty() {
            out.push(" GROUP BY ");
            push_ident_list(&mut out, &self.group_by)?;
        }

        for (i, (col, order)) in self.order_by.iter().enumerate() {
            out.push(if i == 0 { " ORDER BY " } else { ", " });
            out.push_ident(col)?.push(" ").push(order.keyword());
        }

        if let Some(limit) = self.limit {
            out.push(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = self.offset {
            out.push(&format!(" OFFSET {offset}"));
        }

        Ok(out)
    }
}
