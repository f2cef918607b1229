//! Dynamic SQL builder.
//!
//! This module complements `query()`:
//! - `query()` is great when you already have a full statement with `$p1, $p2...`.
//! - `Sql` is great when you want to *compose* SQL dynamically without manually
//!   tracking placeholder indices.
//!
//! # Example
//!
//! ```ignore
//! use ydb_dialect::sql;
//!
//! let mut q = sql("SELECT * FROM ");
//! q.push_ident("series")?;
//! if let Some(title) = title {
//!     q.push(" WHERE ").push_ident("title")?.push(" = ").push_bind(title);
//! }
//!
//! let rows: Vec<Row> = q.fetch_all(&conn).await?;
//! ```

#[macro_use]
mod exec_macros;

mod builder;
mod query;


pub use builder::{Sql, SqlPart};
pub use query::Query;

/// Build a query from a pre-numbered statement (`$p1, $p2, ...`).
pub fn query(initial_sql: impl Into<String>) -> Query {
    Query::new(initial_sql)
}

/// Start building a SQL statement.
pub fn sql(initial_sql: impl Into<String>) -> Sql {
    Sql::new(initial_sql)
}
