//! Query builders producing YQL statements.
//!
//! Builders render into a [`Sql`](crate::Sql) fragment, so identifiers are
//! backtick-quoted and values are bound as `$p1, $p2, ...` only when the
//! statement is compiled.
//!
//! # Usage
//!
//! ```ignore
//! use ydb_dialect::qb::{self, Order, SqlQb, MutationQb};
//!
//! let rows: Vec<Row> = qb::select("series")
//!     .eq("series_id", 1u32)
//!     .order_by("title", Order::Asc)
//!     .limit(20)
//!     .fetch_all(&conn)
//!     .await?;
//!
//! qb::upsert("series")
//!     .set("series_id", 3u32)
//!     .set("title", "Mr. Robot")
//!     .execute(&conn)
//!     .await?;
//!
//! qb::delete("series").eq("series_id", 3u32).execute(&conn).await?;
//! ```

#[macro_use]
mod expr;

mod delete;
mod insert;
mod select;
mod traits;
mod update;

pub use delete::DeleteQb;
pub use expr::{Expr, ExprGroup};
pub use insert::{InsertMode, InsertQb};
pub use select::{Order, SelectQb};
pub use traits::{MutationQb, SqlQb};
pub use update::UpdateQb;

/// Create a SELECT query builder for the given table.
pub fn select(table: &str) -> SelectQb {
    SelectQb::new(table)
}

/// Create an INSERT query builder for the given table.
pub fn insert(table: &str) -> InsertQb {
    InsertQb::new(table)
}

/// Create an UPSERT query builder for the given table.
pub fn upsert(table: &str) -> InsertQb {
    InsertQb::with_mode(table, InsertMode::Upsert)
}

/// Create a REPLACE query builder for the given table.
pub fn replace(table: &str) -> InsertQb {
    InsertQb::with_mode(table, InsertMode::Replace)
}

/// Create an UPDATE query builder for the given table.
pub fn update(table: &str) -> UpdateQb {
    UpdateQb::new(table)
}

/// Create a DELETE query builder for the given table.
///
/// Without WHERE conditions this generates `WHERE 1=0` (no-op).
/// Use `allow_delete_all(true)` to allow deleting all rows.
pub fn delete(table: &str) -> DeleteQb {
    DeleteQb::new(table)
}

#[cfg(test)]
mod tests;
