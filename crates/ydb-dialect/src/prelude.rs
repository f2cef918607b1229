//! Convenient imports for typical `ydb-dialect` usage.
//!
//! ```ignore
//! use ydb_dialect::prelude::*;
//! ```

pub use crate::qb::{self, MutationQb, Order, SqlQb};
pub use crate::{
    DatabaseConnection, Dialect, DialectConfig, Driver, FromNative, FromRow, NativeValue, Query,
    RetryPolicy, Row, Sql, YdbDialect, YdbError, YdbResult, query, sql,
};
