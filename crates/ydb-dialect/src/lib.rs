//! # ydb-dialect
//!
//! A YDB dialect for SQL query builders.
//!
//! ## Features
//!
//! - **Typed parameters**: every bound value is classified into a YDB type and
//!   declared up front (`declare $p1 AS Uint32;`)
//! - **YQL quoting**: identifiers are wrapped in backticks, placeholders are `$p1, $p2, ...`
//! - **Session execution**: queries are prepared and executed on a pooled session,
//!   with bounded retries for transient driver failures
//! - **Lazy driver**: the driver is created (or adopted) and waited on at first use
//! - **Typed results**: result sets decode into [`Row`]s of [`NativeValue`]s
//!
//! ## Usage
//!
//! ```ignore
//! use ydb_dialect::prelude::*;
//!
//! let config = DialectConfig::new(session_driver).ready_timeout(Duration::from_secs(5));
//! let dialect = YdbDialect::new(config);
//!
//! let mut driver = dialect.create_driver();
//! driver.init().await?;
//! let conn = driver.acquire_connection()?;
//!
//! let rows: Vec<Row> = qb::select("series")
//!     .eq("series_id", 1u32)
//!     .fetch_all(&conn)
//!     .await?;
//!
//! driver.release_connection(conn);
//! driver.destroy().await;
//! ```

pub mod adapter;
pub mod compiler;
pub mod config;
pub mod connection;
pub mod dialect;
pub mod driver;
pub mod error;
pub mod ident;
pub mod introspector;
pub mod prelude;
pub mod qb;
pub mod render;
pub mod row;
pub mod session;
pub mod sql;
pub mod types;

pub use adapter::{DialectAdapter, YdbAdapter};
pub use compiler::{CompileState, CompiledQuery, QueryCompiler, YdbQueryCompiler};
pub use config::{DEFAULT_READY_TIMEOUT, DialectConfig, DriverSource, RetryPolicy};
pub use connection::{DatabaseConnection, QueryResult, RowStream, YdbConnection};
pub use dialect::{Dialect, YdbDialect};
pub use driver::{Driver, YdbDriver};
pub use error::{YdbError, YdbResult};
pub use ident::{Ident, IntoIdent};
pub use introspector::{
    ColumnMetadata, DatabaseIntrospector, DatabaseMetadata, DatabaseMetadataOptions,
    SchemaMetadata, TableMetadata, YdbIntrospector,
};
pub use render::{NamedParameter, QueryParams, named_params, param_name, render};
pub use row::{FromNative, FromRow, Row, decode_result_set};
pub use session::{
    Column, DriverError, DriverErrorKind, ExecuteQuerySettings, ExecuteResult, PreparedQuery,
    ResultSet, Session, SessionDriver,
};
pub use sql::{Query, Sql, SqlPart, query, sql};
pub use types::{
    NativeValue, PrimitiveType, Type, TypeKind, TypedValue, Value, type_keyword, typed_param,
    typed_to_native, value_to_typed,
};

// Re-export qb module for easy access
pub use qb::{
    DeleteQb, Expr, ExprGroup, InsertMode, InsertQb, MutationQb, Order, SelectQb, SqlQb,
    UpdateQb, delete, insert, replace, select, update, upsert,
};
