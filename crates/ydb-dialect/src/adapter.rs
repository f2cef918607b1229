//! Dialect capability flags and migration locking.

use crate::error::YdbResult;
use std::future::Future;

/// What the query builder may assume about the database.
pub trait DialectAdapter: Send + Sync {
    /// Whether DDL statements can run inside a transaction.
    fn supports_transactional_ddl(&self) -> bool;

    /// Whether `RETURNING` clauses are understood.
    fn supports_returning(&self) -> bool;

    fn acquire_migration_lock(&self) -> impl Future<Output = YdbResult<()>> + Send;

    fn release_migration_lock(&self) -> impl Future<Output = YdbResult<()>> + Send;
}

/// YDB: no transactional DDL, no `RETURNING`, and no migration lock.
///
/// The lock operations succeed without doing anything, so concurrent
/// migrators are not excluded.
#[derive(Debug, Clone, Copy, Default)]
pub struct YdbAdapter;

impl DialectAdapter for YdbAdapter {
    fn supports_transactional_ddl(&self) -> bool {
        false
    }

    fn supports_returning(&self) -> bool {
        false
    }

    fn acquire_migration_lock(&self) -> impl Future<Output = YdbResult<()>> + Send {
        std::future::ready(Ok(()))
    }

    fn release_migration_lock(&self) -> impl Future<Output = YdbResult<()>> + Send {
        std::future::ready(Ok(()))
    }
}
