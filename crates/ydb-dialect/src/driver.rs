//! The dialect driver: lifecycle of the single YDB connection.

use crate::config::DialectConfig;
use crate::connection::YdbConnection;
use crate::error::{YdbError, YdbResult};
use crate::session::SessionDriver;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Driver contract used by the query builder.
///
/// `init` must succeed before connections can be acquired.
pub trait Driver: Send + Sync {
    type Connection: Send + Sync;

    fn init(&mut self) -> impl Future<Output = YdbResult<()>> + Send;

    fn acquire_connection(&self) -> YdbResult<Self::Connection>;

    fn begin_transaction(&self, conn: &Self::Connection) -> YdbResult<()>;

    fn commit_transaction(&self, conn: &Self::Connection) -> YdbResult<()>;

    fn rollback_transaction(&self, conn: &Self::Connection) -> YdbResult<()>;

    fn release_connection(&self, conn: Self::Connection);

    fn destroy(&mut self) -> impl Future<Output = ()> + Send;
}

enum DriverState<D: SessionDriver> {
    Uninitialized,
    /// Resolved from the source but not ready yet.
    Resolved { driver: Arc<D> },
    Ready {
        driver: Arc<D>,
        connection: YdbConnection<D>,
    },
}

/// Drives one YDB client driver and hands out its single connection.
pub struct YdbDriver<D: SessionDriver> {
    config: Arc<DialectConfig<D>>,
    state: DriverState<D>,
}

impl<D: SessionDriver> fmt::Debug for YdbDriver<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YdbDriver")
            .field("config", &self.config)
            .field("ready", &self.is_ready())
            .finish()
    }
}

impl<D: SessionDriver> YdbDriver<D> {
    pub fn new(config: Arc<DialectConfig<D>>) -> Self {
        Self {
            config,
            state: DriverState::Uninitialized,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, DriverState::Ready { .. })
    }

    /// The resolved client driver.
    pub fn session_driver(&self) -> YdbResult<&Arc<D>> {
        match &self.state {
            DriverState::Ready { driver, .. } => Ok(driver),
            DriverState::Uninitialized | DriverState::Resolved { .. } => {
                Err(YdbError::NotInitialized)
            }
        }
    }

    async fn wait_ready(driver: &D, budget: std::time::Duration) -> YdbResult<()> {
        // A driver that never answers is held to the same budget as one that says "not ready".
        match tokio::time::timeout(budget, driver.ready(budget)).await {
            Ok(true) => Ok(()),
            Ok(false) | Err(_) => Err(YdbError::DriverNotReady(budget)),
        }
    }
}

impl<D: SessionDriver> Driver for YdbDriver<D> {
    type Connection = YdbConnection<D>;

    fn init(&mut self) -> impl Future<Output = YdbResult<()>> + Send {
        async move {
            let resolved = match &self.state {
                DriverState::Ready { .. } => {
                    tracing::debug!(target: "ydb_dialect.driver", "driver already initialized");
                    return Ok(());
                }
                DriverState::Resolved { driver } => Some(Arc::clone(driver)),
                DriverState::Uninitialized => None,
            };
            let driver = match resolved {
                Some(driver) => driver,
                None => {
                    let driver = self.config.driver_source().resolve().await?;
                    // Kept on failure below; destroy() releases it.
                    self.state = DriverState::Resolved {
                        driver: Arc::clone(&driver),
                    };
                    driver
                }
            };

            let budget = self.config.ready_timeout_duration();
            tracing::debug!(
                target: "ydb_dialect.driver",
                timeout_ms = budget.as_millis() as u64,
                "waiting for driver"
            );
            Self::wait_ready(&driver, budget).await?;

            let connection = YdbConnection::new(Arc::clone(&driver), self.config.retry_policy());
            if let Some(hook) = self.config.connection_hook() {
                hook(connection.clone()).await?;
            }

            self.state = DriverState::Ready { driver, connection };
            tracing::info!(target: "ydb_dialect.driver", "driver ready");
            Ok(())
        }
    }

    fn acquire_connection(&self) -> YdbResult<Self::Connection> {
        match &self.state {
            DriverState::Ready { connection, .. } => Ok(connection.clone()),
            DriverState::Uninitialized | DriverState::Resolved { .. } => {
                Err(YdbError::NotInitialized)
            }
        }
    }

    fn begin_transaction(&self, _conn: &Self::Connection) -> YdbResult<()> {
        Err(YdbError::NotImplemented("transactions"))
    }

    fn commit_transaction(&self, _conn: &Self::Connection) -> YdbResult<()> {
        Err(YdbError::NotImplemented("transactions"))
    }

    fn rollback_transaction(&self, _conn: &Self::Connection) -> YdbResult<()> {
        Err(YdbError::NotImplemented("transactions"))
    }

    fn release_connection(&self, _conn: Self::Connection) {}

    fn destroy(&mut self) -> impl Future<Output = ()> + Send {
        async move {
            match std::mem::replace(&mut self.state, DriverState::Uninitialized) {
                DriverState::Ready { driver, .. } | DriverState::Resolved { driver } => {
                    driver.destroy().await;
                    tracing::info!(target: "ydb_dialect.driver", "driver destroyed");
                }
                DriverState::Uninitialized => {
                    tracing::debug!(target: "ydb_dialect.driver", "destroy on idle driver");
                }
            }
        }
    }
}
