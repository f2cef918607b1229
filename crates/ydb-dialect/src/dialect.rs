//! The dialect facade: one configuration, four collaborators.

use crate::adapter::{DialectAdapter, YdbAdapter};
use crate::compiler::{QueryCompiler, YdbQueryCompiler};
use crate::config::DialectConfig;
use crate::driver::{Driver, YdbDriver};
use crate::introspector::{DatabaseIntrospector, YdbIntrospector};
use crate::session::SessionDriver;
use std::fmt;
use std::sync::Arc;

/// A pluggable database dialect.
pub trait Dialect {
    type Driver: Driver;
    type Compiler: QueryCompiler;
    type Adapter: DialectAdapter;
    type Introspector: DatabaseIntrospector;

    fn create_driver(&self) -> Self::Driver;

    fn create_query_compiler(&self) -> Self::Compiler;

    fn create_adapter(&self) -> Self::Adapter;

    fn create_introspector(&self) -> Self::Introspector;
}

/// The YDB dialect.
///
/// # Example
/// ```ignore
/// use ydb_dialect::{Dialect, DialectConfig, Driver, YdbDialect, qb, SqlQb};
///
/// let dialect = YdbDialect::new(DialectConfig::new(client_driver));
/// let mut driver = dialect.create_driver();
/// driver.init().await?;
/// let conn = driver.acquire_connection()?;
///
/// let rows = qb::select("series").eq("series_id", 1u32).fetch_all::<Row>(&conn).await?;
/// ```
pub struct YdbDialect<D: SessionDriver> {
    config: Arc<DialectConfig<D>>,
}

impl<D: SessionDriver> YdbDialect<D> {
    pub fn new(config: DialectConfig<D>) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &DialectConfig<D> {
        &self.config
    }
}

impl<D: SessionDriver> Clone for YdbDialect<D> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
        }
    }
}

impl<D: SessionDriver> fmt::Debug for YdbDialect<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YdbDialect")
            .field("config", &self.config)
            .finish()
    }
}

impl<D: SessionDriver> Dialect for YdbDialect<D> {
    type Driver = YdbDriver<D>;
    type Compiler = YdbQueryCompiler;
    type Adapter = YdbAdapter;
    type Introspector = YdbIntrospector;

    fn create_driver(&self) -> Self::Driver {
        YdbDriver::new(Arc::clone(&self.config))
    }

    fn create_query_compiler(&self) -> Self::Compiler {
        YdbQueryCompiler
    }

    fn create_adapter(&self) -> Self::Adapter {
        YdbAdapter
    }

    fn create_introspector(&self) -> Self::Introspector {
        YdbIntrospector
    }
}
