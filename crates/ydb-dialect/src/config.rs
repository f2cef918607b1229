//! Dialect configuration.

use crate::connection::YdbConnection;
use crate::error::YdbResult;
use crate::session::SessionDriver;
use futures_core::future::BoxFuture;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Default budget for the driver to become ready.
pub const DEFAULT_READY_TIMEOUT: Duration = Duration::from_millis(5000);

/// An async constructor for the client driver, run once by `init()`.
pub type DriverFactory<D> = Arc<dyn Fn() -> BoxFuture<'static, YdbResult<D>> + Send + Sync>;

/// Called once with the freshly created connection.
pub type ConnectionHook<D> =
    Arc<dyn Fn(YdbConnection<D>) -> BoxFuture<'static, YdbResult<()>> + Send + Sync>;

/// Where the client driver comes from.
pub enum DriverSource<D> {
    /// An already constructed driver.
    Handle(Arc<D>),
    /// Built lazily on `init()`.
    Factory(DriverFactory<D>),
}

impl<D> DriverSource<D> {
    pub(crate) async fn resolve(&self) -> YdbResult<Arc<D>> {
        match self {
            DriverSource::Handle(driver) => Ok(Arc::clone(driver)),
            DriverSource::Factory(factory) => factory().await.map(Arc::new),
        }
    }
}

impl<D> Clone for DriverSource<D> {
    fn clone(&self) -> Self {
        match self {
            DriverSource::Handle(driver) => DriverSource::Handle(Arc::clone(driver)),
            DriverSource::Factory(factory) => DriverSource::Factory(Arc::clone(factory)),
        }
    }
}

impl<D> fmt::Debug for DriverSource<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverSource::Handle(_) => f.write_str("DriverSource::Handle(..)"),
            DriverSource::Factory(_) => f.write_str("DriverSource::Factory(..)"),
        }
    }
}

/// How transient session failures are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            backoff: Duration::from_millis(10),
        }
    }
}

impl RetryPolicy {
    /// Create a policy with defaults (2 attempts, 10ms apart).
    pub fn new() -> Self {
        Self::default()
    }

    /// No retries: every failure surfaces immediately.
    pub fn none() -> Self {
        Self::default().max_attempts(1)
    }

    /// Total attempts including the first one. Clamped to at least 1.
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Delay between attempts.
    pub fn backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.backoff
    }
}

/// Configuration for [`YdbDialect`](crate::YdbDialect).
///
/// Frozen once handed to the dialect.
pub struct DialectConfig<D: SessionDriver> {
    driver: DriverSource<D>,
    on_create_connection: Option<ConnectionHook<D>>,
    ready_timeout: Duration,
    retry: RetryPolicy,
}

impl<D: SessionDriver> DialectConfig<D> {
    /// Use an existing driver.
    pub fn new(driver: impl Into<Arc<D>>) -> Self {
        Self::with_source(DriverSource::Handle(driver.into()))
    }

    /// Construct the driver on `init()`.
    ///
    /// # Example
    /// ```ignore
    /// let config = DialectConfig::from_factory(|| async {
    ///     Ok(MyDriver::connect("grpc://localhost:2136/local").await?)
    /// });
    /// ```
    pub fn from_factory<F, Fut>(factory: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = YdbResult<D>> + Send + 'static,
    {
        let factory: DriverFactory<D> =
            Arc::new(move || -> BoxFuture<'static, YdbResult<D>> { Box::pin(factory()) });
        Self::with_source(DriverSource::Factory(factory))
    }

    pub fn with_source(driver: DriverSource<D>) -> Self {
        Self {
            driver,
            on_create_connection: None,
            ready_timeout: DEFAULT_READY_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }

    /// Run `hook` once with the connection right after it is created.
    pub fn on_create_connection<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(YdbConnection<D>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = YdbResult<()>> + Send + 'static,
    {
        let hook: ConnectionHook<D> =
            Arc::new(move |conn| -> BoxFuture<'static, YdbResult<()>> { Box::pin(hook(conn)) });
        self.on_create_connection = Some(hook);
        self
    }

    /// How long `init()` waits for the driver to become ready.
    pub fn ready_timeout(mut self, timeout: Duration) -> Self {
        self.ready_timeout = timeout;
        self
    }

    pub fn retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    pub fn driver_source(&self) -> &DriverSource<D> {
        &self.driver
    }

    pub fn connection_hook(&self) -> Option<&ConnectionHook<D>> {
        self.on_create_connection.as_ref()
    }

    pub fn ready_timeout_duration(&self) -> Duration {
        self.ready_timeout
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }
}

impl<D: SessionDriver> fmt::Debug for DialectConfig<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialectConfig")
            .field("driver", &self.driver)
            .field("on_create_connection", &self.on_create_connection.is_some())
            .field("ready_timeout", &self.ready_timeout)
            .field("retry", &self.retry)
            .finish()
    }
}
