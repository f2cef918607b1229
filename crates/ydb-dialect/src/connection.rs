//! Executing compiled queries over leased YDB sessions.

use crate::compiler::CompiledQuery;
use crate::config::RetryPolicy;
use crate::error::{YdbError, YdbResult};
use crate::render::{QueryParams, named_params, render, truncate_sql_bytes};
use crate::row::{FromRow, Row, decode_result_set};
use crate::session::{
    DriverError, ExecuteQuerySettings, ExecuteResult, Session, SessionDriver,
};
use futures_core::Stream;
use std::fmt;
use std::future::Future;
use std::panic::Location;
use std::pin::Pin;
use std::sync::Arc;

const LOG_SQL_MAX_BYTES: usize = 200;

/// Rows delivered incrementally.
pub type RowStream = Pin<Box<dyn Stream<Item = YdbResult<Row>> + Send>>;

/// The outcome of one executed query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    /// Rows of the first result set; empty when there was none.
    pub rows: Vec<Row>,
}

/// A connection the query builder executes compiled queries on.
pub trait DatabaseConnection: Send + Sync {
    /// Execute a compiled query.
    ///
    /// Failures are wrapped in [`YdbError::Execute`] pointing at the caller.
    #[track_caller]
    fn execute_query(
        &self,
        query: CompiledQuery,
    ) -> impl Future<Output = YdbResult<QueryResult>> + Send {
        self.execute_query_at(query, Location::caller())
    }

    /// Execute a compiled query, attributing failures to `location`.
    fn execute_query_at(
        &self,
        query: CompiledQuery,
        location: &'static Location<'static>,
    ) -> impl Future<Output = YdbResult<QueryResult>> + Send;

    /// Execute a compiled query, yielding rows as they arrive.
    fn stream_query(&self, query: CompiledQuery) -> YdbResult<RowStream>;
}

/// The single YDB connection handed out by [`YdbDriver`](crate::YdbDriver).
///
/// Cheap to clone; clones share the underlying client driver.
pub struct YdbConnection<D: SessionDriver> {
    driver: Arc<D>,
    retry: RetryPolicy,
}

impl<D: SessionDriver> Clone for YdbConnection<D> {
    fn clone(&self) -> Self {
        Self {
            driver: Arc::clone(&self.driver),
            retry: self.retry,
        }
    }
}

impl<D: SessionDriver> fmt::Debug for YdbConnection<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YdbConnection")
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl<D: SessionDriver> YdbConnection<D> {
    pub(crate) fn new(driver: Arc<D>, retry: RetryPolicy) -> Self {
        Self { driver, retry }
    }

    /// The client driver behind this connection.
    pub fn driver(&self) -> &Arc<D> {
        &self.driver
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    async fn execute(&self, query: CompiledQuery) -> YdbResult<QueryResult> {
        let (sql, parameters) = query.into_parts();
        let text = render(&sql, &parameters)?;
        let params = named_params(parameters);

        if tracing::enabled!(target: "ydb_dialect.sql", tracing::Level::DEBUG) {
            let shown = truncate_sql_bytes(&text, LOG_SQL_MAX_BYTES);
            let ellipsis = if shown.len() < text.len() { "..." } else { "" };
            tracing::debug!(
                target: "ydb_dialect.sql",
                param_count = params.len(),
                sql = %format_args!("{shown}{ellipsis}"),
                "executing query"
            );
        }

        let result = self.with_session(&text, &params).await?;
        let rows = match result.result_sets.first() {
            Some(result_set) => decode_result_set(result_set)?,
            None => Vec::new(),
        };
        Ok(QueryResult { rows })
    }

    /// Lease a session for the whole retry loop and give it back afterwards,
    /// whatever the outcome.
    async fn with_session(&self, text: &str, params: &QueryParams) -> YdbResult<ExecuteResult> {
        let mut session = self.driver.acquire_session().await?;
        let result = self.with_retries(&mut session, text, params).await;
        self.driver.release_session(session).await;
        result
    }

    async fn with_retries(
        &self,
        session: &mut D::Session,
        text: &str,
        params: &QueryParams,
    ) -> YdbResult<ExecuteResult> {
        let max_attempts = self.retry.attempts();
        let mut attempt = 1;
        loop {
            match prepare_and_execute(session, text, params).await {
                Ok(result) => return Ok(result),
                Err(err) if err.is_retryable() && attempt < max_attempts => {
                    tracing::warn!(
                        target: "ydb_dialect.retry",
                        attempt,
                        max_attempts,
                        error = %err,
                        "retrying query"
                    );
                    let delay = self.retry.delay();
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    attempt += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

async fn prepare_and_execute<S: Session>(
    session: &mut S,
    text: &str,
    params: &QueryParams,
) -> Result<ExecuteResult, DriverError> {
    let prepared = session.prepare_query(text).await?;
    let settings = ExecuteQuerySettings {
        keep_in_cache: true,
    };
    session.execute_query(&prepared, params, &settings).await
}

impl<D: SessionDriver> DatabaseConnection for YdbConnection<D> {
    fn execute_query_at(
        &self,
        query: CompiledQuery,
        location: &'static Location<'static>,
    ) -> impl Future<Output = YdbResult<QueryResult>> + Send {
        async move {
            self.execute(query)
                .await
                .map_err(|e| e.at("execute_query", location))
        }
    }

    fn stream_query(&self, _query: CompiledQuery) -> YdbResult<RowStream> {
        Err(YdbError::StreamingNotSupported)
    }
}

// Shared execution paths behind `fetch_*` on fragments, raw queries and builders.

pub(crate) async fn fetch_all_at<T: FromRow>(
    conn: &impl DatabaseConnection,
    query: YdbResult<CompiledQuery>,
    location: &'static Location<'static>,
) -> YdbResult<Vec<T>> {
    let query = query.map_err(|e| e.at("compile", location))?;
    let result = conn.execute_query_at(query, location).await?;
    result
        .rows
        .iter()
        .map(T::from_row)
        .collect::<YdbResult<Vec<_>>>()
        .map_err(|e| e.at("fetch_all", location))
}

pub(crate) async fn fetch_opt_at<T: FromRow>(
    conn: &impl DatabaseConnection,
    query: YdbResult<CompiledQuery>,
    location: &'static Location<'static>,
) -> YdbResult<Option<T>> {
    let query = query.map_err(|e| e.at("compile", location))?;
    let result = conn.execute_query_at(query, location).await?;
    result
        .rows
        .first()
        .map(T::from_row)
        .transpose()
        .map_err(|e| e.at("fetch_opt", location))
}

pub(crate) async fn fetch_one_at<T: FromRow>(
    conn: &impl DatabaseConnection,
    query: YdbResult<CompiledQuery>,
    location: &'static Location<'static>,
) -> YdbResult<T> {
    fetch_opt_at(conn, query, location).await?.ok_or_else(|| {
        YdbError::not_found("query returned no rows").at("fetch_one", location)
    })
}

pub(crate) async fn execute_at(
    conn: &impl DatabaseConnection,
    query: YdbResult<CompiledQuery>,
    location: &'static Location<'static>,
) -> YdbResult<()> {
    let query = query.map_err(|e| e.at("compile", location))?;
    conn.execute_query_at(query, location).await.map(|_| ())
}
