//! Outbound contract with the YDB client library.
//!
//! The dialect never talks to the network itself: it leases a [`Session`]
//! from a [`SessionDriver`], prepares the rendered query text and executes it
//! with named typed parameters. Implement these traits over the real client
//! (or an in-memory fake for tests).

use crate::render::QueryParams;
use crate::types::{Type, Value};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Classification of a failure reported by the client library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverErrorKind {
    /// Connection-level failure (reset, timeout on the wire).
    Transport,
    Unavailable,
    Overloaded,
    /// The session was invalidated server-side.
    BadSession,
    SessionBusy,
    /// Optimistic lock conflict.
    Aborted,
    BadRequest,
    SchemeError,
    Internal,
}

impl DriverErrorKind {
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            DriverErrorKind::Transport
                | DriverErrorKind::Unavailable
                | DriverErrorKind::Overloaded
                | DriverErrorKind::BadSession
                | DriverErrorKind::SessionBusy
                | DriverErrorKind::Aborted
        )
    }
}

/// An error reported by the session layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind:?}: {message}")]
pub struct DriverError {
    pub kind: DriverErrorKind,
    pub message: String,
}

impl DriverError {
    pub fn new(kind: DriverErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Whether the same operation may succeed on another attempt.
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

/// Per-execution options passed to [`Session::execute_query`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecuteQuerySettings {
    /// Ask the server to keep the compiled plan in its query cache.
    pub keep_in_cache: bool,
}

/// A query prepared on a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedQuery {
    text: String,
}

impl PreparedQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A result-set column descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub ty: Type,
}

impl Column {
    pub fn new(name: impl Into<String>, ty: impl Into<Type>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// One result set: column descriptors and rows of wire values in column order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultSet {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Value>>,
}

/// Everything an execution returned.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExecuteResult {
    pub result_sets: Vec<ResultSet>,
}

/// A leased server session.
pub trait Session: Send {
    fn prepare_query(
        &mut self,
        text: &str,
    ) -> impl Future<Output = Result<PreparedQuery, DriverError>> + Send;

    fn execute_query(
        &mut self,
        query: &PreparedQuery,
        params: &QueryParams,
        settings: &ExecuteQuerySettings,
    ) -> impl Future<Output = Result<ExecuteResult, DriverError>> + Send;
}

/// The client library's driver: readiness, the session pool and shutdown.
pub trait SessionDriver: Send + Sync + 'static {
    type Session: Session;

    /// Resolve to `true` once the driver can serve sessions within `timeout`.
    fn ready(&self, timeout: Duration) -> impl Future<Output = bool> + Send;

    fn acquire_session(&self) -> impl Future<Output = Result<Self::Session, DriverError>> + Send;

    /// Return a session to the pool. Called after every lease, success or not.
    fn release_session(&self, session: Self::Session) -> impl Future<Output = ()> + Send;

    fn destroy(&self) -> impl Future<Output = ()> + Send;
}
