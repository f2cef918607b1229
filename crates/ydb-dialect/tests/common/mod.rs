#![allow(dead_code)]

//! In-memory session driver for integration tests.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ydb_dialect::{
    Column, DialectConfig, DriverError, ExecuteQuerySettings, ExecuteResult, PreparedQuery,
    PrimitiveType, QueryParams, ResultSet, Session, SessionDriver, Value,
};

/// How the fake answers `ready()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadyMode {
    Ready,
    /// Answers `false` straight away.
    NeverReady,
    /// Never answers.
    Hang,
}

#[derive(Default)]
struct Shared {
    texts: Mutex<Vec<String>>,
    params: Mutex<Vec<QueryParams>>,
    settings: Mutex<Vec<ExecuteQuerySettings>>,
    failures: Mutex<VecDeque<DriverError>>,
    acquired: AtomicUsize,
    released: AtomicUsize,
    executed: AtomicUsize,
    destroyed: AtomicUsize,
    ready_calls: AtomicUsize,
}

/// A driver over a fixed `series` table.
///
/// Clones share state, so tests keep one clone as a probe.
#[derive(Clone)]
pub struct MemoryDriver {
    mode: ReadyMode,
    shared: Arc<Shared>,
}

impl MemoryDriver {
    pub fn new() -> Self {
        Self::with_mode(ReadyMode::Ready)
    }

    pub fn with_mode(mode: ReadyMode) -> Self {
        Self {
            mode,
            shared: Arc::new(Shared::default()),
        }
    }

    /// Fail the next executions with these errors, in order.
    pub fn fail_with(&self, errors: impl IntoIterator<Item = DriverError>) {
        self.shared.failures.lock().unwrap().extend(errors);
    }

    pub fn texts(&self) -> Vec<String> {
        self.shared.texts.lock().unwrap().clone()
    }

    pub fn params(&self) -> Vec<QueryParams> {
        self.shared.params.lock().unwrap().clone()
    }

    pub fn settings(&self) -> Vec<ExecuteQuerySettings> {
        self.shared.settings.lock().unwrap().clone()
    }

    pub fn acquired(&self) -> usize {
        self.shared.acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.shared.released.load(Ordering::SeqCst)
    }

    pub fn executed(&self) -> usize {
        self.shared.executed.load(Ordering::SeqCst)
    }

    pub fn destroyed(&self) -> usize {
        self.shared.destroyed.load(Ordering::SeqCst)
    }

    pub fn ready_calls(&self) -> usize {
        self.shared.ready_calls.load(Ordering::SeqCst)
    }

    pub fn config(&self) -> DialectConfig<MemoryDriver> {
        DialectConfig::new(self.clone())
    }
}

pub struct MemorySession {
    shared: Arc<Shared>,
}

impl Session for MemorySession {
    fn prepare_query(
        &mut self,
        text: &str,
    ) -> impl Future<Output = Result<PreparedQuery, DriverError>> + Send {
        self.shared.texts.lock().unwrap().push(text.to_string());
        let prepared = PreparedQuery::new(text);
        async move { Ok(prepared) }
    }

    fn execute_query(
        &mut self,
        query: &PreparedQuery,
        params: &QueryParams,
        settings: &ExecuteQuerySettings,
    ) -> impl Future<Output = Result<ExecuteResult, DriverError>> + Send {
        self.shared.executed.fetch_add(1, Ordering::SeqCst);
        self.shared.params.lock().unwrap().push(params.clone());
        self.shared.settings.lock().unwrap().push(*settings);

        let outcome = match self.shared.failures.lock().unwrap().pop_front() {
            Some(err) => Err(err),
            None => Ok(answer(query.text(), params)),
        };
        async move { outcome }
    }
}

impl SessionDriver for MemoryDriver {
    type Session = MemorySession;

    fn ready(&self, _timeout: Duration) -> impl Future<Output = bool> + Send {
        self.shared.ready_calls.fetch_add(1, Ordering::SeqCst);
        let mode = self.mode;
        async move {
            match mode {
                ReadyMode::Ready => true,
                ReadyMode::NeverReady => false,
                ReadyMode::Hang => std::future::pending().await,
            }
        }
    }

    fn acquire_session(&self) -> impl Future<Output = Result<MemorySession, DriverError>> + Send {
        self.shared.acquired.fetch_add(1, Ordering::SeqCst);
        let session = MemorySession {
            shared: Arc::clone(&self.shared),
        };
        async move { Ok(session) }
    }

    fn release_session(&self, _session: MemorySession) -> impl Future<Output = ()> + Send {
        self.shared.released.fetch_add(1, Ordering::SeqCst);
        std::future::ready(())
    }

    fn destroy(&self) -> impl Future<Output = ()> + Send {
        self.shared.destroyed.fetch_add(1, Ordering::SeqCst);
        std::future::ready(())
    }
}

/// (series_id, title, release_date as days since epoch)
const SERIES: [(u64, &str, u32); 2] = [(1, "IT Crowd", 13182), (2, "Silicon Valley", 16166)];

fn answer(text: &str, params: &QueryParams) -> ExecuteResult {
    if !text.contains("FROM `series`") {
        return ExecuteResult::default();
    }

    let filter = match params.get("$p1").map(|p| p.value()) {
        Some(Value::Uint32(id)) => Some(u64::from(*id)),
        _ => None,
    };

    let mut rows: Vec<Vec<Value>> = SERIES
        .iter()
        .filter(|(id, _, _)| filter.is_none_or(|f| f == *id))
        .map(|(id, title, date)| {
            vec![
                Value::Uint64(*id),
                Value::Text(title.to_string()),
                Value::Uint32(*date),
            ]
        })
        .collect();
    if text.contains("DESC") {
        rows.reverse();
    }

    ExecuteResult {
        result_sets: vec![ResultSet {
            columns: vec![
                Column::new("series_id", PrimitiveType::Uint64),
                Column::new("title", PrimitiveType::Utf8),
                Column::new("release_date", PrimitiveType::Date),
            ],
            rows,
        }],
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
