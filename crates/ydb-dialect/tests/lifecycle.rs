mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use common::{MemoryDriver, ReadyMode, init_tracing};
use ydb_dialect::qb::{self, SqlQb};
use ydb_dialect::{
    DatabaseIntrospector, DatabaseMetadataOptions, Dialect, DialectAdapter, DialectConfig, Driver,
    QueryCompiler, Row, YdbDialect, YdbError, sql,
};

#[tokio::test]
async fn connection_requires_init() {
    init_tracing();
    let probe = MemoryDriver::new();
    let dialect = YdbDialect::new(probe.config());
    let driver = dialect.create_driver();

    assert!(!driver.is_ready());
    assert!(matches!(
        driver.acquire_connection(),
        Err(YdbError::NotInitialized)
    ));
    assert_eq!(probe.ready_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn driver_that_never_becomes_ready() {
    let probe = MemoryDriver::with_mode(ReadyMode::NeverReady);
    let mut driver = YdbDialect::new(probe.config()).create_driver();

    let err = driver.init().await.unwrap_err();
    assert!(err.is_not_ready());
    assert_eq!(err.to_string(), "Driver has not become ready in 5000ms!");
    assert!(!driver.is_ready());
}

#[tokio::test(start_paused = true)]
async fn hanging_readiness_times_out() {
    let probe = MemoryDriver::with_mode(ReadyMode::Hang);
    let config = probe.config().ready_timeout(Duration::from_millis(250));
    let mut driver = YdbDialect::new(config).create_driver();

    let err = driver.init().await.unwrap_err();
    assert_eq!(err.to_string(), "Driver has not become ready in 250ms!");
    assert!(matches!(driver.acquire_connection(), Err(YdbError::NotInitialized)));
}

#[tokio::test(start_paused = true)]
async fn destroy_after_failed_readiness_releases_driver() {
    let probe = MemoryDriver::with_mode(ReadyMode::NeverReady);
    let mut driver = YdbDialect::new(probe.config()).create_driver();

    assert!(driver.init().await.is_err());
    assert!(driver.init().await.is_err());
    assert_eq!(probe.ready_calls(), 2);

    driver.destroy().await;
    driver.destroy().await;
    assert_eq!(probe.destroyed(), 1);
}

#[tokio::test]
async fn hook_runs_once_with_the_connection() {
    let probe = MemoryDriver::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let config = probe.config().on_create_connection(move |conn| {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            sql("SELECT 1").execute(&conn).await
        }
    });
    let mut driver = YdbDialect::new(config).create_driver();

    driver.init().await.unwrap();
    driver.init().await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(probe.ready_calls(), 1);
    assert_eq!(probe.texts(), ["SELECT 1;"]);
}

#[tokio::test]
async fn failing_hook_fails_init() {
    let probe = MemoryDriver::new();
    let config = probe
        .config()
        .on_create_connection(|_conn| async { Err(YdbError::validation("rejected")) });
    let mut driver = YdbDialect::new(config).create_driver();

    assert!(driver.init().await.is_err());
    assert!(!driver.is_ready());
}

#[tokio::test]
async fn factory_runs_on_init() {
    let built = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&built);
    let config = DialectConfig::from_factory(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        async { Ok(MemoryDriver::new()) }
    });
    let mut driver = YdbDialect::new(config).create_driver();
    assert_eq!(built.load(Ordering::SeqCst), 0);

    driver.init().await.unwrap();
    assert_eq!(built.load(Ordering::SeqCst), 1);

    let conn = driver.acquire_connection().unwrap();
    let rows: Vec<Row> = qb::select("series").fetch_all(&conn).await.unwrap();
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn failed_hook_keeps_factory_driver_for_destroy() {
    let probe = MemoryDriver::new();
    let built = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&built);
    let source = probe.clone();
    let config = DialectConfig::from_factory(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        let driver = source.clone();
        async move { Ok(driver) }
    })
    .on_create_connection(|_conn| async { Err(YdbError::validation("rejected")) });
    let mut driver = YdbDialect::new(config).create_driver();

    assert!(driver.init().await.is_err());
    assert!(driver.init().await.is_err());
    // The factory runs once; the retry reuses the resolved driver.
    assert_eq!(built.load(Ordering::SeqCst), 1);
    assert!(matches!(driver.acquire_connection(), Err(YdbError::NotInitialized)));

    driver.destroy().await;
    assert_eq!(probe.destroyed(), 1);
    assert!(!driver.is_ready());
}

#[tokio::test]
async fn acquire_hands_out_the_same_connection() {
    let probe = MemoryDriver::new();
    let mut driver = YdbDialect::new(probe.config()).create_driver();
    driver.init().await.unwrap();

    let a = driver.acquire_connection().unwrap();
    let b = driver.acquire_connection().unwrap();
    assert!(Arc::ptr_eq(a.driver(), b.driver()));
    driver.release_connection(a);
    driver.release_connection(b);
    assert!(driver.is_ready());
}

#[tokio::test]
async fn destroy_is_idempotent() {
    let probe = MemoryDriver::new();
    let mut driver = YdbDialect::new(probe.config()).create_driver();
    driver.init().await.unwrap();

    driver.destroy().await;
    driver.destroy().await;

    assert_eq!(probe.destroyed(), 1);
    assert!(!driver.is_ready());
    assert!(matches!(driver.acquire_connection(), Err(YdbError::NotInitialized)));
}

#[tokio::test]
async fn transactions_are_not_implemented() {
    let probe = MemoryDriver::new();
    let mut driver = YdbDialect::new(probe.config()).create_driver();
    driver.init().await.unwrap();
    let conn = driver.acquire_connection().unwrap();

    for result in [
        driver.begin_transaction(&conn),
        driver.commit_transaction(&conn),
        driver.rollback_transaction(&conn),
    ] {
        let err = result.unwrap_err();
        assert!(matches!(err, YdbError::NotImplemented("transactions")));
        assert_eq!(err.to_string(), "transactions not implemented");
    }
    assert_eq!(probe.executed(), 0);
}

#[tokio::test]
async fn facade_creates_collaborators() {
    let probe = MemoryDriver::new();
    let dialect = YdbDialect::new(probe.config());

    let compiled = dialect
        .create_query_compiler()
        .compile(&{
            let mut q = sql("SELECT * FROM ");
            q.push_ident("series").unwrap();
            q
        })
        .unwrap();
    assert_eq!(compiled.sql(), "SELECT * FROM `series`");

    let adapter = dialect.create_adapter();
    assert!(!adapter.supports_transactional_ddl());
    assert!(!adapter.supports_returning());
    adapter.acquire_migration_lock().await.unwrap();
    adapter.release_migration_lock().await.unwrap();

    let introspector = dialect.create_introspector();
    assert!(introspector.get_schemas().await.unwrap().is_empty());
    let err = introspector
        .get_tables(DatabaseMetadataOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, YdbError::NotImplemented(_)));

    // Dialect clones share the same configuration.
    let other = dialect.clone();
    assert_eq!(
        other.config().ready_timeout_duration(),
        ydb_dialect::DEFAULT_READY_TIMEOUT
    );
    assert_eq!(
        qb::select("series").compile_with(&dialect.create_query_compiler()).unwrap(),
        compiled
    );
}
