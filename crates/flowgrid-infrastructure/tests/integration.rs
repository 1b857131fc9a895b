//! Integration tests against a live Postgres instance
//!
//! Ignored by default. Point `FLOWGRID_TEST_DATABASE_URL` at a disposable
//! database and run with `cargo test -- --ignored`.

use flowgrid_domain::error::Error;
use flowgrid_infrastructure::config::DatabaseConfig;
use flowgrid_infrastructure::services::DatabaseService;

fn live_service() -> DatabaseService {
    let url = std::env::var("FLOWGRID_TEST_DATABASE_URL")
        .expect("FLOWGRID_TEST_DATABASE_URL must be set for live database tests");
    DatabaseService::new(&DatabaseConfig {
        url: Some(url),
        pool_size: 2,
    })
    .expect("database service should build from the test URL")
}

async fn reset_probe_table(service: &DatabaseService) {
    service
        .session_scope(|tx| {
            tx.batch_execute(
                "DROP TABLE IF EXISTS session_probe; CREATE TABLE session_probe (id INT)",
            )
            .map_err(|e| Error::database_with_source("failed to reset probe table", e))
        })
        .await
        .expect("probe table reset should succeed");
}

async fn probe_count(service: &DatabaseService) -> i64 {
    service
        .session_scope(|tx| {
            let row = tx
                .query_one("SELECT COUNT(*) FROM session_probe", &[])
                .map_err(|e| Error::database_with_source("count failed", e))?;
            Ok(row.get::<_, i64>(0))
        })
        .await
        .expect("count query should succeed")
}

#[tokio::test]
#[ignore = "requires a live Postgres at FLOWGRID_TEST_DATABASE_URL"]
async fn session_scope_commits_on_success() {
    let service = live_service();
    reset_probe_table(&service).await;

    service
        .session_scope(|tx| {
            tx.execute("INSERT INTO session_probe (id) VALUES (1)", &[])
                .map_err(|e| Error::database_with_source("insert failed", e))?;
            Ok(())
        })
        .await
        .unwrap();

    assert_eq!(probe_count(&service).await, 1);
}

#[tokio::test]
#[ignore = "requires a live Postgres at FLOWGRID_TEST_DATABASE_URL"]
async fn session_scope_rolls_back_on_error() {
    let service = live_service();
    reset_probe_table(&service).await;

    let err = service
        .session_scope(|tx| {
            tx.execute("INSERT INTO session_probe (id) VALUES (1)", &[])
                .map_err(|e| Error::database_with_source("insert failed", e))?;
            // The error must surface unchanged and undo the insert
            Err::<(), _>(Error::internal("deliberate failure"))
        })
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Internal { .. }));
    assert!(err.to_string().contains("deliberate failure"));
    assert_eq!(probe_count(&service).await, 0);
}
