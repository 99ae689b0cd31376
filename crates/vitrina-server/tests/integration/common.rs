use std::sync::Arc;

use axum::Router;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use vitrina_db::Database;
use vitrina_server::routes;
use vitrina_server::state::AppState;

/// In-memory SQLite app for router tests.
///
/// A single pooled connection keeps every query on the same in-memory
/// database for the lifetime of the test.
pub async fn setup_test_app() -> (Router, SqlitePool) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");

    let db = Database::from_pool(pool.clone());
    db.init_schema().await.expect("Failed to initialize schema");

    let state = Arc::new(AppState { db });

    (routes::router(state), pool)
}
