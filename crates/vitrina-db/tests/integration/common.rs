use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use vitrina_db::Database;

/// Open an in-memory SQLite database with the schema applied.
///
/// A single pooled connection keeps every query on the same in-memory
/// database for the lifetime of the test.
pub async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");

    Database::from_pool(pool.clone())
        .init_schema()
        .await
        .expect("Failed to initialize schema");

    pool
}
