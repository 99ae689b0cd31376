use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use vitrina_core::AppError;

use crate::config::DatabaseConfig;
use crate::job_repository::JobRepository;

/// Schema statements, idempotent across repeated startups.
const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS jobs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        url TEXT NOT NULL,
        connector TEXT NOT NULL DEFAULT 'generic',
        status TEXT NOT NULL DEFAULT 'pending'
            CHECK (status IN ('pending', 'done', 'failed')),
        result TEXT NOT NULL DEFAULT '',
        attempts INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )"#,
    r#"CREATE INDEX IF NOT EXISTS idx_jobs_pending
        ON jobs(created_at, id) WHERE status = 'pending'"#,
    r#"CREATE INDEX IF NOT EXISTS idx_jobs_created
        ON jobs(created_at DESC, id DESC)"#,
];

/// Central database facade — owns the connection pool, initializes the
/// schema, and vends repository instances.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the SQLite database with the given configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to connect: {e}")))?;

        Ok(Self { pool })
    }

    /// Create a `Database` from an existing pool (useful for testing).
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the jobs table and indexes if they do not exist.
    ///
    /// Safe to call on every startup; a failure here is fatal to startup,
    /// the caller must not proceed without a usable schema.
    pub async fn init_schema(&self) -> Result<(), AppError> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::DatabaseError(format!("Schema init failed: {e}")))?;
        }
        Ok(())
    }

    /// Cheap liveness probe for the health endpoint.
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    /// Get a [`JobRepository`] backed by this pool.
    pub fn job_repo(&self) -> JobRepository {
        JobRepository::new(self.pool.clone())
    }

    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
