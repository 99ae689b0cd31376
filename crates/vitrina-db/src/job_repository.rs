use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use vitrina_core::error::AppError;
use vitrina_core::job::{Job, JobStatus, NewJob};
use vitrina_core::job_store::JobStore;

/// SQLite-backed job store.
///
/// Every mutation is a single UPDATE scoped to one job id, so a record is
/// either fully transitioned or untouched. Terminal transitions carry an
/// `AND status = 'pending'` guard: once a job is done or failed, nothing
/// rewrites it.
#[derive(Clone)]
pub struct JobRepository {
    pool: SqlitePool,
}

impl JobRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct JobRow {
    id: i64,
    url: String,
    connector: String,
    status: String,
    result: String,
    attempts: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Job {
            id: row.id,
            url: row.url,
            connector: row.connector,
            status: row.status.parse().unwrap_or(JobStatus::Pending),
            result: row.result,
            attempts: row.attempts as u32,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl JobStore for JobRepository {
    async fn insert_job(&self, job: NewJob) -> Result<Job, AppError> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, JobRow>(
            r#"
            INSERT INTO jobs (url, connector, status, result, attempts, created_at, updated_at)
            VALUES (?1, ?2, 'pending', '', 0, ?3, ?3)
            RETURNING *
            "#,
        )
        .bind(&job.url)
        .bind(&job.connector)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.into())
    }

    async fn get_job(&self, id: i64) -> Result<Option<Job>, AppError> {
        let row = sqlx::query_as::<_, JobRow>(r#"SELECT * FROM jobs WHERE id = ?1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn list_jobs(&self, limit: usize) -> Result<Vec<Job>, AppError> {
        let rows = sqlx::query_as::<_, JobRow>(
            r#"
            SELECT * FROM jobs
            ORDER BY created_at DESC, id DESC
            LIMIT ?1
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn next_pending(&self) -> Result<Option<Job>, AppError> {
        let row = sqlx::query_as::<_, JobRow>(
            r#"
            SELECT * FROM jobs
            WHERE status = 'pending'
            ORDER BY created_at ASC, id ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn complete_job(&self, id: i64, result: &str) -> Result<(), AppError> {
        let outcome = sqlx::query(
            r#"
            UPDATE jobs
            SET status = 'done', result = ?2, attempts = attempts + 1, updated_at = ?3
            WHERE id = ?1 AND status = 'pending'
            "#,
        )
        .bind(id)
        .bind(result)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if outcome.rows_affected() == 0 {
            tracing::warn!(job_id = %id, "Skipped done transition: job not pending");
        }
        Ok(())
    }

    async fn fail_job(&self, id: i64, error: &str) -> Result<(), AppError> {
        let outcome = sqlx::query(
            r#"
            UPDATE jobs
            SET status = 'failed', result = ?2, attempts = attempts + 1, updated_at = ?3
            WHERE id = ?1 AND status = 'pending'
            "#,
        )
        .bind(id)
        .bind(error)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if outcome.rows_affected() == 0 {
            tracing::warn!(job_id = %id, "Skipped failed transition: job not pending");
        }
        Ok(())
    }
}
