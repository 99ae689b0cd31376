use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vitrina_core::DEFAULT_CONNECTOR;
use vitrina_core::job::Job;

// ---------------------------------------------------------------------------
// Enqueue
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct EnqueueRequest {
    pub url: String,
    /// Connector name; omitted means `generic`. Host-based inference may
    /// still route a default connector to a site-specific strategy.
    #[serde(default = "default_connector")]
    pub connector: String,
}

fn default_connector() -> String {
    DEFAULT_CONNECTOR.to_string()
}

#[derive(Debug, Serialize)]
pub struct EnqueueResponse {
    pub job_id: i64,
    pub status: String,
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct JobResponse {
    pub id: i64,
    pub url: String,
    pub status: String,
    /// JSON-encoded product snapshot on done, error summary on failed,
    /// empty while pending.
    pub result: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub attempts: u32,
    pub connector: String,
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        Self {
            id: job.id,
            url: job.url,
            status: job.status.to_string(),
            result: job.result,
            created_at: job.created_at,
            updated_at: job.updated_at,
            attempts: job.attempts,
            connector: job.connector,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListJobsQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobResponse>,
    pub total: usize,
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
