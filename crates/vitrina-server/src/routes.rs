use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};

use vitrina_core::JobQueue;

use crate::dto::{
    EnqueueRequest, EnqueueResponse, ErrorResponse, HealthResponse, JobListResponse, JobResponse,
    ListJobsQuery,
};
use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_LIST_LIMIT: usize = 50;
const MAX_LIST_LIMIT: usize = 100;

/// Build the full router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/enqueue", post(enqueue))
        .route("/jobs", get(list_jobs))
        .route("/jobs/{id}", get(get_job))
        .route("/health", get(health))
        .with_state(state)
}

/// Validate the URL and hand the job off to the queue; the worker picks it
/// up asynchronously.
pub async fn enqueue(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<EnqueueRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let queue = JobQueue::new(state.db.job_repo());
    let job = queue.enqueue(&body.url, &body.connector).await?;

    let response = EnqueueResponse {
        job_id: job.id,
        status: "enqueued".to_string(),
    };

    Ok((StatusCode::ACCEPTED, axum::Json(response)))
}

pub async fn list_jobs(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListJobsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT).min(MAX_LIST_LIMIT);

    let queue = JobQueue::new(state.db.job_repo());
    let jobs = queue.list(limit).await?;
    let total = jobs.len();

    let response = JobListResponse {
        jobs: jobs.into_iter().map(JobResponse::from).collect(),
        total,
    };

    Ok(axum::Json(response))
}

pub async fn get_job(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let queue = JobQueue::new(state.db.job_repo());

    match queue.get(id).await? {
        Some(job) => Ok(axum::Json(JobResponse::from(job)).into_response()),
        None => {
            let body = ErrorResponse {
                error: "not_found".to_string(),
                message: format!("Job not found: {id}"),
            };
            Ok((StatusCode::NOT_FOUND, axum::Json(body)).into_response())
        }
    }
}

pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let db_status = match state.db.health_check().await {
        Ok(()) => "ok",
        Err(_) => "error",
    };

    let status = if db_status == "ok" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = HealthResponse {
        status: if db_status == "ok" {
            "healthy"
        } else {
            "unhealthy"
        },
        database: db_status,
    };

    (status, axum::Json(response))
}
