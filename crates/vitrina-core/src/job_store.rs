use std::future::Future;

use crate::error::AppError;
use crate::job::{Job, NewJob};

/// Persistent store of job records — the sole owner of job state.
///
/// `complete_job` and `fail_job` are the only mutators of
/// `status`/`result`/`attempts`/`updated_at` and must apply atomically for
/// a single job id. Implementations must also guard the terminal
/// transitions: a job that is no longer `pending` is never overwritten.
pub trait JobStore: Send + Sync + Clone {
    /// Insert a new job with status `pending`, zero attempts, empty result.
    fn insert_job(&self, job: NewJob) -> impl Future<Output = Result<Job, AppError>> + Send;

    /// Fetch a job by id. `None` for an unknown id, never a zero-valued job.
    fn get_job(&self, id: i64) -> impl Future<Output = Result<Option<Job>, AppError>> + Send;

    /// Up to `limit` most recently created jobs, newest first.
    fn list_jobs(&self, limit: usize) -> impl Future<Output = Result<Vec<Job>, AppError>> + Send;

    /// The single oldest `pending` job (lowest id among equal timestamps).
    ///
    /// This is a read-only claim: with one worker there is no in-progress
    /// status, so nothing is marked. Running more than one worker against a
    /// shared store requires turning this into a compare-and-swap.
    fn next_pending(&self) -> impl Future<Output = Result<Option<Job>, AppError>> + Send;

    /// Terminal transition `pending -> done`: stores the serialized
    /// snapshot, bumps `attempts` by one, refreshes `updated_at`.
    fn complete_job(
        &self,
        id: i64,
        result: &str,
    ) -> impl Future<Output = Result<(), AppError>> + Send;

    /// Terminal transition `pending -> failed`: stores the error summary,
    /// bumps `attempts` by one, refreshes `updated_at`.
    fn fail_job(&self, id: i64, error: &str)
    -> impl Future<Output = Result<(), AppError>> + Send;
}
