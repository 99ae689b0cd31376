use url::Url;

use crate::error::AppError;
use crate::job::{Job, NewJob};
use crate::job_store::JobStore;

/// Default connector when the enqueue request names none.
pub const DEFAULT_CONNECTOR: &str = "generic";

/// Enqueue/list/get facade used by the HTTP boundary.
///
/// Enqueue is an asynchronous hand-off: it validates the URL, inserts a
/// `pending` record, and returns without waiting for the worker.
#[derive(Clone)]
pub struct JobQueue<S: JobStore> {
    store: S,
}

impl<S: JobStore> JobQueue<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validate the URL and insert a new pending job.
    ///
    /// Only syntactically valid http/https URLs are accepted; anything else
    /// is rejected before a job record exists.
    pub async fn enqueue(&self, url: &str, connector: &str) -> Result<Job, AppError> {
        let parsed =
            Url::parse(url).map_err(|e| AppError::InvalidUrl(format!("{url}: {e}")))?;
        match parsed.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(AppError::InvalidUrl(format!(
                    "{url}: scheme '{scheme}' is not allowed (only http/https)"
                )));
            }
        }

        let connector = if connector.is_empty() {
            DEFAULT_CONNECTOR
        } else {
            connector
        };

        self.store.insert_job(NewJob::new(url, connector)).await
    }

    /// Up to `limit` most recently created jobs, newest first.
    pub async fn list(&self, limit: usize) -> Result<Vec<Job>, AppError> {
        self.store.list_jobs(limit).await
    }

    /// Look up a job by id. `None` maps to a 404 at the boundary.
    pub async fn get(&self, id: i64) -> Result<Option<Job>, AppError> {
        self.store.get_job(id).await
    }
}
