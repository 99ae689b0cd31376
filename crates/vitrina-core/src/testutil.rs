//! Test utilities: mock implementations of the core traits.
//!
//! Handwritten mocks for dependency injection in unit tests. All mocks use
//! `Arc<Mutex<_>>` for interior mutability, allowing test assertions on
//! recorded calls.

use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::connector::Connector;
use crate::error::AppError;
use crate::job::{Job, JobStatus, NewJob};
use crate::job_store::JobStore;
use crate::snapshot::ProductSnapshot;
use crate::traits::{Extract, Fetcher};

// ---------------------------------------------------------------------------
// MockFetcher
// ---------------------------------------------------------------------------

/// Mock fetcher that returns a configurable response.
#[derive(Clone)]
pub struct MockFetcher {
    /// Queue of responses. Each call pops the first element.
    /// If empty, returns a default HTML string.
    responses: Arc<Mutex<Vec<Result<String, AppError>>>>,
}

impl MockFetcher {
    pub fn new(html: &str) -> Self {
        Self {
            responses: Arc::new(Mutex::new(vec![Ok(html.to_string())])),
        }
    }

    pub fn with_error(error: AppError) -> Self {
        Self {
            responses: Arc::new(Mutex::new(vec![Err(error)])),
        }
    }
}

impl Fetcher for MockFetcher {
    async fn fetch(&self, _url: &str) -> Result<String, AppError> {
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok("<html><body>default</body></html>".to_string())
        } else {
            responses.remove(0)
        }
    }
}

// ---------------------------------------------------------------------------
// MockExtract
// ---------------------------------------------------------------------------

/// Mock extraction strategy returning a fixed snapshot and recording the
/// connectors it was dispatched with.
#[derive(Clone, Default)]
pub struct MockExtract {
    snapshot: ProductSnapshot,
    connectors: Arc<Mutex<Vec<Connector>>>,
}

impl MockExtract {
    pub fn new(snapshot: ProductSnapshot) -> Self {
        Self {
            snapshot,
            connectors: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn seen_connectors(&self) -> Vec<Connector> {
        self.connectors.lock().unwrap().clone()
    }
}

impl Extract for MockExtract {
    fn extract(&self, connector: Connector, _html: &str, url: &str) -> ProductSnapshot {
        self.connectors.lock().unwrap().push(connector);
        let mut snapshot = self.snapshot.clone();
        if snapshot.source_url.is_empty() {
            snapshot.source_url = url.to_string();
        }
        snapshot
    }
}

// ---------------------------------------------------------------------------
// MockJobStore
// ---------------------------------------------------------------------------

/// Mock job store backed by an in-memory Vec.
#[derive(Clone)]
pub struct MockJobStore {
    jobs: Arc<Mutex<Vec<Job>>>,
    next_id: Arc<Mutex<i64>>,
    claim_error: Arc<Mutex<Option<AppError>>>,
}

impl MockJobStore {
    pub fn empty() -> Self {
        Self {
            jobs: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(Mutex::new(1)),
            claim_error: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_claim_error(error: AppError) -> Self {
        let store = Self::empty();
        *store.claim_error.lock().unwrap() = Some(error);
        store
    }

    /// Synchronously insert a pending job (test setup helper).
    pub fn push_pending(&self, url: &str, connector: &str) -> Job {
        let mut next_id = self.next_id.lock().unwrap();
        let id = *next_id;
        *next_id += 1;

        let now = Utc::now();
        let job = Job {
            id,
            url: url.to_string(),
            connector: connector.to_string(),
            status: JobStatus::Pending,
            result: String::new(),
            attempts: 0,
            created_at: now,
            updated_at: now,
        };
        self.jobs.lock().unwrap().push(job.clone());
        job
    }

    /// Fetch a job by id, panicking if absent (test assertion helper).
    pub fn get(&self, id: i64) -> Job {
        self.jobs
            .lock()
            .unwrap()
            .iter()
            .find(|j| j.id == id)
            .cloned()
            .expect("job should exist")
    }
}

impl JobStore for MockJobStore {
    async fn insert_job(&self, job: NewJob) -> Result<Job, AppError> {
        Ok(self.push_pending(&job.url, &job.connector))
    }

    async fn get_job(&self, id: i64) -> Result<Option<Job>, AppError> {
        let jobs = self.jobs.lock().unwrap();
        Ok(jobs.iter().find(|j| j.id == id).cloned())
    }

    async fn list_jobs(&self, limit: usize) -> Result<Vec<Job>, AppError> {
        let jobs = self.jobs.lock().unwrap();
        let mut sorted: Vec<_> = jobs.iter().cloned().collect();
        sorted.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        sorted.truncate(limit);
        Ok(sorted)
    }

    async fn next_pending(&self) -> Result<Option<Job>, AppError> {
        let mut err = self.claim_error.lock().unwrap();
        if let Some(e) = err.take() {
            return Err(e);
        }

        let jobs = self.jobs.lock().unwrap();
        Ok(jobs
            .iter()
            .filter(|j| j.status == JobStatus::Pending)
            .min_by_key(|j| (j.created_at, j.id))
            .cloned())
    }

    async fn complete_job(&self, id: i64, result: &str) -> Result<(), AppError> {
        let mut jobs = self.jobs.lock().unwrap();
        if let Some(job) = jobs
            .iter_mut()
            .find(|j| j.id == id && j.status == JobStatus::Pending)
        {
            job.status = JobStatus::Done;
            job.result = result.to_string();
            job.attempts += 1;
            job.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn fail_job(&self, id: i64, error: &str) -> Result<(), AppError> {
        let mut jobs = self.jobs.lock().unwrap();
        if let Some(job) = jobs
            .iter_mut()
            .find(|j| j.id == id && j.status == JobStatus::Pending)
        {
            job.status = JobStatus::Failed;
            job.result = error.to_string();
            job.attempts += 1;
            job.updated_at = Utc::now();
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MockReporter
// ---------------------------------------------------------------------------

/// Mock worker reporter that records events.
#[derive(Default)]
pub struct MockReporter {
    pub events: Arc<Mutex<Vec<String>>>,
}

impl MockReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl crate::worker::WorkerReporter for MockReporter {
    fn report(&self, event: crate::worker::WorkerEvent<'_>) {
        let label = match &event {
            crate::worker::WorkerEvent::Started { .. } => "Started",
            crate::worker::WorkerEvent::Polling => "Polling",
            crate::worker::WorkerEvent::JobClaimed { .. } => "JobClaimed",
            crate::worker::WorkerEvent::JobStarted { .. } => "JobStarted",
            crate::worker::WorkerEvent::JobDone { .. } => "JobDone",
            crate::worker::WorkerEvent::JobFailed { .. } => "JobFailed",
            crate::worker::WorkerEvent::Stopped { .. } => "Stopped",
        };
        self.events.lock().unwrap().push(label.to_string());
    }
}
