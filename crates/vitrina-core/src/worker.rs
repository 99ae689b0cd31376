use tokio_util::sync::CancellationToken;

use crate::connector::Connector;
use crate::error::AppError;
use crate::job::{Job, WorkerConfig};
use crate::job_store::JobStore;
use crate::traits::{Extract, Fetcher};

/// Events emitted by the worker for monitoring/logging.
#[derive(Debug, Clone)]
pub enum WorkerEvent<'a> {
    Started {
        worker_id: &'a str,
    },
    Polling,
    JobClaimed {
        job: &'a Job,
    },
    JobStarted {
        job_id: i64,
        url: &'a str,
        connector: Connector,
    },
    JobDone {
        job_id: i64,
    },
    JobFailed {
        job_id: i64,
        error: &'a str,
    },
    Stopped {
        worker_id: &'a str,
    },
}

/// Trait for receiving worker events (decoupled logging).
pub trait WorkerReporter: Send + Sync {
    fn report(&self, event: WorkerEvent<'_>) {
        let _ = event;
    }
}

/// Reporter that uses the `tracing` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingWorkerReporter;

impl WorkerReporter for TracingWorkerReporter {
    fn report(&self, event: WorkerEvent<'_>) {
        match event {
            WorkerEvent::Started { worker_id } => {
                tracing::info!(%worker_id, "Worker started");
            }
            WorkerEvent::Polling => {
                tracing::debug!("Polling for jobs");
            }
            WorkerEvent::JobClaimed { job } => {
                tracing::info!(job_id = %job.id, url = %job.url, "Job claimed");
            }
            WorkerEvent::JobStarted {
                job_id,
                url,
                connector,
            } => {
                tracing::info!(%job_id, %url, %connector, "Processing job");
            }
            WorkerEvent::JobDone { job_id } => {
                tracing::info!(%job_id, "Job done");
            }
            WorkerEvent::JobFailed { job_id, error } => {
                tracing::warn!(%job_id, %error, "Job failed");
            }
            WorkerEvent::Stopped { worker_id } => {
                tracing::info!(%worker_id, "Worker stopped");
            }
        }
    }
}

/// Single polling consumer of the job store.
///
/// Each cycle claims the oldest pending job, runs fetch + extraction, and
/// writes exactly one terminal state back. Fetch failures become `failed`
/// jobs; they never crash the loop. Store failures skip the cycle and are
/// retried on the next poll.
pub struct WorkerService<S, F, E>
where
    S: JobStore,
    F: Fetcher,
    E: Extract,
{
    store: S,
    fetcher: F,
    extractor: E,
    config: WorkerConfig,
}

impl<S, F, E> WorkerService<S, F, E>
where
    S: JobStore,
    F: Fetcher,
    E: Extract,
{
    pub fn new(store: S, fetcher: F, extractor: E, config: WorkerConfig) -> Self {
        Self {
            store,
            fetcher,
            extractor,
            config,
        }
    }

    /// Run the worker loop until cancellation.
    pub async fn run<WR: WorkerReporter>(&self, cancel_token: CancellationToken, reporter: &WR) {
        reporter.report(WorkerEvent::Started {
            worker_id: &self.config.worker_id,
        });

        loop {
            if cancel_token.is_cancelled() {
                break;
            }

            reporter.report(WorkerEvent::Polling);

            match self.store.next_pending().await {
                Ok(Some(job)) => {
                    reporter.report(WorkerEvent::JobClaimed { job: &job });
                    self.process_job(&job, reporter).await;
                }
                Ok(None) => {
                    tokio::select! {
                        () = tokio::time::sleep(self.config.poll_interval) => {}
                        () = cancel_token.cancelled() => break,
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to claim job");
                    tokio::select! {
                        () = tokio::time::sleep(self.config.poll_interval * 2) => {}
                        () = cancel_token.cancelled() => break,
                    }
                }
            }
        }

        reporter.report(WorkerEvent::Stopped {
            worker_id: &self.config.worker_id,
        });
    }

    /// Execute one claimed job and commit its terminal state.
    pub async fn process_job<WR: WorkerReporter>(&self, job: &Job, reporter: &WR) {
        let connector = Connector::resolve(&job.connector, &job.url);
        reporter.report(WorkerEvent::JobStarted {
            job_id: job.id,
            url: &job.url,
            connector,
        });

        match self.execute(job, connector).await {
            Ok(payload) => {
                reporter.report(WorkerEvent::JobDone { job_id: job.id });
                if let Err(e) = self.store.complete_job(job.id, &payload).await {
                    tracing::error!(job_id = %job.id, error = %e, "Failed to mark job done");
                }
            }
            Err(e) => {
                let error_msg = e.to_string();
                reporter.report(WorkerEvent::JobFailed {
                    job_id: job.id,
                    error: &error_msg,
                });
                if let Err(e) = self.store.fail_job(job.id, &error_msg).await {
                    tracing::error!(job_id = %job.id, error = %e, "Failed to mark job failed");
                }
            }
        }
    }

    /// Fetch the page and run the resolved strategy over it.
    ///
    /// Extraction itself cannot fail — missing fields come back empty —
    /// so the only error sources are the transport and serialization.
    async fn execute(&self, job: &Job, connector: Connector) -> Result<String, AppError> {
        let html = self.fetcher.fetch(&job.url).await?;
        let snapshot = self.extractor.extract(connector, &html, &job.url);
        Ok(serde_json::to_string(&snapshot)?)
    }
}
