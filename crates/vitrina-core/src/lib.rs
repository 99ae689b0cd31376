//! Core of the vitrina product-page scraper: job lifecycle types, the
//! persistent job store contract, connector registry, queue facade, and the
//! single-consumer polling worker.

pub mod connector;
pub mod error;
pub mod job;
pub mod job_store;
pub mod queue;
pub mod snapshot;
pub mod testutil;
pub mod traits;
pub mod worker;

pub use connector::{Connector, normalize_price};
pub use error::AppError;
pub use job::{Job, JobStatus, NewJob, WorkerConfig};
pub use job_store::JobStore;
pub use queue::{DEFAULT_CONNECTOR, JobQueue};
pub use snapshot::ProductSnapshot;
pub use traits::{Extract, Fetcher};
pub use worker::{TracingWorkerReporter, WorkerReporter, WorkerService};
