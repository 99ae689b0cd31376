use std::future::Future;

use crate::connector::Connector;
use crate::error::AppError;
use crate::snapshot::ProductSnapshot;

/// Fetches raw page content from a URL.
///
/// Implementations must enforce a bounded timeout; its expiry surfaces as
/// `AppError::Timeout` and is treated like any other transport failure.
pub trait Fetcher: Send + Sync + Clone {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// Extraction strategy: locate title/image/price in fetched page content.
///
/// Pure and infallible — a field the strategy cannot find is an empty
/// string in the snapshot, never an error.
pub trait Extract: Send + Sync + Clone {
    fn extract(&self, connector: Connector, html: &str, url: &str) -> ProductSnapshot;
}
