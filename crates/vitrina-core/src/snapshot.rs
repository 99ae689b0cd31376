use serde::{Deserialize, Serialize};

/// Normalized extraction result for a product page.
///
/// Never persisted on its own — serialized into `Job.result` when the job
/// completes. A field the strategy could not locate is an empty string;
/// missing fields do not fail the job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub title: String,
    pub image: String,
    /// Numeric-looking price string with its original separators
    /// (e.g. `"1 234,56"`), currency symbols stripped.
    pub price: String,
    pub source_url: String,
}
