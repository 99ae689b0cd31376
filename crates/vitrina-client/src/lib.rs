//! External collaborators of the worker loop: the HTTP page fetcher and the
//! selector-based extraction strategy.

pub mod extract;
pub mod fetcher;

pub use extract::SelectorExtract;
pub use fetcher::RotatingFetcher;
