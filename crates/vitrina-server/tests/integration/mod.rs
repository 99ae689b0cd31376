pub mod common;
mod api_tests;
mod worker_tests;
