//! HTTP boundary — thin request/response mapping over the queue facade.

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;
