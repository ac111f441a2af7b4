//! Data Transfer Objects
//!
//! Request and response body structures for the operational API.

mod requests;
mod responses;

pub use requests::InvalidateRequest;
pub use responses::{CleanResponse, HealthResponse, InvalidateResponse, StatsResponse};
