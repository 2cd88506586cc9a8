//! # REST API Module
//!
//! HTTP routing, identifier validation, and response shaping for the movie
//! collection. Each route maps onto exactly one store call with a fixed
//! success/failure response.

pub mod errors;
pub mod handlers;
pub mod server;

pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use handlers::ApiState;
pub use server::ApiServer;
