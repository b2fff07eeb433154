//! Shared API types: response envelope, error mapping, JSON extraction

pub mod json;
pub mod response;

pub use json::Json;
pub use response::{ApiError, ApiResponse};
