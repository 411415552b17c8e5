//! Remote Service API
//!
//! Typed client for the backend-as-a-service that owns persistence and
//! authentication, plus the error taxonomy shared across the app.

pub mod client;
pub mod error;

pub use error::ApiError;
