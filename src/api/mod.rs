//! REST API client module for the WASAText service.
//!
//! The API authenticates with a bearer token: the user identifier returned
//! by `POST /session`. `BearerAuth` attaches it to every outgoing request.

pub mod client;
pub mod error;
pub mod interceptor;

pub use client::{ApiClient, REQUEST_TIMEOUT_MS};
pub use error::ApiError;
pub use interceptor::{BearerAuth, RequestInterceptor};
