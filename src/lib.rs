//! WASAText client core.
//!
//! - `auth`: token storage, the read-only `CredentialProvider`, login/logout
//! - `router`: route table and the navigation guard
//! - `api`: HTTP client that attaches the bearer token to every request
//! - `models`: API wire types
//! - `config`: base URL and storage settings

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod router;
