//! actiTIME domain module.
//!
//! The remote API client and the data shapes it exchanges.
//!
//! ## Architecture
//!
//! - `client.rs` - One method per REST endpoint
//! - `backend.rs` - HTTP backend trait and the reqwest implementation
//! - `types.rs` - Query parameters, request bodies and resource records
//! - `error.rs` - Client error types

mod backend;
mod client;
mod error;
pub mod types;

pub use backend::{ApiRequest, HttpBackend, JSON_CONTENT_TYPE, ReqwestBackend, basic_auth_value};
pub use client::ActitimeClient;
pub use error::{ApiError, ApiResult};

#[cfg(test)]
pub use backend::testing;
