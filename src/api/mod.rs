//! DataForSEO API access.
//!
//! Tools never talk to `reqwest` directly. They receive a [`SharedClient`]
//! handle per invocation and call `get` / `post` with a path relative to the
//! configured API base URL (e.g. `/serp/google/organic/tasks_ready`).
//!
//! - `client.rs` - the [`ApiClient`] seam and the reqwest-backed implementation
//! - `types.rs` - response envelope helpers
//! - `error.rs` - client error types

mod client;
mod error;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{ApiClient, DataForSeoClient, SharedClient};
pub use error::{ApiError, ApiResult};
