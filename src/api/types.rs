//! DataForSEO response envelope helpers.
//!
//! Every DataForSEO v3 response shares a top-level envelope:
//!
//! ```json
//! {
//!   "version": "0.1.20240801",
//!   "status_code": 20000,
//!   "status_message": "Ok.",
//!   "time": "0.0411 sec.",
//!   "cost": 0.0006,
//!   "tasks_count": 1,
//!   "tasks_error": 0,
//!   "tasks": [ ... ]
//! }
//! ```
//!
//! Tools forward bodies untouched as `serde_json::Value`. The summary type
//! here only reads the envelope fields for diagnostics.

use serde::{Deserialize, Serialize};

/// Status code DataForSEO uses for a fully successful request.
pub const STATUS_OK: u32 = 20000;

/// Top-level status fields of a DataForSEO response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSummary {
    pub status_code: u32,

    #[serde(default)]
    pub status_message: String,

    #[serde(default)]
    pub cost: f64,

    #[serde(default)]
    pub tasks_count: u32,

    #[serde(default)]
    pub tasks_error: u32,
}

impl ResponseSummary {
    /// Read the envelope fields from a response body.
    ///
    /// Returns `None` when the body does not carry a DataForSEO envelope.
    pub fn peek(body: &serde_json::Value) -> Option<Self> {
        if !body.is_object() {
            return None;
        }
        Self::deserialize(body).ok()
    }

    /// Whether the API reported overall success.
    pub fn is_ok(&self) -> bool {
        self.status_code == STATUS_OK
    }
}
