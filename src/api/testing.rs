//! In-memory [`ApiClient`] for registrar and tool tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use super::{ApiClient, ApiError, ApiResult, SharedClient};

/// A recorded downstream call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

/// Client that records every call and answers with a canned body.
#[derive(Default)]
pub struct RecordingClient {
    calls: Mutex<Vec<RecordedCall>>,
    response: Value,
    fail_with_status: Option<u16>,
}

impl RecordingClient {
    pub fn responding(response: Value) -> Arc<Self> {
        Arc::new(Self {
            response,
            ..Default::default()
        })
    }

    pub fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self {
            fail_with_status: Some(status),
            ..Default::default()
        })
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn shared(self: &Arc<Self>) -> SharedClient {
        self.clone()
    }

    fn record(&self, method: &'static str, path: &str, body: Option<Value>) -> ApiResult<Value> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            body,
        });
        match self.fail_with_status {
            Some(status) => Err(ApiError::status(status, "mock failure")),
            None => Ok(self.response.clone()),
        }
    }
}

#[async_trait]
impl ApiClient for RecordingClient {
    async fn get(&self, path: &str) -> ApiResult<Value> {
        self.record("GET", path, None)
    }

    async fn post(&self, path: &str, body: Value) -> ApiResult<Value> {
        self.record("POST", path, Some(body))
    }
}
