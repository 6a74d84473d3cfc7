//! DataForSEO HTTP client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::{Client, RequestBuilder, Url, header};
use serde_json::Value;
use tracing::{debug, warn};

use super::error::{ApiError, ApiResult};
use super::types::ResponseSummary;
use crate::core::config::DataForSeoConfig;

/// Client handle passed to every tool handler.
pub type SharedClient = Arc<dyn ApiClient>;

/// Minimal surface tool handlers need from the DataForSEO API.
///
/// Paths are relative to the API base URL and start with `/`.
/// Bodies are returned as parsed JSON, without interpretation.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Issue a GET request.
    async fn get(&self, path: &str) -> ApiResult<Value>;

    /// Issue a POST request with a JSON body.
    async fn post(&self, path: &str, body: Value) -> ApiResult<Value>;
}

/// reqwest-backed [`ApiClient`] using HTTP Basic authentication.
#[derive(Debug, Clone)]
pub struct DataForSeoClient {
    http: Client,
    base_url: String,
}

impl DataForSeoClient {
    /// Build a client from configuration.
    pub fn new(config: &DataForSeoConfig) -> ApiResult<Self> {
        let mut headers = header::HeaderMap::new();

        match (&config.username, &config.password) {
            (Some(username), Some(password)) => {
                let token = STANDARD.encode(format!("{}:{}", username, password));
                headers.insert(
                    header::AUTHORIZATION,
                    header::HeaderValue::from_str(&format!("Basic {}", token))
                        .map_err(|_| ApiError::config("Invalid credentials format"))?,
                );
            }
            _ => warn!("DataForSEO credentials missing, requests will be sent unauthenticated"),
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The API base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for the given path.
    ///
    /// The path is appended to the base URL rather than joined, so a base
    /// such as `https://api.dataforseo.com/v3` keeps its `/v3` prefix.
    fn build_url(&self, path: &str) -> ApiResult<Url> {
        let raw = if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };
        Url::parse(&raw).map_err(|_| ApiError::InvalidUrl(raw))
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Value> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "DataForSEO request failed");
            return Err(ApiError::status(status.as_u16(), body));
        }

        let body: Value = response.json().await?;
        if let Some(summary) = ResponseSummary::peek(&body) {
            debug!(
                status_code = summary.status_code,
                status_message = %summary.status_message,
                cost = summary.cost,
                tasks_count = summary.tasks_count,
                tasks_error = summary.tasks_error,
                "DataForSEO response"
            );
        }
        Ok(body)
    }
}

#[async_trait]
impl ApiClient for DataForSeoClient {
    async fn get(&self, path: &str) -> ApiResult<Value> {
        let url = self.build_url(path)?;
        debug!(url = %url, "GET request");
        self.send(self.http.get(url)).await
    }

    async fn post(&self, path: &str, body: Value) -> ApiResult<Value> {
        let url = self.build_url(path)?;
        debug!(url = %url, "POST request");
        self.send(self.http.post(url).json(&body)).await
    }
}
