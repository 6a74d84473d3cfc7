//! Google organic SERP live tool.
//!
//! Returns results in the same request, at a higher price than the task
//! endpoints.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use super::query::SerpQuery;
use crate::api::SharedClient;
use crate::domains::tools::registry::{ToolRegistry, ToolResult};

/// Parameters for a live organic SERP request.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SerpOrganicLiveParams {
    #[serde(flatten)]
    pub query: SerpQuery,
}

/// Live Google organic SERP tool.
pub struct SerpOrganicLiveTool;

impl SerpOrganicLiveTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "serp_google_organic_live";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get Google organic search results for a keyword in real time (advanced SERP: organic results, featured snippets, people also ask, and other SERP features).";

    const PATH: &'static str = "/serp/google/organic/live/advanced";

    pub fn register(registry: &mut ToolRegistry) -> ToolResult<()> {
        registry.register(Self::NAME, Self::DESCRIPTION, Self::execute)
    }

    pub async fn execute(params: SerpOrganicLiveParams, client: SharedClient) -> anyhow::Result<Value> {
        params.query.validate()?;
        info!("Live organic SERP for keyword: {}", params.query.keyword);
        Ok(client.post(Self::PATH, json!([params])).await?)
    }
}
