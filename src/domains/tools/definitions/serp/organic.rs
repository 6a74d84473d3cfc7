//! Google organic SERP task tools.
//!
//! Registers `serp_google_organic_post`, `serp_google_organic_ready` and
//! `serp_google_organic_get`. Posting is cheaper than the live endpoint but
//! results arrive later: post, poll `_ready`, then `_get` by task id.

use anyhow::bail;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use super::query::SerpQuery;
use crate::api::SharedClient;
use crate::domains::tools::registry::{ToolRegistry, ToolResult};
use crate::domains::tools::task::{TaskEndpoint, TaskGetParams, register_task_tool};

/// Parameters for posting an organic SERP task.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SerpOrganicTaskParams {
    #[serde(flatten)]
    pub query: SerpQuery,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Execution priority: 1 (normal, default) or 2 (high, extra cost)")]
    pub priority: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Free-form identifier echoed back in the task results (max 255 characters)")]
    pub tag: Option<String>,
}

/// Google organic SERP task tool group.
pub struct SerpOrganicTaskTool;

impl SerpOrganicTaskTool {
    /// Base name of the tool group; the registered tools add `_post`, `_ready`, `_get`.
    pub const NAME: &'static str = "serp_google_organic";

    pub const ENDPOINT: TaskEndpoint = TaskEndpoint::SERP_GOOGLE_ORGANIC;

    /// Register the three task tools.
    pub fn register(registry: &mut ToolRegistry) -> ToolResult<()> {
        register_task_tool::<SerpOrganicTaskParams, TaskGetParams, _, _, _>(
            registry,
            Self::NAME,
            Self::post,
        )
    }

    /// Submit one task. The API takes an array of tasks per request.
    pub async fn post(params: SerpOrganicTaskParams, client: SharedClient) -> anyhow::Result<Value> {
        params.query.validate()?;
        if let Some(priority) = params.priority {
            if !(1..=2).contains(&priority) {
                bail!("priority must be 1 or 2, got {}", priority);
            }
        }

        info!("Posting organic SERP task for keyword: {}", params.query.keyword);
        let body = json!([params]);
        Ok(client.post(&Self::ENDPOINT.post_path(), body).await?)
    }
}
