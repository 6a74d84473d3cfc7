//! Task-based tool groups.
//!
//! DataForSEO's asynchronous endpoints follow submit -> poll -> fetch:
//!
//! - `POST /{family}/task_post` queues one or more tasks
//! - `GET /{family}/tasks_ready` lists finished tasks not yet collected
//! - `GET /{family}/task_get/{id}` returns a finished task's results
//!
//! [`register_task_tool`] turns that shape into three tools, `{name}_post`,
//! `{name}_ready` and `{name}_get`. Only the post handler is endpoint
//! specific; ready and get are derived from the endpoint family.

use std::future::Future;

use anyhow::bail;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::registry::{ToolRegistry, ToolResult};
use super::schema::ToolSchema;
use crate::api::SharedClient;

/// Path family of a task-based endpoint, without leading or trailing `/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskEndpoint(&'static str);

impl TaskEndpoint {
    /// Google organic SERP tasks.
    pub const SERP_GOOGLE_ORGANIC: Self = Self("serp/google/organic");

    pub const fn new(family: &'static str) -> Self {
        Self(family)
    }

    pub fn family(&self) -> &'static str {
        self.0
    }

    /// `POST` path submitting tasks.
    pub fn post_path(&self) -> String {
        format!("/{}/task_post", self.0)
    }

    /// `GET` path listing completed tasks.
    pub fn ready_path(&self) -> String {
        format!("/{}/tasks_ready", self.0)
    }

    /// `GET` path fetching one task's results.
    ///
    /// The id becomes a single path segment, so it is limited to ASCII
    /// alphanumerics, `-` and `_`.
    pub fn get_path(&self, id: &str) -> anyhow::Result<String> {
        let valid = id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if id.is_empty() || !valid {
            bail!("invalid task id '{}'", id);
        }
        Ok(format!("/{}/task_get/{}", self.0, id))
    }
}

/// Parameters of a `{name}_ready` tool: none.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct NoParams {}

/// Parameter types usable as a `{name}_get` schema.
pub trait TaskLookup {
    /// Identifier of the task to fetch.
    fn task_id(&self) -> &str;
}

/// Default `{name}_get` parameters.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TaskGetParams {
    /// Task identifier returned by the matching `_post` tool.
    #[schemars(description = "Task ID returned when the task was posted")]
    pub id: String,
}

impl TaskLookup for TaskGetParams {
    fn task_id(&self) -> &str {
        &self.id
    }
}

/// Register `{name}_post`, `{name}_ready` and `{name}_get` against the
/// Google organic SERP task family.
pub fn register_task_tool<P, G, T, F, Fut>(
    registry: &mut ToolRegistry,
    name: &str,
    post_handler: F,
) -> ToolResult<()>
where
    P: DeserializeOwned + JsonSchema + Send + 'static,
    G: TaskLookup + DeserializeOwned + JsonSchema + Send + 'static,
    T: Serialize + Send + 'static,
    F: Fn(P, SharedClient) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
{
    register_task_tool_at::<P, G, T, F, Fut>(
        registry,
        name,
        TaskEndpoint::SERP_GOOGLE_ORGANIC,
        post_handler,
    )
}

/// Register a task tool group whose ready/get tools poll `endpoint`.
pub fn register_task_tool_at<P, G, T, F, Fut>(
    registry: &mut ToolRegistry,
    name: &str,
    endpoint: TaskEndpoint,
    post_handler: F,
) -> ToolResult<()>
where
    P: DeserializeOwned + JsonSchema + Send + 'static,
    G: TaskLookup + DeserializeOwned + JsonSchema + Send + 'static,
    T: Serialize + Send + 'static,
    F: Fn(P, SharedClient) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
{
    let family = endpoint.family();

    registry.register(
        format!("{}_post", name),
        format!(
            "Submit a {} task. Returns the task id to poll with {}_ready and fetch with {}_get.",
            family, name, name
        ),
        post_handler,
    )?;

    registry.register_with_schema(
        format!("{}_ready", name),
        format!("List completed {} tasks whose results have not been collected yet.", family),
        ToolSchema::empty(),
        move |_: NoParams, client: SharedClient| async move {
            Ok(client.get(&endpoint.ready_path()).await?)
        },
    )?;

    registry.register(
        format!("{}_get", name),
        format!("Fetch the results of a completed {} task by id.", family),
        move |params: G, client: SharedClient| async move {
            let path = endpoint.get_path(params.task_id())?;
            Ok(client.get(&path).await?)
        },
    )
}
