//! MCP Server implementation and lifecycle management.
//!
//! The server owns the frozen tool registry and the rmcp ToolRouter built
//! from it. STDIO/TCP transports go through the router; the HTTP transport
//! calls [`McpServer::list_tools`] and [`McpServer::call_tool`] directly.

// `tool_handler` expands to two-argument `Result`s, so the crate's alias
// is not imported here.
use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use crate::api::{DataForSeoClient, SharedClient};
use crate::domains::tools::{ToolRegistry, build_registry, build_tool_router};

const INSTRUCTIONS: &str = "DataForSEO MCP server. Tools wrap DataForSEO v3 endpoints and return the \
API response as JSON text. Task tools come in groups: call <name>_post to queue a task, \
<name>_ready to list finished tasks, and <name>_get with a task id to fetch results. \
A response containing an \"error\" field means the call failed.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tool table, immutable after construction.
    registry: Arc<ToolRegistry>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server talking to the DataForSEO API from `config`.
    pub fn new(config: Config) -> crate::core::Result<Self> {
        if config.dataforseo.base_url.trim().is_empty() {
            return Err(crate::core::Error::config("DataForSEO base URL must not be empty"));
        }
        let client = DataForSeoClient::new(&config.dataforseo)?;
        Self::with_client(config, Arc::new(client))
    }

    /// Create a server whose tools use the given client.
    pub fn with_client(config: Config, client: SharedClient) -> crate::core::Result<Self> {
        let registry = Arc::new(build_registry(client)?);
        info!("Registered {} tools", registry.len());

        Ok(Self {
            tool_router: build_tool_router::<Self>(registry.clone()),
            config: Arc::new(config),
            registry,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Instructions sent to clients on initialize.
    pub fn instructions(&self) -> &'static str {
        INSTRUCTIONS
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.registry
            .tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// `Err` only for unknown tools or arguments that fail validation;
    /// handler failures come back as an `Ok` envelope.
    #[instrument(skip(self, arguments))]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> std::result::Result<serde_json::Value, String> {
        let arguments = match arguments {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Null => JsonObject::new(),
            _ => return Err("Tool arguments must be a JSON object".to_string()),
        };

        let result = self
            .registry
            .call_tool(name, arguments)
            .await
            .map_err(|e| e.to_string())?;
        serde_json::to_value(result).map_err(|e| e.to_string())
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
