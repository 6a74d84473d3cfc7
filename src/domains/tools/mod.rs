//! Tools domain module.
//!
//! This module adapts DataForSEO endpoints into MCP tools. Tools are
//! executable functions that MCP clients call with JSON arguments.
//!
//! ## Architecture
//!
//! - `registry.rs` - the tool table: registration, validation, dispatch
//! - `task.rs` - three-tool groups for task-based (post / ready / get) endpoints
//! - `schema.rs` - input schema classification
//! - `outcome.rs` - invocation outcomes and the result envelope
//! - `router.rs` - rmcp ToolRouter built from the registry (STDIO/TCP transport)
//! - `definitions/` - the endpoint catalog (one file per family)
//! - `error.rs` - host-level tool errors
//!
//! ## Adding a New Tool
//!
//! 1. Create a file in `definitions/` with a params struct and an async handler
//! 2. Call `registry.register(...)` (or `register_task_tool` for task endpoints)
//!    from the tool's `register` function
//! 3. Add it to `definitions::register_all`
//!
//! The router and the HTTP transport both read the registry, so nothing else
//! needs to change.

pub mod definitions;
mod error;
pub mod outcome;
pub mod registry;
pub mod router;
pub mod schema;
pub mod task;

pub use error::ToolError;
pub use outcome::{ToolFailure, ToolOutcome};
pub use registry::{ToolRegistration, ToolRegistry, ToolResult};
pub use router::build_tool_router;
pub use schema::ToolSchema;
pub use task::{TaskEndpoint, TaskGetParams, TaskLookup, register_task_tool, register_task_tool_at};

use crate::api::SharedClient;

/// Build the full tool table for `client`.
pub fn build_registry(client: SharedClient) -> ToolResult<ToolRegistry> {
    let mut registry = ToolRegistry::new(client);
    definitions::register_all(&mut registry)?;
    Ok(registry)
}
