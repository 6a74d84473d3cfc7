//! Tool definitions module.
//!
//! One file per endpoint family. Each tool type exposes `NAME` and a
//! `register` function; [`register_all`] builds the full catalog.

pub mod serp;

pub use serp::{
    SerpLanguagesTool, SerpLocationsTool, SerpOrganicLiveTool, SerpOrganicTaskTool, SerpQuery,
};

use super::registry::{ToolRegistry, ToolResult};

/// Register every tool in the catalog.
pub fn register_all(registry: &mut ToolRegistry) -> ToolResult<()> {
    SerpOrganicTaskTool::register(registry)?;
    SerpOrganicLiveTool::register(registry)?;
    SerpLocationsTool::register(registry)?;
    SerpLanguagesTool::register(registry)?;
    Ok(())
}
