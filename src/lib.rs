//! DataForSEO MCP Server Library
//!
//! Exposes DataForSEO API endpoints as Model Context Protocol (MCP) tools.
//!
//! # Architecture
//!
//! - **api**: the DataForSEO HTTP client behind the `ApiClient` trait
//! - **core**: configuration, error handling, the rmcp server and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: tool registration, task-tool groups, the result envelope
//!     and the endpoint catalog
//!
//! # Example
//!
//! ```rust,no_run
//! use dataforseo_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
