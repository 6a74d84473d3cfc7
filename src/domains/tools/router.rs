//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! Every registration becomes one dynamic route. The route hands the raw
//! arguments to the registry, which validates, invokes and wraps them.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter},
};

use super::registry::ToolRegistry;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(registry: Arc<ToolRegistry>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    registry
        .registrations()
        .iter()
        .fold(ToolRouter::new(), |router, registration| {
            let registry = registry.clone();
            let name = registration.name().to_string();
            router.with_route(ToolRoute::new_dyn(
                registration.to_tool(),
                move |ctx: ToolCallContext<'_, S>| {
                    let registry = registry.clone();
                    let name = name.clone();
                    let args = ctx.arguments.clone().unwrap_or_default();
                    async move {
                        registry
                            .call_tool(&name, args)
                            .await
                            .map_err(McpError::from)
                    }
                    .boxed()
                },
            ))
        })
}
