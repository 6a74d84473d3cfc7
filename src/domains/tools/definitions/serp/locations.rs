//! Google SERP locale lookups.
//!
//! Location and language codes accepted by the SERP tools.

use anyhow::bail;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::api::SharedClient;
use crate::domains::tools::registry::{ToolRegistry, ToolResult};
use crate::domains::tools::schema::ToolSchema;
use crate::domains::tools::task::NoParams;

/// Parameters for the locations lookup.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SerpLocationsParams {
    #[serde(default)]
    #[schemars(description = "ISO 3166-1 alpha-2 country code to filter by (e.g. 'us'). Omit for all locations")]
    pub country: Option<String>,
}

/// Location lookup tool.
pub struct SerpLocationsTool;

impl SerpLocationsTool {
    pub const NAME: &'static str = "serp_google_locations";

    pub const DESCRIPTION: &'static str =
        "List Google SERP locations with their location codes, optionally filtered by country.";

    pub fn register(registry: &mut ToolRegistry) -> ToolResult<()> {
        registry.register(Self::NAME, Self::DESCRIPTION, Self::execute)
    }

    pub async fn execute(params: SerpLocationsParams, client: SharedClient) -> anyhow::Result<Value> {
        let path = match params.country.as_deref().map(str::trim) {
            None | Some("") => "/serp/google/locations".to_string(),
            Some(country) => {
                if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
                    bail!("country must be a two-letter ISO code, got '{}'", country);
                }
                format!("/serp/google/locations/{}", country.to_ascii_lowercase())
            }
        };
        Ok(client.get(&path).await?)
    }
}

/// Language lookup tool.
pub struct SerpLanguagesTool;

impl SerpLanguagesTool {
    pub const NAME: &'static str = "serp_google_languages";

    pub const DESCRIPTION: &'static str = "List Google SERP languages with their language codes.";

    pub fn register(registry: &mut ToolRegistry) -> ToolResult<()> {
        registry.register_with_schema(
            Self::NAME,
            Self::DESCRIPTION,
            ToolSchema::empty(),
            |_: NoParams, client: SharedClient| async move {
                Ok(client.get("/serp/google/languages").await?)
            },
        )
    }
}
