//! Search parameters shared by the organic SERP tools.

use anyhow::bail;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Deepest SERP position DataForSEO will crawl.
pub const MAX_DEPTH: u32 = 700;

/// Device the SERP is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    Desktop,
    Mobile,
}

/// Keyword, locale and crawl settings of a SERP request.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SerpQuery {
    #[schemars(description = "Search query (max 700 characters)")]
    pub keyword: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Location code (e.g. 2840 for United States). See serp_google_locations")]
    pub location_code: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Full location name (e.g. 'London,England,United Kingdom'), alternative to location_code")]
    pub location_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Language code (e.g. 'en'). See serp_google_languages")]
    pub language_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Full language name (e.g. 'English'), alternative to language_code")]
    pub language_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Device type: desktop (default) or mobile")]
    pub device: Option<Device>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Number of results to crawl (default: 100, max: 700)")]
    pub depth: Option<u32>,
}

impl SerpQuery {
    /// Check constraints the API would otherwise reject with a paid error.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.keyword.trim().is_empty() {
            bail!("keyword must not be empty");
        }
        if self.location_code.is_none() && self.location_name.is_none() {
            bail!("either location_code or location_name is required");
        }
        if self.language_code.is_none() && self.language_name.is_none() {
            bail!("either language_code or language_name is required");
        }
        match self.depth {
            Some(depth) if !(1..=MAX_DEPTH).contains(&depth) => {
                bail!("depth must be between 1 and {}, got {}", MAX_DEPTH, depth)
            }
            _ => Ok(()),
        }
    }
}
