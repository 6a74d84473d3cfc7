//! Google SERP tools.
//!
//! - `organic`: asynchronous organic SERP tasks (post / ready / get)
//! - `live`: synchronous organic SERP lookups
//! - `locations`: location and language code lookups

pub mod live;
pub mod locations;
pub mod organic;
mod query;

pub use live::SerpOrganicLiveTool;
pub use locations::{SerpLanguagesTool, SerpLocationsTool};
pub use organic::SerpOrganicTaskTool;
pub use query::SerpQuery;
