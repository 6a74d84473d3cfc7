//! Input schema classification.
//!
//! A tool's parameters are a Rust type deriving `JsonSchema`. The generated
//! schema either declares an object field shape, in which case only that
//! shape is advertised, or it does not (enums, refinements), in which case
//! it is advertised unchanged.

use std::sync::Arc;

use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde_json::Value;

/// Keys kept when reducing an object schema to its field shape.
/// Definition tables stay so `$ref`s inside properties still resolve.
const SHAPE_KEYS: &[&str] = &["properties", "required", "$defs", "definitions"];

/// Input schema of a registered tool.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolSchema {
    /// Object schema reduced to its field shape.
    Shape(Arc<JsonObject>),

    /// Schema without a field shape, kept as generated.
    Opaque(Arc<JsonObject>),
}

impl ToolSchema {
    /// Classify the schema generated for `T`.
    pub fn of<T: JsonSchema + 'static>() -> Self {
        Self::from_schema(&cached_schema_for_type::<T>())
    }

    /// Classify a raw JSON schema.
    pub fn from_schema(schema: &JsonObject) -> Self {
        match schema.get("properties") {
            Some(Value::Object(_)) => {
                let mut shape = JsonObject::new();
                shape.insert("type".to_string(), Value::String("object".to_string()));
                for key in SHAPE_KEYS {
                    if let Some(value) = schema.get(*key) {
                        shape.insert((*key).to_string(), value.clone());
                    }
                }
                Self::Shape(Arc::new(shape))
            }
            _ => Self::Opaque(Arc::new(schema.clone())),
        }
    }

    /// An object schema accepting no fields.
    pub fn empty() -> Self {
        let mut shape = JsonObject::new();
        shape.insert("type".to_string(), Value::String("object".to_string()));
        shape.insert("properties".to_string(), Value::Object(JsonObject::new()));
        Self::Shape(Arc::new(shape))
    }

    /// Whether the schema declared a field shape.
    pub fn is_shape(&self) -> bool {
        matches!(self, Self::Shape(_))
    }

    /// The schema advertised to clients in `tools/list`.
    pub fn input_schema(&self) -> Arc<JsonObject> {
        match self {
            Self::Shape(schema) | Self::Opaque(schema) => schema.clone(),
        }
    }
}
