//! Parameter schema generation.
//!
//! Schema text is advertised to models and clients, so generation must never
//! fail: a zero-parameter tool yields the minimal object schema and any
//! serialization failure falls back to the same literal.

use serde_json::{Map, Value, json};
use tool_primitives::ParamSpec;
use tracing::warn;

/// Minimal valid schema used for zero-parameter tools and as the fallback
/// when schema serialization fails.
pub const EMPTY_OBJECT_SCHEMA: &str = r#"{"type":"object","properties":{}}"#;

/// Derives the JSON schema value for the supplied parameter list.
///
/// The result always has the shape
/// `{"type":"object","properties":{name:{"type":kind}}}`.
#[must_use]
pub fn parameter_schema(parameters: &[ParamSpec]) -> Value {
    let mut properties = Map::new();
    for parameter in parameters {
        properties.insert(
            parameter.name().to_owned(),
            json!({ "type": parameter.kind().schema_type() }),
        );
    }

    json!({
        "type": "object",
        "properties": properties,
    })
}

/// Renders the parameter schema as compact JSON text.
///
/// Falls back to [`EMPTY_OBJECT_SCHEMA`] if serialization fails or produces
/// blank output, so the returned text is always syntactically valid JSON.
#[must_use]
pub fn parameter_schema_text(parameters: &[ParamSpec]) -> String {
    match serde_json::to_string(&parameter_schema(parameters)) {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => EMPTY_OBJECT_SCHEMA.to_owned(),
        Err(err) => {
            warn!(error = %err, "failed to serialize parameter schema");
            EMPTY_OBJECT_SCHEMA.to_owned()
        }
    }
}
