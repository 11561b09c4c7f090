//! Per-tool invocation wrapper implementing the uniform calling convention.
//!
//! Every registered tool is exposed through the same contract regardless of
//! its underlying parameter types: arguments arrive as a JSON object in text
//! form, the response is always a plain string. Failures never escape
//! [`ToolCallback::invoke`]; they are rendered into the returned text.

use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tool_primitives::{InvokeFault, ToolDescriptor};
use tracing::{debug, warn};

use crate::coerce::{CoercionError, coerce_arguments};
use crate::schema::parameter_schema_text;

/// Serializable advertisement record for a tool: the wire-visible name,
/// description, and input schema.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    name: String,
    description: String,
    input_schema: String,
}

impl ToolDefinition {
    /// Returns the tool name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the tool description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the JSON schema text describing the argument object.
    #[must_use]
    pub fn input_schema(&self) -> &str {
        &self.input_schema
    }
}

/// Failure stages inside a single tool invocation.
///
/// All variants are caught at the [`ToolCallback::invoke`] boundary and
/// rendered as `"Error: <message>"`; callers never observe them directly.
#[derive(Debug, Error)]
pub enum InvocationError {
    /// The arguments text itself was not a valid JSON object. This is the one
    /// case distinguished from coercion: the caller's envelope is broken.
    #[error("invalid arguments payload: {reason}")]
    Envelope {
        /// Human-readable parse failure.
        reason: String,
    },

    /// An argument could not be coerced onto its declared parameter.
    #[error(transparent)]
    Coercion(#[from] CoercionError),

    /// The underlying tool raised a fault during execution.
    #[error(transparent)]
    Execution(#[from] InvokeFault),

    /// The tool result could not be serialized to text.
    #[error("failed to encode tool result: {reason}")]
    ResultEncoding {
        /// Human-readable serialization failure.
        reason: String,
    },
}

/// Invocation wrapper owning exactly one tool descriptor.
///
/// The input schema is computed once on first access and cached. The wrapper
/// holds no locks; the bound receiver (if any) lives inside the descriptor's
/// target, not here.
pub struct ToolCallback {
    descriptor: Arc<ToolDescriptor>,
    schema: OnceLock<String>,
}

impl ToolCallback {
    /// Creates a wrapper for the supplied descriptor.
    #[must_use]
    pub fn new(descriptor: Arc<ToolDescriptor>) -> Self {
        Self {
            descriptor,
            schema: OnceLock::new(),
        }
    }

    /// Returns the tool name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    /// Returns the tool description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.descriptor.description()
    }

    /// Returns the JSON schema text for the tool's argument object.
    ///
    /// Computed once from the target's declared parameters; always valid
    /// JSON, falling back to the minimal object schema on failure.
    #[must_use]
    pub fn input_schema(&self) -> &str {
        self.schema
            .get_or_init(|| parameter_schema_text(self.descriptor.target().parameters()))
    }

    /// Returns the wire-visible definition advertised to models.
    #[must_use]
    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_owned(),
            description: self.description().to_owned(),
            input_schema: self.input_schema().to_owned(),
        }
    }

    /// Returns the descriptor backing this wrapper.
    #[must_use]
    pub fn descriptor(&self) -> &Arc<ToolDescriptor> {
        &self.descriptor
    }

    /// Invokes the tool with the supplied JSON arguments text.
    ///
    /// Empty, blank, `{}`, or `null` text is treated as zero arguments.
    /// The response is the tool's textual result, the literal `null` for a
    /// null result, or the JSON text of any other result. Every failure is
    /// converted into `"Error: <message>"`; this method never panics the
    /// protocol contract — the returned string is the sole channel.
    #[must_use]
    pub fn invoke(&self, arguments: &str) -> String {
        debug!(tool = self.name(), arguments, "invoking tool");
        match self.try_invoke(arguments) {
            Ok(response) => {
                debug!(tool = self.name(), response, "tool returned");
                response
            }
            Err(err) => {
                warn!(tool = self.name(), error = %err, "tool invocation failed");
                format!("Error: {err}")
            }
        }
    }

    fn try_invoke(&self, arguments: &str) -> Result<String, InvocationError> {
        let named = parse_arguments(arguments)?;
        let positional = coerce_arguments(self.descriptor.target().parameters(), &named)?;
        let result = self.descriptor.target().call(positional)?;
        render_result(result)
    }
}

fn parse_arguments(arguments: &str) -> Result<Map<String, Value>, InvocationError> {
    let trimmed = arguments.trim();
    if trimmed.is_empty() || trimmed == "{}" || trimmed == "null" {
        return Ok(Map::new());
    }

    let value: Value = serde_json::from_str(trimmed).map_err(|err| InvocationError::Envelope {
        reason: err.to_string(),
    })?;

    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(InvocationError::Envelope {
            reason: format!("expected a JSON object, got {}", type_name(&other)),
        }),
    }
}

fn render_result(result: Value) -> Result<String, InvocationError> {
    match result {
        Value::Null => Ok("null".to_owned()),
        Value::String(text) => Ok(text),
        other => serde_json::to_string(&other).map_err(|err| InvocationError::ResultEncoding {
            reason: err.to_string(),
        }),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
