//! Parameter model shared by schema generation and argument coercion.

use serde::{Deserialize, Serialize};

/// Semantic kind of a tool parameter.
///
/// The set is intentionally small: it covers the primitive kinds a JSON
/// caller can express directly, plus a structured fallback for everything
/// else. Each kind maps onto exactly one JSON schema type string.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// Textual parameter, advertised as `"string"`.
    Text,
    /// Integral numeric parameter, advertised as `"integer"`.
    Integer,
    /// Floating-point numeric parameter, advertised as `"number"`.
    Float,
    /// Boolean parameter, advertised as `"boolean"`.
    Boolean,
    /// Structured or composite parameter, advertised as `"object"`.
    Structured,
}

impl ParamKind {
    /// Returns the JSON schema type string for this kind.
    #[must_use]
    pub const fn schema_type(self) -> &'static str {
        match self {
            Self::Text => "string",
            Self::Integer => "integer",
            Self::Float => "number",
            Self::Boolean => "boolean",
            Self::Structured => "object",
        }
    }
}

/// Declared specification of a single tool parameter.
///
/// Parameters are declared in positional order on the tool's target; the
/// coercer maps the named JSON arguments onto that order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    name: String,
    kind: ParamKind,
    nullable: bool,
}

impl ParamSpec {
    /// Declares a parameter that rejects null arguments.
    #[must_use]
    pub fn required(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            nullable: false,
        }
    }

    /// Declares a parameter that passes null arguments through unchanged.
    #[must_use]
    pub fn nullable(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            nullable: true,
        }
    }

    /// Returns the parameter name as used in the JSON argument object.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the semantic kind of the parameter.
    #[must_use]
    pub const fn kind(&self) -> ParamKind {
        self.kind
    }

    /// Whether a null argument is accepted.
    ///
    /// Structured parameters always accept null regardless of this flag.
    #[must_use]
    pub const fn accepts_null(&self) -> bool {
        self.nullable || matches!(self.kind, ParamKind::Structured)
    }
}
