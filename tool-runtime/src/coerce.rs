//! Argument coercion from loosely-typed JSON values to declared parameters.
//!
//! The table is intentionally permissive: numeric conversions widen and
//! truncate, and boolean literals accept the textual forms `"true"`/`"1"` and
//! `"false"`/`"0"`, so loosely-typed JSON callers are tolerated. Every failure
//! names the offending parameter.

use serde_json::{Map, Number, Value};
use thiserror::Error;
use tool_primitives::{ParamKind, ParamSpec};

/// Result alias for coercion operations.
pub type CoercionResult<T> = Result<T, CoercionError>;

/// Errors produced while coercing a JSON argument onto a declared parameter.
#[derive(Debug, Error)]
pub enum CoercionError {
    /// A null (or missing) argument was supplied for a non-nullable parameter.
    #[error("cannot pass null to non-nullable parameter `{parameter}`")]
    NullArgument {
        /// Name of the offending parameter.
        parameter: String,
    },

    /// The argument could not be converted to an integer.
    #[error("cannot convert parameter `{parameter}` to integer: {value}")]
    Integer {
        /// Name of the offending parameter.
        parameter: String,
        /// Textual rendering of the offending value.
        value: String,
    },

    /// The argument could not be converted to a finite floating-point number.
    #[error("cannot convert parameter `{parameter}` to number: {value}")]
    Float {
        /// Name of the offending parameter.
        parameter: String,
        /// Textual rendering of the offending value.
        value: String,
    },

    /// The argument could not be converted to a boolean.
    #[error("cannot convert parameter `{parameter}` to boolean: {value}")]
    Boolean {
        /// Name of the offending parameter.
        parameter: String,
        /// Textual rendering of the offending value.
        value: String,
    },
}

/// Coerces named JSON arguments onto the declared parameter list, producing
/// positional values in declared order.
///
/// Missing keys are treated as null. Each value is coerced per the parameter
/// kind; values whose dynamic type already satisfies the target pass through
/// unchanged. `Structured` parameters receive the raw value verbatim, since
/// `serde_json::Value` is already the canonical interchange form — the typed
/// half of a structural conversion happens inside the tool body.
///
/// # Errors
///
/// Returns [`CoercionError`] naming the parameter when a null reaches a
/// non-nullable parameter or a value cannot be converted.
pub fn coerce_arguments(
    parameters: &[ParamSpec],
    arguments: &Map<String, Value>,
) -> CoercionResult<Vec<Value>> {
    parameters
        .iter()
        .map(|parameter| {
            let raw = arguments.get(parameter.name()).cloned().unwrap_or(Value::Null);
            coerce_value(parameter, raw)
        })
        .collect()
}

fn coerce_value(parameter: &ParamSpec, value: Value) -> CoercionResult<Value> {
    if value.is_null() {
        return if parameter.accepts_null() {
            Ok(Value::Null)
        } else {
            Err(CoercionError::NullArgument {
                parameter: parameter.name().to_owned(),
            })
        };
    }

    match parameter.kind() {
        ParamKind::Text => Ok(Value::String(textual_form(&value))),
        ParamKind::Integer => coerce_integer(parameter, value),
        ParamKind::Float => coerce_float(parameter, value),
        ParamKind::Boolean => coerce_boolean(parameter, value),
        ParamKind::Structured => Ok(value),
    }
}

/// Natural textual representation: strings pass through unchanged, scalars
/// use their display form, composites their compact JSON text.
fn textual_form(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn coerce_integer(parameter: &ParamSpec, value: Value) -> CoercionResult<Value> {
    let fail = || CoercionError::Integer {
        parameter: parameter.name().to_owned(),
        value: textual_form(&value),
    };

    match &value {
        Value::Number(number) => {
            if let Some(integer) = number.as_i64() {
                Ok(Value::Number(integer.into()))
            } else if let Some(float) = number.as_f64() {
                // truncating narrowing, matching the permissive table
                Ok(Value::Number((float as i64).into()))
            } else {
                Err(fail())
            }
        }
        Value::String(text) => text
            .parse::<i64>()
            .map(|integer| Value::Number(integer.into()))
            .map_err(|_| fail()),
        _ => Err(fail()),
    }
}

fn coerce_float(parameter: &ParamSpec, value: Value) -> CoercionResult<Value> {
    let fail = || CoercionError::Float {
        parameter: parameter.name().to_owned(),
        value: textual_form(&value),
    };

    let float = match &value {
        Value::Number(number) => number.as_f64().ok_or_else(fail)?,
        Value::String(text) => text.parse::<f64>().map_err(|_| fail())?,
        _ => return Err(fail()),
    };

    Number::from_f64(float).map(Value::Number).ok_or_else(fail)
}

fn coerce_boolean(parameter: &ParamSpec, value: Value) -> CoercionResult<Value> {
    if let Value::Bool(flag) = value {
        return Ok(Value::Bool(flag));
    }

    match textual_form(&value).to_lowercase().as_str() {
        "true" | "1" => Ok(Value::Bool(true)),
        "false" | "0" => Ok(Value::Bool(false)),
        _ => Err(CoercionError::Boolean {
            parameter: parameter.name().to_owned(),
            value: textual_form(&value),
        }),
    }
}
