//! Invocable target abstraction.
//!
//! The original design dispatched tool calls reflectively onto an annotated
//! method of a managed bean. Here that is replaced by a small capability
//! trait: a target declares its ordered parameters and accepts positional
//! JSON values. A bound receiver is expressed by capturing it (typically an
//! `Arc` to a service) inside the closure handed to [`FunctionTarget`].

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::ParamSpec;

/// Failure raised by a tool implementation during execution.
///
/// The reason is rendered verbatim into the `"Error: ..."` response by the
/// invocation wrapper, so it should be a complete human-readable sentence.
#[derive(Debug, Error)]
#[error("{reason}")]
pub struct InvokeFault {
    reason: String,
}

impl InvokeFault {
    /// Creates a fault from the supplied reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Returns the human-readable failure reason.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl From<serde_json::Error> for InvokeFault {
    fn from(err: serde_json::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Capability trait implemented by every tool target.
///
/// Arguments arrive positionally, in the order returned by
/// [`parameters`](Invocable::parameters), after the runtime has coerced the
/// caller's named JSON arguments.
pub trait Invocable: Send + Sync {
    /// Returns the declared parameter list in positional order.
    fn parameters(&self) -> &[ParamSpec];

    /// Executes the target with the supplied positional arguments.
    ///
    /// # Errors
    ///
    /// Returns [`InvokeFault`] when the tool body fails; the fault is
    /// converted to the uniform error string at the invocation boundary.
    fn call(&self, args: Vec<Value>) -> Result<Value, InvokeFault>;
}

type TargetHandler = dyn Fn(Vec<Value>) -> Result<Value, InvokeFault> + Send + Sync;

/// Closure-backed [`Invocable`] implementation.
pub struct FunctionTarget {
    parameters: Vec<ParamSpec>,
    handler: Box<TargetHandler>,
}

impl FunctionTarget {
    /// Creates a target from a declared parameter list and a handler closure.
    pub fn new<F>(parameters: Vec<ParamSpec>, handler: F) -> Self
    where
        F: Fn(Vec<Value>) -> Result<Value, InvokeFault> + Send + Sync + 'static,
    {
        Self {
            parameters,
            handler: Box::new(handler),
        }
    }
}

impl fmt::Debug for FunctionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionTarget")
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

impl Invocable for FunctionTarget {
    fn parameters(&self) -> &[ParamSpec] {
        &self.parameters
    }

    fn call(&self, args: Vec<Value>) -> Result<Value, InvokeFault> {
        (self.handler)(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::ParamKind;
    use serde_json::json;

    #[test]
    fn function_target_forwards_positional_args() {
        let target = FunctionTarget::new(
            vec![
                ParamSpec::required("a", ParamKind::Integer),
                ParamSpec::required("b", ParamKind::Integer),
            ],
            |args| {
                let a = args[0].as_i64().unwrap_or_default();
                let b = args[1].as_i64().unwrap_or_default();
                Ok(json!(a + b))
            },
        );

        assert_eq!(target.parameters().len(), 2);
        let result = target.call(vec![json!(2), json!(3)]).expect("call");
        assert_eq!(result, json!(5));
    }

    #[test]
    fn fault_reason_round_trips() {
        let target = FunctionTarget::new(Vec::new(), |_| Err(InvokeFault::new("boom")));
        let err = target.call(Vec::new()).expect_err("should fail");
        assert_eq!(err.reason(), "boom");
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn fault_from_serde_error() {
        let err = serde_json::from_str::<i64>("not-a-number").expect_err("parse");
        let fault = InvokeFault::from(err);
        assert!(!fault.reason().is_empty());
    }
}
