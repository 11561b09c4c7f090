//! Core shared types for the toolmesh runtime.
//!
//! A tool is a named callable exposed to an agent or orchestration framework
//! through a uniform JSON-in/string-out contract. This crate defines the
//! immutable metadata record describing a tool ([`ToolDescriptor`]), the
//! parameter model used for schema generation and argument coercion
//! ([`ParamKind`], [`ParamSpec`]), and the polymorphic invocable capability
//! that replaces reflective method dispatch ([`Invocable`]).

#![warn(missing_docs, clippy::pedantic)]

mod descriptor;
mod error;
mod param;
mod target;

/// Immutable tool metadata and its builder.
pub use descriptor::{ToolDescriptor, ToolDescriptorBuilder};
/// Error type and result alias shared across the runtime.
pub use error::{Error, Result};
/// Parameter kinds and per-parameter specifications.
pub use param::{ParamKind, ParamSpec};
/// Invocable target abstraction and execution fault.
pub use target::{FunctionTarget, Invocable, InvokeFault};
