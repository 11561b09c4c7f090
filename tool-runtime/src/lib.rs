//! Tool registry and invocation runtime.
//!
//! The modules exposed here store tool descriptors, derive JSON parameter
//! schemas from declared signatures, coerce loosely-typed JSON arguments into
//! the values a target expects, and wrap each tool behind the uniform
//! `invoke(json) -> string` calling convention. An external discovery
//! collaborator builds [`tool_primitives::ToolDescriptor`]s and feeds them to
//! [`ToolRegistry::register`]; callers obtain wrappers through
//! [`CallbackProvider`].

#![warn(missing_docs, clippy::pedantic)]

pub mod callback;
pub mod coerce;
pub mod provider;
pub mod registry;
pub mod schema;

pub use callback::{InvocationError, ToolCallback, ToolDefinition};
pub use coerce::{CoercionError, CoercionResult, coerce_arguments};
pub use provider::CallbackProvider;
pub use registry::{Registration, ToolRegistry};
pub use schema::{EMPTY_OBJECT_SCHEMA, parameter_schema, parameter_schema_text};
