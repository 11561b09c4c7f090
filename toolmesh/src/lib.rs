//! Dynamic tool registry and invocation runtime facade.
//!
//! Depend on this crate via `cargo add toolmesh`. It bundles the member
//! crates behind feature flags so downstream users can pull in only the
//! primitives when they merely describe tools.

#![warn(missing_docs, clippy::pedantic)]

/// Re-export shared primitives for convenience.
pub use tool_primitives as primitives;

/// Registry, coercion, and invocation runtime (enabled by the `runtime`
/// feature).
#[cfg(feature = "runtime")]
pub use tool_runtime as runtime;
