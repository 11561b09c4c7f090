//! Shared error definitions for tool primitives.

use thiserror::Error;

/// Result alias used throughout the tool primitives crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing tool primitive types.
#[derive(Debug, Error)]
pub enum Error {
    /// Tool descriptor failed construction-time validation.
    #[error("invalid tool descriptor: {reason}")]
    InvalidDescriptor {
        /// Human-readable reason for rejection.
        reason: String,
    },
}

impl Error {
    /// Creates a descriptor validation error from the supplied reason.
    #[must_use]
    pub fn invalid_descriptor(reason: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            reason: reason.into(),
        }
    }
}
