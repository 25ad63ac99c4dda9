//! Error types for connectivity queries and subscriptions.

use thiserror::Error;

/// Errors surfaced by the connectivity facade.
///
/// Malformed or unrecognized vendor values are never an error: the
/// normalizer is total and degrades them to the `other`/`unknown` tags.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetInfoError {
    /// The underlying connectivity source failed. The message is the
    /// source's own error, passed through unchanged.
    #[error("connectivity source error: {0}")]
    Source(String),

    /// A deprecated helper was called against a source that lacks the
    /// capability it depends on.
    #[error("deprecated API: {0}")]
    Deprecated(&'static str),
}

/// A specialized Result type for connectivity operations.
pub type Result<T> = std::result::Result<T, NetInfoError>;
