//! Error types for docfill.
//!
//! Lookup and validation failures are fatal to the calling operation.
//! Format and range failures come from width and number parsing and are
//! normally contained at the table cell boundary.

use thiserror::Error;

/// Errors that can occur while composing into a target document.
#[derive(Debug, Error)]
pub enum DocfillError {
    /// No content control carries the requested alias
    #[error("slot not found: {title:?}")]
    SlotNotFound {
        /// Alias that was searched for
        title: String,
    },

    /// A slot could not be unwrapped because its content failed validation
    #[error("slot {title:?} contains invalid content: {}", .errors.join("; "))]
    InvalidInnerContent {
        /// Alias of the offending slot
        title: String,
        /// One message per validation failure
        errors: Vec<String>,
    },

    /// A measurement or number literal could not be parsed
    #[error("format error: {0}")]
    Format(String),

    /// A parsed value lies outside its permitted range
    #[error("range error: {0}")]
    Range(String),

    /// A hyperlink target is not an absolute URI
    #[error("invalid uri: {0:?}")]
    InvalidUri(String),

    /// A font color name did not resolve to an RGB value
    #[error("unknown color: {0:?}")]
    UnknownColor(String),

    /// A table cell ended up without any paragraph
    #[error("cell contains no paragraph")]
    EmptyCell,

    /// An external composer or converter failed
    #[error("collaborator failed: {0}")]
    Collaborator(String),
}

/// Result type alias for docfill operations.
pub type DocfillResult<T> = Result<T, DocfillError>;

impl DocfillError {
    /// Create a format error with a message.
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Create a range error with a message.
    pub fn range(msg: impl Into<String>) -> Self {
        Self::Range(msg.into())
    }

    /// Wrap a failure reported by an external collaborator.
    pub fn collaborator(err: impl std::fmt::Display) -> Self {
        Self::Collaborator(err.to_string())
    }

    /// Create a slot lookup error.
    pub fn slot_not_found(title: impl Into<String>) -> Self {
        Self::SlotNotFound { title: title.into() }
    }
}
