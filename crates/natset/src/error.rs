//! Errors raised by set construction and the collection adapters.

use std::fmt::Display;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SetError>;

/// Precondition violations detected at the offending call.
///
/// None of these are recoverable mid-operation: an operation either
/// returns a complete new set or fails before producing one.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetError {
    /// A value that is not a natural number was offered for insertion or removal.
    #[error("invalid element {value}: {reason}")]
    InvalidElement {
        /// The offending value, as rendered by `Display`.
        value: String,
        /// Why the value is not a natural number.
        reason: &'static str,
    },

    /// A raw bit pattern was negative.
    #[error("invalid bit pattern {value}: must be non-negative")]
    InvalidBits {
        /// The offending pattern.
        value: String,
    },

    /// The caller asked for an operation the container does not support.
    #[error("unsupported capability: {capability}")]
    UnsupportedCapability {
        /// Name of the unsupported operation.
        capability: &'static str,
    },
}

impl SetError {
    pub(crate) fn invalid_element(value: impl Display, reason: &'static str) -> Self {
        SetError::InvalidElement {
            value: value.to_string(),
            reason,
        }
    }
}
