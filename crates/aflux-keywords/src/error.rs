//! Error types for the keyword crate.

use thiserror::Error;

/// Errors that can occur while building or serializing expressions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    /// The expression holds a fragment combination no grammar rule accepts.
    #[error(
        "inconsistent operators in {context}: {pending} pending and {resolved} resolved fragments; check your parenthesis"
    )]
    Grammar {
        context: &'static str,
        pending: usize,
        resolved: usize,
    },

    /// No keyword with this wire name exists in the catalog.
    #[error("unknown keyword: {0}")]
    UnknownField(String),
}

/// Result type for keyword operations.
pub type Result<T> = std::result::Result<T, ExprError>;
