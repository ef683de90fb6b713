//! Error types shared by every collection operation.

use thiserror::Error;

/// Result type for tablekit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures raised at the point of violation. Nothing is retried or partially applied.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid argument shape, e.g. a zero chunk size or a non-iterable source.
    #[error("invalid argument: {0}")]
    Validation(String),

    /// Write attempted through a frozen container.
    #[error("attempt to modify a frozen {kind}")]
    ImmutabilityViolation { kind: &'static str },

    /// Non-integer key written into a sequence's positional storage.
    #[error("sequence positions must be integers, got {got}")]
    TypeMismatch { got: &'static str },

    /// Natural ordering requested on elements that are not mutually ordered.
    #[error("attempt to compare {left} with {right}")]
    OrderingFailure { left: String, right: String },

    #[error("failed to parse RON: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    pub(crate) fn ordering(left: &impl std::fmt::Debug, right: &impl std::fmt::Debug) -> Self {
        Error::OrderingFailure {
            left: format!("{left:?}"),
            right: format!("{right:?}"),
        }
    }
}
