use std::collections::TryReserveError;

use thiserror::Error;

/// Errors that can occur when operating on the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// The position names a node that was removed, or a node of another sequence.
    #[error("invalid position")]
    InvalidPosition,

    #[error("position is past the end")]
    PastTheEnd,

    /// Erase-after was asked to remove a node that does not exist.
    #[error("position has no successor")]
    NoSuccessor,

    #[error("node allocation failed")]
    Alloc(#[from] TryReserveError),
}

pub type Result<T> = std::result::Result<T, SequenceError>;
