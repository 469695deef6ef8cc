//! Error type shared by the deque and the stack adapter.

use std::collections::TryReserveError;

/// Error type for deque operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DequeError {
    /// Read or removal attempted on an empty deque.
    Underflow,
    /// Growing the block map or allocating a block failed.
    Alloc(TryReserveError),
}

impl From<TryReserveError> for DequeError {
    fn from(e: TryReserveError) -> Self {
        DequeError::Alloc(e)
    }
}

impl std::fmt::Display for DequeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DequeError::Underflow => write!(f, "Deque is empty"),
            DequeError::Alloc(e) => write!(f, "allocation failed: {}", e),
        }
    }
}

impl std::error::Error for DequeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DequeError::Underflow => None,
            DequeError::Alloc(e) => Some(e),
        }
    }
}

/// Result type for deque operations.
pub type Result<T> = std::result::Result<T, DequeError>;
