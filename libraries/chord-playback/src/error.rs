//! Error types for the queue engine

use thiserror::Error;

/// Queue engine errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// A collaborator (catalog, library) failed
    #[error(transparent)]
    Core(#[from] chord_core::ChordError),

    /// `next_page` was called on a queue with no next page
    #[error("Queue has no next page")]
    QueueExhausted,

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

/// Result type for queue engine operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
