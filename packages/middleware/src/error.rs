//! Error types for the tracking middleware

use thiserror::Error;

/// Result type for tracking middleware operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error reported by a tracking callback
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error types that can occur while dispatching or tracking actions
#[derive(Debug, Error)]
pub enum Error {
    /// Errors related to JSON serialization/deserialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors related to MessagePack serialization
    #[error("MessagePack error: {0}")]
    MessagePack(#[from] rmp_serde::encode::Error),

    /// Errors related to MessagePack deserialization
    #[error("MessagePack decode error: {0}")]
    MessagePackDecode(#[from] rmp_serde::decode::Error),

    /// A value could not be interpreted as an action
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// A tracking callback failed
    #[error("Tracker error: {0}")]
    Tracker(#[source] BoxError),

    /// A later link of the dispatch chain failed
    #[error("Dispatch error: {0}")]
    Dispatch(String),

    /// The receiving side of a channel tracker was dropped
    #[error("Tracking channel closed")]
    ChannelClosed,
}

impl Error {
    /// Wrap any error or message as a tracking callback failure
    pub fn tracker(err: impl Into<BoxError>) -> Self {
        Self::Tracker(err.into())
    }
}
