//! Errors from the layers around the extractor.
//!
//! Extraction and favicon resolution never fail; only fetching a page and
//! sending notifications do.

use std::time::Duration;

/// Error type for fetch and notification operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The target could not be used as a page URL
    #[error("Invalid target URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The HTTP request itself failed
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with something other than what was expected
    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    /// The page did not arrive within the configured timeout
    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    /// Notification credentials are missing
    #[error("Notifier is not configured (bot token and chat id are required)")]
    NotConfigured,

    /// The blocking extraction task panicked or was cancelled
    #[error("Extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Result type alias for fetch and notification operations
pub type Result<T> = std::result::Result<T, Error>;
