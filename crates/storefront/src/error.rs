//! Error types for storefront state management.
//!
//! Two classes of failure cross component boundaries here:
//!
//! - [`ApiError`] - transient network/backend failures. Managers absorb
//!   these and expose them as observable error state; prior data stays
//!   intact.
//! - [`StoreError`] - persistence failures. Always swallowed at the point
//!   of access (with a `tracing::warn!`); components fall back to empty or
//!   in-memory state and never surface these to the user.
//!
//! Cancellation of a superseded search request is not an error at all and
//! has no variant here.

use thiserror::Error;

/// Failure talking to the catalog/customer REST backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, timeout, or protocol-level failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("backend returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated for logging.
        message: String,
    },

    /// Response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Parse(#[source] serde_json::Error),
}

/// Failure reading or writing the persistent state store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem-level failure (missing directory, quota, permissions).
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be (de)serialized.
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
