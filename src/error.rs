//! Error types for the mediascan engine.
//!
//! Probe-level failures never escape a probe; they are converted into a
//! [`ProbeFailure`] tag at the probe boundary via [`MediaScanError::probe_failure`].

use crate::core::scan::ProbeFailure;
use thiserror::Error;

/// Main error type for mediascan operations.
#[derive(Debug, Error)]
pub enum MediaScanError {
    /// Deadline elapsed before the operation completed
    #[error("Operation timed out after {millis}ms")]
    Timeout { millis: u64 },

    /// Connection, DNS or protocol failure
    #[error("Network error: {0}")]
    Network(String),

    /// Cross-origin or server policy prevented reading the response
    #[error("Request blocked (status {status:?}): {message}")]
    Blocked {
        status: Option<u16>,
        message: String,
    },

    /// Input could not be parsed
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MediaScanError {
    /// Reduce an error to the reason tag recorded on a failed probe.
    pub fn probe_failure(&self) -> ProbeFailure {
        match self {
            MediaScanError::Timeout { .. } => ProbeFailure::Timeout,
            MediaScanError::Blocked { .. } => ProbeFailure::CorsBlocked,
            _ => ProbeFailure::NetworkError,
        }
    }
}

/// Result type alias for mediascan operations
pub type Result<T> = std::result::Result<T, MediaScanError>;
