//! Deadline guards for probe operations.
//!
//! Every network probe runs under its own deadline so a hanging server can
//! never stall a scan. When the deadline wins, the inner future is dropped
//! and whatever it would have produced is discarded.

use crate::core::scan::{ProbeFailure, SignalOutcome};
use crate::error::{MediaScanError, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Deadline for the header-only metadata request, in milliseconds
pub const METADATA_TIMEOUT_MS: u64 = 1000;

/// Deadline for the partial-content signature request, in milliseconds
pub const HEADER_TIMEOUT_MS: u64 = 2000;

/// Timeout configuration for a guarded operation
#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    /// Maximum duration for the operation
    pub duration: Duration,
    /// Whether to log timeout warnings
    pub log_warnings: bool,
    /// Operation name for logging
    pub operation_name: String,
}

impl TimeoutConfig {
    /// Create a new timeout configuration
    pub fn from_millis(millis: u64, operation: impl Into<String>) -> Self {
        Self {
            duration: Duration::from_millis(millis),
            log_warnings: true,
            operation_name: operation.into(),
        }
    }

    /// Silence the timeout warning (the outcome is still reported).
    pub fn quiet(mut self) -> Self {
        self.log_warnings = false;
        self
    }

    fn millis(&self) -> u64 {
        u64::try_from(self.duration.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Execute an async operation with a timeout
pub async fn with_timeout<T, F>(config: &TimeoutConfig, future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    debug!(
        "Starting operation '{}' with timeout of {}ms",
        config.operation_name,
        config.millis()
    );

    match timeout(config.duration, future).await {
        Ok(result) => result,
        Err(_) => {
            if config.log_warnings {
                warn!(
                    "Operation '{}' timed out after {}ms",
                    config.operation_name,
                    config.millis()
                );
            }

            Err(MediaScanError::Timeout {
                millis: config.millis(),
            })
        }
    }
}

/// Run a probe under its deadline and settle it into a [`SignalOutcome`].
///
/// Errors from the probe itself and an elapsed deadline both become
/// `Failed`; nothing is raised past this boundary.
pub async fn guard_probe<T, F>(config: &TimeoutConfig, future: F) -> SignalOutcome<T>
where
    F: Future<Output = Result<T>>,
{
    match with_timeout(config, future).await {
        Ok(value) => SignalOutcome::Fulfilled(value),
        Err(e) => {
            let reason: ProbeFailure = e.probe_failure();
            debug!(
                operation = %config.operation_name,
                %reason,
                error = %e,
                "Probe settled as failed"
            );
            SignalOutcome::Failed(reason)
        }
    }
}
