//! Configuration for the scan engine.
//!
//! Defaults reproduce the reference deadlines and weight table exactly.
//! Configurations can be loaded from JSON; missing fields take defaults.

use crate::error::{MediaScanError, Result};
use crate::timeout::{HEADER_TIMEOUT_MS, METADATA_TIMEOUT_MS};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Master configuration for a scanner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Probe deadlines and byte budgets.
    pub probes: ProbeConfig,
    /// HTTP client settings.
    pub http: HttpConfig,
    /// Fusion weights and thresholds.
    pub scoring: ScoringConfig,
}

impl ScanConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| MediaScanError::Config(format!("invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject settings that would make a scan unbounded or the score undefined.
    pub fn validate(&self) -> Result<()> {
        if self.probes.metadata_timeout_ms == 0 || self.probes.header_timeout_ms == 0 {
            return Err(MediaScanError::Config(
                "probe timeouts must be non-zero".into(),
            ));
        }
        if self.probes.header_range_bytes == 0 {
            return Err(MediaScanError::Config(
                "header_range_bytes must be non-zero".into(),
            ));
        }
        if self.scoring.min_plausible_size >= self.scoring.max_plausible_size {
            return Err(MediaScanError::Config(format!(
                "min_plausible_size ({}) must be below max_plausible_size ({})",
                self.scoring.min_plausible_size, self.scoring.max_plausible_size
            )));
        }
        if self.scoring.max_weight_per_check <= 0 {
            return Err(MediaScanError::Config(
                "max_weight_per_check must be positive".into(),
            ));
        }
        self.scoring.validate_weights()
    }
}

/// Probe deadlines and byte budgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Deadline for the header-only request (default: 1000ms).
    pub metadata_timeout_ms: u64,
    /// Deadline for the partial-content request (default: 2000ms).
    pub header_timeout_ms: u64,
    /// Bytes requested from the start of the resource (default: 8192).
    pub header_range_bytes: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            metadata_timeout_ms: METADATA_TIMEOUT_MS,
            header_timeout_ms: HEADER_TIMEOUT_MS,
            header_range_bytes: crate::scan::signatures::MAX_SCAN_BYTES,
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    pub connect_timeout_ms: u64,
    pub max_redirects: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("mediascan/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout_ms: 1000,
            max_redirects: 5,
        }
    }
}

/// Fusion weights and plausibility bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Added when the declared type is not image/* or video/*.
    pub implausible_mime: i32,
    /// Added when the declared size is outside the plausible range.
    pub implausible_size: i32,
    /// Subtracted when a provenance marker is present.
    pub provenance_bonus: i32,
    /// Added when no provenance marker is present.
    pub missing_provenance: i32,
    /// Added for a suspicious URL.
    pub suspicious_url: i32,
    /// Added for an uncertain (but not suspicious) URL.
    pub uncertain_url: i32,
    /// Worst-case weight of a single check.
    pub max_weight_per_check: i32,
    pub metadata_checks: u32,
    pub header_checks: u32,
    pub url_checks: u32,
    /// Smallest plausible declared size in bytes (default: 1000).
    pub min_plausible_size: u64,
    /// Largest plausible declared size in bytes (default: 500 MiB).
    pub max_plausible_size: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            implausible_mime: 30,
            implausible_size: 20,
            provenance_bonus: 20,
            missing_provenance: 10,
            suspicious_url: 40,
            uncertain_url: 20,
            max_weight_per_check: 40,
            metadata_checks: 2,
            header_checks: 1,
            url_checks: 1,
            min_plausible_size: 1000,
            max_plausible_size: 500 * 1024 * 1024,
        }
    }
}

impl ScoringConfig {
    /// Weights must be non-negative and their worst-case sums must fit the
    /// score and check counters.
    fn validate_weights(&self) -> Result<()> {
        let weights = [
            ("implausible_mime", self.implausible_mime),
            ("implausible_size", self.implausible_size),
            ("provenance_bonus", self.provenance_bonus),
            ("missing_provenance", self.missing_provenance),
            ("suspicious_url", self.suspicious_url),
            ("uncertain_url", self.uncertain_url),
        ];
        if let Some((name, value)) = weights.into_iter().find(|(_, v)| *v < 0) {
            return Err(MediaScanError::Config(format!(
                "{} must be non-negative, got {}",
                name, value
            )));
        }

        let worst_score = i64::from(self.implausible_mime)
            + i64::from(self.implausible_size)
            + i64::from(self.missing_provenance)
            + i64::from(self.suspicious_url.max(self.uncertain_url));
        let checks = self
            .metadata_checks
            .checked_add(self.header_checks)
            .and_then(|c| c.checked_add(self.url_checks));
        if worst_score > i64::from(i32::MAX) || checks.is_none() {
            return Err(MediaScanError::Config(
                "scoring weights overflow the score counters".into(),
            ));
        }
        Ok(())
    }

    /// Declared sizes below the minimum or above the maximum are implausible.
    pub fn size_is_implausible(&self, size: u64) -> bool {
        size < self.min_plausible_size || size > self.max_plausible_size
    }
}
