//! Verdict types returned from a scan.

use super::outcome::{ProbeFailure, SignalName};
use super::signals::{FileSignature, MetadataSource};
use crate::error::MediaScanError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Coarse classification of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Safe,
    Warning,
    Danger,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Safe => write!(f, "safe"),
            Classification::Warning => write!(f, "warning"),
            Classification::Danger => write!(f, "danger"),
        }
    }
}

/// A probe that did not contribute, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedSignal {
    pub signal: SignalName,
    pub reason: ProbeFailure,
}

/// Best-effort snapshot of whatever sub-signals resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanMetadata {
    pub url: String,
    pub hostname: String,
    pub declared_size: Option<u64>,
    /// Declared by the server, or inferred from the URL extension
    pub mime_type: Option<String>,
    pub metadata_source: Option<MetadataSource>,
    pub file_signature: Option<FileSignature>,
    pub has_provenance_marker: bool,
    pub suspicion_score: Option<i32>,
    pub suspicion_ratio: Option<f64>,
}

/// Final, immutable result of one scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanVerdict {
    pub classification: Classification,
    pub confidence: f64,
    #[serde(with = "duration_millis")]
    pub elapsed: Duration,
    /// Signals that settled as fulfilled, in evaluation order
    pub contributing_signals: Vec<SignalName>,
    pub failed_signals: Vec<FailedSignal>,
    pub metadata: ScanMetadata,
}

impl ScanVerdict {
    /// Serialize to JSON string.
    pub fn to_json_string(&self) -> Result<String, MediaScanError> {
        serde_json::to_string(self)
            .map_err(|e| MediaScanError::Serialization(format!("JSON serialization error: {}", e)))
    }

    /// Deserialize from JSON string.
    pub fn from_json_str(json_str: &str) -> Result<Self, MediaScanError> {
        serde_json::from_str(json_str).map_err(|e| {
            MediaScanError::Serialization(format!("JSON deserialization error: {}", e))
        })
    }

    /// True when the verdict came from the internal-fault guard.
    pub fn is_error_fallback(&self) -> bool {
        self.contributing_signals == [SignalName::ErrorFallback]
    }

    /// Reduced summary handed to an opt-in telemetry sink.
    pub fn telemetry_summary(&self) -> TelemetrySummary {
        TelemetrySummary {
            classification: self.classification,
            has_provenance_marker: self.metadata.has_provenance_marker,
            timestamp: Utc::now(),
        }
    }

    /// Full verdict wrapped for a caller-supplied result forwarder.
    pub fn forwarded(&self) -> ForwardedResult {
        ForwardedResult {
            verdict: self.clone(),
            timestamp: Utc::now(),
        }
    }
}

/// Payload for a telemetry sink; carries no URL or hostname.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySummary {
    pub classification: Classification,
    pub has_provenance_marker: bool,
    pub timestamp: DateTime<Utc>,
}

/// Payload for a result-forwarding sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForwardedResult {
    pub verdict: ScanVerdict,
    pub timestamp: DateTime<Utc>,
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}
