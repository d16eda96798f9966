//! Settled probe outcomes and failure reasons.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a probe failed to contribute a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProbeFailure {
    Timeout,
    NetworkError,
    CorsBlocked,
}

impl fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeFailure::Timeout => write!(f, "timeout"),
            ProbeFailure::NetworkError => write!(f, "network-error"),
            ProbeFailure::CorsBlocked => write!(f, "cors-blocked"),
        }
    }
}

/// The settled result of one probe. Exactly one per probe per scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "kebab-case")]
pub enum SignalOutcome<T> {
    Fulfilled(T),
    Failed(ProbeFailure),
}

impl<T> SignalOutcome<T> {
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, SignalOutcome::Fulfilled(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            SignalOutcome::Fulfilled(v) => Some(v),
            SignalOutcome::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<ProbeFailure> {
        match self {
            SignalOutcome::Fulfilled(_) => None,
            SignalOutcome::Failed(reason) => Some(*reason),
        }
    }
}

/// Names of the signal sources as they appear in a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignalName {
    Metadata,
    Headers,
    UrlAnalysis,
    ErrorFallback,
}

impl SignalName {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalName::Metadata => "metadata",
            SignalName::Headers => "headers",
            SignalName::UrlAnalysis => "url-analysis",
            SignalName::ErrorFallback => "error-fallback",
        }
    }
}

impl fmt::Display for SignalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
