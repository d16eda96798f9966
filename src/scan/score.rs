//! Fusion of settled probe outcomes into a classification.
//!
//! Only fulfilled outcomes contribute; a failed probe adds neither score
//! nor checks. The arithmetic is kept literal: a provenance marker can
//! drive the score negative and the safe-branch confidence above 0.9.

use crate::core::scan::{
    Classification, HeaderSignal, MetadataSignal, SignalName, SignalOutcome, UrlSignal,
};
use crate::scan::config::ScoringConfig;

/// Ratio used when no check contributed at all.
pub const NO_EVIDENCE_RATIO: f64 = 0.5;

/// Confidence reported with the internal-fault fallback verdict.
pub const ERROR_FALLBACK_CONFIDENCE: f64 = 0.3;

/// Intermediate and final values of one fusion pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Fusion {
    pub suspicion_score: i32,
    pub total_checks: u32,
    pub suspicion_ratio: f64,
    pub classification: Classification,
    pub confidence: f64,
    /// Fulfilled signals in evaluation order
    pub contributing: Vec<SignalName>,
}

/// Map a suspicion ratio onto a classification and confidence.
pub fn classify_ratio(ratio: f64) -> (Classification, f64) {
    if ratio > 0.6 {
        (
            Classification::Danger,
            (0.7 + (ratio - 0.6) * 0.625).min(0.95),
        )
    } else if ratio > 0.3 {
        (
            Classification::Warning,
            (0.5 + (ratio - 0.3) * 0.833).min(0.85),
        )
    } else {
        (Classification::Safe, (0.9 - ratio * 1.5).max(0.6))
    }
}

/// Scoring engine over the three signal slots.
#[derive(Debug, Clone, Default)]
pub struct ScoreEngine {
    weights: ScoringConfig,
}

impl ScoreEngine {
    pub fn new(weights: ScoringConfig) -> Self {
        Self { weights }
    }

    /// Combine settled outcomes. Deterministic in its inputs.
    pub fn fuse(
        &self,
        metadata: &SignalOutcome<MetadataSignal>,
        headers: &SignalOutcome<HeaderSignal>,
        url: &SignalOutcome<UrlSignal>,
    ) -> Fusion {
        let w = &self.weights;
        let mut score: i32 = 0;
        let mut checks: u32 = 0;
        let mut contributing = Vec::with_capacity(3);

        if let Some(m) = metadata.value() {
            checks += w.metadata_checks;
            if !m.mime_type_is_plausible {
                score += w.implausible_mime;
            }
            if m.size_is_implausible {
                score += w.implausible_size;
            }
            contributing.push(SignalName::Metadata);
        }

        if let Some(h) = headers.value() {
            checks += w.header_checks;
            if h.has_provenance_marker {
                score -= w.provenance_bonus;
            } else {
                score += w.missing_provenance;
            }
            contributing.push(SignalName::Headers);
        }

        if let Some(u) = url.value() {
            checks += w.url_checks;
            if u.is_suspicious {
                score += w.suspicious_url;
            } else if u.is_uncertain {
                score += w.uncertain_url;
            }
            contributing.push(SignalName::UrlAnalysis);
        }

        let ratio = if checks > 0 {
            let max_possible = f64::from(checks) * f64::from(w.max_weight_per_check);
            f64::from(score) / max_possible
        } else {
            NO_EVIDENCE_RATIO
        };
        let (classification, confidence) = classify_ratio(ratio);

        Fusion {
            suspicion_score: score,
            total_checks: checks,
            suspicion_ratio: ratio,
            classification,
            confidence,
            contributing,
        }
    }
}
