//! Scan orchestration.
//!
//! A scan launches the metadata and header probes as independent tasks,
//! each under its own deadline, evaluates the URL heuristics inline, joins
//! on all three slots and fuses the outcomes. A scan always returns a
//! verdict; a task that dies unexpectedly yields the fixed fallback verdict.

use crate::core::scan::{
    Classification, FailedSignal, HeaderSignal, MetadataSignal, ScanMetadata, ScanVerdict,
    SignalName, SignalOutcome, UrlSignal,
};
use crate::error::Result;
use crate::scan::config::ScanConfig;
use crate::scan::fetch::{HttpFetcher, MediaFetcher};
use crate::scan::headers::probe_headers;
use crate::scan::heuristics::classify_url;
use crate::scan::metadata::probe_metadata;
use crate::scan::score::{Fusion, ScoreEngine, ERROR_FALLBACK_CONFIDENCE};
use crate::timeout::{guard_probe, TimeoutConfig};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinError;
use tokio::time::Instant;
use tracing::{error, info, info_span, Instrument};

/// Concurrent, time-bounded scanner over a [`MediaFetcher`].
#[derive(Debug)]
pub struct Scanner<F> {
    fetcher: Arc<F>,
    config: Arc<ScanConfig>,
    engine: ScoreEngine,
}

impl<F> Clone for Scanner<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            config: Arc::clone(&self.config),
            engine: self.engine.clone(),
        }
    }
}

impl Scanner<HttpFetcher> {
    /// Scanner backed by a real HTTP client.
    pub fn http(config: ScanConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(config.http.clone())?;
        Self::with_fetcher(fetcher, config)
    }
}

impl<F: MediaFetcher> Scanner<F> {
    /// Scanner over any fetcher. Rejects configurations `validate` refuses.
    pub fn with_fetcher(fetcher: F, config: ScanConfig) -> Result<Self> {
        config.validate()?;
        let engine = ScoreEngine::new(config.scoring.clone());
        Ok(Self {
            fetcher: Arc::new(fetcher),
            config: Arc::new(config),
            engine,
        })
    }

    /// Scan one URL. Completes within the larger probe deadline plus overhead.
    pub async fn scan(&self, url: &str) -> ScanVerdict {
        let span = info_span!("scan", url = %url);
        self.scan_inner(url).instrument(span).await
    }

    async fn scan_inner(&self, url: &str) -> ScanVerdict {
        let start = Instant::now();
        let probes = &self.config.probes;

        let metadata_task = {
            let fetcher = Arc::clone(&self.fetcher);
            let url = url.to_string();
            let scoring = self.config.scoring.clone();
            let guard = TimeoutConfig::from_millis(probes.metadata_timeout_ms, "metadata");
            tokio::spawn(
                async move {
                    guard_probe(&guard, probe_metadata(fetcher.as_ref(), &url, &scoring)).await
                }
                .in_current_span(),
            )
        };

        let header_task = {
            let fetcher = Arc::clone(&self.fetcher);
            let url = url.to_string();
            let range = probes.header_range_bytes;
            let guard = TimeoutConfig::from_millis(probes.header_timeout_ms, "headers");
            tokio::spawn(
                async move { guard_probe(&guard, probe_headers(fetcher.as_ref(), &url, range)).await }
                    .in_current_span(),
            )
        };

        // No I/O; always settles as fulfilled.
        let url_outcome = SignalOutcome::Fulfilled(classify_url(url));

        let (metadata, headers) = tokio::join!(metadata_task, header_task);
        let elapsed = start.elapsed();

        match (metadata, headers) {
            (Ok(metadata), Ok(headers)) => {
                let verdict = self.assemble(url, &metadata, &headers, &url_outcome, elapsed);
                info!(
                    classification = %verdict.classification,
                    confidence = verdict.confidence,
                    elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                    signals = ?verdict.contributing_signals,
                    "Scan complete"
                );
                verdict
            }
            (Err(e), _) | (_, Err(e)) => error_fallback(url, &url_outcome, elapsed, &e),
        }
    }

    fn assemble(
        &self,
        url: &str,
        metadata: &SignalOutcome<MetadataSignal>,
        headers: &SignalOutcome<HeaderSignal>,
        url_signal: &SignalOutcome<UrlSignal>,
        elapsed: Duration,
    ) -> ScanVerdict {
        let fusion: Fusion = self.engine.fuse(metadata, headers, url_signal);

        let failed_signals = [
            (SignalName::Metadata, metadata.failure()),
            (SignalName::Headers, headers.failure()),
            (SignalName::UrlAnalysis, url_signal.failure()),
        ]
        .into_iter()
        .filter_map(|(signal, reason)| reason.map(|reason| FailedSignal { signal, reason }))
        .collect();

        let m = metadata.value();
        let h = headers.value();
        let snapshot = ScanMetadata {
            url: url.to_string(),
            hostname: url_signal
                .value()
                .map(|u| u.hostname.clone())
                .unwrap_or_default(),
            declared_size: m.and_then(|m| m.declared_size),
            mime_type: m.and_then(|m| m.declared_mime_type.clone()),
            metadata_source: m.map(|m| m.source),
            file_signature: h.map(|h| h.file_signature),
            has_provenance_marker: h.map(|h| h.has_provenance_marker).unwrap_or(false),
            suspicion_score: Some(fusion.suspicion_score),
            suspicion_ratio: Some(fusion.suspicion_ratio),
        };

        ScanVerdict {
            classification: fusion.classification,
            confidence: fusion.confidence,
            elapsed,
            contributing_signals: fusion.contributing,
            failed_signals,
            metadata: snapshot,
        }
    }
}

/// Fixed verdict for a probe task that panicked or was cancelled.
fn error_fallback(
    url: &str,
    url_signal: &SignalOutcome<UrlSignal>,
    elapsed: Duration,
    cause: &JoinError,
) -> ScanVerdict {
    error!(error = %cause, "Probe task failed unexpectedly; returning fallback verdict");
    ScanVerdict {
        classification: Classification::Warning,
        confidence: ERROR_FALLBACK_CONFIDENCE,
        elapsed,
        contributing_signals: vec![SignalName::ErrorFallback],
        failed_signals: Vec::new(),
        metadata: ScanMetadata {
            url: url.to_string(),
            hostname: url_signal
                .value()
                .map(|u| u.hostname.clone())
                .unwrap_or_default(),
            ..Default::default()
        },
    }
}

/// Scan a URL over HTTP with the given configuration.
pub async fn scan_url(url: &str, config: ScanConfig) -> Result<ScanVerdict> {
    let scanner = Scanner::http(config)?;
    Ok(scanner.scan(url).await)
}
