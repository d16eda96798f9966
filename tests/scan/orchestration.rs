//! End-to-end scans over the in-memory fetcher.

use crate::common::{approx, jpeg_prefix, media_head, Behavior, MockFetcher};
use mediascan::MediaScanError;
use mediascan::scan::{
    Classification, FailedSignal, FileSignature, MetadataSource, ProbeFailure, ScanConfig,
    Scanner, SignalName,
};
use std::sync::atomic::Ordering;

#[tokio::test]
async fn provenance_marked_jpeg_is_safe_with_literal_confidence() {
    let fetcher = MockFetcher::new(
        Behavior::Respond(media_head(250_000, "image/jpeg")),
        Behavior::Respond(jpeg_prefix(8192, true)),
    );
    let scanner = Scanner::with_fetcher(fetcher, ScanConfig::default()).unwrap();
    let v = scanner.scan("https://photos.example.org/2024/harbor.jpg").await;

    assert_eq!(v.classification, Classification::Safe);
    assert_eq!(v.metadata.suspicion_score, Some(-20));
    assert!(approx(v.metadata.suspicion_ratio.unwrap(), -0.125));
    assert!(approx(v.confidence, 1.0875));
    assert_eq!(
        v.contributing_signals,
        vec![
            SignalName::Metadata,
            SignalName::Headers,
            SignalName::UrlAnalysis
        ]
    );
    assert!(v.failed_signals.is_empty());
    assert_eq!(v.metadata.file_signature, Some(FileSignature::Jpeg));
    assert!(v.metadata.has_provenance_marker);
    assert_eq!(v.metadata.declared_size, Some(250_000));
    assert_eq!(v.metadata.hostname, "photos.example.org");
}

#[tokio::test]
async fn suspicious_url_with_both_probes_failing_is_danger() {
    // Metadata falls back instead of failing, so force it out with a deadline.
    let fetcher = MockFetcher::new(Behavior::Hang, Behavior::NetworkError);
    let mut config = ScanConfig::default();
    config.probes.metadata_timeout_ms = 1;
    let scanner = Scanner::with_fetcher(fetcher, config).unwrap();
    let v = scanner.scan("https://bit.ly/3kQz9").await;

    assert_eq!(v.contributing_signals, vec![SignalName::UrlAnalysis]);
    assert_eq!(v.metadata.suspicion_score, Some(40));
    assert_eq!(v.classification, Classification::Danger);
    assert!(approx(v.confidence, 0.95));
    assert_eq!(
        v.failed_signals,
        vec![
            FailedSignal {
                signal: SignalName::Metadata,
                reason: ProbeFailure::Timeout
            },
            FailedSignal {
                signal: SignalName::Headers,
                reason: ProbeFailure::NetworkError
            },
        ]
    );
}

#[tokio::test]
async fn blocked_metadata_degrades_to_extension_guess() {
    let fetcher = MockFetcher::new(Behavior::Blocked, Behavior::Blocked);
    let scanner = Scanner::with_fetcher(fetcher, ScanConfig::default()).unwrap();
    let v = scanner.scan("https://media.example.com/v/clip.mp4?token=x").await;

    // Metadata still contributes; the header probe does not.
    assert_eq!(
        v.contributing_signals,
        vec![SignalName::Metadata, SignalName::UrlAnalysis]
    );
    assert_eq!(v.metadata.metadata_source, Some(MetadataSource::ExtensionFallback));
    assert_eq!(v.metadata.mime_type.as_deref(), Some("video/mp4"));
    assert_eq!(v.metadata.declared_size, None);
    assert_eq!(
        v.failed_signals,
        vec![FailedSignal {
            signal: SignalName::Headers,
            reason: ProbeFailure::CorsBlocked
        }]
    );
    assert_eq!(v.classification, Classification::Safe);
    assert!(approx(v.confidence, 0.9));
}

#[tokio::test]
async fn unknown_extension_after_block_counts_as_implausible_mime() {
    let fetcher = MockFetcher::new(Behavior::Blocked, Behavior::Respond(vec![0u8; 64]));
    let scanner = Scanner::with_fetcher(fetcher, ScanConfig::default()).unwrap();
    let v = scanner.scan("https://files.example.com/download?id=42").await;

    // 30 (no plausible mime) + 10 (no marker) over 4 checks
    assert_eq!(v.metadata.suspicion_score, Some(40));
    assert!(approx(v.metadata.suspicion_ratio.unwrap(), 0.25));
    assert_eq!(v.classification, Classification::Safe);
    assert!(approx(v.confidence, 0.6));
    assert_eq!(v.metadata.file_signature, Some(FileSignature::Unknown));
}

#[tokio::test]
async fn implausible_metadata_and_uncertain_host_is_warning() {
    let fetcher = MockFetcher::new(
        Behavior::Respond(media_head(300, "text/html")),
        Behavior::Respond(b"<!doctype html><html>".to_vec()),
    );
    let scanner = Scanner::with_fetcher(fetcher, ScanConfig::default()).unwrap();
    let v = scanner.scan("https://images.unsplash.com/photo-123").await;

    // 30 + 20 + 10 + 20 = 80 over 160
    assert_eq!(v.metadata.suspicion_score, Some(80));
    assert_eq!(v.classification, Classification::Warning);
    assert!(approx(v.confidence, 0.5 + 0.2 * 0.833));
}

#[tokio::test]
async fn range_request_is_capped_at_8192_bytes() {
    let mut config = ScanConfig::default();
    config.probes.header_range_bytes = 1 << 20;
    let mock = MockFetcher::new(
        Behavior::Respond(media_head(5000, "image/png")),
        Behavior::Respond(vec![0u8; 20_000]),
    );
    let stats = mock.stats();
    let scanner = Scanner::with_fetcher(mock, config).unwrap();
    let v = scanner.scan("https://example.com/a.png").await;

    assert_eq!(stats.range_calls.load(Ordering::SeqCst), 1);
    assert_eq!(stats.last_range_len.load(Ordering::SeqCst), 8192);
    assert_eq!(v.metadata.file_signature, Some(FileSignature::Unknown));
}

#[tokio::test]
async fn smaller_configured_range_is_honored() {
    let mut config = ScanConfig::default();
    config.probes.header_range_bytes = 1024;
    let mock = MockFetcher::new(Behavior::Blocked, Behavior::Respond(jpeg_prefix(4096, false)));
    let stats = mock.stats();
    let scanner = Scanner::with_fetcher(mock, config).unwrap();
    let v = scanner.scan("https://example.com/a.jpg").await;

    assert_eq!(stats.last_range_len.load(Ordering::SeqCst), 1024);
    assert_eq!(v.metadata.file_signature, Some(FileSignature::Jpeg));
    assert!(!v.metadata.has_provenance_marker);
}

#[tokio::test]
async fn identical_responses_yield_identical_verdicts() {
    let scanner = Scanner::with_fetcher(
        MockFetcher::new(
            Behavior::Respond(media_head(48_000, "image/webp")),
            Behavior::Respond(b"RIFF\x10\x00\x00\x00WEBPVP8 ".to_vec()),
        ),
        ScanConfig::default(),
    )
    .unwrap();
    let url = "https://cdn.example.com/tmp/preview.webp";
    let a = scanner.scan(url).await;
    let b = scanner.scan(url).await;

    assert_eq!(a.classification, b.classification);
    assert_eq!(a.confidence, b.confidence);
    assert_eq!(a.contributing_signals, b.contributing_signals);
    assert_eq!(a.failed_signals, b.failed_signals);
    assert_eq!(a.metadata, b.metadata);
    assert_eq!(a.metadata.file_signature, Some(FileSignature::Webp));
}

#[tokio::test]
async fn panicking_probe_yields_error_fallback() {
    let fetcher = MockFetcher::new(
        Behavior::Respond(media_head(48_000, "image/png")),
        Behavior::Panic,
    );
    let scanner = Scanner::with_fetcher(fetcher, ScanConfig::default()).unwrap();
    let v = scanner.scan("https://example.com/p.png").await;

    assert!(v.is_error_fallback());
    assert_eq!(v.classification, Classification::Warning);
    assert!(approx(v.confidence, 0.3));
    assert_eq!(v.contributing_signals, vec![SignalName::ErrorFallback]);
    assert_eq!(v.metadata.hostname, "example.com");
}

#[tokio::test]
async fn zero_weight_ceiling_is_refused_before_scanning() {
    let mock = MockFetcher::new(
        Behavior::Respond(media_head(48_000, "image/png")),
        Behavior::Respond(jpeg_prefix(8192, false)),
    );
    let stats = mock.stats();
    let mut config = ScanConfig::default();
    config.scoring.max_weight_per_check = 0;

    let err = Scanner::with_fetcher(mock, config).unwrap_err();
    assert!(matches!(err, MediaScanError::Config(_)));
    assert_eq!(stats.head_calls.load(Ordering::SeqCst), 0);
    assert_eq!(stats.range_calls.load(Ordering::SeqCst), 0);
}
