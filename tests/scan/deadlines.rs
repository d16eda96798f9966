//! Deadline enforcement, measured on tokio's paused clock.

use crate::common::{approx, jpeg_prefix, media_head, Behavior, MockFetcher};
use mediascan::scan::{Classification, FailedSignal, ProbeFailure, ScanConfig, Scanner, SignalName};
use std::sync::atomic::Ordering;
use std::time::Duration;

const URL: &str = "https://images.example.org/a/b/sunset.jpg";

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[tokio::test(start_paused = true)]
async fn hanging_probes_settle_as_timeouts_within_larger_deadline() {
    let scanner = Scanner::with_fetcher(
        MockFetcher::new(Behavior::Hang, Behavior::Hang),
        ScanConfig::default(),
    )
    .unwrap();
    let v = scanner.scan(URL).await;

    assert_eq!(
        v.failed_signals,
        vec![
            FailedSignal {
                signal: SignalName::Metadata,
                reason: ProbeFailure::Timeout
            },
            FailedSignal {
                signal: SignalName::Headers,
                reason: ProbeFailure::Timeout
            },
        ]
    );
    assert_eq!(v.contributing_signals, vec![SignalName::UrlAnalysis]);
    assert!(v.elapsed >= ms(2000), "elapsed {:?}", v.elapsed);
    assert!(v.elapsed < ms(2100), "elapsed {:?}", v.elapsed);

    // Neutral URL alone: 0 / 40
    assert_eq!(v.classification, Classification::Safe);
    assert!(approx(v.confidence, 0.9));
}

#[tokio::test(start_paused = true)]
async fn slow_metadata_is_dropped_after_one_second() {
    let mock = MockFetcher::new(
        Behavior::Delay(ms(1500), media_head(40_000, "image/jpeg")),
        Behavior::Respond(jpeg_prefix(8192, false)),
    );
    let stats = mock.stats();
    let scanner = Scanner::with_fetcher(mock, ScanConfig::default()).unwrap();
    let v = scanner.scan(URL).await;

    assert_eq!(stats.head_calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        v.contributing_signals,
        vec![SignalName::Headers, SignalName::UrlAnalysis]
    );
    assert_eq!(
        v.failed_signals,
        vec![FailedSignal {
            signal: SignalName::Metadata,
            reason: ProbeFailure::Timeout
        }]
    );
    // The late HEAD response never reaches the snapshot.
    assert_eq!(v.metadata.declared_size, None);
    assert!(v.elapsed >= ms(1000) && v.elapsed < ms(1100), "elapsed {:?}", v.elapsed);
}

#[tokio::test(start_paused = true)]
async fn probes_just_inside_their_deadlines_contribute() {
    let scanner = Scanner::with_fetcher(
        MockFetcher::new(
            Behavior::Delay(ms(900), media_head(40_000, "image/jpeg")),
            Behavior::Delay(ms(1900), jpeg_prefix(8192, true)),
        ),
        ScanConfig::default(),
    )
    .unwrap();
    let v = scanner.scan(URL).await;

    assert!(v.failed_signals.is_empty());
    assert_eq!(v.contributing_signals.len(), 3);
    assert!(v.elapsed >= ms(1900) && v.elapsed < ms(2000), "elapsed {:?}", v.elapsed);
}

#[tokio::test(start_paused = true)]
async fn metadata_timeout_does_not_move_header_deadline() {
    let scanner = Scanner::with_fetcher(
        MockFetcher::new(
            Behavior::Hang,
            Behavior::Delay(ms(1500), jpeg_prefix(8192, false)),
        ),
        ScanConfig::default(),
    )
    .unwrap();
    let v = scanner.scan(URL).await;

    assert_eq!(
        v.contributing_signals,
        vec![SignalName::Headers, SignalName::UrlAnalysis]
    );
    assert!(v.elapsed >= ms(1500) && v.elapsed < ms(2000), "elapsed {:?}", v.elapsed);
}

#[tokio::test(start_paused = true)]
async fn header_probe_past_deadline_times_out() {
    let scanner = Scanner::with_fetcher(
        MockFetcher::new(
            Behavior::Respond(media_head(40_000, "image/jpeg")),
            Behavior::Delay(ms(2500), jpeg_prefix(8192, true)),
        ),
        ScanConfig::default(),
    )
    .unwrap();
    let v = scanner.scan(URL).await;

    assert_eq!(
        v.failed_signals,
        vec![FailedSignal {
            signal: SignalName::Headers,
            reason: ProbeFailure::Timeout
        }]
    );
    assert!(!v.metadata.has_provenance_marker);
    assert!(v.elapsed < ms(2100), "elapsed {:?}", v.elapsed);
}
