//! Scan runtime for remote media resources.
//!
//! This module provides the probes, pattern tables and fusion engine that
//! turn a URL into a fast first-pass verdict without downloading the file.

pub mod api;
pub mod config;
pub mod fetch;
pub mod headers;
pub mod heuristics;
pub mod metadata;
pub mod score;
pub mod signatures;
pub mod sniffers;

// Re-export key types from core for convenience
pub use crate::core::scan::{
    Classification, FailedSignal, FileSignature, HeaderSignal, MetadataSignal, MetadataSource,
    ProbeFailure, ScanMetadata, ScanVerdict, SignalName, SignalOutcome, UrlSignal,
};
pub use api::{scan_url, Scanner};
pub use config::ScanConfig;
pub use fetch::{HttpFetcher, MediaFetcher, ResponseHead};
