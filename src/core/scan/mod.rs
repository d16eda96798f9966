//! Core scan data types organized by submodule.

pub mod outcome;
pub mod signals;
pub mod verdict;

// Re-exports for convenient access under crate::core::scan::*
pub use outcome::{ProbeFailure, SignalName, SignalOutcome};
pub use signals::{FileSignature, HeaderSignal, MetadataSignal, MetadataSource, UrlSignal};
pub use verdict::{
    Classification, FailedSignal, ForwardedResult, ScanMetadata, ScanVerdict, TelemetrySummary,
};
