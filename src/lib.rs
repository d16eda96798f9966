//! Lightweight heuristic scanning of remote images and videos.
//!
//! A scan issues a header-only request and a small range request against a
//! URL, evaluates the URL string itself, and fuses whatever evidence
//! arrives within the probe deadlines into a safe/warning/danger verdict.

/// Core data types module
pub mod core;
pub mod error;
pub mod logging;
pub mod scan;
pub mod timeout;

pub use error::{MediaScanError, Result};
pub use scan::{scan_url, ScanConfig, ScanVerdict, Scanner};
