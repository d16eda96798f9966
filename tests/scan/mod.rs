//! Integration tests for scan orchestration.
//!
//! Covers deadline enforcement, degraded probes, fusion over real probe
//! outputs and the HTTP transport.

mod deadlines;
mod orchestration;
