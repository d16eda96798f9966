//! Core data types for mediascan.
//!
//! Plain, serializable records shared by the probes, the fusion engine
//! and callers.

pub mod scan;
