//! Analysis modules.
//!
//! Combines per-file aggregates into the overall result.

pub mod aggregator;

pub use aggregator::*;
