//! Report kinds.
//!
//! Every report kind knows how to scan one log file into its own
//! aggregate type, how to merge two aggregates and how to render the
//! final result. The orchestrator in `main` is generic over [`LogReport`].

pub mod generator;

pub use generator::*;

use crate::analysis;
use crate::models::Aggregate;
use crate::scanner;
use anyhow::Result;
use std::path::Path;
use tracing::debug;

/// Common contract of all report kinds.
pub trait LogReport: Send + Sync + 'static {
    /// Partial and final result type; one value per scanned file.
    type Aggregate: Send + 'static;

    /// Scan a single log file. Must not fail; problems are logged.
    fn scan_file(&self, path: &Path) -> Self::Aggregate;

    /// Starting value for the fold over per-file results.
    fn initial_aggregate(&self) -> Self::Aggregate;

    /// Merge `new` into `base`. Must be commutative and associative.
    fn merge(&self, base: &mut Self::Aggregate, new: Self::Aggregate);

    /// Render the final aggregate as text.
    fn generate(&self, data: &Self::Aggregate) -> String;

    /// Render the final aggregate as JSON.
    fn generate_json(&self, data: &Self::Aggregate) -> Result<String>;
}

/// Request counts per handler and level.
#[derive(Debug, Clone, Copy)]
pub struct HandlerReport {
    /// Prefix the table with a `Total requests: N` line.
    pub show_total_requests: bool,
}

impl Default for HandlerReport {
    fn default() -> Self {
        Self {
            show_total_requests: true,
        }
    }
}

impl LogReport for HandlerReport {
    type Aggregate = Aggregate;

    fn scan_file(&self, path: &Path) -> Aggregate {
        let scan = scanner::scan_file(path);
        debug!(
            "Scanned {}: {} lines, {} records, {} handlers{}",
            path.display(),
            scan.stats.lines_read,
            scan.stats.records,
            scan.aggregate.len(),
            if scan.error.is_some() { " (partial)" } else { "" }
        );
        scan.aggregate
    }

    fn initial_aggregate(&self) -> Aggregate {
        Aggregate::new()
    }

    fn merge(&self, base: &mut Aggregate, new: Aggregate) {
        analysis::merge(base, new);
    }

    fn generate(&self, data: &Aggregate) -> String {
        if self.show_total_requests {
            render_with_total(data)
        } else {
            render_table(data)
        }
    }

    fn generate_json(&self, data: &Aggregate) -> Result<String> {
        render_json(data)
    }
}
