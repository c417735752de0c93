//! Text and JSON report generation.
//!
//! This module renders an [`Aggregate`] as a fixed-width table: a header,
//! one row per handler sorted by path, and a TOTAL row.

use crate::models::{Aggregate, LevelCounts};
use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;

/// Column header line of the handler table.
pub const HEADER: &str =
    "HANDLER                          DEBUG    INFO WARNING   ERROR  CRITICAL";

/// Label of the summary row.
const TOTAL_LABEL: &str = "TOTAL";

/// Format one table row with the fixed column widths.
pub fn format_row(label: &str, counts: &LevelCounts) -> String {
    format!(
        "{:<30}{:>8}{:>8}{:>8}{:>8}{:>10}",
        label, counts.debug, counts.info, counts.warning, counts.error, counts.critical
    )
}

/// Build the table lines: header, sorted handler rows, TOTAL row.
pub fn table_lines(aggregate: &Aggregate) -> Vec<String> {
    let mut lines = Vec::with_capacity(aggregate.len() + 2);

    lines.push(HEADER.to_string());

    for (path, counts) in aggregate.sorted() {
        lines.push(format_row(path, counts));
    }

    lines.push(format_row(TOTAL_LABEL, &aggregate.totals()));

    lines
}

/// Render the table as a single string.
pub fn render_table(aggregate: &Aggregate) -> String {
    table_lines(aggregate).join("\n")
}

/// Render the table preceded by a `Total requests: N` line.
pub fn render_with_total(aggregate: &Aggregate) -> String {
    let mut lines = vec![format!("Total requests: {}", aggregate.total_requests())];
    lines.extend(table_lines(aggregate));
    lines.join("\n")
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    total_requests: u64,
    handlers: BTreeMap<&'a str, &'a LevelCounts>,
    total: LevelCounts,
}

/// Render the aggregate as pretty-printed JSON with handlers sorted by path.
pub fn render_json(aggregate: &Aggregate) -> Result<String> {
    let report = JsonReport {
        generated_at: Utc::now().to_rfc3339(),
        total_requests: aggregate.total_requests(),
        handlers: aggregate.sorted().into_iter().collect(),
        total: aggregate.totals(),
    };

    serde_json::to_string_pretty(&report).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Level;

    fn create_test_aggregate() -> Aggregate {
        let mut agg = Aggregate::new();
        let reviews = agg.counts_mut("/api/v1/reviews/");
        reviews.increment(Level::Info);
        reviews.increment(Level::Info);

        let admin = agg.counts_mut("/admin/dashboard/");
        for _ in 0..2 {
            admin.increment(Level::Info);
            admin.increment(Level::Error);
        }

        agg.counts_mut("/api/v1/checkout/").increment(Level::Error);
        agg
    }

    #[test]
    fn test_header_layout() {
        let expected = format!(
            "{:<30}{:>8}{:>8}{:>8}{:>8}{:>10}",
            "HANDLER", "DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"
        );
        assert_eq!(HEADER, expected);
        assert_eq!(HEADER.len(), 72);
    }

    #[test]
    fn test_render_table_rows_sorted() {
        let table = render_table(&create_test_aggregate());
        let lines: Vec<_> = table.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], HEADER);
        assert!(lines[1].starts_with("/admin/dashboard/"));
        assert!(lines[2].starts_with("/api/v1/checkout/"));
        assert!(lines[3].starts_with("/api/v1/reviews/"));
        assert!(lines[4].starts_with("TOTAL"));
        assert!(!table.contains("Total requests"));
    }

    #[test]
    fn test_render_exact_rows() {
        let table = render_table(&create_test_aggregate());
        let lines: Vec<_> = table.lines().collect();

        assert_eq!(
            lines[1],
            "/admin/dashboard/                    0       2       0       2         0"
        );
        assert_eq!(
            lines[4],
            "TOTAL                                0       4       0       3         0"
        );
    }

    #[test]
    fn test_render_with_total() {
        let report = render_with_total(&create_test_aggregate());

        assert!(report.starts_with("Total requests: 7\n"));
        assert!(report.contains(HEADER));
        assert!(report.contains("/api/v1/reviews/"));
        assert!(report.contains("TOTAL"));
    }

    #[test]
    fn test_render_empty_aggregate() {
        let lines = table_lines(&Aggregate::new());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], format_row("TOTAL", &LevelCounts::new()));
        assert!(render_with_total(&Aggregate::new()).starts_with("Total requests: 0"));
    }

    #[test]
    fn test_long_path_not_truncated() {
        let path = "/a/very/long/handler/path/that/exceeds/thirty/chars/";
        let row = format_row(path, &LevelCounts::new());
        assert!(row.starts_with(path));
        assert_eq!(row.len(), path.len() + 42);
    }

    #[test]
    fn test_render_is_deterministic() {
        let agg = create_test_aggregate();
        assert_eq!(render_table(&agg), render_table(&agg.clone()));
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&create_test_aggregate()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["total_requests"], 7);
        assert_eq!(value["handlers"]["/admin/dashboard/"]["ERROR"], 2);
        assert_eq!(value["total"]["INFO"], 4);
        assert!(value["generated_at"].is_string());
    }
}
