//! Data models for the request log analyzer.
//!
//! This module contains the level vocabulary and the per-handler
//! count structures shared by the scanner, the merge step and the
//! report generators.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Severity level of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Level {
    /// All recognized levels, in report column order.
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Critical,
    ];

    /// Parse an exact upper-case level label (e.g. `"INFO"`).
    ///
    /// Anything else, including lower-case spellings, is not a level.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "DEBUG" => Some(Level::Debug),
            "INFO" => Some(Level::Info),
            "WARNING" => Some(Level::Warning),
            "ERROR" => Some(Level::Error),
            "CRITICAL" => Some(Level::Critical),
            _ => None,
        }
    }

    /// Returns the label as it appears in log lines and report headers.
    pub fn label(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Record counts for one handler, one slot per [`Level`].
///
/// Every level is always present; a fresh value is all zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct LevelCounts {
    pub debug: u64,
    pub info: u64,
    pub warning: u64,
    pub error: u64,
    pub critical: u64,
}

impl LevelCounts {
    /// Zero-valued counts.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, level: Level) -> u64 {
        match level {
            Level::Debug => self.debug,
            Level::Info => self.info,
            Level::Warning => self.warning,
            Level::Error => self.error,
            Level::Critical => self.critical,
        }
    }

    fn slot_mut(&mut self, level: Level) -> &mut u64 {
        match level {
            Level::Debug => &mut self.debug,
            Level::Info => &mut self.info,
            Level::Warning => &mut self.warning,
            Level::Error => &mut self.error,
            Level::Critical => &mut self.critical,
        }
    }

    pub fn increment(&mut self, level: Level) {
        *self.slot_mut(level) += 1;
    }

    /// Add every level of `other` into `self`.
    pub fn add(&mut self, other: &LevelCounts) {
        for level in Level::ALL {
            *self.slot_mut(level) += other.get(level);
        }
    }

    /// Sum across all levels.
    pub fn total(&self) -> u64 {
        Level::ALL.iter().map(|&level| self.get(level)).sum()
    }
}

/// Per-handler counts accumulated from one or more log files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Aggregate {
    handlers: HashMap<String, LevelCounts>,
}

impl Aggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts for `path`, inserting zeroed counts if the handler is new.
    pub fn counts_mut(&mut self, path: &str) -> &mut LevelCounts {
        self.handlers.entry(path.to_string()).or_default()
    }

    pub fn get(&self, path: &str) -> Option<&LevelCounts> {
        self.handlers.get(path)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Handlers sorted ascending by path.
    pub fn sorted(&self) -> Vec<(&str, &LevelCounts)> {
        let mut rows: Vec<_> = self
            .handlers
            .iter()
            .map(|(path, counts)| (path.as_str(), counts))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(b.0));
        rows
    }

    /// Column-wise sum over all handlers.
    pub fn totals(&self) -> LevelCounts {
        let mut total = LevelCounts::new();
        for counts in self.handlers.values() {
            total.add(counts);
        }
        total
    }

    /// Number of counted records across every handler and level.
    pub fn total_requests(&self) -> u64 {
        self.handlers.values().map(LevelCounts::total).sum()
    }
}

impl IntoIterator for Aggregate {
    type Item = (String, LevelCounts);
    type IntoIter = std::collections::hash_map::IntoIter<String, LevelCounts>;

    fn into_iter(self) -> Self::IntoIter {
        self.handlers.into_iter()
    }
}
