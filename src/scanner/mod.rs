//! Log file scanning.
//!
//! This module reads a log file line by line, extracts request records
//! and accumulates per-handler counts. Read failures never escape: the
//! caller always gets an aggregate, possibly empty or partial.

pub mod line;

use crate::models::{Aggregate, Level};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use line::extract;

/// Reasons a log file could not be fully scanned.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Log file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read log file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            ScanError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ScanError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Outcome of scanning one log file.
#[derive(Debug)]
pub struct FileScan {
    /// Counts gathered before the scan finished or failed.
    pub aggregate: Aggregate,
    /// Line statistics up to the end of the scan.
    pub stats: ScanStats,
    /// Set when the file was missing or a read failed part-way.
    pub error: Option<ScanError>,
}

/// Line statistics collected by [`scan_reader`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Lines read successfully.
    pub lines_read: usize,
    /// Lines recognized as request records.
    pub records: usize,
}

/// Scan a log file into per-handler counts.
///
/// A missing file yields an empty aggregate; any other I/O error keeps
/// what was counted so far. Both cases are logged as warnings.
pub fn scan_file(path: &Path) -> FileScan {
    let mut aggregate = Aggregate::new();
    let mut stats = ScanStats::default();

    let result = File::open(path)
        .and_then(|file| scan_reader(BufReader::new(file), &mut aggregate, &mut stats));

    let error = result.err().map(|e| {
        let error = ScanError::from_io(path, e);
        warn!("{}", error);
        error
    });

    FileScan {
        aggregate,
        stats,
        error,
    }
}

/// Accumulate records from `reader` into `aggregate`.
///
/// Lines end at `\n`, `\r\n` or a bare `\r`. Input must be UTF-8.
/// Stops at the first read error; counts added before it are kept.
pub fn scan_reader<R: BufRead>(
    mut reader: R,
    aggregate: &mut Aggregate,
    stats: &mut ScanStats,
) -> io::Result<()> {
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        let chunk = buf.strip_suffix(b"\n").unwrap_or(&buf[..]);
        let chunk = std::str::from_utf8(chunk)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        for line in split_carriage_returns(chunk) {
            scan_line(line, aggregate, stats);
        }
    }

    Ok(())
}

/// Split a `\n`-terminated chunk on bare `\r`.
///
/// A trailing `\r` (from `\r\n`, or a final `\r`) closes the last line
/// rather than opening an empty one.
fn split_carriage_returns(chunk: &str) -> std::str::Split<'_, char> {
    chunk.strip_suffix('\r').unwrap_or(chunk).split('\r')
}

fn scan_line(line: &str, aggregate: &mut Aggregate, stats: &mut ScanStats) {
    stats.lines_read += 1;

    let Some(record) = extract(line) else {
        return;
    };
    stats.records += 1;

    // The handler is registered even when the level is not recognized.
    let counts = aggregate.counts_mut(record.path);
    if let Some(level) = Level::from_label(record.level) {
        counts.increment(level);
    }
}
