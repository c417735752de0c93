//! Extraction of request records from single log lines.
//!
//! A relevant line looks like
//! `2025-03-28 12:44:46,000 INFO django.request: GET /api/v1/reviews/ 204 OK`:
//! the level is the third whitespace-separated token of the whole line
//! and the handler is the first `/`-prefixed token after the marker.

/// Substring that identifies request log records.
pub const MARKER: &str = "django.request:";

/// Position of the level token among the whitespace-separated tokens of a line.
const LEVEL_TOKEN_INDEX: usize = 2;

/// Token separator: Unicode whitespace plus the ASCII information
/// separators `\x1c`..=`\x1f`.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

fn tokens(s: &str) -> impl Iterator<Item = &str> {
    s.split(is_separator).filter(|token| !token.is_empty())
}

/// Raw fields pulled out of a request log line.
///
/// `level` is returned unvalidated; callers decide what an unknown label means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    pub level: &'a str,
    pub path: &'a str,
}

/// Extract the level token and handler path from a log line.
///
/// Returns `None` for lines without the marker, lines with fewer than
/// three tokens, and lines with no `/`-prefixed token after the marker.
pub fn extract(line: &str) -> Option<Record<'_>> {
    let marker_at = line.find(MARKER)?;

    let level = tokens(line).nth(LEVEL_TOKEN_INDEX)?;

    let after = &line[marker_at + MARKER.len()..];
    let path = tokens(after).find(|token| token.starts_with('/'))?;

    Some(Record { level, path })
}
