//! Decode run diagnostics.
//!
//! Decoding is best-effort: a line the grammar cannot place is dropped and the
//! rest of the document is still decoded. These structs record what happened
//! to each line so callers (and the CLI report) can see what was dropped and
//! which rule claimed each decoded line.
//!
//! Collection is cheap (one small struct per line) and always on; `decode`
//! simply discards it.

use serde_json::Value;
use std::time::Duration;

/// Why a line was left out of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The line is not `letter '=' text`.
    Malformed,
    /// No rules are registered for this line type.
    UnknownType(char),
    /// Rules exist for this line type but none matched the content.
    NoMatchingRule(char),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Malformed => f.write_str("not a '<type>=<value>' line"),
            SkipReason::UnknownType(kind) => write!(f, "unknown line type '{kind}'"),
            SkipReason::NoMatchingRule(kind) => write!(f, "content invalid for '{kind}' lines"),
        }
    }
}

/// A line that was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number.
    pub line: usize,
    pub text: String,
    pub reason: SkipReason,
}

/// A line that was placed into the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedLine {
    /// 1-based line number.
    pub line: usize,
    pub kind: char,
    /// Label of the winning rule (its name or push name).
    pub rule: &'static str,
}

#[derive(Debug, Default, Clone)]
pub struct DecodeDetails {
    /// Number of lines in the input, blank lines included.
    pub lines: usize,
    pub matched: Vec<MatchedLine>,
    pub skipped: Vec<SkippedLine>,
    /// Total elapsed time for the decode.
    pub elapsed: Duration,
}

impl DecodeDetails {
    /// Skipped lines excluding blank ones (a trailing newline leaves one).
    pub fn dropped(&self) -> impl Iterator<Item = &SkippedLine> {
        self.skipped.iter().filter(|s| !s.text.is_empty())
    }
}

/// Decoder output bundled with its diagnostics.
#[derive(Debug, Clone)]
pub(crate) struct DecodeRun {
    pub session: Value,
    pub details: DecodeDetails,
}
