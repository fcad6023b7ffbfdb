//! Parsing statistics and result structures for the genotype codec
//!
//! Malformed lines are recovered locally and never reported individually;
//! the aggregate counts here are the only observable trace of them.

use serde::{Deserialize, Serialize};

/// Result of parsing one genotype file: the verbatim header lines, the data
/// rows, and the aggregate counts, each preserving file order.
#[derive(Debug, Clone)]
pub struct ParseResult<R> {
    /// Every blank, `*`, `!` and `@` line, byte for byte, in file order
    pub header_lines: Vec<String>,

    /// Successfully parsed data rows, in file order
    pub rows: Vec<R>,

    /// Aggregate parsing statistics
    pub stats: ParseStats,
}

/// Simple parsing statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParseStats {
    /// Total number of lines in the file
    pub total_lines: usize,

    /// Lines preserved verbatim as header lines
    pub header_lines: usize,

    /// Data rows successfully parsed
    pub rows_parsed: usize,

    /// Candidate data lines skipped as too short or unparseable
    pub lines_skipped: usize,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines that looked like data rows
    pub fn data_lines(&self) -> usize {
        self.rows_parsed + self.lines_skipped
    }

    /// Fraction of candidate data lines that parsed, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.data_lines() == 0 {
            100.0
        } else {
            (self.rows_parsed as f64 / self.data_lines() as f64) * 100.0
        }
    }
}
