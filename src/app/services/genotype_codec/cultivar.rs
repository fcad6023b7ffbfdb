//! Codec for the cultivar (`.CUL`) variant of the genotype table
//!
//! Layout: VAR# at columns [0, 6), VRNAME at [7, 20), then whitespace
//! tokens from column 20: experiment number (`.` when none, as on the
//! MINIMA/MAXIMA rows), ECO# cross-reference, and the 18 numeric
//! coefficients.

use std::path::Path;

use tracing::{debug, info};

use super::io::{read_latin1, write_latin1};
use super::stats::{ParseResult, ParseStats};
use super::{fixed_left, format_param_field, parse_params, raw_fields, token_or_dot};
use crate::app::models::CultivarRow;
use crate::constants::{
    CUL_MIN_LINE_LEN, CUL_NAME_END, CUL_PARAM_COUNT, CUL_PARAM_FORMATS, CUL_TOKENS_START,
    PARAM_FIELD_WIDTH, is_header_line,
};
use crate::Result;

/// Parse a `.CUL` file into header lines and cultivar rows
pub fn parse(path: &Path) -> Result<ParseResult<CultivarRow>> {
    info!("Parsing cultivar file: {}", path.display());
    let content = read_latin1(path)?;
    let result = parse_str(&content);
    debug!(
        "Parsed {} cultivar rows, {} header lines, {} lines skipped",
        result.stats.rows_parsed, result.stats.header_lines, result.stats.lines_skipped
    );
    Ok(result)
}

/// Parse cultivar file content already held in memory
pub fn parse_str(content: &str) -> ParseResult<CultivarRow> {
    let mut header_lines = Vec::new();
    let mut rows = Vec::new();
    let mut stats = ParseStats::new();

    for line in content.lines() {
        stats.total_lines += 1;

        if is_header_line(line) {
            header_lines.push(line.to_string());
            stats.header_lines += 1;
            continue;
        }

        match row_from_line(line) {
            Some(row) => {
                rows.push(row);
                stats.rows_parsed += 1;
            }
            None => {
                stats.lines_skipped += 1;
                debug!("Skipped malformed cultivar line: {:?}", line);
            }
        }
    }

    ParseResult {
        header_lines,
        rows,
        stats,
    }
}

/// Parse a single ad-hoc cultivar data line, e.g. pasted from GLUE output.
///
/// Returns `None` when the trimmed line is empty, is a header line, is
/// shorter than the minimum data-line length, or yields fewer than two
/// tokens.
pub fn parse_line(text: &str) -> Option<CultivarRow> {
    let line = text.trim();
    if is_header_line(line) {
        return None;
    }
    row_from_line(line)
}

fn row_from_line(line: &str) -> Option<CultivarRow> {
    let raw = raw_fields(line, CUL_NAME_END, CUL_TOKENS_START, CUL_MIN_LINE_LEN)?;
    let params = parse_params(&raw.tokens, CUL_PARAM_COUNT);

    Some(CultivarRow {
        var_num: raw.id,
        vr_name: raw.name,
        // `.` in the experiment-number position means "none"; the
        // MINIMA/MAXIMA rows always carry it
        exp_no: raw.tokens[0].clone(),
        eco_num: raw.tokens[1].clone(),
        params,
    })
}

/// Format one numeric parameter by column index (Fortran-style widths)
pub fn format_param(value: f64, idx: usize) -> String {
    match CUL_PARAM_FORMATS.get(idx) {
        Some(fmt) => format_param_field(value, fmt),
        None => format!("{value:>PARAM_FIELD_WIDTH$}"),
    }
}

/// Format one cultivar row as a fixed-width data line
pub fn format_row(row: &CultivarRow) -> String {
    // VAR# [0,6), space, VRNAME [7,20), EXPNO right-justified ending at
    // column 28, space, ECO# [30,36), space, 18 parameters of width 5
    // separated by single spaces.
    let mut line = format!(
        "{} {}{:>9} {} ",
        fixed_left(&row.var_num, 6),
        fixed_left(&row.vr_name, 13),
        token_or_dot(&row.exp_no),
        fixed_left(&row.eco_num, 6),
    );

    for i in 0..CUL_PARAM_COUNT {
        let v = row.params.get(i).copied().unwrap_or(0.0);
        line.push_str(&format_param(v, i));
        if i < CUL_PARAM_COUNT - 1 {
            line.push(' ');
        }
    }
    line
}

/// Write header lines and cultivar rows back to a `.CUL` file.
///
/// Header lines are emitted verbatim in order, then each formatted row;
/// every line gets a CRLF terminator. Partial writes are not rolled back.
pub fn write(path: &Path, rows: &[CultivarRow], header_lines: &[String]) -> Result<()> {
    info!(
        "Writing {} cultivar rows and {} header lines to {}",
        rows.len(),
        header_lines.len(),
        path.display()
    );

    let mut out = String::new();
    for line in header_lines {
        out.push_str(line);
        out.push_str("\r\n");
    }
    for row in rows {
        out.push_str(&format_row(row));
        out.push_str("\r\n");
    }

    write_latin1(path, &out)
}
