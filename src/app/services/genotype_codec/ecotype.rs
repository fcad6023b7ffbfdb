//! Codec for the ecotype (`.ECO`) variant of the genotype table
//!
//! Layout: ECO# at columns [0, 6), ECONAME at [7, 23), then whitespace
//! tokens from column 23: maturity-group code, temperature/season code, and
//! the 16 numeric coefficients.

use std::path::Path;

use tracing::{debug, info};

use super::io::{read_latin1, write_latin1};
use super::stats::{ParseResult, ParseStats};
use super::{fixed_left, format_param_field, parse_params, raw_fields, token_or_dot};
use crate::app::models::EcotypeRow;
use crate::constants::{
    ECO_MIN_LINE_LEN, ECO_NAME_END, ECO_PARAM_COUNT, ECO_PARAM_FORMATS, ECO_TOKENS_START,
    PARAM_FIELD_WIDTH, is_header_line,
};
use crate::Result;

/// Parse an `.ECO` file into header lines and ecotype rows
pub fn parse(path: &Path) -> Result<ParseResult<EcotypeRow>> {
    info!("Parsing ecotype file: {}", path.display());
    let content = read_latin1(path)?;
    let result = parse_str(&content);
    debug!(
        "Parsed {} ecotype rows, {} header lines, {} lines skipped",
        result.stats.rows_parsed, result.stats.header_lines, result.stats.lines_skipped
    );
    Ok(result)
}

/// Parse ecotype file content already held in memory
pub fn parse_str(content: &str) -> ParseResult<EcotypeRow> {
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
                debug!("Skipped malformed ecotype line: {:?}", line);
            }
        }
    }

    ParseResult {
        header_lines,
        rows,
        stats,
    }
}

/// Parse a single ad-hoc ecotype data line.
///
/// Returns `None` when the trimmed line is empty, is a header line, is
/// shorter than the minimum data-line length, or yields fewer than two
/// tokens.
pub fn parse_line(text: &str) -> Option<EcotypeRow> {
    let line = text.trim();
    if is_header_line(line) {
        return None;
    }
    row_from_line(line)
}

fn row_from_line(line: &str) -> Option<EcotypeRow> {
    let raw = raw_fields(line, ECO_NAME_END, ECO_TOKENS_START, ECO_MIN_LINE_LEN)?;
    let params = parse_params(&raw.tokens, ECO_PARAM_COUNT);

    Some(EcotypeRow {
        eco_num: raw.id,
        eco_name: raw.name,
        mg: raw.tokens[0].clone(),
        tm: raw.tokens[1].clone(),
        params,
    })
}

/// Format one numeric parameter by column index (Fortran-style widths)
pub fn format_param(value: f64, idx: usize) -> String {
    match ECO_PARAM_FORMATS.get(idx) {
        Some(fmt) => format_param_field(value, fmt),
        None => format!("{value:>PARAM_FIELD_WIDTH$}"),
    }
}

/// Format one ecotype row as a fixed-width data line
pub fn format_row(row: &EcotypeRow) -> String {
    // ECO# [0,6), space, ECONAME [7,23), MG [23,25), space, TM [26,28),
    // space, 16 parameters of width 5 separated by single spaces.
    let mut line = format!(
        "{} {}{} {} ",
        fixed_left(&row.eco_num, 6),
        fixed_left(&row.eco_name, 16),
        fixed_left(token_or_dot(&row.mg), 2),
        fixed_left(token_or_dot(&row.tm), 2),
    );

    for i in 0..ECO_PARAM_COUNT {
        let v = row.params.get(i).copied().unwrap_or(0.0);
        line.push_str(&format_param(v, i));
        if i < ECO_PARAM_COUNT - 1 {
            line.push(' ');
        }
    }
    line
}

/// Write header lines and ecotype rows back to an `.ECO` file.
///
/// Header lines are emitted verbatim in order, then each formatted row;
/// every line gets a CRLF terminator. Partial writes are not rolled back.
pub fn write(path: &Path, rows: &[EcotypeRow], header_lines: &[String]) -> Result<()> {
    info!(
        "Writing {} ecotype rows and {} header lines to {}",
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
