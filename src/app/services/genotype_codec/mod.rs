//! Fixed-width codec for DSSAT genotype tables
//!
//! The cultivar (`.CUL`) and ecotype (`.ECO`) variants run the same
//! algorithm over different column layouts: classify each line by its first
//! character, keep header lines verbatim, extract the fixed leading fields
//! of data lines by absolute column offset, and tokenize the remainder on
//! whitespace. Serialization is the exact inverse, driven by the layout and
//! format tables in [`crate::constants`].
//!
//! Malformed input is never fatal: short or unparseable lines are skipped
//! and counted, non-numeric parameter tokens become zero, and missing
//! trailing parameters are zero-padded. The zero-padding is lossy by
//! design; a padded row writes back explicit zeros, not blanks.

pub mod cultivar;
pub mod ecotype;
pub mod header_meta;
pub mod io;
pub mod stats;

#[cfg(test)]
mod tests;

pub use stats::{ParseResult, ParseStats};

use crate::constants::{ID_WIDTH, NAME_START, PARAM_FIELD_WIDTH, ParamFormat};

/// Leading fields and trailing tokens of one candidate data line
pub(crate) struct RawFields {
    pub id: String,
    pub name: String,
    pub tokens: Vec<String>,
}

/// Extract a fixed-width character span, trimmed of surrounding whitespace.
/// Spans past the end of the line yield what is there, possibly nothing.
fn span(line: &str, start: usize, end: usize) -> String {
    line.chars()
        .skip(start)
        .take(end.saturating_sub(start))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Split a data line into its fixed leading fields and whitespace tokens.
///
/// Returns `None` for lines shorter than the variant minimum or yielding
/// fewer than two usable tokens; such lines are unparseable and skipped.
pub(crate) fn raw_fields(
    line: &str,
    name_end: usize,
    tokens_start: usize,
    min_len: usize,
) -> Option<RawFields> {
    if line.chars().count() < min_len {
        return None;
    }

    let id = span(line, 0, ID_WIDTH);
    let name = span(line, NAME_START, name_end);

    let rest: String = line.chars().skip(tokens_start).collect();
    let tokens: Vec<String> = rest.split_whitespace().map(str::to_string).collect();
    if tokens.len() < 2 {
        return None;
    }

    Some(RawFields { id, name, tokens })
}

/// Parse the numeric parameter tokens following the two auxiliary tokens.
///
/// Tokens that fail numeric parse become zero, missing trailing tokens are
/// zero-padded, and extras beyond `count` are ignored.
pub(crate) fn parse_params(tokens: &[String], count: usize) -> Vec<f64> {
    let mut params: Vec<f64> = tokens
        .iter()
        .skip(2)
        .take(count)
        .map(|t| t.parse::<f64>().unwrap_or(0.0))
        .collect();
    params.resize(count, 0.0);
    params
}

/// Render one numeric parameter through its Fortran-style format rule,
/// right-justified in the fixed field width.
pub(crate) fn format_param_field(value: f64, fmt: &ParamFormat) -> String {
    if fmt.trailing_dot {
        // e.g. " 380." for SLAVR
        let text = format!("{}.", value.round() as i64);
        format!("{text:>PARAM_FIELD_WIDTH$}")
    } else {
        format!("{value:>PARAM_FIELD_WIDTH$.prec$}", prec = fmt.decimals)
    }
}

/// Left-justify a field into its exact column width, truncating overlong
/// values so neighbouring columns never shift.
pub(crate) fn fixed_left(s: &str, width: usize) -> String {
    let clipped: String = s.chars().take(width).collect();
    format!("{clipped:<width$}")
}

/// A whitespace token written where an auxiliary field is empty, the file
/// convention for "no value". Keeps token positions stable on re-parse.
pub(crate) fn token_or_dot(s: &str) -> &str {
    let trimmed = s.trim();
    if trimmed.is_empty() { "." } else { trimmed }
}
