//! Header metadata extraction for genotype files
//!
//! The file header embeds free-text documentation that the editor surfaces
//! as column tooltips and calibration tags. This is heuristic comment
//! mining, not a grammar: indentation depth after the `!` marker is the
//! only signal separating a new definition entry from a continuation line,
//! so the scan is kept as a small explicit state machine, isolated from the
//! row codec.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::constants::DEFINITIONS_BLOCK_MARKERS;

/// Entry line: comment marker, 1-5 spaces, an all-caps keyword, then text
static ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^![ \t]{1,5}([A-Z][A-Z0-9#/\-]*)[ \t]+(\S.*)$").unwrap());

/// Continuation line: comment marker, 6 or more spaces, then text
static CONT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^![ \t]{6,}(\S.*)$").unwrap());

/// Calibration tag line marker at line start
static CALIBRATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^!\s*[Cc]alibration\b").unwrap());

/// Scan position within the coefficient definitions block
enum ScanState {
    /// Definitions block not yet reached
    BeforeBlock,
    /// Inside the block with no entry accepting continuations
    InBlock,
    /// Inside the block, continuations append to the named entry
    EntryOpen(String),
}

/// Mine the `COEFF ... DEFINITIONS` comment block for per-parameter
/// descriptions.
///
/// An entry line opens a keyword and its description; indented
/// continuation lines are space-joined onto it; any other line closes the
/// entry without discarding what was captured. The scan stops entirely at
/// the first `@` column-label line. Works for both `.CUL` and `.ECO`
/// headers.
pub fn tooltips(header_lines: &[String]) -> BTreeMap<String, String> {
    let (coeff_marker, defs_marker) = DEFINITIONS_BLOCK_MARKERS;
    let mut tips = BTreeMap::new();
    let mut state = ScanState::BeforeBlock;

    for line in header_lines {
        // The data column-label line always terminates the block
        if line.starts_with('@') {
            break;
        }

        state = match state {
            ScanState::BeforeBlock => {
                let upper = line.to_uppercase();
                if upper.contains(coeff_marker) && upper.contains(defs_marker) {
                    ScanState::InBlock
                } else {
                    ScanState::BeforeBlock
                }
            }
            ScanState::InBlock | ScanState::EntryOpen(_) => {
                if let Some(caps) = ENTRY_RE.captures(line) {
                    let key = caps[1].to_string();
                    tips.insert(key.clone(), caps[2].trim().to_string());
                    ScanState::EntryOpen(key)
                } else if let ScanState::EntryOpen(key) = state {
                    if let Some(caps) = CONT_RE.captures(line) {
                        if let Some(tip) = tips.get_mut(&key) {
                            tip.push(' ');
                            tip.push_str(caps[1].trim());
                        }
                        ScanState::EntryOpen(key)
                    } else {
                        // Blank or separator line closes the entry
                        ScanState::InBlock
                    }
                } else {
                    ScanState::InBlock
                }
            }
        };
    }

    tips
}

/// Extract the `!Calibration` tag line, pairing each tag token with the
/// parameter name at the same ordinal position in `param_names`.
///
/// Tags are upper-cased; pairing stops at whichever of the token list or
/// the name table runs out first. Only the first matching header line is
/// used.
pub fn calibration_types(
    header_lines: &[String],
    param_names: &[&str],
) -> BTreeMap<String, String> {
    let mut types = BTreeMap::new();

    for line in header_lines {
        let Some(m) = CALIBRATION_RE.find(line) else {
            continue;
        };

        let tags = line[m.end()..].split_whitespace();
        for (name, tag) in param_names.iter().zip(tags) {
            types.insert(name.to_string(), tag.to_uppercase());
        }
        break;
    }

    types
}
