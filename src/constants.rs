//! Application constants for the genotype processor
//!
//! This module contains the fixed column layout of the cultivar and ecotype
//! tables, the positional parameter-name tables, and the per-parameter
//! numeric format rules. The layout tables are the single source of truth
//! consulted by both the parse and the format paths of the codec.

// =============================================================================
// Sentinel Rows
// =============================================================================

/// Identifier of the reserved MINIMA bounds row
pub const SENTINEL_MIN_ID: &str = "999991";

/// Identifier of the reserved MAXIMA bounds row
pub const SENTINEL_MAX_ID: &str = "999992";

/// Check whether an identifier marks one of the two reserved bounds rows
pub fn is_sentinel_id(id: &str) -> bool {
    id == SENTINEL_MIN_ID || id == SENTINEL_MAX_ID
}

// =============================================================================
// Line Classification
// =============================================================================

/// First characters that mark a non-data line: section title, comment,
/// column-label line
pub const HEADER_LINE_PREFIXES: &[char] = &['*', '!', '@'];

/// Check whether a line is a header line (blank lines count as headers too)
pub fn is_header_line(line: &str) -> bool {
    match line.chars().next() {
        None => true,
        Some(c) => HEADER_LINE_PREFIXES.contains(&c),
    }
}

// =============================================================================
// Column Layout
// =============================================================================

/// Width of the identifier field (VAR# / ECO#), columns [0, 6)
pub const ID_WIDTH: usize = 6;

/// Column at which the display-name field starts (both variants)
pub const NAME_START: usize = 7;

/// Cultivar display name occupies columns [7, 20)
pub const CUL_NAME_END: usize = 20;

/// Ecotype display name occupies columns [7, 23)
pub const ECO_NAME_END: usize = 23;

/// Column from which cultivar trailing fields are tokenized
pub const CUL_TOKENS_START: usize = 20;

/// Column from which ecotype trailing fields are tokenized
pub const ECO_TOKENS_START: usize = 23;

/// Shortest cultivar line accepted as a data row
pub const CUL_MIN_LINE_LEN: usize = 36;

/// Shortest ecotype line accepted as a data row
pub const ECO_MIN_LINE_LEN: usize = 23;

/// Number of numeric parameters per cultivar row
pub const CUL_PARAM_COUNT: usize = 18;

/// Number of numeric parameters per ecotype row
pub const ECO_PARAM_COUNT: usize = 16;

/// Total field width of every formatted numeric parameter
pub const PARAM_FIELD_WIDTH: usize = 5;

/// Ecotype code a cultivar may carry when no real ecotype applies
pub const DEFAULT_ECOTYPE: &str = "DFAULT";

// =============================================================================
// Parameter Name Tables
// =============================================================================

/// Names of the 18 cultivar numeric parameters, in column order.
/// Position, not name, joins a row's parameter to its format and bounds.
pub const CUL_PARAM_NAMES: [&str; CUL_PARAM_COUNT] = [
    "CSDL", "PPSEN", "EM-FL", "FL-SH", "FL-SD", "SD-PM", "FL-LF", "LFMAX", "SLAVR", "SIZLF",
    "XFRT", "WTPSD", "SFDUR", "SDPDV", "PODUR", "THRSH", "SDPRO", "SDLIP",
];

/// Names of the 16 ecotype numeric parameters, in column order
pub const ECO_PARAM_NAMES: [&str; ECO_PARAM_COUNT] = [
    "PP-SS", "PL-EM", "EM-V1", "V1-JU", "JU-R0", "PM06", "PM09", "LNHSH", "R7-R8", "FL-VS",
    "TRIFL", "RWDTH", "RHGHT", "R1PPO", "OPTBI", "SLOBI",
];

// =============================================================================
// Numeric Format Rules
// =============================================================================

/// Fortran-style render rule for one numeric parameter column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFormat {
    /// Fractional digits in fixed-point rendering
    pub decimals: usize,
    /// Render as a rounded integer followed by a literal `.` with no
    /// fractional digits (the historical SLAVR convention)
    pub trailing_dot: bool,
}

const fn fixed(decimals: usize) -> ParamFormat {
    ParamFormat {
        decimals,
        trailing_dot: false,
    }
}

/// Format rules for the 18 cultivar parameters, in column order
pub const CUL_PARAM_FORMATS: [ParamFormat; CUL_PARAM_COUNT] = [
    fixed(2), // CSDL
    fixed(3), // PPSEN
    fixed(1), // EM-FL
    fixed(1), // FL-SH
    fixed(1), // FL-SD
    fixed(1), // SD-PM
    fixed(1), // FL-LF
    fixed(3), // LFMAX
    ParamFormat {
        decimals: 0,
        trailing_dot: true,
    }, // SLAVR, rendered like " 380."
    fixed(1), // SIZLF
    fixed(3), // XFRT
    fixed(3), // WTPSD
    fixed(1), // SFDUR
    fixed(2), // SDPDV
    fixed(1), // PODUR
    fixed(1), // THRSH
    fixed(3), // SDPRO
    fixed(3), // SDLIP
];

/// Format rules for the 16 ecotype parameters, in column order
pub const ECO_PARAM_FORMATS: [ParamFormat; ECO_PARAM_COUNT] = [
    fixed(3), // PP-SS
    fixed(1), // PL-EM
    fixed(1), // EM-V1
    fixed(1), // V1-JU
    fixed(2), // JU-R0
    fixed(2), // PM06
    fixed(2), // PM09
    fixed(2), // LNHSH
    fixed(1), // R7-R8
    fixed(1), // FL-VS
    fixed(3), // TRIFL
    fixed(2), // RWDTH
    fixed(2), // RHGHT
    fixed(3), // R1PPO
    fixed(1), // OPTBI
    fixed(3), // SLOBI
];

// =============================================================================
// Header Metadata Markers
// =============================================================================

/// Both markers must appear (case-insensitive) on one header line to open
/// the coefficient definitions block
pub const DEFINITIONS_BLOCK_MARKERS: (&str, &str) = ("COEFF", "DEFINITIONS");
