//! Tests for the cultivar (.CUL) codec

use crate::app::models::{CultivarRow, GenotypeRow};
use crate::app::services::genotype_codec::cultivar::{
    format_param, format_row, parse, parse_line, parse_str, write,
};
use crate::constants::CUL_PARAM_COUNT;

/// Compose a data line with the canonical column layout
fn cul_line(id: &str, name: &str, exp: &str, eco: &str, params: &[&str]) -> String {
    format!("{id:<6} {name:<13}{exp:>9} {eco:<6} {}", params.join(" "))
}

const MIN_PARAMS: [&str; 18] = [
    "11.88", "0.129", " 15.5", "  5.0", " 11.0", " 25.7", "  5.0", "0.900", " 260.", " 60.0",
    "0.500", "0.100", " 15.0", " 1.55", "  8.0", " 60.0", "0.340", "0.090",
];

const MAX_PARAMS: [&str; 18] = [
    "15.00", "0.349", " 34.0", " 10.0", " 18.0", " 41.0", " 26.0", "1.120", " 450.", "310.0",
    "1.000", "0.205", " 27.0", " 2.70", " 16.0", " 82.0", "0.420", "0.280",
];

const DATA_PARAMS: [&str; 18] = [
    "13.84", "0.258", " 16.8", "  6.0", " 13.5", " 34.3", " 26.0", "1.030", " 375.", "180.0",
    "1.000", "0.190", " 23.0", " 2.20", " 10.0", " 77.0", "0.405", "0.205",
];

fn sample_content() -> String {
    let header = [
        "*SOYBEAN GENOTYPE COEFFICIENTS: CRGRO048 MODEL",
        "!",
        "! COEFF   DEFINITIONS",
        "! =====   ===========",
        "! CSDL    Critical Short Day Length below which reproductive development",
        "!         progresses with no daylength effect (hour)",
        "",
        "@VAR#  VAR-NAME......  EXPNO   ECO#  CSDL PPSEN EM-FL FL-SH FL-SD SD-PM FL-LF LFMAX SLAVR SIZLF  XFRT WTPSD SFDUR SDPDV PODUR THRSH SDPRO SDLIP",
    ];

    let mut content = String::new();
    for line in header {
        content.push_str(line);
        content.push_str("\r\n");
    }
    content.push_str(&cul_line("999991", "MINIMA", ".", "DFAULT", &MIN_PARAMS));
    content.push_str("\r\n");
    content.push_str(&cul_line("999992", "MAXIMA", ".", "DFAULT", &MAX_PARAMS));
    content.push_str("\r\n");
    content.push_str(&cul_line("IB0001", "M GROUP 0-A", ".", "SB0101", &DATA_PARAMS));
    content.push_str("\r\n");
    content
}

#[test]
fn test_parse_separates_headers_and_rows() {
    let result = parse_str(&sample_content());

    assert_eq!(result.header_lines.len(), 8);
    assert_eq!(result.rows.len(), 3);
    assert_eq!(result.stats.total_lines, 11);
    assert_eq!(result.stats.rows_parsed, 3);
    assert_eq!(result.stats.lines_skipped, 0);

    // Header lines survive verbatim, in order, blanks included
    assert!(result.header_lines[0].starts_with("*SOYBEAN"));
    assert_eq!(result.header_lines[6], "");
    assert!(result.header_lines[7].starts_with("@VAR#"));
}

#[test]
fn test_parse_extracts_row_fields() {
    let result = parse_str(&sample_content());
    let row = &result.rows[2];

    assert_eq!(row.var_num, "IB0001");
    assert_eq!(row.vr_name, "M GROUP 0-A");
    assert_eq!(row.exp_no, ".");
    assert_eq!(row.eco_num, "SB0101");
    assert_eq!(row.params.len(), CUL_PARAM_COUNT);
    assert_eq!(row.params[0], 13.84);
    assert_eq!(row.params[8], 375.0);
    assert_eq!(row.params[17], 0.205);
    assert!(!row.is_sentinel());
}

#[test]
fn test_sentinel_rows_recognized() {
    let result = parse_str(&sample_content());
    assert!(result.rows[0].is_sentinel());
    assert!(result.rows[1].is_sentinel());
    assert_eq!(result.rows[0].var_num, "999991");
    assert_eq!(result.rows[1].var_num, "999992");
    assert_eq!(result.rows[0].exp_no, ".");
}

#[test]
fn test_short_line_skipped() {
    let content = "IB0001 TOO SHORT\r\n";
    let result = parse_str(content);
    assert!(result.rows.is_empty());
    assert_eq!(result.stats.lines_skipped, 1);
}

#[test]
fn test_line_with_one_token_skipped() {
    // Long enough, but only one usable token after the name field
    let line = format!("{:<6} {:<13}{:>16}", "IB0001", "LONELY", "SB0101");
    assert!(line.len() >= 36);
    let result = parse_str(&line);
    assert!(result.rows.is_empty());
    assert_eq!(result.stats.lines_skipped, 1);
}

#[test]
fn test_missing_params_zero_padded() {
    let line = cul_line("IB0009", "SPARSE", ".", "SB0101", &["13.84", "0.258"]);
    let result = parse_str(&line);
    assert_eq!(result.rows.len(), 1);
    let row = &result.rows[0];
    assert_eq!(row.params.len(), CUL_PARAM_COUNT);
    assert_eq!(row.params[0], 13.84);
    assert_eq!(row.params[1], 0.258);
    assert!(row.params[2..].iter().all(|&v| v == 0.0));
}

#[test]
fn test_non_numeric_param_becomes_zero() {
    let mut params = DATA_PARAMS;
    params[3] = "ABCDE";
    let line = cul_line("IB0001", "BADTOKEN", ".", "SB0101", &params);
    let result = parse_str(&line);
    assert_eq!(result.rows[0].params[3], 0.0);
    assert_eq!(result.rows[0].params[4], 13.5);
}

#[test]
fn test_extra_params_ignored() {
    let mut params: Vec<&str> = DATA_PARAMS.to_vec();
    params.push("99.9");
    params.push("88.8");
    let line = cul_line("IB0001", "OVERFULL", ".", "SB0101", &params);
    let result = parse_str(&line);
    assert_eq!(result.rows[0].params.len(), CUL_PARAM_COUNT);
    assert_eq!(result.rows[0].params[17], 0.205);
}

#[test]
fn test_parse_line_accepts_data_row() {
    let line = cul_line("IB0001", "M GROUP 0-A", ".", "SB0101", &DATA_PARAMS);
    let row = parse_line(&line).expect("data line should parse");
    assert_eq!(row.var_num, "IB0001");
    assert_eq!(row.params[0], 13.84);
}

#[test]
fn test_parse_line_rejects_non_data() {
    assert!(parse_line("").is_none());
    assert!(parse_line("   ").is_none());
    assert!(parse_line("*SOYBEAN GENOTYPE COEFFICIENTS").is_none());
    assert!(parse_line("! comment line").is_none());
    assert!(parse_line("@VAR#  VAR-NAME").is_none());
    assert!(parse_line("IB0001 TOO SHORT").is_none());
}

#[test]
fn test_format_param_width_and_precision() {
    assert_eq!(format_param(13.84, 0), "13.84");
    assert_eq!(format_param(0.258, 1), "0.258");
    assert_eq!(format_param(16.8, 2), " 16.8");
    assert_eq!(format_param(6.0, 3), "  6.0");
    assert_eq!(format_param(2.2, 13), " 2.20");

    for (idx, text) in DATA_PARAMS.iter().enumerate() {
        let rendered = format_param(text.trim().parse().unwrap(), idx);
        assert_eq!(rendered.len(), 5, "param {idx} renders 5 wide");
    }
}

#[test]
fn test_format_param_width_is_a_minimum() {
    // Values too wide for the 5-character field overflow it rather than
    // lose digits; later columns shift on such a row, as in the legacy
    // editors
    assert_eq!(format_param(1234.56, 0), "1234.56");
    assert_eq!(format_param(-123.4, 2), "-123.4");
    assert_eq!(format_param(123456.0, 8), "123456.");
}

#[test]
fn test_format_param_slavr_trailing_dot() {
    assert_eq!(format_param(375.0, 8), " 375.");
    assert_eq!(format_param(380.0, 8), " 380.");
    assert_eq!(format_param(375.4, 8), " 375.");
    assert_eq!(format_param(375.6, 8), " 376.");
    assert_eq!(format_param(5.0, 8), "   5.");
}

#[test]
fn test_format_row_layout() {
    let row = CultivarRow {
        var_num: "IB0001".to_string(),
        vr_name: "M GROUP 0-A".to_string(),
        exp_no: ".".to_string(),
        eco_num: "SB0101".to_string(),
        params: DATA_PARAMS.iter().map(|t| t.trim().parse().unwrap()).collect(),
    };

    let line = format_row(&row);
    assert_eq!(line, cul_line("IB0001", "M GROUP 0-A", ".", "SB0101", &DATA_PARAMS));

    // Fixed columns: identifier, name, ECO#
    assert_eq!(&line[0..6], "IB0001");
    assert_eq!(&line[7..20], "M GROUP 0-A  ");
    assert_eq!(&line[30..36], "SB0101");
}

#[test]
fn test_empty_exp_no_written_as_dot() {
    let mut row = CultivarRow::template();
    row.params = vec![0.0; CUL_PARAM_COUNT];
    assert_eq!(row.exp_no, " ");

    let line = format_row(&row);
    let reparsed = parse_line(&line).expect("formatted row should reparse");
    assert_eq!(reparsed.exp_no, ".");
    assert_eq!(reparsed.eco_num, "DFAULT");
}

#[test]
fn test_round_trip_preserves_rows() {
    let original = parse_str(&sample_content());

    let mut rewritten = String::new();
    for line in &original.header_lines {
        rewritten.push_str(line);
        rewritten.push_str("\r\n");
    }
    for row in &original.rows {
        rewritten.push_str(&format_row(row));
        rewritten.push_str("\r\n");
    }

    let reparsed = parse_str(&rewritten);
    assert_eq!(reparsed.header_lines, original.header_lines);
    assert_eq!(reparsed.rows, original.rows);
}

#[test]
fn test_write_and_parse_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("SBGRO048.CUL");

    let original = parse_str(&sample_content());
    write(&path, &original.rows, &original.header_lines).unwrap();

    let reread = parse(&path).unwrap();
    assert_eq!(reread.header_lines, original.header_lines);
    assert_eq!(reread.rows, original.rows);
}

#[test]
fn test_write_failure_reported() {
    let path = std::path::Path::new("/nonexistent/dir/SBGRO048.CUL");
    let err = write(path, &[], &[]).unwrap_err();
    assert!(matches!(err, crate::Error::Io { .. }));
}
