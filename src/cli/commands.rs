//! Command implementations for the genotype processor CLI
//!
//! This module contains the command execution logic, report formatting,
//! and exit-code mapping for the CLI interface. Exit code 0 means a clean
//! file, 1 means validation findings, 2 means the command itself failed.

use std::path::{Path, PathBuf};

use colored::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::app::services::cross_ref::{self, DanglingEcotypeRef};
use crate::app::services::genotype_codec::{cultivar, ecotype, header_meta, ParseStats};
use crate::app::services::validation::ValidationReport;
use crate::cli::args::{
    Args, Commands, FileKind, InspectArgs, OutputFormat, RewriteArgs, ValidateArgs,
};
use crate::config::Config;
use crate::constants::{CUL_PARAM_NAMES, ECO_PARAM_NAMES};
use crate::Result;

/// Exit code for a file with validation findings
pub const EXIT_FINDINGS: i32 = 1;

/// Run the selected subcommand, returning the process exit code
pub fn run(args: Args) -> Result<i32> {
    match args.get_command() {
        Commands::Validate(args) => run_validate(args),
        Commands::Inspect(args) => run_inspect(args),
        Commands::Rewrite(args) => run_rewrite(args),
    }
}

/// Set up structured logging based on CLI verbosity flags
fn setup_logging(log_level: &str, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("genotype_processor={}", log_level)));

    if quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
}

/// Build the file-resolution config from an optional directory override
fn build_config(genotype_dir: Option<PathBuf>) -> Result<Config> {
    let config = match genotype_dir {
        Some(dir) => Config::with_genotype_dir(dir),
        None => Config::default(),
    };
    config.validate()?;
    Ok(config)
}

fn kind_label(kind: FileKind) -> &'static str {
    match kind {
        FileKind::Cultivar => "cultivar",
        FileKind::Ecotype => "ecotype",
    }
}

/// Validation results for one file, shaped for both report formats
#[derive(Debug, Serialize)]
struct ValidateOutcome {
    file: String,
    kind: &'static str,
    rows: usize,
    stats: ParseStats,
    bounds_present: bool,
    report: ValidationReport,
    missing_ecotype_refs: Vec<DanglingEcotypeRef>,
}

impl ValidateOutcome {
    fn is_clean(&self) -> bool {
        self.report.is_clean() && self.missing_ecotype_refs.is_empty()
    }
}

fn run_validate(args: ValidateArgs) -> Result<i32> {
    setup_logging(args.get_log_level(), args.quiet);
    args.validate()?;

    let config = build_config(args.genotype_dir.clone())?;
    let path = config.resolve_file(&args.file)?;
    let kind = args.file_kind()?;
    info!("Validating {} file: {}", kind_label(kind), path.display());

    let outcome = match kind {
        FileKind::Cultivar => {
            let parsed = cultivar::parse(&path)?;
            let report = ValidationReport::compute(&parsed.rows, &CUL_PARAM_NAMES);

            let missing_ecotype_refs = match &args.eco_file {
                Some(eco_file) => {
                    let eco_path = config.resolve_file(eco_file)?;
                    let ecotypes = ecotype::parse(&eco_path)?;
                    cross_ref::missing_ecotype_refs(&parsed.rows, &ecotypes.rows)
                }
                None => Vec::new(),
            };

            ValidateOutcome {
                file: path.display().to_string(),
                kind: kind_label(kind),
                rows: parsed.rows.len(),
                bounds_present: has_bounds(&parsed.rows),
                stats: parsed.stats,
                report,
                missing_ecotype_refs,
            }
        }
        FileKind::Ecotype => {
            let parsed = ecotype::parse(&path)?;
            let report = ValidationReport::compute(&parsed.rows, &ECO_PARAM_NAMES);
            ValidateOutcome {
                file: path.display().to_string(),
                kind: kind_label(kind),
                rows: parsed.rows.len(),
                bounds_present: has_bounds(&parsed.rows),
                stats: parsed.stats,
                report,
                missing_ecotype_refs: Vec::new(),
            }
        }
    };

    match args.output_format {
        OutputFormat::Human => print_validate_human(&outcome),
        OutputFormat::Json => print_json(&outcome),
    }

    Ok(if outcome.is_clean() { 0 } else { EXIT_FINDINGS })
}

fn has_bounds<R: crate::GenotypeRow>(rows: &[R]) -> bool {
    crate::app::services::validation::ParamBounds::from_rows(rows).is_some()
}

fn print_validate_human(outcome: &ValidateOutcome) {
    println!(
        "\n{} {} ({})",
        "Validating".bright_green().bold(),
        outcome.file,
        outcome.kind
    );
    println!(
        "  {} {} rows parsed, {} lines skipped",
        "Parsed:".bright_cyan(),
        outcome.rows.to_string().bright_white().bold(),
        outcome.stats.lines_skipped
    );

    if !outcome.bounds_present {
        println!(
            "  {} no 999991/999992 bounds rows; range checks skipped",
            "Note:".bright_yellow()
        );
    }

    for v in &outcome.report.out_of_range {
        println!("  {} {}", "out of range".bright_red(), v);
    }
    for v in &outcome.report.non_finite {
        println!(
            "  {} {}: {}={}",
            "non-finite".bright_red(),
            v.identifier,
            v.param_name,
            v.value
        );
    }
    for b in &outcome.report.blank_fields {
        println!("  {} {}", "blank field".bright_red(), b);
    }
    for r in &outcome.missing_ecotype_refs {
        println!("  {} {}", "missing ECO#".bright_red(), r);
    }

    if outcome.is_clean() {
        println!("\n{}", "All checks passed".bright_green().bold());
    } else {
        let total = outcome.report.total() + outcome.missing_ecotype_refs.len();
        println!(
            "\n{} {} finding(s)",
            "Validation failed:".bright_red().bold(),
            total.to_string().bright_white().bold()
        );
    }
}

/// Inspection report for one file
#[derive(Debug, Serialize)]
struct InspectOutcome {
    file: String,
    kind: &'static str,
    stats: ParseStats,
    identifiers: Vec<String>,
    param_names: Vec<String>,
    bounds_present: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    tooltips: Option<std::collections::BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    calibration_types: Option<std::collections::BTreeMap<String, String>>,
}

fn run_inspect(args: InspectArgs) -> Result<i32> {
    setup_logging(args.get_log_level(), false);
    args.validate()?;

    let config = build_config(args.genotype_dir.clone())?;
    let path = config.resolve_file(&args.file)?;
    let kind = args.file_kind()?;
    info!("Inspecting {} file: {}", kind_label(kind), path.display());

    let outcome = match kind {
        FileKind::Cultivar => {
            let parsed = cultivar::parse(&path)?;
            build_inspect_outcome(
                &path,
                kind,
                parsed.stats,
                &parsed.header_lines,
                parsed.rows.iter().map(|r| r.var_num.clone()).collect(),
                has_bounds(&parsed.rows),
                &CUL_PARAM_NAMES,
                args.metadata,
            )
        }
        FileKind::Ecotype => {
            let parsed = ecotype::parse(&path)?;
            build_inspect_outcome(
                &path,
                kind,
                parsed.stats,
                &parsed.header_lines,
                parsed.rows.iter().map(|r| r.eco_num.clone()).collect(),
                has_bounds(&parsed.rows),
                &ECO_PARAM_NAMES,
                args.metadata,
            )
        }
    };

    match args.output_format {
        OutputFormat::Human => print_inspect_human(&outcome),
        OutputFormat::Json => print_json(&outcome),
    }

    Ok(0)
}

#[allow(clippy::too_many_arguments)]
fn build_inspect_outcome(
    path: &Path,
    kind: FileKind,
    stats: ParseStats,
    header_lines: &[String],
    identifiers: Vec<String>,
    bounds_present: bool,
    param_names: &[&str],
    metadata: bool,
) -> InspectOutcome {
    let (tooltips, calibration_types) = if metadata {
        (
            Some(header_meta::tooltips(header_lines)),
            Some(header_meta::calibration_types(header_lines, param_names)),
        )
    } else {
        (None, None)
    };

    InspectOutcome {
        file: path.display().to_string(),
        kind: kind_label(kind),
        stats,
        identifiers,
        param_names: param_names.iter().map(|s| s.to_string()).collect(),
        bounds_present,
        tooltips,
        calibration_types,
    }
}

fn print_inspect_human(outcome: &InspectOutcome) {
    println!(
        "\n{} {} ({})",
        "Inspecting".bright_green().bold(),
        outcome.file,
        outcome.kind
    );
    println!(
        "  {} {} total, {} header, {} rows, {} skipped ({:.1}% parsed)",
        "Lines:".bright_cyan(),
        outcome.stats.total_lines,
        outcome.stats.header_lines,
        outcome.stats.rows_parsed,
        outcome.stats.lines_skipped,
        outcome.stats.success_rate()
    );
    println!(
        "  {} {}",
        "Bounds rows:".bright_cyan(),
        if outcome.bounds_present {
            "present (999991/999992)".to_string()
        } else {
            "absent".to_string()
        }
    );
    println!(
        "  {} {}",
        "Parameters:".bright_cyan(),
        outcome.param_names.join(" ")
    );
    println!(
        "  {} {}",
        "Entries:".bright_cyan(),
        outcome.identifiers.join(" ")
    );

    if let Some(tips) = &outcome.tooltips {
        println!("\n{}", "Parameter definitions".bright_yellow());
        for (name, tip) in tips {
            println!("  {:<6} {}", name.bright_white().bold(), tip);
        }
    }
    if let Some(types) = &outcome.calibration_types {
        println!("\n{}", "Calibration tags".bright_yellow());
        for (name, tag) in types {
            println!("  {:<6} {}", name.bright_white().bold(), tag);
        }
    }
    println!();
}

fn run_rewrite(args: RewriteArgs) -> Result<i32> {
    setup_logging(args.get_log_level(), false);
    args.validate()?;

    let config = build_config(args.genotype_dir.clone())?;
    let path = config.resolve_file(&args.file)?;
    let kind = args.file_kind()?;
    let output = args.output.clone().unwrap_or_else(|| path.clone());
    info!(
        "Rewriting {} file: {} -> {}",
        kind_label(kind),
        path.display(),
        output.display()
    );

    let rows_written = match kind {
        FileKind::Cultivar => {
            let parsed = cultivar::parse(&path)?;
            cultivar::write(&output, &parsed.rows, &parsed.header_lines)?;
            parsed.rows.len()
        }
        FileKind::Ecotype => {
            let parsed = ecotype::parse(&path)?;
            ecotype::write(&output, &parsed.rows, &parsed.header_lines)?;
            parsed.rows.len()
        }
    };

    println!(
        "{} {} rows to {}",
        "Rewrote".bright_green().bold(),
        rows_written.to_string().bright_white().bold(),
        output.display()
    );

    Ok(0)
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize report: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::CultivarRow;
    use crate::constants::{CUL_PARAM_COUNT, SENTINEL_MAX_ID, SENTINEL_MIN_ID};

    fn cul(id: &str) -> CultivarRow {
        CultivarRow {
            var_num: id.to_string(),
            vr_name: "TEST".to_string(),
            exp_no: ".".to_string(),
            eco_num: "DFAULT".to_string(),
            params: vec![1.0; CUL_PARAM_COUNT],
        }
    }

    #[test]
    fn test_has_bounds_requires_both_sentinels() {
        assert!(!has_bounds(&[cul("IB0001")]));
        assert!(!has_bounds(&[cul(SENTINEL_MIN_ID)]));
        assert!(has_bounds(&[cul(SENTINEL_MIN_ID), cul(SENTINEL_MAX_ID)]));
    }

    #[test]
    fn test_validate_outcome_cleanliness() {
        let outcome = ValidateOutcome {
            file: "SBGRO048.CUL".to_string(),
            kind: "cultivar",
            rows: 3,
            stats: ParseStats::default(),
            bounds_present: true,
            report: ValidationReport::default(),
            missing_ecotype_refs: Vec::new(),
        };
        assert!(outcome.is_clean());

        let outcome = ValidateOutcome {
            missing_ecotype_refs: vec![DanglingEcotypeRef {
                var_num: "IB0001".to_string(),
                eco_num: "GHOST1".to_string(),
            }],
            ..outcome
        };
        assert!(!outcome.is_clean());
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(kind_label(FileKind::Cultivar), "cultivar");
        assert_eq!(kind_label(FileKind::Ecotype), "ecotype");
    }
}
