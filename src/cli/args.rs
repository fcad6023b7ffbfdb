//! Command-line argument definitions for the genotype processor
//!
//! This module defines the complete CLI interface using clap derive API.
//! The file kind (cultivar vs ecotype) is normally inferred from the
//! `.CUL`/`.ECO` extension and can be overridden per invocation.

use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// CLI arguments for the DSSAT genotype file processor
///
/// Parses, validates and rewrites DSSAT crop genotype parameter files:
/// cultivar (`.CUL`) and ecotype (`.ECO`) fixed-width tables.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "genotype-processor",
    version,
    about = "Parse, validate and rewrite DSSAT crop genotype files (.CUL/.ECO)",
    long_about = "A tool for working with DSSAT crop model genotype parameter files. \
                  Parses the fixed-width cultivar (.CUL) and ecotype (.ECO) tables, \
                  checks every coefficient against the 999991/999992 min/max bounds rows, \
                  cross-references cultivar ECO# codes against the companion ecotype file, \
                  and rewrites files with canonical column alignment while preserving \
                  header comments byte for byte."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the genotype processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Check parameter values against the min/max bounds rows
    Validate(ValidateArgs),
    /// Summarize a genotype file: rows, parameters, header metadata
    Inspect(InspectArgs),
    /// Re-emit a genotype file with canonical fixed-width formatting
    Rewrite(RewriteArgs),
}

/// Arguments for the validate command
#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    /// Genotype file to validate
    ///
    /// A bare file name like SBGRO048.CUL is resolved against the DSSAT
    /// installation's Genotype directory.
    #[arg(value_name = "FILE", help = "Genotype file to validate")]
    pub file: PathBuf,

    /// Companion ecotype file for cross-reference checks
    ///
    /// When validating a .CUL file, also verify that every cultivar's ECO#
    /// exists in this .ECO file.
    #[arg(
        long = "eco-file",
        value_name = "FILE",
        help = "Companion .ECO file for ECO# cross-reference checks"
    )]
    pub eco_file: Option<PathBuf>,

    /// Override the file kind inferred from the extension
    #[arg(
        long = "kind",
        value_enum,
        value_name = "KIND",
        help = "File kind override (inferred from .CUL/.ECO extension by default)"
    )]
    pub kind: Option<FileKind>,

    /// DSSAT Genotype directory for resolving bare file names
    #[arg(
        long = "genotype-dir",
        value_name = "PATH",
        help = "Directory searched for bare genotype file names"
    )]
    pub genotype_dir: Option<PathBuf>,

    /// Output format for validation results
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors and critical messages. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the inspect command
#[derive(Debug, Clone, Parser)]
pub struct InspectArgs {
    /// Genotype file to inspect
    #[arg(value_name = "FILE", help = "Genotype file to inspect")]
    pub file: PathBuf,

    /// Override the file kind inferred from the extension
    #[arg(
        long = "kind",
        value_enum,
        value_name = "KIND",
        help = "File kind override (inferred from .CUL/.ECO extension by default)"
    )]
    pub kind: Option<FileKind>,

    /// DSSAT Genotype directory for resolving bare file names
    #[arg(
        long = "genotype-dir",
        value_name = "PATH",
        help = "Directory searched for bare genotype file names"
    )]
    pub genotype_dir: Option<PathBuf>,

    /// Include per-parameter tooltips and calibration tags mined from the
    /// header comments
    #[arg(long = "metadata", help = "Include header metadata in the report")]
    pub metadata: bool,

    /// Output format for the report
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the report"
    )]
    pub output_format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Arguments for the rewrite command
#[derive(Debug, Clone, Parser)]
pub struct RewriteArgs {
    /// Genotype file to rewrite
    #[arg(value_name = "FILE", help = "Genotype file to rewrite")]
    pub file: PathBuf,

    /// Output file path
    ///
    /// If not specified, the input file is rewritten in place.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Output file (defaults to rewriting in place)"
    )]
    pub output: Option<PathBuf>,

    /// Override the file kind inferred from the extension
    #[arg(
        long = "kind",
        value_enum,
        value_name = "KIND",
        help = "File kind override (inferred from .CUL/.ECO extension by default)"
    )]
    pub kind: Option<FileKind>,

    /// DSSAT Genotype directory for resolving bare file names
    #[arg(
        long = "genotype-dir",
        value_name = "PATH",
        help = "Directory searched for bare genotype file names"
    )]
    pub genotype_dir: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Output format options for machine-readable results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

/// Genotype file kind, normally inferred from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FileKind {
    /// Cultivar table (.CUL, 18 coefficients per row)
    Cultivar,
    /// Ecotype table (.ECO, 16 coefficients per row)
    Ecotype,
}

impl FileKind {
    /// Infer the kind from a `.CUL`/`.ECO` extension, case-insensitively
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_uppercase);

        match ext.as_deref() {
            Some("CUL") => Ok(Self::Cultivar),
            Some("ECO") => Ok(Self::Ecotype),
            _ => Err(Error::unknown_file_kind(path.display().to_string())),
        }
    }
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .expect("Command should be present when get_command() is called")
    }
}

impl ValidateArgs {
    /// Validate the command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        // The eco file override only makes sense with a cultivar target
        if self.eco_file.is_some() && self.kind == Some(FileKind::Ecotype) {
            return Err(Error::configuration(
                "--eco-file only applies when validating a cultivar (.CUL) file".to_string(),
            ));
        }

        if let Some(dir) = &self.genotype_dir {
            if !dir.is_dir() {
                return Err(Error::configuration(format!(
                    "Genotype directory does not exist: {}",
                    dir.display()
                )));
            }
        }

        Ok(())
    }

    /// Resolve the file kind from the override or the extension
    pub fn file_kind(&self) -> Result<FileKind> {
        match self.kind {
            Some(kind) => Ok(kind),
            None => FileKind::from_path(&self.file),
        }
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}

impl InspectArgs {
    /// Validate the command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.genotype_dir {
            if !dir.is_dir() {
                return Err(Error::configuration(format!(
                    "Genotype directory does not exist: {}",
                    dir.display()
                )));
            }
        }
        Ok(())
    }

    /// Resolve the file kind from the override or the extension
    pub fn file_kind(&self) -> Result<FileKind> {
        match self.kind {
            Some(kind) => Ok(kind),
            None => FileKind::from_path(&self.file),
        }
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

impl RewriteArgs {
    /// Validate the command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.genotype_dir {
            if !dir.is_dir() {
                return Err(Error::configuration(format!(
                    "Genotype directory does not exist: {}",
                    dir.display()
                )));
            }
        }

        if let Some(output) = &self.output {
            if let Some(parent) = output.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(Error::configuration(format!(
                        "Output directory does not exist: {}",
                        parent.display()
                    )));
                }
            }
        }

        Ok(())
    }

    /// Resolve the file kind from the override or the extension
    pub fn file_kind(&self) -> Result<FileKind> {
        match self.kind {
            Some(kind) => Ok(kind),
            None => FileKind::from_path(&self.file),
        }
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
