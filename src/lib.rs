//! Genotype Processor Library
//!
//! A Rust library for editing DSSAT crop genotype parameter files: the
//! fixed-column cultivar table (`.CUL`) and the fixed-column ecotype table
//! (`.ECO`) that accompany each crop model.
//!
//! This library provides tools for:
//! - Parsing legacy Fortran-style fixed-width genotype files with proper
//!   header/data line handling and tolerant recovery from malformed lines
//! - Re-serializing rows to the exact original column layout so that
//!   untouched data round-trips byte for byte
//! - Mining per-parameter descriptions and calibration-type tags from the
//!   free-text comment blocks embedded in the file header
//! - Range validation against the reserved MINIMA/MAXIMA sentinel rows,
//!   plus an always-on finiteness check
//! - In-memory row collections with sentinel-row protection
//! - Cross-reference checks between cultivar and ecotype files

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod cross_ref;
        pub mod genotype_codec;
        pub mod row_table;
        pub mod validation;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{CultivarRow, EcotypeRow, GenotypeRow, Violation};
pub use config::Config;

/// Result type alias for the genotype processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for genotype file processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// File kind could not be determined from the path
    #[error("Cannot determine file kind (expected .CUL or .ECO extension): {path}")]
    UnknownFileKind { path: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an unknown-file-kind error
    pub fn unknown_file_kind(path: impl Into<String>) -> Self {
        Self::UnknownFileKind { path: path.into() }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}
