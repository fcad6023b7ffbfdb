//! Configuration for locating DSSAT genotype files
//!
//! Holds the conventional DSSAT installation paths so bare file names like
//! `SBGRO048.CUL` resolve against the installation's Genotype directory.
//! Defaults follow the stock install locations per platform, with the
//! user's home directory as a fallback; the CLI overrides the paths
//! per invocation.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

/// Subdirectory of a DSSAT installation holding the genotype files
pub const GENOTYPE_DIR_NAME: &str = "Genotype";

/// Configuration for genotype file resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root of the DSSAT installation
    pub dssat_base: PathBuf,

    /// Directory searched for bare genotype file names
    pub genotype_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let dssat_base = default_dssat_base();
        let genotype_dir = dssat_base.join(GENOTYPE_DIR_NAME);
        Self {
            dssat_base,
            genotype_dir,
        }
    }
}

/// Stock installation root per platform
fn default_dssat_base() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(r"C:\DSSAT48")
    } else if cfg!(target_os = "macos") {
        PathBuf::from("/Applications/DSSAT48")
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("DSSAT48")
    }
}

impl Config {
    /// Build a config with an explicit genotype directory override
    pub fn with_genotype_dir(genotype_dir: PathBuf) -> Self {
        Self {
            genotype_dir,
            ..Self::default()
        }
    }

    /// Validate the configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if self.genotype_dir.as_os_str().is_empty() {
            return Err(Error::configuration(
                "Genotype directory must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve a genotype file argument.
    ///
    /// Paths that exist as given (or are absolute) are used directly; a
    /// bare file name is looked up in the configured genotype directory.
    pub fn resolve_file(&self, path: &Path) -> Result<PathBuf> {
        if path.exists() || path.is_absolute() {
            return Ok(path.to_path_buf());
        }

        let candidate = self.genotype_dir.join(path);
        debug!(
            "Resolving {} against genotype directory: {}",
            path.display(),
            candidate.display()
        );
        if candidate.exists() {
            Ok(candidate)
        } else {
            Err(Error::file_not_found(path.display().to_string()))
        }
    }
}
