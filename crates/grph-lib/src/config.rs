//! Run configuration for overlap graph construction
//!
//! Holds the overlap length and the diagnostics settings of a single run.
//! The overlap length is validated here so that an invalid `k` is rejected
//! before any input is read.

use crate::constants::{DEFAULT_LOG_FILE, DEFAULT_OVERLAP, MIN_OVERLAP};
use crate::error::{GrphError, Result};
use std::path::PathBuf;

/// Configuration parameters for one overlap graph run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapConfig {
    /// Overlap (k-mer) length, at least 1
    pub k: usize,

    /// Write verbose diagnostics to `log_file`
    pub debug: bool,

    /// Diagnostics destination, truncated at the start of every run
    pub log_file: PathBuf,
}

impl Default for OverlapConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_OVERLAP,
            debug: false,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl OverlapConfig {
    /// Create a configuration with the given overlap length
    ///
    /// `k` is signed so that a negative length from user input is reported
    /// as an invalid overlap rather than wrapped.
    pub fn new(k: i64) -> Result<Self> {
        let k = usize::try_from(k)
            .ok()
            .filter(|&k| k >= MIN_OVERLAP)
            .ok_or(GrphError::InvalidOverlap(k))?;
        let config = Self {
            k,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Enable or disable debug diagnostics
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set the diagnostics log file
    pub fn with_log_file(mut self, log_file: impl Into<PathBuf>) -> Self {
        self.log_file = log_file.into();
        self
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.k < MIN_OVERLAP {
            return Err(GrphError::InvalidOverlap(self.k as i64));
        }
        Ok(())
    }

    /// Log configuration parameters via tracing
    pub fn print(&self) {
        tracing::info!("Overlap Configuration:");
        tracing::info!("  k = {}", self.k);
        tracing::debug!("  debug = {}", self.debug);
        tracing::debug!("  log_file = {:?}", self.log_file);
    }
}

/// Parse an overlap length given on the command line
///
/// Negative values are accepted syntactically so that they are reported with
/// the same message as zero.
pub fn parse_overlap(s: &str) -> std::result::Result<usize, String> {
    let value: i64 = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid int value: '{}'", s))?;
    OverlapConfig::new(value)
        .map(|config| config.k)
        .map_err(|e| e.to_string())
}
