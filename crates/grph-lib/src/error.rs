//! Error type for overlap graph construction

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while configuring a run or reading its input
#[derive(Error, Debug)]
pub enum GrphError {
    /// The requested overlap length is not a positive integer
    #[error("-k \"{0}\" must be > 0")]
    InvalidOverlap(i64),

    /// The input file could not be opened
    #[error("can't open '{path}': {source}")]
    Open {
        /// Path that failed to open
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A record in the input could not be parsed
    #[error("Failed to parse sequence record in {source_name}: {message}")]
    Parse {
        /// Name of the input (file path or `<stream>`)
        source_name: String,
        /// Parser diagnostic
        message: String,
    },

    /// Any other I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GrphError {
    /// Build a [`GrphError::Parse`] from any displayable parser diagnostic
    pub fn parse(source_name: &str, message: impl std::fmt::Display) -> Self {
        Self::Parse {
            source_name: source_name.to_string(),
            message: message.to_string(),
        }
    }

    /// True for errors that should be reported as command-line usage errors
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::InvalidOverlap(_) | Self::Open { .. })
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, GrphError>;
