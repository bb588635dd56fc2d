//! Constants shared by the library and the command-line front end

/// Default overlap length (`-k`)
pub const DEFAULT_OVERLAP: usize = 3;

/// Smallest accepted overlap length
pub const MIN_OVERLAP: usize = 1;

/// Log file written in the working directory, truncated on every run
pub const DEFAULT_LOG_FILE: &str = ".log";

/// Version number
pub const VERSION: (u8, u8, u8) = (0, 1, 0);
