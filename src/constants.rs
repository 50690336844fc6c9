//! Application-wide constants.
//!
//! Default paths, compiler settings and exit codes live here so the CLI,
//! configuration and pipeline agree on them.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "csspub";

/// Project-local configuration file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "csspub.toml";

/// Mode argument that selects compressed output.
pub const COMPRESS_MODE: &str = "compress";

/// Default stylesheet source path.
pub const DEFAULT_SOURCE_PATH: &str = "src/scss/test.scss";

/// Default output root directory.
pub const DEFAULT_OUTPUT_ROOT: &str = "dest";

/// Subdirectory of the output root that receives compiled CSS.
pub const DEFAULT_CSS_DIR: &str = "css";

/// File name of the published stylesheet.
pub const DEFAULT_FILE_NAME: &str = "grid.css";

/// Default number of decimal digits kept in numeric output.
pub const DEFAULT_PRECISION: usize = 8;

/// Numeric precision limits.
pub mod precision {
    /// Minimum allowed precision.
    pub const MIN: usize = 0;
    /// Maximum allowed precision.
    pub const MAX: usize = 20;
}

/// Suffix of the temporary file written before the final rename.
pub const TEMP_FILE_SUFFIX: &str = ".tmp";

/// Process exit codes, following `sysexits.h`.
pub mod exit_codes {
    /// Stylesheet compiled and published.
    pub const SUCCESS: i32 = 0;
    /// Generic failure (configuration or usage).
    pub const FAILURE: i32 = 1;
    /// Compiler rejected the input (`EX_DATAERR`).
    pub const COMPILE_FAILED: i32 = 65;
    /// Output directory could not be created (`EX_CANTCREAT`).
    pub const DIRECTORY_FAILED: i32 = 73;
    /// Compiled CSS could not be written (`EX_IOERR`).
    pub const WRITE_FAILED: i32 = 74;
}
