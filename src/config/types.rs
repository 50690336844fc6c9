//! Configuration type definitions.

use crate::compiler::OutputStyle;
use crate::constants::{
    DEFAULT_CSS_DIR, DEFAULT_FILE_NAME, DEFAULT_OUTPUT_ROOT, DEFAULT_PRECISION,
    DEFAULT_SOURCE_PATH,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build settings.
    #[serde(default)]
    pub build: BuildConfig,
}

/// Settings for compiling and publishing the stylesheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Stylesheet source file.
    pub source: PathBuf,

    /// Root directory that receives the published output.
    pub output_root: PathBuf,

    /// Subdirectory of the output root for CSS files.
    pub css_dir: PathBuf,

    /// File name of the published stylesheet.
    pub file_name: String,

    /// Decimal digits retained in numeric output.
    pub precision: usize,

    /// Output style used when no mode argument is given.
    pub style: OutputStyle,

    /// Skip the write when the output directory cannot be created.
    pub strict_directory: bool,

    /// Give up waiting for the compiler after this many seconds.
    pub compile_timeout_secs: Option<u64>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE_PATH),
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            css_dir: PathBuf::from(DEFAULT_CSS_DIR),
            file_name: DEFAULT_FILE_NAME.to_string(),
            precision: DEFAULT_PRECISION,
            style: OutputStyle::Expanded,
            strict_directory: true,
            compile_timeout_secs: None,
        }
    }
}
