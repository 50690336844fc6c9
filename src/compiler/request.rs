//! Compile request types.

use crate::constants::COMPRESS_MODE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Formatting of the emitted CSS.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// Human-readable output with indentation and line breaks.
    #[default]
    Expanded,
    /// Whitespace-stripped output.
    Compressed,
}

impl OutputStyle {
    /// Select the style from the CLI mode argument.
    ///
    /// Only the literal `compress` selects [`OutputStyle::Compressed`].
    pub fn from_mode(mode: Option<&str>) -> Self {
        match mode {
            Some(COMPRESS_MODE) => Self::Compressed,
            _ => Self::Expanded,
        }
    }
}

impl std::fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expanded => write!(f, "expanded"),
            Self::Compressed => write!(f, "compressed"),
        }
    }
}

impl std::str::FromStr for OutputStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "expanded" | "nested" => Ok(Self::Expanded),
            "compressed" | "compress" => Ok(Self::Compressed),
            other => Err(format!("unknown output style: {other}")),
        }
    }
}

/// A single compilation request. Built once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileRequest {
    /// Stylesheet source file.
    pub source_path: PathBuf,
    /// Output formatting.
    pub output_style: OutputStyle,
    /// Decimal digits retained in numeric output.
    pub precision: usize,
}

impl CompileRequest {
    /// Create a request for `source_path`.
    pub fn new(source_path: impl Into<PathBuf>, output_style: OutputStyle, precision: usize) -> Self {
        Self {
            source_path: source_path.into(),
            output_style,
            precision,
        }
    }
}
