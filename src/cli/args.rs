//! CLI argument definitions.

use super::validators::{parse_precision, parse_timeout};
use clap::Parser;
use std::path::PathBuf;

/// Compile an SCSS stylesheet and publish the CSS.
#[derive(Debug, Parser)]
#[command(name = "csspub")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Build mode. `compress` selects compressed output; anything else
    /// selects expanded output.
    pub mode: Option<String>,

    /// Path to a TOML config file (default: ./csspub.toml, then the
    /// platform config file).
    #[arg(long, env = "CSSPUB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Stylesheet source file (overrides config).
    #[arg(short, long, env = "CSSPUB_SOURCE")]
    pub source: Option<PathBuf>,

    /// Output root directory (overrides config).
    #[arg(short, long, env = "CSSPUB_OUTPUT_ROOT")]
    pub output_root: Option<PathBuf>,

    /// Decimal digits kept in numeric output (0-20).
    #[arg(short, long, value_parser = parse_precision, env = "CSSPUB_PRECISION")]
    pub precision: Option<usize>,

    /// Give up waiting for the compiler after this many seconds.
    #[arg(long, value_parser = parse_timeout)]
    pub timeout: Option<u64>,

    /// Write a default csspub.toml to the working directory and exit.
    #[arg(long)]
    pub init: bool,

    /// Only log warnings and errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
