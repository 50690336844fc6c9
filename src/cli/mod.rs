//! CLI argument parsing.

mod args;
mod validators;

pub use args::Cli;
pub use validators::{parse_precision, parse_timeout};
