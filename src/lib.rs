//! csspub - compile an SCSS stylesheet and publish the CSS.
//!
//! The crate prepares the output directory, hands the source to the
//! stylesheet compiler and writes the result, reporting exactly one
//! terminal outcome per run.

#![warn(missing_docs)]

pub mod cli;
pub mod compiler;
pub mod config;
pub mod constants;
pub mod error;
pub mod pipeline;

use clap::Parser;
use cli::Cli;
use compiler::{CompileRequest, OutputStyle, RsassCompiler};
use config::{BuildConfig, Config, local_config_path, resolve_config, save_config, validate_config};
use constants::exit_codes;
use pipeline::{PublishOptions, PublishTarget, Publisher};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub use error::{Error, Result};

/// Main entry point for the csspub CLI.
///
/// Returns the process exit code for the publish outcome. Configuration
/// problems are returned as errors.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.quiet);

    let project_dir = std::env::current_dir()?;

    if cli.init {
        return init_config(&project_dir);
    }

    // Load configuration, then let CLI values win
    let (mut config, config_path) = resolve_config(cli.config.as_deref(), &project_dir)?;
    if let Some(path) = &config_path {
        debug!("Loaded configuration from {}", path.display());
    }
    apply_overrides(&mut config, &cli);
    validate_config(&config)?;

    let request = compile_request(&config.build, cli.mode.as_deref());
    let target = PublishTarget::from_build(&config.build);
    let options = PublishOptions {
        strict_directory: config.build.strict_directory,
        compile_timeout: config.build.compile_timeout_secs.map(Duration::from_secs),
    };

    info!(
        "Compiling {} ({} style) -> {}",
        request.source_path.display(),
        request.output_style,
        target.file_path.display()
    );

    let runtime = tokio::runtime::Runtime::new().map_err(|e| Error::Internal {
        message: format!("Failed to create async runtime: {e}"),
    })?;

    let publisher = Publisher::new(Arc::new(RsassCompiler::new()), options);
    let report = runtime.block_on(publisher.publish(&request, &target));

    // A compile that outlived its timeout may still be running
    runtime.shutdown_background();

    Ok(report.exit_code())
}

/// Build the compile request from configuration and the CLI mode argument.
///
/// An explicit mode argument always decides the style; without one the
/// configured style is used.
pub fn compile_request(build: &BuildConfig, mode: Option<&str>) -> CompileRequest {
    let output_style = mode.map_or(build.style, |m| OutputStyle::from_mode(Some(m)));
    CompileRequest::new(build.source.clone(), output_style, build.precision)
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    let build = &mut config.build;
    if let Some(source) = &cli.source {
        build.source.clone_from(source);
    }
    if let Some(output_root) = &cli.output_root {
        build.output_root.clone_from(output_root);
    }
    if let Some(precision) = cli.precision {
        build.precision = precision;
    }
    if let Some(timeout) = cli.timeout {
        build.compile_timeout_secs = Some(timeout);
    }
}

fn init_config(project_dir: &Path) -> Result<i32> {
    let path = local_config_path(project_dir);
    if path.exists() {
        println!("Configuration file already exists: {}", path.display());
    } else {
        save_config(&Config::default(), &path)?;
        println!("Created configuration file: {}", path.display());
    }
    Ok(exit_codes::SUCCESS)
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt().with_env_filter(filter).init();
}
