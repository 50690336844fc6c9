//! Configuration validation.

use crate::config::Config;
use crate::constants::precision;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    let build = &config.build;

    if !(precision::MIN..=precision::MAX).contains(&build.precision) {
        return Err(Error::ConfigValidation {
            message: format!(
                "precision must be between {} and {}, got {}",
                precision::MIN,
                precision::MAX,
                build.precision
            ),
        });
    }

    if build.file_name.is_empty() {
        return Err(Error::ConfigValidation {
            message: "file_name must not be empty".to_string(),
        });
    }

    // The file must land directly inside the css directory
    if build.file_name.contains(['/', '\\']) || build.file_name == ".." || build.file_name == "."
    {
        return Err(Error::ConfigValidation {
            message: format!(
                "file_name must be a plain file name, got '{}'",
                build.file_name
            ),
        });
    }

    if build.source.as_os_str().is_empty() {
        return Err(Error::ConfigValidation {
            message: "source must not be empty".to_string(),
        });
    }

    if build.compile_timeout_secs == Some(0) {
        return Err(Error::ConfigValidation {
            message: "compile_timeout_secs must be at least 1".to_string(),
        });
    }

    Ok(())
}
