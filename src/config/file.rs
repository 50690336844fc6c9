//! Configuration file loading.

use crate::config::Config;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.
///
/// Returns default config if the file does not exist.
pub fn load_config_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| Error::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Resolve which config file applies and load it.
///
/// Lookup order: explicit path, `csspub.toml` in `project_dir`, the
/// platform config file. Returns defaults (and no path) when none exist.
/// An explicit path that does not exist is an error.
pub fn resolve_config(
    explicit: Option<&Path>,
    project_dir: &Path,
) -> Result<(Config, Option<PathBuf>)> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(Error::ConfigRead {
                path: path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            });
        }
        return Ok((load_config_file(path)?, Some(path.to_path_buf())));
    }

    let local = super::local_config_path(project_dir);
    if local.exists() {
        return Ok((load_config_file(&local)?, Some(local)));
    }

    match super::config_file_path() {
        Ok(path) if path.exists() => Ok((load_config_file(&path)?, Some(path))),
        _ => Ok((Config::default(), None)),
    }
}

/// Save configuration to a TOML file.
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| Error::ConfigWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let contents = toml::to_string_pretty(config).map_err(|e| Error::ConfigSerialize { source: e })?;

    std::fs::write(path, contents).map_err(|e| Error::ConfigWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
