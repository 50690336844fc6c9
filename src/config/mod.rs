//! Configuration loading and management.

mod file;
mod paths;
mod types;
mod validate;

pub use file::{load_config_file, resolve_config, save_config};
pub use paths::{config_dir, config_file_path, local_config_path};
pub use types::{BuildConfig, Config};
pub use validate::validate_config;
