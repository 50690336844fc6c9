//! Publish destinations.

use crate::config::BuildConfig;
use crate::constants::TEMP_FILE_SUFFIX;
use std::path::{Path, PathBuf};

/// Where the compiled stylesheet is published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishTarget {
    /// Directory that must exist before writing.
    pub directory_path: PathBuf,
    /// Destination file, overwritten on every successful run.
    pub file_path: PathBuf,
}

impl PublishTarget {
    /// Target a file named `file_name` inside `directory`.
    pub fn new(directory: impl Into<PathBuf>, file_name: &str) -> Self {
        let directory_path = directory.into();
        let file_path = directory_path.join(file_name);
        Self {
            directory_path,
            file_path,
        }
    }

    /// Target described by the build configuration:
    /// `<output_root>/<css_dir>/<file_name>`.
    pub fn from_build(build: &BuildConfig) -> Self {
        Self::new(build.output_root.join(&build.css_dir), &build.file_name)
    }

    /// Sibling path the css is staged in before being renamed into place.
    pub fn temp_path(&self) -> PathBuf {
        let parent = self
            .file_path
            .parent()
            .map_or_else(|| self.directory_path.clone(), Path::to_path_buf);
        // Use to_string_lossy() to handle non-UTF-8 filenames gracefully
        let name = self.file_path.file_name().map_or_else(
            || std::borrow::Cow::Borrowed("output"),
            |n| n.to_string_lossy(),
        );
        parent.join(format!(".{name}{TEMP_FILE_SUFFIX}"))
    }
}
