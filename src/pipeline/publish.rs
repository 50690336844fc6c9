//! Compile-and-publish pipeline.
//!
//! A run moves through `Compiling -> Compiled -> Writing` and stops in exactly
//! one terminal [`Outcome`]. Directory preparation runs alongside the compile
//! step; the write waits for both.

use super::prepare::{DirectoryState, ensure_directory_async};
use super::target::PublishTarget;
use crate::compiler::{CompileError, CompileRequest, StylesheetCompiler};
use crate::constants::exit_codes;
use crate::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Terminal state of a publish run.
#[derive(Debug)]
pub enum Outcome {
    /// Compiled CSS was written to `path`.
    Published {
        /// Destination file.
        path: PathBuf,
        /// Number of bytes written.
        bytes: usize,
    },
    /// The compiler rejected the source; nothing was written.
    CompileFailed(CompileError),
    /// Compilation succeeded but the destination could not be written.
    WriteFailed {
        /// Destination file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The output directory could not be created, so the write was skipped.
    DirectoryFailed(Error),
}

impl Outcome {
    /// Whether the stylesheet was published.
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published { .. })
    }
}

/// Everything a publish run reports.
#[derive(Debug)]
pub struct PublishReport {
    /// Result of preparing the output directory (`None` if it failed).
    pub directory: Option<DirectoryState>,
    /// Terminal state of the run.
    pub outcome: Outcome,
}

impl PublishReport {
    /// Process exit code for this report.
    ///
    /// A publish that succeeded despite a directory warning still exits
    /// non-zero.
    pub fn exit_code(&self) -> i32 {
        match &self.outcome {
            Outcome::Published { .. } if self.directory.is_some() => exit_codes::SUCCESS,
            Outcome::Published { .. } | Outcome::DirectoryFailed(_) => {
                exit_codes::DIRECTORY_FAILED
            }
            Outcome::CompileFailed(_) => exit_codes::COMPILE_FAILED,
            Outcome::WriteFailed { .. } => exit_codes::WRITE_FAILED,
        }
    }
}

/// Options controlling a publish run.
#[derive(Debug, Clone, Copy)]
pub struct PublishOptions {
    /// Skip the write when the output directory could not be created.
    pub strict_directory: bool,
    /// Maximum time to wait for the compiler.
    pub compile_timeout: Option<Duration>,
}

impl Default for PublishOptions {
    fn default() -> Self {
        Self {
            strict_directory: true,
            compile_timeout: None,
        }
    }
}

/// Compiles a stylesheet and publishes the result.
pub struct Publisher {
    compiler: Arc<dyn StylesheetCompiler>,
    options: PublishOptions,
}

impl Publisher {
    /// Create a publisher around `compiler`.
    pub fn new(compiler: Arc<dyn StylesheetCompiler>, options: PublishOptions) -> Self {
        Self { compiler, options }
    }

    /// Run the pipeline once.
    ///
    /// Never returns an error: every failure is logged and reported in the
    /// [`Outcome`].
    pub async fn publish(&self, request: &CompileRequest, target: &PublishTarget) -> PublishReport {
        let (directory, compiled) = tokio::join!(
            ensure_directory_async(&target.directory_path),
            self.compile(request)
        );

        let (directory, directory_error) = match directory {
            Ok(state) => {
                match state {
                    DirectoryState::Created => info!(
                        "Output directory created: {}",
                        target.directory_path.display()
                    ),
                    DirectoryState::AlreadyExists => info!(
                        "Output directory exists: {}",
                        target.directory_path.display()
                    ),
                }
                (Some(state), None)
            }
            Err(e) => {
                error!("{e}: {}", error_source(&e));
                (None, Some(e))
            }
        };

        let css = match compiled {
            Ok(css) => {
                info!("Stylesheet compile done: {}", request.source_path.display());
                css
            }
            Err(e) => {
                error!(
                    "Stylesheet compile failed for {}: {e}",
                    request.source_path.display()
                );
                return PublishReport {
                    directory,
                    outcome: Outcome::CompileFailed(e),
                };
            }
        };

        if let Some(e) = directory_error {
            if self.options.strict_directory {
                warn!("Skipping write of {}", target.file_path.display());
                return PublishReport {
                    directory,
                    outcome: Outcome::DirectoryFailed(e),
                };
            }
            warn!("Output directory unavailable, attempting write anyway");
        }

        let outcome = match write_atomic(target, &css).await {
            Ok(()) => {
                info!("{} written to disk", target.file_path.display());
                Outcome::Published {
                    path: target.file_path.clone(),
                    bytes: css.len(),
                }
            }
            Err(e) => {
                error!("Failed to write {}: {e}", target.file_path.display());
                Outcome::WriteFailed {
                    path: target.file_path.clone(),
                    source: e,
                }
            }
        };

        PublishReport { directory, outcome }
    }

    /// Run the compiler on a blocking worker, bounded by the timeout.
    async fn compile(&self, request: &CompileRequest) -> Result<String, CompileError> {
        let compiler = Arc::clone(&self.compiler);
        let owned = request.clone();
        let task = tokio::task::spawn_blocking(move || compiler.compile(&owned));

        let joined = match self.options.compile_timeout {
            Some(limit) => {
                if let Ok(joined) = tokio::time::timeout(limit, task).await {
                    joined
                } else {
                    return Err(CompileError::new(format!(
                        "compilation timed out after {}s",
                        limit.as_secs_f64()
                    )));
                }
            }
            None => task.await,
        };

        joined.map_err(|e| CompileError::new(format!("compiler task failed: {e}")))?
    }
}

/// Stage the css in a sibling temp file and rename it over the destination.
///
/// The destination is either fully replaced or left as it was. A read-only
/// destination is refused, and an existing file's permissions carry over to
/// the replacement.
async fn write_atomic(target: &PublishTarget, css: &str) -> std::io::Result<()> {
    let temp_path = target.temp_path();

    let existing = match tokio::fs::metadata(&target.file_path).await {
        Ok(metadata) if metadata.is_file() => Some(metadata.permissions()),
        _ => None,
    };
    if existing.as_ref().is_some_and(std::fs::Permissions::readonly) {
        return Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            format!("{} is read-only", target.file_path.display()),
        ));
    }

    if let Err(e) = tokio::fs::write(&temp_path, css.as_bytes()).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(e);
    }

    if let Some(permissions) = existing
        && let Err(e) = tokio::fs::set_permissions(&temp_path, permissions).await
    {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(e);
    }

    if let Err(e) = tokio::fs::rename(&temp_path, &target.file_path).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(e);
    }

    Ok(())
}

fn error_source(e: &Error) -> String {
    std::error::Error::source(e).map_or_else(String::new, ToString::to_string)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::compiler::OutputStyle;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct FixedCompiler(&'static str);

    impl StylesheetCompiler for FixedCompiler {
        fn compile(&self, _request: &CompileRequest) -> Result<String, CompileError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingCompiler;

    impl StylesheetCompiler for FailingCompiler {
        fn compile(&self, _request: &CompileRequest) -> Result<String, CompileError> {
            Err(CompileError::new("Error: expected \"}\".").at(2, 7))
        }
    }

    struct SlowCompiler;

    impl StylesheetCompiler for SlowCompiler {
        fn compile(&self, _request: &CompileRequest) -> Result<String, CompileError> {
            std::thread::sleep(Duration::from_millis(500));
            Ok("a{}".to_string())
        }
    }

    #[derive(Default)]
    struct CountingCompiler(AtomicUsize);

    impl StylesheetCompiler for CountingCompiler {
        fn compile(&self, _request: &CompileRequest) -> Result<String, CompileError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok("a{}".to_string())
        }
    }

    fn publisher(compiler: impl StylesheetCompiler + 'static) -> Publisher {
        Publisher::new(Arc::new(compiler), PublishOptions::default())
    }

    fn request() -> CompileRequest {
        CompileRequest::new("style.scss", OutputStyle::Expanded, 8)
    }

    #[tokio::test]
    async fn test_success_writes_file_and_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let target = PublishTarget::new(temp_dir.path().join("dest").join("css"), "grid.css");

        let report = publisher(FixedCompiler(".box {\n  width: 15px;\n}\n"))
            .publish(&request(), &target)
            .await;

        assert!(report.outcome.is_published());
        assert_eq!(report.directory, Some(DirectoryState::Created));
        assert_eq!(report.exit_code(), exit_codes::SUCCESS);
        assert_eq!(
            std::fs::read_to_string(&target.file_path).unwrap(),
            ".box {\n  width: 15px;\n}\n"
        );
        assert!(!target.temp_path().exists());
    }

    #[tokio::test]
    async fn test_success_overwrites_previous_content() {
        let temp_dir = TempDir::new().unwrap();
        let target = PublishTarget::new(temp_dir.path(), "grid.css");
        std::fs::write(&target.file_path, "old content that is much longer than new").unwrap();

        let report = publisher(FixedCompiler("a{}")).publish(&request(), &target).await;

        assert!(matches!(report.outcome, Outcome::Published { bytes: 3, .. }));
        assert_eq!(report.directory, Some(DirectoryState::AlreadyExists));
        assert_eq!(std::fs::read_to_string(&target.file_path).unwrap(), "a{}");
    }

    #[tokio::test]
    async fn test_compile_failure_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let target = PublishTarget::new(temp_dir.path().join("css"), "grid.css");

        let report = publisher(FailingCompiler).publish(&request(), &target).await;

        match &report.outcome {
            Outcome::CompileFailed(e) => {
                assert_eq!(e.message, "Error: expected \"}\".");
                assert_eq!(e.line, Some(2));
                assert_eq!(e.column, Some(7));
            }
            other => panic!("expected CompileFailed, got {other:?}"),
        }
        assert_eq!(report.exit_code(), exit_codes::COMPILE_FAILED);
        assert!(!target.file_path.exists());
    }

    #[tokio::test]
    async fn test_compile_failure_keeps_previous_file() {
        let temp_dir = TempDir::new().unwrap();
        let target = PublishTarget::new(temp_dir.path(), "grid.css");
        std::fs::write(&target.file_path, "previous").unwrap();

        let report = publisher(FailingCompiler).publish(&request(), &target).await;

        assert!(matches!(report.outcome, Outcome::CompileFailed(_)));
        assert_eq!(
            std::fs::read_to_string(&target.file_path).unwrap(),
            "previous"
        );
    }

    #[tokio::test]
    async fn test_write_failure_is_distinct_from_compile_failure() {
        let temp_dir = TempDir::new().unwrap();
        let target = PublishTarget::new(temp_dir.path(), "grid.css");
        // A directory at the destination makes the rename fail
        std::fs::create_dir(&target.file_path).unwrap();
        std::fs::write(target.file_path.join("inner.txt"), "kept").unwrap();

        let report = publisher(FixedCompiler("a{}")).publish(&request(), &target).await;

        assert!(matches!(report.outcome, Outcome::WriteFailed { .. }));
        assert_eq!(report.exit_code(), exit_codes::WRITE_FAILED);
        assert_eq!(
            std::fs::read_to_string(target.file_path.join("inner.txt")).unwrap(),
            "kept"
        );
        assert!(!target.temp_path().exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_read_only_destination_is_not_replaced() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let target = PublishTarget::new(temp_dir.path(), "grid.css");
        std::fs::write(&target.file_path, "previous").unwrap();
        std::fs::set_permissions(&target.file_path, std::fs::Permissions::from_mode(0o444))
            .unwrap();

        let report = publisher(FixedCompiler("a{}")).publish(&request(), &target).await;

        match &report.outcome {
            Outcome::WriteFailed { source, .. } => {
                assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
            }
            other => panic!("expected WriteFailed, got {other:?}"),
        }
        assert_eq!(report.exit_code(), exit_codes::WRITE_FAILED);
        assert_eq!(
            std::fs::read_to_string(&target.file_path).unwrap(),
            "previous"
        );
        let mode = std::fs::metadata(&target.file_path)
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o444);
        assert!(!target.temp_path().exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_replacement_keeps_destination_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let target = PublishTarget::new(temp_dir.path(), "grid.css");
        std::fs::write(&target.file_path, "previous").unwrap();
        std::fs::set_permissions(&target.file_path, std::fs::Permissions::from_mode(0o640))
            .unwrap();

        let report = publisher(FixedCompiler("a{}")).publish(&request(), &target).await;

        assert!(report.outcome.is_published());
        assert_eq!(std::fs::read_to_string(&target.file_path).unwrap(), "a{}");
        let mode = std::fs::metadata(&target.file_path)
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[tokio::test]
    async fn test_strict_directory_failure_skips_write() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("dest");
        std::fs::write(&blocker, "file").unwrap();
        let target = PublishTarget::new(blocker.join("css"), "grid.css");

        let report = publisher(FixedCompiler("a{}")).publish(&request(), &target).await;

        assert!(report.directory.is_none());
        assert!(matches!(
            report.outcome,
            Outcome::DirectoryFailed(Error::OutputDirCreateFailed { .. })
        ));
        assert_eq!(report.exit_code(), exit_codes::DIRECTORY_FAILED);
    }

    #[tokio::test]
    async fn test_lenient_directory_failure_reports_write_failure() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("dest");
        std::fs::write(&blocker, "file").unwrap();
        let target = PublishTarget::new(blocker.join("css"), "grid.css");
        let options = PublishOptions {
            strict_directory: false,
            ..PublishOptions::default()
        };

        let report = Publisher::new(Arc::new(FixedCompiler("a{}")), options)
            .publish(&request(), &target)
            .await;

        assert!(report.directory.is_none());
        assert!(matches!(report.outcome, Outcome::WriteFailed { .. }));
        assert_eq!(std::fs::read_to_string(&blocker).unwrap(), "file");
    }

    #[tokio::test]
    async fn test_compile_timeout_reports_compile_failure() {
        let temp_dir = TempDir::new().unwrap();
        let target = PublishTarget::new(temp_dir.path(), "grid.css");
        let options = PublishOptions {
            compile_timeout: Some(Duration::from_millis(50)),
            ..PublishOptions::default()
        };

        let report = Publisher::new(Arc::new(SlowCompiler), options)
            .publish(&request(), &target)
            .await;

        match &report.outcome {
            Outcome::CompileFailed(e) => assert!(e.message.contains("timed out")),
            other => panic!("expected CompileFailed, got {other:?}"),
        }
        assert!(!target.file_path.exists());
    }

    #[tokio::test]
    async fn test_compiler_called_exactly_once() {
        let temp_dir = TempDir::new().unwrap();
        let target = PublishTarget::new(temp_dir.path(), "grid.css");
        let compiler = Arc::new(CountingCompiler::default());

        let report = Publisher::new(compiler.clone(), PublishOptions::default())
            .publish(&request(), &target)
            .await;

        assert!(report.outcome.is_published());
        assert_eq!(compiler.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_published_with_directory_warning_exits_nonzero() {
        let report = PublishReport {
            directory: None,
            outcome: Outcome::Published {
                path: PathBuf::from("dest/css/grid.css"),
                bytes: 3,
            },
        };
        assert_eq!(report.exit_code(), exit_codes::DIRECTORY_FAILED);
    }
}
