//! Stylesheet compiler collaborator.
//!
//! The pipeline only sees the [`StylesheetCompiler`] trait; [`RsassCompiler`]
//! is the production implementation.

mod backend;
mod request;

pub use backend::RsassCompiler;
pub use request::{CompileRequest, OutputStyle};

use std::fmt;

/// Failure reported by a stylesheet compiler.
///
/// The message is kept verbatim; location is filled in when the compiler
/// reports one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    /// Compiler message.
    pub message: String,
    /// 1-based line of the failure, if known.
    pub line: Option<u32>,
    /// 1-based column of the failure, if known.
    pub column: Option<u32>,
}

impl CompileError {
    /// Create an error without location information.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
            column: None,
        }
    }

    /// Attach a source location.
    #[must_use]
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(column)) => {
                write!(f, "{} (line {line}, column {column})", self.message)
            }
            (Some(line), None) => write!(f, "{} (line {line})", self.message),
            _ => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for CompileError {}

/// Trait for compiling a stylesheet source into CSS text.
///
/// Implementations are called from a blocking worker thread.
pub trait StylesheetCompiler: Send + Sync {
    /// Compile the stylesheet described by `request`.
    fn compile(&self, request: &CompileRequest) -> Result<String, CompileError>;
}
