//! SCSS compilation backed by [`rsass`].

use super::{CompileError, CompileRequest, OutputStyle, StylesheetCompiler};
use rsass::output::{Format, Style};
use tracing::debug;

/// Compiler implementation using the `rsass` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct RsassCompiler;

impl RsassCompiler {
    /// Create a new compiler.
    pub fn new() -> Self {
        Self
    }

    #[allow(clippy::needless_update)]
    fn format_for(request: &CompileRequest) -> Format {
        let style = match request.output_style {
            OutputStyle::Expanded => Style::Expanded,
            OutputStyle::Compressed => Style::Compressed,
        };
        Format {
            style,
            precision: request.precision,
            ..Format::default()
        }
    }
}

impl StylesheetCompiler for RsassCompiler {
    fn compile(&self, request: &CompileRequest) -> Result<String, CompileError> {
        debug!(
            "Compiling {} (style={}, precision={})",
            request.source_path.display(),
            request.output_style,
            request.precision
        );

        let bytes = rsass::compile_scss_path(&request.source_path, Self::format_for(request))
            .map_err(|e| compile_error_from_message(e.to_string()))?;

        let mut css = String::from_utf8(bytes)
            .map_err(|e| CompileError::new(format!("compiler produced invalid UTF-8: {e}")))?;

        // Compressed output ends with a single line break; drop it so the
        // text is one line.
        if request.output_style == OutputStyle::Compressed {
            let trimmed = css.trim_end_matches(['\n', '\r']).len();
            css.truncate(trimmed);
        }

        Ok(css)
    }
}

/// Build a [`CompileError`] from a compiler message, recovering the
/// `file line:column` annotation printed at the end of parse errors.
fn compile_error_from_message(message: String) -> CompileError {
    let location = message.lines().rev().find_map(location_in_line);
    let error = CompileError::new(message);
    match location {
        Some((line, column)) => error.at(line, column),
        None => error,
    }
}

fn location_in_line(line: &str) -> Option<(u32, u32)> {
    line.split_whitespace().find_map(|token| {
        let (line, column) = token.split_once(':')?;
        Some((line.parse().ok()?, column.parse().ok()?))
    })
}
