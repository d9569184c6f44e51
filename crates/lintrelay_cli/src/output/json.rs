//! JSON output formatter

use std::io::{self, Write};
use std::path::Path;

use lintrelay_core::{Diagnostic, DiagnosticsSink, PublishedDiagnostics, RelayError};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

pub fn output_json(published: &[PublishedDiagnostics]) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(published).into_diagnostic()?
    );
    Ok(())
}

/// Streams publications as one JSON object per line.
pub struct JsonLinesSink<W> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Reports a failed lint run to the editor.
    pub fn report_error(&mut self, error: &RelayError) -> Result<(), RelayError> {
        self.write_line(&serde_json::json!({ "error": error.to_string() }))
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> Result<(), RelayError> {
        serde_json::to_writer(&mut self.writer, value).map_err(io::Error::from)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> DiagnosticsSink for JsonLinesSink<W> {
    fn set_errors(
        &mut self,
        source: &str,
        path: &Path,
        diagnostics: &[Diagnostic],
        color: Option<&str>,
    ) -> Result<(), RelayError> {
        self.write_line(&PublishedDiagnostics::new(source, path, diagnostics, color))
    }
}
