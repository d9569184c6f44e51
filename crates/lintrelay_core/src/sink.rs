//! The editor side of the relay.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::RelayError;
use crate::diagnostic::Diagnostic;

/// Receives diagnostics for display in the editor.
///
/// Each call carries the full current list for one file, never a delta; an
/// empty list clears the file.
pub trait DiagnosticsSink {
    fn set_errors(
        &mut self,
        source: &str,
        path: &Path,
        diagnostics: &[Diagnostic],
        color: Option<&str>,
    ) -> Result<(), RelayError>;
}

/// An owned record of one `set_errors` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedDiagnostics {
    pub source: String,
    pub file_path: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl PublishedDiagnostics {
    pub fn new(
        source: &str,
        path: &Path,
        diagnostics: &[Diagnostic],
        color: Option<&str>,
    ) -> Self {
        Self {
            source: source.to_string(),
            file_path: path.to_path_buf(),
            diagnostics: diagnostics.to_vec(),
            color: color.map(str::to_string),
        }
    }

    pub fn is_clear(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Returns true if any published diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Collects publications in memory.
impl DiagnosticsSink for Vec<PublishedDiagnostics> {
    fn set_errors(
        &mut self,
        source: &str,
        path: &Path,
        diagnostics: &[Diagnostic],
        color: Option<&str>,
    ) -> Result<(), RelayError> {
        self.push(PublishedDiagnostics::new(source, path, diagnostics, color));
        Ok(())
    }
}

impl<S: DiagnosticsSink + ?Sized> DiagnosticsSink for &mut S {
    fn set_errors(
        &mut self,
        source: &str,
        path: &Path,
        diagnostics: &[Diagnostic],
        color: Option<&str>,
    ) -> Result<(), RelayError> {
        (**self).set_errors(source, path, diagnostics, color)
    }
}
