//! Normalization of raw lint tool output into a [`DiagnosticSet`].
//!
//! The tool reports one record per file, each with a list of violations that
//! use one-based line/column numbers and numeric severity codes. This module
//! maps them onto the zero-based, two-level severity model of the editor.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::RelayError;
use crate::diagnostic::{Diagnostic, DiagnosticSet, Position, Range, Severity};

/// Severity code the tool uses for errors.
const TOOL_ERROR_SEVERITY: u8 = 2;

/// A per-file record of raw tool output.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFileRecord {
    pub file_path: String,
    #[serde(default)]
    pub messages: Vec<RawViolation>,
}

/// A single violation as reported by the tool.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawViolation {
    #[serde(default)]
    pub rule_id: Option<String>,
    #[serde(default)]
    pub severity: u8,
    pub message: String,
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub column: Option<u32>,
    #[serde(default)]
    pub end_line: Option<u32>,
    #[serde(default)]
    pub end_column: Option<u32>,
}

/// How tool severity codes map onto editor severities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeverityMapping {
    /// Code 2 becomes an error, everything else a warning.
    #[default]
    Graded,
    /// Every violation is a warning.
    WarningOnly,
}

impl SeverityMapping {
    pub fn map(self, code: u8) -> Severity {
        match self {
            SeverityMapping::Graded if code == TOOL_ERROR_SEVERITY => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

/// What to do with records that carry no violations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyRecordPolicy {
    /// Keep the file in the set with an empty list.
    #[default]
    Retain,
    /// Leave the file out of the set.
    Omit,
}

/// Options controlling normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub severity: SeverityMapping,
    pub empty_records: EmptyRecordPolicy,
    /// Append the rule id to the message text.
    pub rule_in_message: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            severity: SeverityMapping::default(),
            empty_records: EmptyRecordPolicy::default(),
            rule_in_message: true,
        }
    }
}

/// Parses raw tool output.
pub fn parse_output(raw: &str) -> Result<Vec<RawFileRecord>, RelayError> {
    serde_json::from_str(raw.trim())
        .map_err(|e| RelayError::parse(format!("Invalid tool output: {}", e)))
}

/// Parses and normalizes raw tool output.
///
/// Relative file paths in the output are resolved against `base_dir`, the
/// directory the tool ran in.
pub fn normalize(
    raw: &str,
    options: &NormalizeOptions,
    base_dir: &Path,
) -> Result<DiagnosticSet, RelayError> {
    let records = parse_output(raw)?;
    Ok(normalize_records(&records, options, base_dir))
}

/// Normalizes already-parsed records.
pub fn normalize_records(
    records: &[RawFileRecord],
    options: &NormalizeOptions,
    base_dir: &Path,
) -> DiagnosticSet {
    let mut set = DiagnosticSet::new();

    for record in records {
        let path = normalize_path(Path::new(&record.file_path), base_dir);

        if record.messages.is_empty() {
            if options.empty_records == EmptyRecordPolicy::Retain {
                set.touch(path);
            }
            continue;
        }

        debug!(
            "{}: {} violation(s)",
            path.display(),
            record.messages.len()
        );
        for violation in &record.messages {
            set.push(path.clone(), to_diagnostic(violation, options));
        }
    }

    set
}

/// Converts a single raw violation.
pub fn to_diagnostic(violation: &RawViolation, options: &NormalizeOptions) -> Diagnostic {
    let line = violation.line.unwrap_or(1);
    let column = violation.column.unwrap_or(1);
    let start = Position::new(line.saturating_sub(1), column.saturating_sub(1));
    let end = Position::new(
        violation.end_line.map_or(start.line, |l| l.saturating_sub(1)),
        violation
            .end_column
            .map_or(start.character, |c| c.saturating_sub(1)),
    );

    let message = match (&violation.rule_id, options.rule_in_message) {
        (Some(rule), true) => format!("{} ({})", violation.message, rule),
        _ => violation.message.clone(),
    };

    Diagnostic {
        message,
        range: Range::new(start, end),
        severity: options.severity.map(violation.severity),
        rule_type: violation.rule_id.clone(),
    }
}

/// Lexically normalizes `path`, joining it onto `base_dir` when relative.
///
/// `.` components are dropped and `..` pops the previous component; the file
/// system is not consulted, so symlinks are left alone.
pub fn normalize_path(path: &Path, base_dir: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}
