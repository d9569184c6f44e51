//! Uniform diagnostic types published to the editor.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A zero-based line/character position.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    /// Creates a new position.
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A range between two positions.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    /// Creates a new range.
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Creates an empty range at a single position.
    pub const fn point(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }
}

/// Severity level understood by the editor display.
///
/// Serialized as the host's numeric code: `1` for errors, `2` for warnings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Error,
    #[default]
    Warning,
}

impl Severity {
    /// Returns the numeric code sent to the host.
    pub const fn code(self) -> u8 {
        match self {
            Severity::Error => 1,
            Severity::Warning => 2,
        }
    }

    /// Parses a host severity code.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Severity::Error),
            2 => Some(Severity::Warning),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        Severity::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid severity code: {}", code)))
    }
}

/// A single reported issue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// The diagnostic message.
    pub message: String,

    /// Zero-based location in the file.
    pub range: Range,

    /// Severity level.
    #[serde(default)]
    pub severity: Severity,

    /// Identifier of the rule that reported this issue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_type: Option<String>,
}

impl Diagnostic {
    /// Creates a new warning diagnostic.
    pub fn new(message: impl Into<String>, range: Range) -> Self {
        Self {
            message: message.into(),
            range,
            severity: Severity::Warning,
            rule_type: None,
        }
    }

    /// Sets the severity level.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the rule identifier.
    pub fn with_rule_type(mut self, rule_type: impl Into<String>) -> Self {
        self.rule_type = Some(rule_type.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// All diagnostics of one lint run, grouped by file.
///
/// Files iterate in path order; diagnostics within a file keep the order the
/// tool emitted them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiagnosticSet {
    files: BTreeMap<PathBuf, Vec<Diagnostic>>,
}

impl DiagnosticSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensures `path` has an entry, even if it stays empty.
    pub fn touch(&mut self, path: impl Into<PathBuf>) {
        self.files.entry(path.into()).or_default();
    }

    /// Appends a diagnostic to the list for `path`.
    pub fn push(&mut self, path: impl Into<PathBuf>, diagnostic: Diagnostic) {
        self.files.entry(path.into()).or_default().push(diagnostic);
    }

    /// Returns the diagnostics for `path`, if the file is part of the set.
    pub fn get(&self, path: &Path) -> Option<&[Diagnostic]> {
        self.files.get(path).map(Vec::as_slice)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    /// Number of files in the set.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Total number of diagnostics across all files.
    pub fn diagnostic_count(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, PathBuf, Vec<Diagnostic>> {
        self.files.iter()
    }
}

impl<'a> IntoIterator for &'a DiagnosticSet {
    type Item = (&'a PathBuf, &'a Vec<Diagnostic>);
    type IntoIter = btree_map::Iter<'a, PathBuf, Vec<Diagnostic>>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}
