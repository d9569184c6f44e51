//! Relay settings.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use jsonc_parser::ParseOptions;
use jsonschema::Validator;
use serde::{Deserialize, Serialize};

use crate::RelayError;
use crate::discovery::{self, DEFAULT_CONFIG_FILES};
use crate::normalize::{EmptyRecordPolicy, NormalizeOptions, SeverityMapping};

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/settings.json");
static SETTINGS_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// Settings for the relay, usually read from `.lintrelay.jsonc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelaySettings {
    /// Source identifier attached to every publication.
    #[serde(default = "default_source_id")]
    pub source_id: String,

    /// Extensions linted on buffer events, with leading dot.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Lint config filenames, in lookup priority order.
    #[serde(default = "default_config_files")]
    pub config_files: Vec<String>,

    /// Tool binary name.
    #[serde(default = "default_tool")]
    pub tool: String,

    /// Color hint sent with publications.
    #[serde(default = "default_color_hint")]
    pub color_hint: Option<String>,

    #[serde(default)]
    pub severity: SeverityMapping,

    #[serde(default)]
    pub empty_records: EmptyRecordPolicy,

    #[serde(default = "default_rule_in_message")]
    pub rule_in_message: bool,
}

fn default_source_id() -> String {
    "eslint-js".to_string()
}

fn default_extensions() -> Vec<String> {
    vec![".js".to_string(), ".jsx".to_string()]
}

fn default_config_files() -> Vec<String> {
    DEFAULT_CONFIG_FILES.iter().map(|s| s.to_string()).collect()
}

fn default_tool() -> String {
    "eslint".to_string()
}

fn default_color_hint() -> Option<String> {
    Some("yellow".to_string())
}

fn default_rule_in_message() -> bool {
    true
}

impl RelaySettings {
    /// Settings filenames, in lookup priority order.
    pub const CONFIG_FILES: &'static [&'static str] = &[".lintrelay.jsonc", ".lintrelay.json"];

    /// Creates the default settings.
    pub fn new() -> Self {
        Self {
            source_id: default_source_id(),
            extensions: default_extensions(),
            config_files: default_config_files(),
            tool: default_tool(),
            color_hint: default_color_hint(),
            severity: SeverityMapping::default(),
            empty_records: EmptyRecordPolicy::default(),
            rule_in_message: default_rule_in_message(),
        }
    }

    /// Finds a settings file in `dir` or one of its ancestors.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        discovery::find_up(dir.as_ref(), Self::CONFIG_FILES)
    }

    /// Loads settings from a file. Comments and trailing commas are allowed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RelayError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            RelayError::settings(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_jsonc(&content)
    }

    /// Parses settings with schema validation.
    pub fn from_jsonc(content: &str) -> Result<Self, RelayError> {
        let value = jsonc_parser::parse_to_serde_value(content, &ParseOptions::default())
            .map_err(|e| RelayError::settings(format!("Invalid JSON: {}", e)))?
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

        let schema = SETTINGS_SCHEMA.get_or_init(|| {
            let schema_json: serde_json::Value =
                serde_json::from_str(SCHEMA_JSON).expect("Invalid embedded settings schema");
            Validator::new(&schema_json).expect("Invalid settings schema compilation")
        });

        if let Err(e) = schema.validate(&value) {
            return Err(RelayError::settings(format!(
                "Settings validation failed: {}",
                e
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| RelayError::settings(format!("Invalid settings: {}", e)))
    }

    /// Returns true if buffer events for `path` should trigger a lint.
    pub fn accepts(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.extensions
            .iter()
            .any(|accepted| accepted.strip_prefix('.') == Some(ext))
    }

    /// Normalizer options derived from these settings.
    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            severity: self.severity,
            empty_records: self.empty_records,
            rule_in_message: self.rule_in_message,
        }
    }
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self::new()
    }
}
