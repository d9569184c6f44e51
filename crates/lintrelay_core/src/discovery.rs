//! Upward discovery of the lint config and tool binary.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::RelayError;

/// Config filenames recognized by default, in lookup priority order.
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    ".eslintrc",
    ".eslintrc.js",
    ".eslintrc.cjs",
    ".eslintrc.json",
    ".eslintrc.yaml",
    ".eslintrc.yml",
    "eslint.config.js",
    "eslint.config.mjs",
    "eslint.config.cjs",
];

/// Walks `start` and its ancestors, returning the first existing file named
/// in `names`.
///
/// Within one directory `names` are tried in order; nearer directories win
/// over farther ones.
pub fn find_up<S: AsRef<str>>(start: &Path, names: &[S]) -> Option<PathBuf> {
    for dir in start.ancestors() {
        for name in names {
            let candidate = dir.join(name.as_ref());
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

/// Locates the lint config for files in `start`.
pub fn find_lint_config<S: AsRef<str>>(start: &Path, names: &[S]) -> Result<PathBuf, RelayError> {
    find_up(start, names).ok_or_else(|| RelayError::ConfigNotFound(start.to_path_buf()))
}

/// Locates the tool binary for files in `start`.
///
/// Looks for the nearest `node_modules/.bin/<tool>`; falls back to the bare
/// tool name so the system `PATH` is searched.
pub fn find_tool(start: &Path, tool: &str) -> PathBuf {
    let bin = Path::new("node_modules").join(".bin").join(tool_file_name(tool));
    for dir in start.ancestors() {
        let candidate = dir.join(&bin);
        if candidate.is_file() {
            return candidate;
        }
    }
    debug!("No local {} found, using PATH", tool);
    PathBuf::from(tool)
}

#[cfg(windows)]
fn tool_file_name(tool: &str) -> String {
    format!("{}.cmd", tool)
}

#[cfg(not(windows))]
fn tool_file_name(tool: &str) -> String {
    tool.to_string()
}

/// Everything needed to run the tool for one target file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// The discovered lint config file.
    pub config_path: PathBuf,
    /// Working directory for the tool: the directory holding the config.
    pub root: PathBuf,
    /// The tool binary to execute.
    pub tool: PathBuf,
}

impl Project {
    /// Resolves the project that owns `file`.
    pub fn resolve<S: AsRef<str>>(
        file: &Path,
        config_files: &[S],
        tool: &str,
    ) -> Result<Self, RelayError> {
        let dir = file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));

        let config_path = find_lint_config(dir, config_files)?;
        let root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| dir.to_path_buf());
        let tool = find_tool(dir, tool);

        info!(
            "Using config {} (tool: {})",
            config_path.display(),
            tool.display()
        );

        Ok(Self {
            config_path,
            root,
            tool,
        })
    }
}
