//! Relay error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while relaying lint results.
#[derive(Debug, Error)]
pub enum RelayError {
    /// No lint configuration file was found above the target.
    #[error("No lint config found above {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// The lint tool could not be spawned or exited abnormally.
    #[error("Process error: {0}")]
    Process(String),

    /// The lint tool produced output that is not valid JSON.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Relay settings could not be loaded.
    #[error("Settings error: {0}")]
    Settings(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RelayError {
    /// Creates a process error.
    pub fn process(message: impl Into<String>) -> Self {
        Self::Process(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates a settings error.
    pub fn settings(message: impl Into<String>) -> Self {
        Self::Settings(message.into())
    }

    /// Returns true if this error only means "nothing to lint here".
    pub fn is_config_not_found(&self) -> bool {
        matches!(self, Self::ConfigNotFound(_))
    }
}
