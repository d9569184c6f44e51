//! CLI utility functions

use std::path::Path;

use lintrelay_core::RelaySettings;
use miette::{IntoDiagnostic, Result};
use tokio::runtime::Runtime;
use tracing::info;

pub fn create_tokio_runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .into_diagnostic()
}

/// Loads settings from `path`, or from the nearest settings file.
pub fn load_settings(path: Option<&Path>) -> Result<RelaySettings> {
    if let Some(path) = path {
        return RelaySettings::from_file(path).into_diagnostic();
    }

    let cwd = std::env::current_dir().into_diagnostic()?;
    if let Some(path) = RelaySettings::discover(&cwd) {
        info!("Using settings: {}", path.display());
        return RelaySettings::from_file(&path).into_diagnostic();
    }

    Ok(RelaySettings::new())
}
