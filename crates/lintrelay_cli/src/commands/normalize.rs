//! Normalize command implementation

use std::io::Read;
use std::path::Path;

use lintrelay_core::normalize;
use miette::{IntoDiagnostic, Result};

use crate::cli::Cli;
use crate::utils::load_settings;

pub fn run_normalize(cli: &Cli, input: Option<&Path>) -> Result<bool> {
    let settings = load_settings(cli.config.as_deref())?;

    let raw = match input {
        Some(path) => std::fs::read_to_string(path).into_diagnostic()?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .into_diagnostic()?;
            buf
        }
    };

    let base_dir = std::env::current_dir().into_diagnostic()?;
    let set = normalize(&raw, &settings.normalize_options(), &base_dir).into_diagnostic()?;

    println!("{}", serde_json::to_string_pretty(&set).into_diagnostic()?);
    Ok(false)
}
