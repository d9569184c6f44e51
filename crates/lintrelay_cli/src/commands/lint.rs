//! Lint and fix command implementation

use std::path::Path;

use lintrelay_core::{LintOutcome, LintSession, ProcessRunner};
use miette::{IntoDiagnostic, Result};
use tracing::warn;

use crate::cli::{Cli, OutputFormat};
use crate::output::output_results;
use crate::utils::{create_tokio_runtime, load_settings};

pub fn run_lint(cli: &Cli, file: &Path, format: OutputFormat, fix: bool) -> Result<bool> {
    let settings = load_settings(cli.config.as_deref())?;
    let runtime = create_tokio_runtime()?;

    let mut published = Vec::new();
    let mut session = LintSession::new(settings, ProcessRunner, &mut published);

    let result = runtime.block_on(async {
        if fix {
            session.lint_project(file, true).await
        } else {
            session.lint_file(file).await
        }
    });

    match result {
        Ok(LintOutcome::Skipped(reason)) => {
            warn!("Skipped {}: {:?}", file.display(), reason);
            return Ok(false);
        }
        Ok(LintOutcome::Published { .. }) => {}
        Err(e) if e.is_config_not_found() => {
            warn!("{}; not linting {}", e, file.display());
            return Ok(false);
        }
        Err(e) => return Err(e).into_diagnostic(),
    }

    output_results(&published, format)
}
