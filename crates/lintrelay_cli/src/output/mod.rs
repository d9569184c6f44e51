//! Output formatting module

mod json;
mod text;

pub use json::JsonLinesSink;

use lintrelay_core::PublishedDiagnostics;
use miette::Result;

use crate::cli::OutputFormat;

/// Prints collected publications; returns true if any error was reported.
pub fn output_results(published: &[PublishedDiagnostics], format: OutputFormat) -> Result<bool> {
    let has_errors = published.iter().any(PublishedDiagnostics::has_errors);

    match format {
        OutputFormat::Json => json::output_json(published)?,
        OutputFormat::Text => text::output_text(published),
    }

    Ok(has_errors)
}
