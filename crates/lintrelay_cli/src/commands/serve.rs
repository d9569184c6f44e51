//! Serve command implementation
//!
//! Reads one editor event per stdin line and writes one publication per
//! stdout line. Failed runs are reported as `{"error": ...}` lines and do not
//! stop the loop; end of input does.

use lintrelay_core::{EditorEvent, LintSession, ProcessRunner, RelaySettings};
use miette::{IntoDiagnostic, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::cli::Cli;
use crate::output::JsonLinesSink;
use crate::utils::{create_tokio_runtime, load_settings};

pub fn run_serve(cli: &Cli) -> Result<bool> {
    let settings = load_settings(cli.config.as_deref())?;
    create_tokio_runtime()?.block_on(serve(settings))
}

async fn serve(settings: RelaySettings) -> Result<bool> {
    let sink = JsonLinesSink::new(std::io::stdout());
    let mut session = LintSession::new(settings, ProcessRunner, sink);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    info!("Waiting for editor events on stdin");

    while let Some(line) = lines.next_line().await.into_diagnostic()? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let event: EditorEvent = match serde_json::from_str(line) {
            Ok(event) => event,
            Err(e) => {
                warn!("Ignoring malformed event {:?}: {}", line, e);
                continue;
            }
        };

        debug!("Event: {:?}", event);
        match session.handle_event(event).await {
            Ok(outcome) => debug!("Outcome: {:?}", outcome),
            Err(e) => {
                error!("Lint failed: {}", e);
                session.sink_mut().report_error(&e).into_diagnostic()?;
            }
        }
    }

    info!("Input closed, shutting down");
    Ok(false)
}
