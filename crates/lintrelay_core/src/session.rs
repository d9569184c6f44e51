//! Editor event handling.
//!
//! A [`LintSession`] owns the reconciliation state between runs. It handles
//! the two ways a lint gets triggered:
//!
//! - buffer events (`bufferSaved`, `bufferEnter`) lint a single file and
//!   publish that file's list;
//! - the fix command re-runs the tool with autofix over the last target and
//!   reconciles the whole result, clearing files that dropped out of it.
//!
//! State is only replaced after a run succeeded; a failing tool or malformed
//! output leaves both the state and the editor untouched. When the sink fails
//! partway through, the publications it already took are kept in the state.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::RelayError;
use crate::diagnostic::DiagnosticSet;
use crate::discovery::Project;
use crate::normalize::{normalize, normalize_path};
use crate::reconcile::{LintState, reconcile};
use crate::runner::{ToolInvocation, ToolRunner};
use crate::settings::RelaySettings;
use crate::sink::DiagnosticsSink;

/// Name of the fix-action command.
pub const FIX_COMMAND: &str = "eslint.fix";

/// An event sent by the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum EditorEvent {
    BufferSaved {
        #[serde(default, rename = "filePath")]
        file_path: Option<PathBuf>,
    },
    BufferEnter {
        #[serde(default, rename = "filePath")]
        file_path: Option<PathBuf>,
    },
    Command {
        name: String,
    },
}

/// What a handled event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintOutcome {
    /// The tool ran and diagnostics were published.
    Published { updated: usize, cleared: usize },
    /// Nothing was run.
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingFilePath,
    UnsupportedFileType,
    ConfigNotFound,
    NoPreviousTarget,
    UnknownCommand(String),
}

/// Relays lint results for one editor.
pub struct LintSession<R, S> {
    settings: RelaySettings,
    runner: R,
    sink: S,
    state: LintState,
    last_target: Option<PathBuf>,
}

impl<R: ToolRunner, S: DiagnosticsSink> LintSession<R, S> {
    /// Creates a session with empty state.
    pub fn new(settings: RelaySettings, runner: R, sink: S) -> Self {
        Self {
            settings,
            runner,
            sink,
            state: LintState::new(),
            last_target: None,
        }
    }

    /// Diagnostics last published per file.
    pub fn state(&self) -> &LintState {
        &self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// The file the fix command will run on.
    pub fn last_target(&self) -> Option<&Path> {
        self.last_target.as_deref()
    }

    /// Handles one editor event.
    ///
    /// A missing lint config is not an error here: the event is skipped.
    pub async fn handle_event(&mut self, event: EditorEvent) -> Result<LintOutcome, RelayError> {
        let result = match event {
            EditorEvent::BufferSaved { file_path } | EditorEvent::BufferEnter { file_path } => {
                match file_path {
                    Some(path) => self.lint_file(&path).await,
                    None => Ok(LintOutcome::Skipped(SkipReason::MissingFilePath)),
                }
            }
            EditorEvent::Command { name } if name == FIX_COMMAND => self.fix().await,
            EditorEvent::Command { name } => {
                warn!("Unknown command: {}", name);
                Ok(LintOutcome::Skipped(SkipReason::UnknownCommand(name)))
            }
        };

        match result {
            Err(RelayError::ConfigNotFound(dir)) => {
                warn!(
                    "No lint config found above {}; not running {}",
                    dir.display(),
                    self.settings.tool
                );
                Ok(LintOutcome::Skipped(SkipReason::ConfigNotFound))
            }
            other => other,
        }
    }

    /// Lints a single file and publishes its diagnostics.
    ///
    /// Files whose extension is not accepted are skipped.
    pub async fn lint_file(&mut self, path: &Path) -> Result<LintOutcome, RelayError> {
        if !self.settings.accepts(path) {
            debug!("Skipping unsupported file: {}", path.display());
            return Ok(LintOutcome::Skipped(SkipReason::UnsupportedFileType));
        }

        let target = absolute(path)?;
        self.last_target = Some(target.clone());

        let project = self.resolve(&target)?;
        let set = self.run(&project, &target, false).await?;
        let diagnostics = set.get(&target).unwrap_or_default();

        if !self.state.needs_publish(&target, diagnostics) {
            debug!("{} is still clean", target.display());
            return Ok(LintOutcome::Published {
                updated: 0,
                cleared: 0,
            });
        }

        self.sink.set_errors(
            &self.settings.source_id,
            &target,
            diagnostics,
            self.settings.color_hint.as_deref(),
        )?;
        self.state.record(target, diagnostics);

        Ok(LintOutcome::Published {
            updated: 1,
            cleared: 0,
        })
    }

    /// Lints `path`, publishes every file in the result and clears stale
    /// files.
    pub async fn lint_project(
        &mut self,
        path: &Path,
        autofix: bool,
    ) -> Result<LintOutcome, RelayError> {
        let target = absolute(path)?;
        self.last_target = Some(target.clone());

        let project = self.resolve(&target)?;
        let set = self.run(&project, &target, autofix).await?;
        let reconciliation = reconcile(&self.state, &set);

        for (delivered, publication) in reconciliation.publications.iter().enumerate() {
            let sent = self.sink.set_errors(
                &self.settings.source_id,
                &publication.path,
                &publication.diagnostics,
                self.settings.color_hint.as_deref(),
            );
            if let Err(e) = sent {
                // The editor already shows what was delivered; keep state in step with it.
                for p in &reconciliation.publications[..delivered] {
                    self.state.record(p.path.clone(), &p.diagnostics);
                }
                return Err(e);
            }
        }

        let outcome = LintOutcome::Published {
            updated: reconciliation.updated(),
            cleared: reconciliation.cleared(),
        };
        self.state = reconciliation.state;
        Ok(outcome)
    }

    /// Re-runs the last lint with autofix enabled.
    pub async fn fix(&mut self) -> Result<LintOutcome, RelayError> {
        let Some(target) = self.last_target.clone() else {
            warn!("Nothing to fix: no file has been linted yet");
            return Ok(LintOutcome::Skipped(SkipReason::NoPreviousTarget));
        };

        info!("Fixing {}", target.display());
        self.lint_project(&target, true).await
    }

    fn resolve(&self, target: &Path) -> Result<Project, RelayError> {
        Project::resolve(target, &self.settings.config_files, &self.settings.tool)
    }

    async fn run(
        &self,
        project: &Project,
        target: &Path,
        autofix: bool,
    ) -> Result<DiagnosticSet, RelayError> {
        let invocation = ToolInvocation::new(
            &project.tool,
            &project.config_path,
            &[target.to_path_buf()],
            &project.root,
            autofix,
        );

        let stdout = self.runner.run(&invocation).await?.into_stdout()?;
        let set = normalize(&stdout, &self.settings.normalize_options(), &project.root)?;

        debug!(
            "{} file(s), {} diagnostic(s)",
            set.len(),
            set.diagnostic_count()
        );
        Ok(set)
    }
}

fn absolute(path: &Path) -> Result<PathBuf, RelayError> {
    let path = std::path::absolute(path)?;
    Ok(normalize_path(&path, Path::new("")))
}
