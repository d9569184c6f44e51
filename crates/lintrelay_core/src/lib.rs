//! # lintrelay_core
//!
//! Relays lint tool results to an editor's diagnostics display.
//!
//! This crate provides:
//! - The uniform `Diagnostic` model and per-file `DiagnosticSet`
//! - Normalization of raw tool output
//! - Reconciliation against previously published results
//! - Config and tool discovery
//! - The `LintSession` that ties them to editor events
//!
//! ## Example
//!
//! ```rust,ignore
//! use lintrelay_core::{EditorEvent, LintSession, ProcessRunner, RelaySettings};
//!
//! let mut published = Vec::new();
//! let mut session = LintSession::new(RelaySettings::new(), ProcessRunner, &mut published);
//!
//! session
//!     .handle_event(EditorEvent::BufferSaved { file_path: Some("src/app.js".into()) })
//!     .await?;
//! for p in &published {
//!     println!("{}: {} issues", p.file_path.display(), p.diagnostics.len());
//! }
//! ```

mod diagnostic;
pub mod discovery;
mod error;
pub mod normalize;
pub mod reconcile;
pub mod runner;
mod session;
mod settings;
mod sink;

pub use diagnostic::{Diagnostic, DiagnosticSet, Position, Range, Severity};
pub use discovery::Project;
pub use error::RelayError;
pub use normalize::{EmptyRecordPolicy, NormalizeOptions, SeverityMapping, normalize};
pub use reconcile::{LintState, Publication, Reconciliation, reconcile};
pub use runner::{ProcessRunner, ToolInvocation, ToolOutput, ToolRunner};
pub use session::{EditorEvent, FIX_COMMAND, LintOutcome, LintSession, SkipReason};
pub use settings::RelaySettings;
pub use sink::{DiagnosticsSink, PublishedDiagnostics};
