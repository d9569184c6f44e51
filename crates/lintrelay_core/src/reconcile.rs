//! Reconciliation of new lint results against previously published ones.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::diagnostic::{Diagnostic, DiagnosticSet};

/// Diagnostics last published per file.
///
/// `None` marks a file that was published clean (or explicitly cleared), so
/// it is not cleared a second time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintState {
    files: BTreeMap<PathBuf, Option<Vec<Diagnostic>>>,
}

impl LintState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last published diagnostics for `path`, if it had any.
    pub fn diagnostics(&self, path: &Path) -> Option<&[Diagnostic]> {
        self.files.get(path)?.as_deref()
    }

    /// Returns true if `path` was last published with at least one diagnostic.
    pub fn is_dirty(&self, path: &Path) -> bool {
        self.diagnostics(path).is_some_and(|d| !d.is_empty())
    }

    /// Returns true if `path` is known and was last published clean.
    pub fn is_clean(&self, path: &Path) -> bool {
        matches!(self.files.get(path), Some(None))
    }

    /// Returns false when publishing `diagnostics` for `path` would repeat an
    /// empty list the editor already shows.
    pub fn needs_publish(&self, path: &Path, diagnostics: &[Diagnostic]) -> bool {
        !(diagnostics.is_empty() && self.is_clean(path))
    }

    /// Files that currently have diagnostics on display.
    pub fn dirty_files(&self) -> impl Iterator<Item = &Path> {
        self.files
            .iter()
            .filter(|(_, d)| d.as_ref().is_some_and(|d| !d.is_empty()))
            .map(|(p, _)| p.as_path())
    }

    /// Number of tracked files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Records the diagnostics just published for a single file.
    pub fn record(&mut self, path: impl Into<PathBuf>, diagnostics: &[Diagnostic]) {
        let entry = (!diagnostics.is_empty()).then(|| diagnostics.to_vec());
        self.files.insert(path.into(), entry);
    }
}

/// One call to the host's publish API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    pub path: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
    /// True when this publication only exists to clear a stale file.
    pub clear: bool,
}

impl Publication {
    /// Publishes the full current list for a file.
    pub fn update(path: impl Into<PathBuf>, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            path: path.into(),
            diagnostics,
            clear: false,
        }
    }

    /// Publishes an empty list for a file that dropped out of the results.
    pub fn clear(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            diagnostics: Vec::new(),
            clear: true,
        }
    }
}

/// Result of reconciling one lint run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Publications in send order: updates first, then clears.
    pub publications: Vec<Publication>,
    /// State to keep for the next run.
    pub state: LintState,
}

impl Reconciliation {
    pub fn updated(&self) -> usize {
        self.publications.iter().filter(|p| !p.clear).count()
    }

    pub fn cleared(&self) -> usize {
        self.publications.iter().filter(|p| p.clear).count()
    }
}

/// Reconciles `next` against `previous`.
///
/// Every file in `next` gets its full list published, unless the list is
/// empty and the file is already shown clean. Files that had
/// diagnostics in `previous` but are missing from `next` get one empty
/// publication and are marked clean. `previous` is not modified; the caller
/// swaps in [`Reconciliation::state`] once the publications are delivered.
pub fn reconcile(previous: &LintState, next: &DiagnosticSet) -> Reconciliation {
    let mut publications = Vec::with_capacity(next.len());
    let mut state = LintState::new();

    for (path, diagnostics) in next {
        if previous.needs_publish(path, diagnostics) {
            publications.push(Publication::update(path.clone(), diagnostics.clone()));
        }
        state.record(path.clone(), diagnostics);
    }

    for (path, entry) in &previous.files {
        if next.contains(path) {
            continue;
        }
        if entry.as_ref().is_some_and(|d| !d.is_empty()) {
            debug!("Clearing stale diagnostics for {}", path.display());
            publications.push(Publication::clear(path.clone()));
        }
        state.files.insert(path.clone(), None);
    }

    Reconciliation {
        publications,
        state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::{Position, Range, Severity};
    use pretty_assertions::assert_eq;

    fn error(message: &str) -> Diagnostic {
        Diagnostic::new(message, Range::point(Position::new(0, 0))).with_severity(Severity::Error)
    }

    fn state_with(files: &[(&str, &[Diagnostic])]) -> LintState {
        let mut state = LintState::new();
        for (path, diagnostics) in files {
            state.record(*path, diagnostics);
        }
        state
    }

    fn publications_for<'a>(r: &'a Reconciliation, path: &str) -> Vec<&'a Publication> {
        r.publications
            .iter()
            .filter(|p| p.path == Path::new(path))
            .collect()
    }

    #[test]
    fn test_stale_file_is_cleared() {
        let previous = state_with(&[("a.js", &[error("oneError")])]);
        let result = reconcile(&previous, &DiagnosticSet::new());

        assert_eq!(result.publications, vec![Publication::clear("a.js")]);
        assert!(result.state.is_clean(Path::new("a.js")));
        assert_eq!(result.cleared(), 1);
        assert_eq!(result.updated(), 0);
    }

    #[test]
    fn test_cleared_file_is_not_cleared_again() {
        let previous = state_with(&[("a.js", &[error("oneError")])]);
        let first = reconcile(&previous, &DiagnosticSet::new());
        let second = reconcile(&first.state, &DiagnosticSet::new());

        assert_eq!(first.cleared(), 1);
        assert!(second.publications.is_empty());
        assert!(second.state.is_clean(Path::new("a.js")));
    }

    #[test]
    fn test_file_reappearing_with_errors_can_be_cleared_again() {
        let previous = state_with(&[("a.js", &[error("oneError")])]);
        let cleared = reconcile(&previous, &DiagnosticSet::new());

        let mut again = DiagnosticSet::new();
        again.push("a.js", error("back"));
        let dirty = reconcile(&cleared.state, &again);
        assert!(dirty.state.is_dirty(Path::new("a.js")));

        let cleared_again = reconcile(&dirty.state, &DiagnosticSet::new());
        assert_eq!(cleared_again.publications, vec![Publication::clear("a.js")]);
    }

    #[test]
    fn test_new_entries_are_published_in_full() {
        let mut next = DiagnosticSet::new();
        next.push("a.js", error("one"));
        next.push("a.js", error("two"));
        next.push("b.js", error("three"));

        let result = reconcile(&LintState::new(), &next);

        assert_eq!(
            result.publications,
            vec![
                Publication::update("a.js", vec![error("one"), error("two")]),
                Publication::update("b.js", vec![error("three")]),
            ]
        );
        assert_eq!(
            result.state.diagnostics(Path::new("a.js")).map(<[_]>::len),
            Some(2)
        );
    }

    #[test]
    fn test_retained_empty_entry_publishes_exactly_once() {
        let previous = state_with(&[("a.js", &[error("oneError")])]);
        let mut next = DiagnosticSet::new();
        next.touch("a.js");

        let result = reconcile(&previous, &next);

        let for_a = publications_for(&result, "a.js");
        assert_eq!(for_a.len(), 1);
        assert!(for_a[0].diagnostics.is_empty());
        assert!(!for_a[0].clear);
        assert!(result.state.is_clean(Path::new("a.js")));
    }

    #[test]
    fn test_repeated_clean_record_is_not_republished() {
        let previous = state_with(&[("a.js", &[error("oneError")])]);
        let mut next = DiagnosticSet::new();
        next.touch("a.js");

        let mut state = previous;
        let mut empties = 0;
        for _ in 0..3 {
            let result = reconcile(&state, &next);
            empties += publications_for(&result, "a.js")
                .iter()
                .filter(|p| p.diagnostics.is_empty())
                .count();
            state = result.state;
        }

        assert_eq!(empties, 1);
        assert!(state.is_clean(Path::new("a.js")));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_unseen_clean_file_is_published() {
        let mut next = DiagnosticSet::new();
        next.touch("new.js");

        let result = reconcile(&LintState::new(), &next);
        assert_eq!(result.publications, vec![Publication::update("new.js", vec![])]);
    }

    #[test]
    fn test_previously_clean_files_are_not_cleared() {
        let previous = state_with(&[("clean.js", &[]), ("dirty.js", &[error("x")])]);
        let result = reconcile(&previous, &DiagnosticSet::new());

        assert_eq!(result.publications, vec![Publication::clear("dirty.js")]);
        assert_eq!(
            result.state.dirty_files().count(),
            0,
            "nothing should remain on display"
        );
    }

    #[test]
    fn test_previous_state_is_untouched() {
        let previous = state_with(&[("a.js", &[error("oneError")])]);
        let snapshot = previous.clone();
        let _ = reconcile(&previous, &DiagnosticSet::new());
        assert_eq!(previous, snapshot);
    }

    #[test]
    fn test_record_tracks_single_file() {
        let mut state = LintState::new();
        state.record("a.js", &[error("x")]);
        assert!(state.is_dirty(Path::new("a.js")));
        assert_eq!(state.dirty_files().collect::<Vec<_>>(), vec![Path::new("a.js")]);

        state.record("a.js", &[]);
        assert!(state.is_clean(Path::new("a.js")));
        assert!(!state.is_dirty(Path::new("a.js")));
        assert_eq!(state.len(), 1);
        assert!(!state.is_clean(Path::new("unknown.js")));
    }
}
