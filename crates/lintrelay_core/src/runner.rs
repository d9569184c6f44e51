//! Lint tool invocation.

use std::ffi::OsString;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tracing::debug;

use crate::RelayError;

/// Exit codes the tool uses for a completed run: clean, or problems found.
const SUCCESS_CODES: &[i32] = &[0, 1];

/// A fully built tool command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub working_dir: PathBuf,
}

impl ToolInvocation {
    /// Builds `[--fix] --format json --config <config> <targets...>`.
    pub fn new(
        program: impl Into<PathBuf>,
        config_path: &Path,
        targets: &[PathBuf],
        working_dir: impl Into<PathBuf>,
        autofix: bool,
    ) -> Self {
        let mut args: Vec<OsString> = Vec::with_capacity(targets.len() + 5);
        if autofix {
            args.push("--fix".into());
        }
        args.push("--format".into());
        args.push("json".into());
        args.push("--config".into());
        args.push(config_path.into());
        args.extend(targets.iter().map(OsString::from));

        Self {
            program: program.into(),
            args,
            working_dir: working_dir.into(),
        }
    }

    pub fn is_autofix(&self) -> bool {
        self.args.first().is_some_and(|a| a == "--fix")
    }
}

/// Captured result of a tool run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code, `None` if the process was killed by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// Output of a run that exited with `status`.
    pub fn new(status: i32, stdout: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_some_and(|code| SUCCESS_CODES.contains(&code))
    }

    /// Returns stdout if the run completed normally.
    pub fn into_stdout(self) -> Result<String, RelayError> {
        if self.is_success() {
            return Ok(self.stdout);
        }

        let status = match self.status {
            Some(code) => format!("exit code {}", code),
            None => "a signal".to_string(),
        };
        let stderr = self.stderr.trim();
        Err(RelayError::process(if stderr.is_empty() {
            format!("Lint tool terminated by {}", status)
        } else {
            format!("Lint tool terminated by {}: {}", status, stderr)
        }))
    }
}

/// Runs the lint tool.
pub trait ToolRunner {
    fn run(
        &self,
        invocation: &ToolInvocation,
    ) -> impl Future<Output = Result<ToolOutput, RelayError>> + Send;
}

impl<T: ToolRunner + ?Sized> ToolRunner for &T {
    fn run(
        &self,
        invocation: &ToolInvocation,
    ) -> impl Future<Output = Result<ToolOutput, RelayError>> + Send {
        (**self).run(invocation)
    }
}

/// Runs the tool as a child process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    async fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutput, RelayError> {
        debug!(
            "Running {} {:?} in {}",
            invocation.program.display(),
            invocation.args,
            invocation.working_dir.display()
        );

        let output = tokio::process::Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.working_dir)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                RelayError::process(format!(
                    "Failed to run {}: {}",
                    invocation.program.display(),
                    e
                ))
            })?;

        debug!("Lint tool exited with {}", output.status);

        Ok(ToolOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn os(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_invocation_args() {
        let inv = ToolInvocation::new(
            "/p/node_modules/.bin/eslint",
            Path::new("/p/.eslintrc"),
            &[PathBuf::from("/p/src/a.js")],
            "/p",
            false,
        );

        assert_eq!(
            inv.args,
            os(&["--format", "json", "--config", "/p/.eslintrc", "/p/src/a.js"])
        );
        assert_eq!(inv.working_dir, PathBuf::from("/p"));
        assert!(!inv.is_autofix());
    }

    #[test]
    fn test_invocation_autofix_comes_first() {
        let inv = ToolInvocation::new(
            "eslint",
            Path::new(".eslintrc"),
            &[PathBuf::from("a.js"), PathBuf::from("b.js")],
            ".",
            true,
        );

        assert_eq!(
            inv.args,
            os(&["--fix", "--format", "json", "--config", ".eslintrc", "a.js", "b.js"])
        );
        assert!(inv.is_autofix());
    }

    #[rstest]
    #[case::clean(Some(0), true)]
    #[case::problems_found(Some(1), true)]
    #[case::fatal(Some(2), false)]
    #[case::signal(None, false)]
    fn test_success_codes(#[case] status: Option<i32>, #[case] expected: bool) {
        let output = ToolOutput {
            status,
            ..Default::default()
        };
        assert_eq!(output.is_success(), expected);
    }

    #[test]
    fn test_into_stdout_reports_stderr() {
        let output = ToolOutput {
            status: Some(2),
            stdout: String::new(),
            stderr: "Oops! Something went wrong!\n".to_string(),
        };

        let err = output.into_stdout().unwrap_err();
        assert!(matches!(err, RelayError::Process(_)));
        assert_eq!(
            err.to_string(),
            "Process error: Lint tool terminated by exit code 2: Oops! Something went wrong!"
        );
    }

    #[tokio::test]
    async fn test_process_runner_missing_binary() {
        let inv = ToolInvocation::new(
            "lintrelay-definitely-missing-binary",
            Path::new(".eslintrc"),
            &[],
            ".",
            false,
        );

        let err = ProcessRunner.run(&inv).await.unwrap_err();
        assert!(matches!(err, RelayError::Process(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_process_runner_captures_output() {
        let inv = ToolInvocation {
            program: PathBuf::from("sh"),
            args: os(&["-c", "echo '[]'; echo warn >&2; exit 1"]),
            working_dir: PathBuf::from("."),
        };

        let output = ProcessRunner.run(&inv).await.unwrap();
        assert_eq!(output.status, Some(1));
        assert_eq!(output.stdout.trim(), "[]");
        assert_eq!(output.stderr.trim(), "warn");
        assert_eq!(output.into_stdout().unwrap().trim(), "[]");
    }
}
