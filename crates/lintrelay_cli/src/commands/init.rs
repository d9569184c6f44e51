//! Init command implementation

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use lintrelay_core::RelaySettings;
use miette::{IntoDiagnostic, Result};
use tracing::info;

const DEFAULT_SETTINGS: &str = r#"{
  // Source id attached to every publication
  "sourceId": "eslint-js",
  // Extensions linted on buffer events
  "extensions": [".js", ".jsx"],
  "tool": "eslint",
  "colorHint": "yellow",
  // "graded" or "warning-only"
  "severity": "graded",
  // "retain" or "omit"
  "emptyRecords": "retain",
  "ruleInMessage": true
}
"#;

pub fn run_init(force: bool) -> Result<()> {
    let path = Path::new(RelaySettings::CONFIG_FILES[0]);

    let mut file = match create_exclusive(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && force => {
            // Unlink rather than truncate so a symlink is replaced, not followed.
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e).into_diagnostic(),
            }
            create_exclusive(path).into_diagnostic()?
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(miette::miette!(
                "Settings file already exists. Use --force to overwrite."
            ));
        }
        Err(e) => return Err(e).into_diagnostic(),
    };

    file.write_all(DEFAULT_SETTINGS.as_bytes())
        .into_diagnostic()?;
    info!("Created {}", path.display());
    Ok(())
}

/// Creates `path`, failing if anything (including a dangling symlink) is
/// already there.
fn create_exclusive(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.custom_flags(libc::O_NOFOLLOW);
    }

    options.open(path)
}
