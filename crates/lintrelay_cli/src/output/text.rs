//! Text output formatter

use lintrelay_core::PublishedDiagnostics;

pub fn output_text(published: &[PublishedDiagnostics]) {
    for publication in published {
        if publication.diagnostics.is_empty() {
            continue;
        }

        println!("\n{}:", publication.file_path.display());
        for diag in &publication.diagnostics {
            // Editors count from zero, people from one.
            println!(
                "  {}:{} {}: {}",
                diag.range.start.line + 1,
                diag.range.start.character + 1,
                diag.severity.as_str(),
                diag.message
            );
        }
    }

    let total_files = published.len();
    let total_issues: usize = published.iter().map(|p| p.diagnostics.len()).sum();
    let cleared = published.iter().filter(|p| p.is_clear()).count();

    println!();
    println!(
        "Checked {} files ({} clean), found {} issues",
        total_files, cleared, total_issues
    );
}
