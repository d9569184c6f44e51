//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// LintRelay - Relays ESLint diagnostics to your editor
#[derive(Parser)]
#[command(name = "lintrelay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Lint a single file and print its diagnostics
    Lint {
        /// File to lint
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Run the lint tool with autofix and print the remaining diagnostics
    Fix {
        /// File to fix
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Normalize raw lint tool JSON output
    Normalize {
        /// File holding the tool output (reads stdin when omitted)
        input: Option<PathBuf>,
    },

    /// Read editor events from stdin and stream diagnostics to stdout
    Serve,

    /// Initialize settings
    Init {
        /// Force overwrite existing settings
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
