//! CLI argument parsing using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for linescan commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON Lines format (one JSON object per line)
    Jsonl,
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Automatically detect if terminal supports color
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

impl From<ColorChoice> for termcolor::ColorChoice {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => {
                if std::io::IsTerminal::is_terminal(&std::io::stdout()) {
                    termcolor::ColorChoice::Auto
                } else {
                    termcolor::ColorChoice::Never
                }
            }
            ColorChoice::Always => termcolor::ColorChoice::Always,
            ColorChoice::Never => termcolor::ColorChoice::Never,
        }
    }
}

/// linescan CLI main entry point
#[derive(Parser, Debug)]
#[command(name = "linescan")]
#[command(about = "Scan log lines with ordered, inheritable regex rules")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Output coloring
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available linescan subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan input lines and report per-rule hits
    Scan {
        /// Rule file declaring the scanner
        #[arg(short, long)]
        rules: PathBuf,

        /// Input files ("-" or none reads stdin)
        inputs: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "human")]
        format: OutputFormat,

        /// Print the named groups captured from every matched line
        #[arg(long)]
        records: bool,

        /// Exit with status 1 when no line matched any rule
        #[arg(long)]
        require_match: bool,
    },

    /// List the effective rules of a rule file in matching order
    List {
        /// Rule file declaring the scanner
        #[arg(short, long)]
        rules: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "human")]
        format: OutputFormat,
    },
}
