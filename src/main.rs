//! linescan CLI entry point

use clap::Parser;
use linescan::cli::scan::ScanOptions;
use linescan::cli::{Command, args::Cli};
use std::process;

fn main() {
    let cli = Cli::parse();
    linescan::cli::common::init_logging(cli.verbose);

    let exit_code = match cli.command {
        Command::Scan {
            rules,
            inputs,
            format,
            records,
            require_match,
        } => linescan::cli::scan::run_scan(&ScanOptions {
            rules,
            inputs,
            format,
            records,
            require_match,
            color: cli.color,
        }),
        Command::List { rules, format } => {
            linescan::cli::list::run_list(&rules, format, cli.color)
        }
    };

    process::exit(exit_code);
}
