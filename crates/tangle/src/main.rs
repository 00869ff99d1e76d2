//! Tangle CLI - Package cycle analysis from the command line.
//!
//! Reads a pragma catalog, reports every circular dependency between its
//! packages and writes an HTML visualization next to the catalog.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod cli;

/// Tangle: Package dependency cycle analysis for pragma catalogs.
#[derive(Parser)]
#[command(name = "tangle")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Catalog base path; the pragma file is `<CATALOG>.db` by default
    catalog: PathBuf,

    /// Also write the compact details report (`<CATALOG>.data`)
    #[arg(short, long)]
    details: bool,

    /// YAML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let options = cli::analyze::Options {
        catalog: cli.catalog,
        details: cli.details,
        config: cli.config,
    };

    match cli::analyze::run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            // Show cause chain for nested errors
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("  {}: {cause}", "caused by".dimmed());
                source = std::error::Error::source(cause);
            }
            ExitCode::FAILURE
        }
    }
}
