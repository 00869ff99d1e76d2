//! Common display utilities for CLI commands.

use std::path::Path;

use colored::Colorize;
use tangle::{Catalog, DependencyCycle};

/// Print the catalog summary line to stderr, flagging a truncated search.
pub fn print_summary(catalog: &Catalog) {
    eprintln!("{catalog}");

    if catalog.analysis().is_truncated() {
        eprintln!(
            "{}: cycle search hit max-search-depth; some cycles may be missing",
            "warning".yellow().bold()
        );
    }
}

/// Print the segments of the longest cycle, one dependency per line.
pub fn print_longest_cycle(cycle: Option<&DependencyCycle>) {
    let Some(cycle) = cycle else {
        return;
    };

    println!();
    println!(
        "{} ({} segments):",
        "Longest cycle".white().bold(),
        cycle.segments().len()
    );
    for segment in cycle.segments() {
        println!("    {} {segment}", "•".dimmed());
    }
}

/// Report a file written by a command.
pub fn print_written(path: &Path) {
    eprintln!("{} {}", "Wrote".green(), path.display());
}
