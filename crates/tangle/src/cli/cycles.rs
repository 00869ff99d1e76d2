//! Cycle listing.

use colored::Colorize;
use tangle::Catalog;

/// Print every package cycle, one per line.
pub fn print_cycles(catalog: &Catalog) {
    let cycles = catalog.cycles();

    if cycles.is_empty() {
        println!("{}", "No circular dependencies detected.".green());
        return;
    }

    println!(
        "Found {} circular dependencies:",
        cycles.len().to_string().red().bold()
    );
    println!();

    for (i, cycle) in cycles.iter().enumerate() {
        println!("  {} {}:", "Cycle".yellow().bold(), i + 1);
        // Display closes the loop: a → b → c → a
        println!("    {}", cycle.to_string().dimmed());
    }
}
