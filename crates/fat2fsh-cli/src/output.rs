//! Console reporting for conversion runs

use colored::*;
use fat2fsh_core::Fat2FshError;

use crate::commands::convert::{BatchReport, ConvertedCodeSystem};

/// Report one converted code system
pub fn print_success(converted: &ConvertedCodeSystem) {
    println!(
        "{} Successfully processed {}",
        "✓".green().bold(),
        converted.identifier
    );
}

/// Report one failed code system
pub fn print_failure(identifier: &str, err: &Fat2FshError) {
    eprintln!(
        "{} Failed to process {}: {}",
        "✗".red().bold(),
        identifier,
        err
    );
}

/// Print the end-of-run summary line
pub fn print_summary(report: &BatchReport) {
    let processed = format!(
        "Processed {}/{} code systems",
        report.succeeded.len(),
        report.total()
    );

    if report.failed.is_empty() {
        println!("\n{}", processed.green().bold());
    } else {
        println!("\n{}", processed.yellow().bold());
        for (identifier, _) in &report.failed {
            println!("  {} {}", "✗".red(), identifier);
        }
    }
}

/// Report one connectivity check
pub fn print_check(name: &str, outcome: &anyhow::Result<()>) {
    match outcome {
        Ok(()) => println!("{} {}", "✓".green().bold(), name),
        Err(e) => println!("{} {}: {:#}", "✗".red().bold(), name, e),
    }
}
