//! Legacy fixed-width data import subcommand.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use parley_core::legacy;

/// Parses the given fixed-width file and prints the records as a table.
pub fn run(path: &Path) -> Result<()> {
    let records = legacy::parse_file(path)?;
    tracing::info!(count = records.len(), file = %path.display(), "parsed legacy records");

    println!(
        "{}",
        format!("{:<6} {:<16} {:>10}", "ID", "Name", "Balance").bold()
    );
    for record in &records {
        println!(
            "{:<6} {:<16} {:>10.2}",
            record.id, record.name, record.balance
        );
    }

    Ok(())
}
