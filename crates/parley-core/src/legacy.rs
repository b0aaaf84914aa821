//! Legacy fixed-width data importer.
//!
//! A standalone batch converter with no runtime interaction with the chat
//! loop: it reads a fixed-width file of account records and produces typed
//! rows with balances converted from integer cents to decimal dollars.

use serde::Serialize;
use std::io::BufRead;
use std::path::Path;

use crate::error::{ParleyError, Result};

/// Column byte offsets: `(start, end)` per field, in field order.
pub const COLUMNS: [(usize, usize); 3] = [(0, 5), (5, 20), (20, 26)];

/// One parsed legacy account record. `balance` is in dollars.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegacyRecord {
    pub id: String,
    pub name: String,
    pub balance: f64,
}

/// Parses a single fixed-width line into a record.
///
/// `line_number` is 1-based and only used for error reporting. Fields are
/// whitespace-trimmed; the balance column holds integer cents.
///
/// # Errors
///
/// Returns a `LegacyData` error if the line is shorter than the column
/// layout or the balance is not an integer.
pub fn parse_line(line: &str, line_number: usize) -> Result<LegacyRecord> {
    let field = |(start, end): (usize, usize)| {
        line.get(start..end).map(str::trim).ok_or_else(|| {
            ParleyError::legacy_data(
                line_number,
                format!("line is too short for columns {start}..{end}"),
            )
        })
    };

    let [id_col, name_col, balance_col] = COLUMNS;
    let id = field(id_col)?;
    let name = field(name_col)?;
    let balance_field = field(balance_col)?;

    let cents: i64 = balance_field.parse().map_err(|_| {
        ParleyError::legacy_data(
            line_number,
            format!("balance '{balance_field}' is not an integer cent amount"),
        )
    })?;

    Ok(LegacyRecord {
        id: id.to_string(),
        name: name.to_string(),
        balance: cents as f64 / 100.0,
    })
}

/// Parses a whole fixed-width file, skipping blank lines.
///
/// # Errors
///
/// Returns an IO error if the file cannot be read, or the first
/// `LegacyData` error encountered; this is a batch converter, so a
/// malformed line aborts the run rather than producing partial output.
pub fn parse_file(path: &Path) -> Result<Vec<LegacyRecord>> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);

    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(parse_line(&line, index + 1)?);
    }
    Ok(records)
}
