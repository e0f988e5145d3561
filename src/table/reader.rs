//! Results table reader
//!
//! One run per line, comma-separated, no header. Rows of all zeros are
//! placeholders left by the acquisition scripts and are dropped.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, info};

use super::TableError;
use crate::types::{ResultsRow, RowError, BASE_COLUMNS};

/// Read the results table at `path`.
pub fn read_results_table(path: &Path) -> Result<Vec<ResultsRow>, TableError> {
    let file = File::open(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = parse_results_table(file)?;
    info!(path = %path.display(), runs = rows.len(), "Loaded results table");
    Ok(rows)
}

/// Parse a results table from any reader.
pub fn parse_results_table<R: Read>(reader: R) -> Result<Vec<ResultsRow>, TableError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut sentinels = 0usize;

    for result in rdr.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());

        // Trailing separators leave empty fields behind
        let fields: Vec<&str> = {
            let mut f: Vec<&str> = record.iter().collect();
            while f.last().is_some_and(|s| s.is_empty()) {
                f.pop();
            }
            f
        };
        if fields.is_empty() {
            continue;
        }

        let values = fields
            .iter()
            .enumerate()
            .map(|(i, s)| {
                s.parse::<f64>().map_err(|_| TableError::InvalidNumber {
                    line,
                    column: i + 1,
                    value: (*s).to_string(),
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;

        if values.iter().all(|v| *v == 0.0) {
            sentinels += 1;
            continue;
        }

        let row = ResultsRow::from_columns(&values).map_err(|e| match e {
            RowError::TooFewColumns { found } => TableError::TooFewColumns {
                line,
                found,
                needed: BASE_COLUMNS,
            },
            RowError::InvalidIdentifier { column, .. } => TableError::InvalidNumber {
                line,
                column,
                value: fields[column - 1].to_string(),
            },
        })?;
        rows.push(row);
    }

    debug!(runs = rows.len(), sentinels, "Parsed results table");
    Ok(rows)
}
