//! Results table I/O
//!
//! - `reader` - positional, header-less results table (`full_resistance_data.dat`)
//! - `writer` - averaged tables (`.dat` full precision, `.txt` 4 significant digits)

pub mod reader;
pub mod writer;

pub use reader::{parse_results_table, read_results_table};
pub use writer::{format_significant, write_averaged_dat, write_averaged_tables, write_averaged_txt};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("Cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Line {line}: {found} columns, at least {needed} required")]
    TooFewColumns {
        line: u64,
        found: usize,
        needed: usize,
    },

    #[error("Line {line}, column {column}: '{value}' is not a number")]
    InvalidNumber {
        line: u64,
        column: usize,
        value: String,
    },
}
