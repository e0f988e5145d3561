//! Averaged table writers

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use tracing::info;

use super::TableError;
use crate::types::AveragedRow;

/// Format `value` with `digits` significant digits, `%g` style.
///
/// Fixed notation for decimal exponents in -5..digits, scientific
/// otherwise; trailing zeros are removed.
#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_significant(value: f64, digits: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }
    let digits = digits.max(1);
    let sci = format!("{:.*e}", digits - 1, value);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exponent: i32 = exp.parse().unwrap_or(0);

    if exponent < -4 || exponent >= digits as i32 {
        let mantissa = strip_trailing_zeros(mantissa);
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.abs())
    } else {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        strip_trailing_zeros(&format!("{value:.decimals$}")).to_string()
    }
}

fn strip_trailing_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

fn create(path: &Path) -> Result<File, TableError> {
    File::create(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_rows(
    path: &Path,
    rows: &[AveragedRow],
    delimiter: u8,
    format: impl Fn(f64) -> String,
) -> Result<(), TableError> {
    let mut wtr = WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(create(path)?);
    for row in rows {
        wtr.write_record(row.to_columns().iter().map(|v| format(*v)))?;
    }
    wtr.flush().map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Comma-separated, full precision.
pub fn write_averaged_dat(path: &Path, rows: &[AveragedRow]) -> Result<(), TableError> {
    write_rows(path, rows, b',', |v| v.to_string())
}

/// Tab-separated, 4 significant digits.
pub fn write_averaged_txt(path: &Path, rows: &[AveragedRow]) -> Result<(), TableError> {
    write_rows(path, rows, b'\t', |v| format_significant(v, 4))
}

/// Write `<stem>.dat` and `<stem>.txt` into `directory`, creating it if needed.
pub fn write_averaged_tables(
    directory: &Path,
    stem: &str,
    rows: &[AveragedRow],
) -> Result<(PathBuf, PathBuf), TableError> {
    std::fs::create_dir_all(directory).map_err(|source| TableError::Io {
        path: directory.to_path_buf(),
        source,
    })?;
    let dat = directory.join(format!("{stem}.dat"));
    let txt = directory.join(format!("{stem}.txt"));
    write_averaged_dat(&dat, rows)?;
    write_averaged_txt(&txt, rows)?;
    info!(dat = %dat.display(), txt = %txt.display(), rows = rows.len(), "Averaged tables written");
    Ok((dat, txt))
}
