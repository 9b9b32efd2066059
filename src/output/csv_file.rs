//! CSV export of result sets

use crate::output::traits::OutputResult;
use crate::state::ResultSet;
use crate::strategies::Mode;
use chrono::NaiveDateTime;
use csv::Writer;
use std::fs;
use std::path::{Path, PathBuf};

/// Timestamp format used in result file names
pub const DATETIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// File name for a result set: `<mode>_<timestamp>.csv`
pub fn result_file_name(mode: Mode, at: NaiveDateTime) -> String {
    format!("{}_{}.csv", mode, at.format(DATETIME_FORMAT))
}

/// Writes `results` as CSV into `dir`, creating the directory if needed
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(OutputError)` - Failed to create or write the file
pub fn write_csv(
    dir: &Path,
    mode: Mode,
    results: &ResultSet,
    at: NaiveDateTime,
) -> OutputResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(result_file_name(mode, at));

    let mut writer = Writer::from_path(&path)?;
    for row in results.rows() {
        writer.write_record(row)?;
    }
    writer.flush()?;

    Ok(path)
}
