//! Output module for emitting result sets
//!
//! This module handles:
//! - Printing results to the console, plain or as a table
//! - Exporting results to timestamped CSV files

mod console;
mod csv_file;
mod traits;

pub use console::{format_table, write_plain, write_pretty};
pub use csv_file::{result_file_name, write_csv, DATETIME_FORMAT};
pub use traits::{OutputResult, OutputSink};

use crate::config::OutputConfig;
use crate::state::ResultSet;
use crate::strategies::Mode;
use std::path::PathBuf;

/// How results are emitted when a format is requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned table on stdout
    Pretty,

    /// CSV file in the results directory
    File,
}

/// Output sink used by the command line: plain stdout, a table, or a CSV file
#[derive(Debug, Clone)]
pub struct Output {
    format: Option<OutputFormat>,
    results_dir: PathBuf,
}

impl Output {
    pub fn new(format: Option<OutputFormat>, config: &OutputConfig) -> Self {
        Self {
            format,
            results_dir: PathBuf::from(&config.results_dir),
        }
    }
}

impl OutputSink for Output {
    fn emit(&self, mode: Mode, results: &ResultSet) -> OutputResult<()> {
        let stdout = std::io::stdout();
        match self.format {
            None => write_plain(&mut stdout.lock(), results),
            Some(OutputFormat::Pretty) => write_pretty(&mut stdout.lock(), results),
            Some(OutputFormat::File) => {
                let now = chrono::Local::now().naive_local();
                let path = write_csv(&self.results_dir, mode, results, now)?;
                tracing::info!(path = %path.display(), "Results saved");
                Ok(())
            }
        }
    }
}
