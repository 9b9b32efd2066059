//! Output sink trait
//!
//! This module defines the interface the pipeline driver hands finished
//! result sets to.

use crate::state::ResultSet;
use crate::strategies::Mode;
use crate::OutputError;

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Receives the results of one pipeline run
pub trait OutputSink {
    /// Renders or stores `results` produced by `mode`
    ///
    /// # Arguments
    ///
    /// * `mode` - The mode that produced the results
    /// * `results` - Header-first rows to emit
    fn emit(&self, mode: Mode, results: &ResultSet) -> OutputResult<()>;
}
