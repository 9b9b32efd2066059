//! State module for extracted data
//!
//! This module holds the data a pipeline run produces and the reference data
//! it checks against.
//!
//! # Components
//!
//! - `ResultSet`: header-first rows produced by a strategy
//! - `StatusTally`: per-status PEP counts, seeded with the canonical statuses
//! - `StatusCodeTable`: index status letters and the status names they permit

mod result_set;
mod status;
mod tally;

// Re-export main types
pub use result_set::{ResultSet, Row};
pub use status::{status_code, StatusCodeTable, STATUS_CODES};
pub use tally::{StatusTally, CANONICAL_STATUSES};
