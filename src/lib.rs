//! Pydocs-Harvest: tabular extraction from the Python documentation sites
//!
//! This crate walks a handful of known page shapes (the "what's new" index,
//! the version sidebar, the downloads table and the PEP numerical index),
//! turns them into header-first result tables, and cross-checks PEP
//! statuses between the index and each PEP's own page.

pub mod config;
pub mod driver;
pub mod output;
pub mod reconcile;
pub mod scrape;
pub mod session;
pub mod state;
pub mod strategies;

use thiserror::Error;

/// Main error type for harvesting operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Tag not found: {description}")]
    TagNotFound { description: String },

    #[error("Marker {marker:?} not found in {location}")]
    MarkerNotFound {
        marker: &'static str,
        location: String,
    },

    #[error("<{tag}> element has no {attribute:?} attribute")]
    MissingAttribute {
        tag: String,
        attribute: &'static str,
    },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Cache error: {0}")]
    Cache(#[from] rusqlite::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Transport-level failures of a single request
///
/// These never cross the fetcher boundary; they are logged and turned into
/// an absent page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Errors raised while rendering or writing results
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for harvesting operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use driver::{run_mode, run_pipeline};
pub use session::{CachedSession, Page, Session};
pub use state::{ResultSet, Row, StatusTally};
pub use strategies::Mode;
