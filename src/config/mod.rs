//! Configuration module for Pydocs-Harvest
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every table is optional; missing values fall back to
//! the public Python documentation sites.
//!
//! # Example
//!
//! ```no_run
//! use pydocs_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("PEP index: {}", config.site.pep_doc_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CacheConfig, Config, HttpConfig, LoggingConfig, OutputConfig, SiteConfig, MAIN_DOC_URL,
    PEP_DOC_URL,
};

// Re-export parser functions
pub use parser::{load_config, load_or_default, parse_config};
pub use validation::validate;
