use crate::config::types::{CacheConfig, Config, HttpConfig, OutputConfig, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Longest accepted cache lifetime: ten years
pub const MAX_EXPIRE_AFTER_SECS: u64 = 10 * 365 * 24 * 60 * 60;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_http_config(&config.http)?;
    validate_cache_config(&config.cache)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the harvested site roots
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    validate_base_url("main-doc-url", &config.main_doc_url)?;
    validate_base_url("pep-doc-url", &config.pep_doc_url)?;
    Ok(())
}

/// A base URL must be absolute http(s) and end with '/', otherwise joining
/// relative links onto it drops its last path segment
fn validate_base_url(key: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("{} '{}': {}", key, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} must use http or https, got '{}'",
            key, value
        )));
    }

    if !url.path().ends_with('/') {
        return Err(ConfigError::InvalidUrl(format!(
            "{} must end with '/', got '{}'",
            key, value
        )));
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 || config.timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be between 1 and 300, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

fn validate_cache_config(config: &CacheConfig) -> Result<(), ConfigError> {
    if config.path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "cache path cannot be empty".to_string(),
        ));
    }

    if config.expire_after_secs > MAX_EXPIRE_AFTER_SECS {
        return Err(ConfigError::Validation(format!(
            "expire-after-secs must be at most {}, got {}",
            MAX_EXPIRE_AFTER_SECS, config.expire_after_secs
        )));
    }
    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.results_dir.trim().is_empty() {
        return Err(ConfigError::Validation(
            "results-dir cannot be empty".to_string(),
        ));
    }

    if config.downloads_dir.trim().is_empty() {
        return Err(ConfigError::Validation(
            "downloads-dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}
