//! Cached HTTP session
//!
//! Wraps a reqwest client with the SQLite response cache. Only successful
//! responses are cached; everything else is reported as a `FetchError`.
//! A cache that cannot be read or written is logged and bypassed.

use crate::config::{Config, HttpConfig};
use crate::session::{Page, ResponseCache, Session};
use crate::{ConfigError, FetchError};
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP configuration (user agent, timeout)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(config.timeout_secs);

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// A reqwest client whose GET responses are cached in SQLite
pub struct CachedSession {
    client: Client,
    cache: ResponseCache,
}

impl CachedSession {
    /// Creates a session from an HTTP configuration and an opened cache
    pub fn new(config: &HttpConfig, cache: ResponseCache) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
            cache,
        })
    }

    /// Creates a session with the cache file and expiry named in `config`
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        let expire_after = match config.cache.expire_after_secs {
            0 => None,
            secs => Some(
                i64::try_from(secs)
                    .ok()
                    .and_then(chrono::Duration::try_seconds)
                    .ok_or_else(|| {
                        ConfigError::Validation(format!("expire-after-secs out of range: {}", secs))
                    })?,
            ),
        };
        let cache = ResponseCache::open(Path::new(&config.cache.path), expire_after)?;
        Ok(Self::new(&config.http, cache)?)
    }

    /// The underlying response cache
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }
}

impl Session for CachedSession {
    async fn get(&self, url: &Url) -> Result<Page, FetchError> {
        match self.cache.lookup(url.as_str()) {
            Ok(Some(page)) => {
                tracing::debug!(url = %url, "Served from cache");
                return Ok(page);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(url = %url, error = %e, "Cache lookup failed, fetching"),
        }

        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().clone();
        let body = response.bytes().await.map_err(transport)?;

        let page = Page {
            url: final_url,
            status: status.as_u16(),
            body: body.to_vec(),
        };
        if let Err(e) = self.cache.store(url.as_str(), &page) {
            tracing::warn!(url = %url, error = %e, "Failed to cache response");
        }

        Ok(page)
    }

    fn clear_cache(&self) -> crate::Result<()> {
        let removed = self.cache.clear()?;
        tracing::info!(removed, "Response cache cleared");
        Ok(())
    }
}
