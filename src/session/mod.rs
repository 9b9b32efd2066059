//! HTTP session layer
//!
//! This module provides the shared session every strategy fetches through:
//! - The `Session` trait the fetcher depends on
//! - `CachedSession`, a reqwest client fronted by a SQLite response cache
//! - `Page`, the raw response handed back to the fetcher

mod cache;
mod client;

pub use cache::ResponseCache;
pub use client::{build_http_client, CachedSession};

use crate::FetchError;
use url::Url;

/// A fetched response body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Final URL after redirects
    pub url: Url,

    /// HTTP status code
    pub status: u16,

    /// Raw response body
    pub body: Vec<u8>,
}

impl Page {
    /// Decodes the body as UTF-8, whatever the server declared
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// A session that can GET URLs, possibly serving them from a cache
///
/// Whether a response came from the cache or the network is invisible to
/// callers. Implementations perform at most one network request per call.
#[allow(async_fn_in_trait)]
pub trait Session {
    /// Fetches `url`
    async fn get(&self, url: &Url) -> Result<Page, FetchError>;

    /// Drops every cached response
    fn clear_cache(&self) -> crate::Result<()>;
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory session double for strategy tests

    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Serves canned bodies; any other URL fails like a refused connection
    #[derive(Default)]
    pub struct StaticSession {
        pages: HashMap<String, Vec<u8>>,
        pub requests: RefCell<Vec<String>>,
    }

    impl StaticSession {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_page(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
            self.pages.insert(url.to_string(), body.into());
            self
        }

        pub fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    impl Session for StaticSession {
        async fn get(&self, url: &Url) -> Result<Page, FetchError> {
            self.requests.borrow_mut().push(url.to_string());

            match self.pages.get(url.as_str()) {
                Some(body) => Ok(Page {
                    url: url.clone(),
                    status: 200,
                    body: body.clone(),
                }),
                None => {
                    // A malformed request yields a genuine reqwest transport error
                    // without touching the network
                    let source = reqwest::get("http://[unclosed").await.unwrap_err();
                    Err(FetchError::Transport {
                        url: url.to_string(),
                        source,
                    })
                }
            }
        }

        fn clear_cache(&self) -> crate::Result<()> {
            Ok(())
        }
    }
}
