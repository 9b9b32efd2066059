//! Fetcher
//!
//! One request per URL, no retries. Any failure is logged with a backtrace
//! and becomes `None`; callers skip the item and carry on.

use crate::scrape::Document;
use crate::session::{Page, Session};
use std::backtrace::Backtrace;
use url::Url;

/// Fetches `url`, returning the raw page or `None` if the request failed
pub async fn fetch_page<S: Session>(session: &S, url: &Url) -> Option<Page> {
    match session.get(url).await {
        Ok(page) => Some(page),
        Err(error) => {
            tracing::error!(
                url = %url,
                error = %error,
                "Failed to load page\n{}",
                Backtrace::force_capture()
            );
            None
        }
    }
}

/// Fetches and parses `url` as HTML (always decoded as UTF-8)
pub async fn fetch<S: Session>(session: &S, url: &Url) -> Option<Document> {
    let page = fetch_page(session, url).await?;
    Some(Document::parse(page.url.clone(), &page.text()))
}
