use crate::scrape::locator::{find_tag, TagQuery};
use scraper::{ElementRef, Html};
use url::Url;

/// A parsed HTML page together with the URL it was served from
#[derive(Debug)]
pub struct Document {
    url: Url,
    html: Html,
}

impl Document {
    pub fn parse(url: Url, text: &str) -> Self {
        Self {
            url,
            html: Html::parse_document(text),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The `<html>` element, the scope for whole-page lookups
    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    /// First element in the page matching `query`
    pub fn find(&self, query: &TagQuery) -> crate::Result<ElementRef<'_>> {
        find_tag(self.root(), query)
    }

    /// Resolves a link found in this page against the page URL
    pub fn join(&self, href: &str) -> crate::Result<Url> {
        Ok(self.url.join(href.trim())?)
    }
}
