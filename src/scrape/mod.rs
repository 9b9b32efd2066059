//! Page access for the extraction strategies
//!
//! This module contains the two building blocks every strategy composes:
//! - The fetcher, which turns a URL into a parsed `Document` or nothing
//! - The tag locator, which finds expected elements or fails loudly

mod document;
mod fetcher;
mod locator;

pub use document::Document;
pub use fetcher::{fetch, fetch_page};
pub use locator::{attr, find_all, find_tag, locate, text_of, AttrMatch, Located, TagQuery};
