//! Tag locator
//!
//! Finds the first element under a scope that matches a tag name and a set
//! of attribute filters. A miss is a broken assumption about the page layout,
//! so `find_tag` reports it loudly instead of handing back an empty value.

use crate::HarvestError;
use regex::Regex;
use scraper::ElementRef;
use std::backtrace::Backtrace;
use std::fmt;

/// How an attribute value must look for an element to match
#[derive(Debug, Clone)]
pub enum AttrMatch {
    /// Value equals the string. For `class`, any single class name also matches.
    Exact(String),

    /// Value contains a match for the pattern
    Pattern(Regex),
}

impl AttrMatch {
    fn matches(&self, attribute: &str, value: &str) -> bool {
        match self {
            Self::Exact(expected) => {
                value == expected
                    || (attribute == "class"
                        && value.split_whitespace().any(|class| class == expected))
            }
            Self::Pattern(pattern) => pattern.is_match(value),
        }
    }
}

/// Description of the element being looked for
#[derive(Debug, Clone)]
pub struct TagQuery {
    name: String,
    attrs: Vec<(String, AttrMatch)>,
}

impl TagQuery {
    /// Matches any element with this tag name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
        }
    }

    /// Additionally requires `attribute` to equal `value`
    pub fn attr(mut self, attribute: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs
            .push((attribute.into(), AttrMatch::Exact(value.into())));
        self
    }

    /// Additionally requires `attribute` to match `pattern`
    pub fn attr_matching(mut self, attribute: impl Into<String>, pattern: Regex) -> Self {
        self.attrs.push((attribute.into(), AttrMatch::Pattern(pattern)));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if `element` satisfies the name and every attribute filter
    pub fn matches(&self, element: &ElementRef<'_>) -> bool {
        let value = element.value();
        if !value.name().eq_ignore_ascii_case(&self.name) {
            return false;
        }

        self.attrs.iter().all(|(attribute, expected)| {
            value
                .attr(attribute)
                .is_some_and(|actual| expected.matches(attribute, actual))
        })
    }
}

impl fmt::Display for TagQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        for (attribute, expected) in &self.attrs {
            match expected {
                AttrMatch::Exact(value) => write!(f, " {}=\"{}\"", attribute, value)?,
                AttrMatch::Pattern(pattern) => write!(f, " {}=/{}/", attribute, pattern)?,
            }
        }
        write!(f, ">")
    }
}

/// Outcome of a lookup; callers must handle both arms
#[derive(Debug)]
pub enum Located<'a> {
    Found(ElementRef<'a>),
    NotFound(String),
}

/// Elements strictly below `scope`, in document order
fn descendants<'a>(scope: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    scope.descendants().skip(1).filter_map(ElementRef::wrap)
}

/// Looks up the first element under `scope` matching `query`
pub fn locate<'a>(scope: ElementRef<'a>, query: &TagQuery) -> Located<'a> {
    match descendants(scope).find(|element| query.matches(element)) {
        Some(element) => Located::Found(element),
        None => Located::NotFound(format!("tag {} not found", query)),
    }
}

/// Like `locate`, but a miss is logged and turned into `HarvestError::TagNotFound`
pub fn find_tag<'a>(scope: ElementRef<'a>, query: &TagQuery) -> crate::Result<ElementRef<'a>> {
    match locate(scope, query) {
        Located::Found(element) => Ok(element),
        Located::NotFound(description) => {
            tracing::error!(
                query = %query,
                "{}\n{}",
                description,
                Backtrace::force_capture()
            );
            Err(HarvestError::TagNotFound { description })
        }
    }
}

/// All elements under `scope` matching `query`, in document order
pub fn find_all<'a>(scope: ElementRef<'a>, query: &TagQuery) -> Vec<ElementRef<'a>> {
    descendants(scope)
        .filter(|element| query.matches(element))
        .collect()
}

/// Concatenated text of an element and its descendants
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Reads a required attribute of an element
pub fn attr<'a>(element: ElementRef<'a>, attribute: &'static str) -> crate::Result<&'a str> {
    element
        .value()
        .attr(attribute)
        .ok_or_else(|| HarvestError::MissingAttribute {
            tag: element.value().name().to_string(),
            attribute,
        })
}
