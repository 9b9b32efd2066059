use crate::config::Config;
use crate::scrape::{attr, fetch, find_all, text_of, Document, TagQuery};
use crate::session::Session;
use crate::state::ResultSet;
use crate::HarvestError;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

const ALL_VERSIONS_MARKER: &str = "All versions";

const VERSION_PATTERN: &str = r"Python (?P<version>\d\.\d+) \((?P<status>.*)\)";

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(VERSION_PATTERN).expect("Failed to compile version pattern - this is a bug")
});

/// Lists documentation versions and their status from the sidebar of the docs root
///
/// Makes exactly one request.
pub async fn latest_versions<S: Session>(
    session: &S,
    config: &Config,
) -> crate::Result<Option<ResultSet>> {
    let root_url = Url::parse(&config.site.main_doc_url)?;
    let Some(root) = fetch(session, &root_url).await else {
        return Ok(None);
    };

    let mut results = ResultSet::with_header(["Documentation link", "Version", "Status"]);
    for (link, text) in version_links(&root)? {
        let (version, status) = parse_version_text(&text);
        results.push([link, version, status]);
    }

    Ok(Some(results))
}

/// `(href, visible text)` of every link in the sidebar list containing the marker
fn version_links(root: &Document) -> crate::Result<Vec<(String, String)>> {
    let sidebar = root.find(&TagQuery::new("div").attr("class", "sphinxsidebarwrapper"))?;

    let list = find_all(sidebar, &TagQuery::new("ul"))
        .into_iter()
        .find(|ul| text_of(*ul).contains(ALL_VERSIONS_MARKER))
        .ok_or_else(|| HarvestError::MarkerNotFound {
            marker: ALL_VERSIONS_MARKER,
            location: format!("sidebar lists of {}", root.url()),
        })?;

    find_all(list, &TagQuery::new("a"))
        .into_iter()
        .map(|link| Ok((attr(link, "href")?.to_string(), text_of(link))))
        .collect()
}

/// Splits `Python X.Y (status)` into version and status
///
/// Text of any other shape is returned whole as the version, with an empty status.
pub fn parse_version_text(text: &str) -> (String, String) {
    match VERSION_RE.captures(text) {
        Some(captures) => (
            captures["version"].to_string(),
            captures["status"].to_string(),
        ),
        None => (text.to_string(), String::new()),
    }
}
