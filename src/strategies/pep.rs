use crate::config::Config;
use crate::reconcile::{Observation, Reconciler};
use crate::scrape::{attr, fetch, find_all, find_tag, text_of, Document, TagQuery};
use crate::session::Session;
use crate::state::{status_code, ResultSet};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

const STATUS_TITLE_PATTERN: &str = r".*, (?P<status>\w+)$";

static STATUS_TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(STATUS_TITLE_PATTERN).expect("Failed to compile status pattern - this is a bug")
});

/// One row of the PEP numerical index
#[derive(Debug, Clone, PartialEq, Eq)]
struct IndexEntry {
    link: Url,
    claimed: String,
    code: String,
}

/// Counts PEPs per status, reading each PEP's own page as the authority
pub async fn pep<S: Session>(session: &S, config: &Config) -> crate::Result<Option<ResultSet>> {
    let index_url = Url::parse(&config.site.pep_doc_url)?;
    let Some(index) = fetch(session, &index_url).await else {
        return Ok(None);
    };
    let entries = index_entries(&index)?;

    let mut reconciler = Reconciler::new();
    let progress = super::Progress::new(entries.len());

    for entry in entries {
        progress.inc();
        let Some(page) = fetch(session, &entry.link).await else {
            reconciler.discard(entry.link.as_str());
            continue;
        };
        let observed = observed_status(&page)?;
        reconciler.record(&Observation {
            link: entry.link.as_str(),
            claimed: &entry.claimed,
            observed: &observed,
            code: Some(&entry.code),
        });
    }

    drop(progress);
    Ok(Some(reconciler.finish()))
}

fn index_entries(index: &Document) -> crate::Result<Vec<IndexEntry>> {
    let section = index.find(&TagQuery::new("section").attr("id", "numerical-index"))?;
    let table = find_tag(
        section,
        &TagQuery::new("table").attr("class", "pep-zero-table docutils align-default"),
    )?;
    let body = find_tag(table, &TagQuery::new("tbody"))?;

    find_all(body, &TagQuery::new("tr"))
        .into_iter()
        .map(|row| {
            let abbr = find_tag(row, &TagQuery::new("abbr"))?;
            let link = find_tag(
                row,
                &TagQuery::new("a").attr("class", "pep reference internal"),
            )?;

            Ok(IndexEntry {
                link: index.join(attr(link, "href")?)?,
                claimed: claimed_status(attr(abbr, "title")?),
                code: status_code(&text_of(abbr)).to_string(),
            })
        })
        .collect()
}

/// Status word at the end of an abbreviation title such as `Standards Track, Final`
///
/// A title of any other shape is used whole.
fn claimed_status(title: &str) -> String {
    match STATUS_TITLE_RE.captures(title) {
        Some(captures) => captures["status"].to_string(),
        None => title.trim().to_string(),
    }
}

/// Status shown on a PEP page: the text of its first abbreviation
fn observed_status(page: &Document) -> crate::Result<String> {
    Ok(text_of(page.find(&TagQuery::new("abbr"))?))
}
