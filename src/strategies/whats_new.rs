use crate::config::Config;
use crate::scrape::{attr, fetch, find_all, find_tag, text_of, Document, TagQuery};
use crate::session::Session;
use crate::state::ResultSet;
use url::Url;

const WHATS_NEW_PATH: &str = "whatsnew/";

/// Collects the title and editors of every release article in the "what's new" index
///
/// Articles whose page cannot be fetched are skipped.
pub async fn whats_new<S: Session>(
    session: &S,
    config: &Config,
) -> crate::Result<Option<ResultSet>> {
    let index_url = Url::parse(&config.site.main_doc_url)?.join(WHATS_NEW_PATH)?;
    let Some(index) = fetch(session, &index_url).await else {
        return Ok(None);
    };
    let links = article_links(&index)?;

    let mut results = ResultSet::with_header(["Article link", "Title", "Editor, author"]);
    let progress = super::Progress::new(links.len());

    for link in links {
        progress.inc();
        let Some(article) = fetch(session, &link).await else {
            continue;
        };
        let (title, editors) = article_summary(&article)?;
        results.push([link.to_string(), title, editors]);
    }

    drop(progress);
    Ok(Some(results))
}

/// Absolute links of the first-level entries in the index's table of contents
fn article_links(index: &Document) -> crate::Result<Vec<Url>> {
    let section = index.find(&TagQuery::new("section").attr("id", "what-s-new-in-python"))?;
    let toc = find_tag(section, &TagQuery::new("div").attr("class", "toctree-wrapper"))?;

    find_all(toc, &TagQuery::new("li").attr("class", "toctree-l1"))
        .into_iter()
        .map(|entry| {
            let link = find_tag(entry, &TagQuery::new("a"))?;
            index.join(attr(link, "href")?)
        })
        .collect()
}

/// Main heading and first definition list (newlines flattened) of an article
fn article_summary(article: &Document) -> crate::Result<(String, String)> {
    let heading = article.find(&TagQuery::new("h1"))?;
    let editors = article.find(&TagQuery::new("dl"))?;
    Ok((text_of(heading), text_of(editors).replace('\n', " ")))
}
