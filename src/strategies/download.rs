use crate::config::Config;
use crate::scrape::{attr, fetch, fetch_page, find_tag, Document, TagQuery};
use crate::session::Session;
use crate::state::ResultSet;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use url::Url;

const DOWNLOADS_PATH: &str = "download.html";

const ARCHIVE_PATTERN: &str = r".+pdf-a4\.zip$";

static ARCHIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(ARCHIVE_PATTERN).expect("Failed to compile archive pattern - this is a bug")
});

/// Downloads the PDF (A4) documentation archive into the downloads directory
///
/// The saved file is the result; no rows are produced. An existing file of
/// the same name is overwritten.
pub async fn download<S: Session>(
    session: &S,
    config: &Config,
) -> crate::Result<Option<ResultSet>> {
    let downloads_url = Url::parse(&config.site.main_doc_url)?.join(DOWNLOADS_PATH)?;
    let Some(page) = fetch(session, &downloads_url).await else {
        return Ok(None);
    };
    let archive_url = archive_link(&page)?;

    let Some(archive) = fetch_page(session, &archive_url).await else {
        return Ok(None);
    };

    let path = save_archive(
        Path::new(&config.output.downloads_dir),
        &archive_url,
        &archive.body,
    )?;
    tracing::info!(path = %path.display(), "Archive downloaded and saved");

    Ok(None)
}

/// Absolute URL of the A4 PDF archive listed in the documentation table
fn archive_link(page: &Document) -> crate::Result<Url> {
    let table = page.find(&TagQuery::new("table").attr("class", "docutils"))?;
    let link = find_tag(
        table,
        &TagQuery::new("a").attr_matching("href", ARCHIVE_RE.clone()),
    )?;
    page.join(attr(link, "href")?)
}

/// File name for a downloaded archive: the URL's last path segment
pub fn archive_file_name(url: &Url) -> String {
    url.path_segments()
        .and_then(|segments| segments.last())
        .filter(|segment| !segment.is_empty())
        .unwrap_or("archive.zip")
        .to_string()
}

fn save_archive(dir: &Path, url: &Url, content: &[u8]) -> crate::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(archive_file_name(url));
    fs::write(&path, content)?;
    Ok(path)
}
