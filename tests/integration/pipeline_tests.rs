//! Integration tests for the harvesting pipeline
//!
//! These tests use wiremock to stand in for the documentation and PEP sites
//! and drive every mode through the real cached session.

use pydocs_harvest::config::Config;
use pydocs_harvest::driver::{run_mode, run_pipeline};
use pydocs_harvest::output::{Output, OutputFormat, OutputResult, OutputSink};
use pydocs_harvest::scrape::fetch;
use pydocs_harvest::session::{CachedSession, ResponseCache, Session};
use pydocs_harvest::state::ResultSet;
use pydocs_harvest::strategies::Mode;
use pydocs_harvest::HarvestError;
use clap::ValueEnum;
use std::cell::RefCell;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a configuration pointing both sites at the mock server
fn create_test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.site.main_doc_url = format!("{}/3/", base_url);
    config.site.pep_doc_url = format!("{}/peps/", base_url);
    config.http.timeout_secs = 1;
    config.logging.file = None;
    config
}

fn create_session(config: &Config) -> CachedSession {
    let cache = ResponseCache::in_memory(None).expect("Failed to create cache");
    CachedSession::new(&config.http, cache).expect("Failed to create session")
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html; charset=ISO-8859-1")
}

async fn mount_page(server: &MockServer, page_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html(body))
        .mount(server)
        .await;
}

/// Collects emitted result sets
#[derive(Default)]
struct Collect(RefCell<Vec<ResultSet>>);

impl OutputSink for Collect {
    fn emit(&self, _mode: Mode, results: &ResultSet) -> OutputResult<()> {
        self.0.borrow_mut().push(results.clone());
        Ok(())
    }
}

fn count(results: &ResultSet, status: &str) -> Option<String> {
    results
        .data_rows()
        .iter()
        .find(|row| row[0] == status)
        .map(|row| row[1].clone())
}

const WHATS_NEW_INDEX: &str = r#"<html><body>
<section id="what-s-new-in-python">
  <div class="toctree-wrapper compound">
    <ul>
      <li class="toctree-l1"><a href="3.13.html">What's New In Python 3.13</a></li>
      <li class="toctree-l1"><a href="3.12.html">What's New In Python 3.12</a></li>
    </ul>
  </div>
</section>
</body></html>"#;

#[tokio::test]
async fn test_whats_new_skips_failed_article() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(&mock_server.uri());

    mount_page(&mock_server, "/3/whatsnew/", WHATS_NEW_INDEX).await;
    mount_page(
        &mock_server,
        "/3/whatsnew/3.13.html",
        "<html><body><h1>What's New In Python 3.13</h1>\
         <dl><dt>Editors</dt>\n<dd>Adam Turner and Thomas Wouters</dd></dl></body></html>",
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/3/whatsnew/3.12.html"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let session = create_session(&config);
    let results = run_mode(Mode::WhatsNew, &session, &config)
        .await
        .expect("whats-new failed")
        .expect("index should load");

    assert_eq!(results.header()[0], "Article link");
    assert_eq!(results.len(), 1);
    let row = &results.data_rows()[0];
    assert_eq!(row[0], format!("{}/3/whatsnew/3.13.html", mock_server.uri()));
    assert_eq!(row[1], "What's New In Python 3.13");
    assert_eq!(row[2], "Editors Adam Turner and Thomas Wouters");
}

#[tokio::test]
async fn test_transport_failure_is_absorbed_by_fetcher() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(&mock_server.uri());

    // Slower than the 1s client timeout
    Mock::given(method("GET"))
        .and(path("/3/slow.html"))
        .respond_with(html("<h1>late</h1>").set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let session = create_session(&config);
    let url = url::Url::parse(&format!("{}/3/slow.html", mock_server.uri())).unwrap();

    assert!(fetch(&session, &url).await.is_none());
    assert!(session.cache().is_empty().unwrap());
}

#[tokio::test]
async fn test_body_is_decoded_as_utf8_regardless_of_charset() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(&mock_server.uri());

    mount_page(
        &mock_server,
        "/3/",
        r#"<div class="sphinxsidebarwrapper"><ul>
             <li><a href="https://docs.python.org/3.13/">Python 3.13 (stable — Łukasz)</a></li>
             <li><a href="https://www.python.org/doc/versions/">All versions</a></li>
           </ul></div>"#,
    )
    .await;

    let session = create_session(&config);
    let results = run_mode(Mode::LatestVersions, &session, &config)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(results.data_rows()[0][1], "3.13");
    assert_eq!(results.data_rows()[0][2], "stable — Łukasz");
}

#[tokio::test]
async fn test_repeated_url_is_served_from_cache() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/3/"))
        .respond_with(html("<html><body><h1>Python</h1></body></html>"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let session = create_session(&config);
    let url = url::Url::parse(&format!("{}/3/", mock_server.uri())).unwrap();

    let first = session.get(&url).await.unwrap();
    let second = session.get(&url).await.unwrap();
    assert_eq!(first, second);

    // After clearing, the next request goes to the network again
    session.clear_cache().unwrap();
    session.get(&url).await.unwrap();
}

#[tokio::test]
async fn test_error_responses_are_not_cached() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/3/missing.html"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&mock_server)
        .await;

    let session = create_session(&config);
    let url = url::Url::parse(&format!("{}/3/missing.html", mock_server.uri())).unwrap();

    assert!(session.get(&url).await.is_err());
    assert!(session.get(&url).await.is_err());
    assert!(session.cache().is_empty().unwrap());
}

fn pep_index(rows: &[(u32, &str, &str)]) -> String {
    let rows: Vec<String> = rows
        .iter()
        .map(|(number, abbr, title)| {
            format!(
                r#"<tr><td><abbr title="{title}">{abbr}</abbr></td>
                   <td><a class="pep reference internal" href="pep-{number:04}/">{number}</a></td></tr>"#
            )
        })
        .collect();

    format!(
        r#"<html><body><section id="numerical-index">
             <table class="pep-zero-table docutils align-default"><tbody>{}</tbody></table>
           </section></body></html>"#,
        rows.join("\n")
    )
}

fn pep_page(status: &str) -> String {
    format!(r#"<html><body><dl><dt>Status</dt><dd><abbr title="x">{status}</abbr></dd></dl></body></html>"#)
}

async fn mount_pep_site(server: &MockServer) {
    mount_page(
        server,
        "/peps/",
        &pep_index(&[
            (1, "PA", "Process, Active"),
            (8, "PA", "Process, Active"),
            (20, "IA", "Informational, Active"),
            (572, "SF", "Standards Track, Final"),
        ]),
    )
    .await;
    mount_page(server, "/peps/pep-0001/", &pep_page("Active")).await;
    // Index claims Active, the PEP page says Final
    mount_page(server, "/peps/pep-0008/", &pep_page("Final")).await;
    mount_page(server, "/peps/pep-0572/", &pep_page("Final")).await;
    Mock::given(method("GET"))
        .and(path("/peps/pep-0020/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_pep_reconciliation_end_to_end() {
    let mock_server = MockServer::start().await;
    mount_pep_site(&mock_server).await;
    let config = create_test_config(&mock_server.uri());
    let session = create_session(&config);
    let sink = Collect::default();

    let emitted = run_pipeline(Mode::Pep, &session, &config, &sink)
        .await
        .expect("pep failed");
    assert!(emitted);

    let collected = sink.0.borrow();
    let results = &collected[0];
    assert_eq!(results.header(), &vec!["Status".to_string(), "Count".to_string()]);
    assert_eq!(count(results, "Final").as_deref(), Some("2"));
    assert_eq!(count(results, "Active").as_deref(), Some("1"));
    assert_eq!(count(results, "Withdrawn").as_deref(), Some("0"));

    // Three PEP pages loaded; the failed one is not counted
    assert_eq!(count(results, "Total").as_deref(), Some("3"));
    let sum: u64 = results
        .data_rows()
        .iter()
        .filter(|row| row[0] != "Total")
        .map(|row| row[1].parse::<u64>().unwrap())
        .sum();
    assert_eq!(sum, 3);
}

#[tokio::test]
async fn test_pep_rerun_is_idempotent() {
    let mock_server = MockServer::start().await;
    mount_pep_site(&mock_server).await;
    let config = create_test_config(&mock_server.uri());
    let session = create_session(&config);

    let first = run_mode(Mode::Pep, &session, &config).await.unwrap();
    let second = run_mode(Mode::Pep, &session, &config).await.unwrap();
    assert_eq!(first, second);

    // A fresh session against the same pages agrees too
    let third = run_mode(Mode::Pep, &create_session(&config), &config)
        .await
        .unwrap();
    assert_eq!(first, third);
}

#[tokio::test]
async fn test_download_saves_archive() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let mut config = create_test_config(&mock_server.uri());
    config.output.downloads_dir = dir.path().join("downloads").display().to_string();

    mount_page(
        &mock_server,
        "/3/download.html",
        r#"<table class="docutils align-default">
             <tr><td><a href="archives/python-3.13-docs-pdf-letter.zip">Letter</a></td></tr>
             <tr><td><a href="archives/python-3.13-docs-pdf-a4.zip">A4</a></td></tr>
           </table>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/3/archives/python-3.13-docs-pdf-a4.zip"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"PK\x03\x04archive".to_vec())
                .insert_header("content-type", "application/zip"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let session = create_session(&config);
    let sink = Collect::default();
    let emitted = run_pipeline(Mode::Download, &session, &config, &sink)
        .await
        .unwrap();

    assert!(!emitted);
    assert!(sink.0.borrow().is_empty());
    let saved = dir
        .path()
        .join("downloads")
        .join("python-3.13-docs-pdf-a4.zip");
    assert_eq!(std::fs::read(saved).unwrap(), b"PK\x03\x04archive");
}

#[tokio::test]
async fn test_unreachable_site_produces_no_output() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(&mock_server.uri());
    let session = create_session(&config);
    let sink = Collect::default();

    // Nothing mounted: every page is a 404
    for &mode in Mode::value_variants() {
        let emitted = run_pipeline(mode, &session, &config, &sink).await.unwrap();
        assert!(!emitted, "{} should emit nothing", mode);
    }
    assert!(sink.0.borrow().is_empty());
}

#[tokio::test]
async fn test_changed_page_layout_is_reported() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/3/",
        r#"<div class="sphinxsidebarwrapper"><ul><li><a href="/x">Python 3.13 (stable)</a></li></ul></div>"#,
    )
    .await;
    mount_page(&mock_server, "/peps/", "<html><body><p>moved</p></body></html>").await;
    let config = create_test_config(&mock_server.uri());
    let session = create_session(&config);

    let versions = run_mode(Mode::LatestVersions, &session, &config).await;
    assert!(matches!(versions, Err(HarvestError::MarkerNotFound { .. })));

    let peps = run_mode(Mode::Pep, &session, &config).await;
    assert!(matches!(peps, Err(HarvestError::TagNotFound { .. })));
}

#[tokio::test]
async fn test_file_output_writes_csv() {
    let mock_server = MockServer::start().await;
    mount_pep_site(&mock_server).await;
    let dir = tempfile::tempdir().unwrap();
    let mut config = create_test_config(&mock_server.uri());
    config.output.results_dir = dir.path().join("results").display().to_string();

    let session = create_session(&config);
    let sink = Output::new(Some(OutputFormat::File), &config.output);
    run_pipeline(Mode::Pep, &session, &config, &sink)
        .await
        .unwrap();

    let entry = std::fs::read_dir(dir.path().join("results"))
        .unwrap()
        .next()
        .unwrap()
        .unwrap();
    let mut reader = csv::Reader::from_path(entry.path()).unwrap();
    let rows: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
    let total = rows.last().unwrap();
    assert_eq!(&total[0], "Total");
    assert_eq!(&total[1], "3");
}
