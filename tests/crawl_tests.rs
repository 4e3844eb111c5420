//! Integration tests for the crawl engine
//!
//! These tests use wiremock to stand up mock sites and exercise the full
//! crawl cycle end-to-end: scoping, budgeting, deduplication, content-type
//! filtering, and the corpus block format.

use grantscout::config::CrawlerConfig;
use grantscout::crawler::{CancelToken, CrawlOutcome, Engine};
use grantscout::output::FileCorpusSink;
use tempfile::NamedTempFile;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with the given page budget
fn test_config(max_pages: u32) -> CrawlerConfig {
    CrawlerConfig {
        request_timeout_secs: 5,
        max_pages,
        user_agent: "GrantscoutTest/1.0".to_string(),
    }
}

/// Runs a crawl from the seed and returns (report, corpus content)
async fn run_crawl(config: CrawlerConfig, seed: &str) -> (grantscout::CrawlReport, String) {
    let engine = Engine::new(config).expect("Failed to build engine");
    let seed = Url::parse(seed).expect("Bad seed URL");
    let file = NamedTempFile::new().expect("Failed to create corpus file");
    let mut sink = FileCorpusSink::create(file.path()).expect("Failed to create sink");

    let report = engine
        .crawl(&seed, &mut sink, &CancelToken::new())
        .await
        .expect("Crawl failed");

    let corpus = std::fs::read_to_string(file.path()).expect("Failed to read corpus");
    (report, corpus)
}

/// Extracts the `[URL]` headers of the corpus blocks, in order
fn block_urls(corpus: &str) -> Vec<String> {
    corpus
        .split("\n\n[")
        .skip(1)
        .map(|chunk| chunk.split(']').next().unwrap_or("").to_string())
        .collect()
}

fn html_response(body: String) -> ResponseTemplate {
    // `set_body_raw` sets the mime directly; wiremock's `set_body_string`
    // forces `text/plain` and overrides any later content-type header.
    ResponseTemplate::new(200).set_body_raw(body.into_bytes(), "text/html; charset=utf-8")
}

#[tokio::test]
async fn test_two_page_crawl_excludes_foreign_host() {
    let site = MockServer::start().await;
    let foreign = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(html_response(format!(
            r#"<html><body>Page A
            <a href="/b">in scope</a>
            <a href="{}/x">off site</a>
            </body></html>"#,
            foreign.uri()
        )))
        .mount(&site)
        .await;

    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(html_response(
            "<html><body>Page B content</body></html>".to_string(),
        ))
        .mount(&site)
        .await;

    // The foreign host must never be touched
    Mock::given(method("GET"))
        .respond_with(html_response("<html><body>off site</body></html>".to_string()))
        .expect(0)
        .mount(&foreign)
        .await;

    let (report, corpus) = run_crawl(test_config(50), &format!("{}/a", site.uri())).await;

    assert_eq!(report.pages_accepted, 2);
    assert_eq!(report.outcome, CrawlOutcome::FrontierExhausted);

    let blocks = block_urls(&corpus);
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0], format!("{}/a", site.uri()));
    assert_eq!(blocks[1], format!("{}/b", site.uri()));
    assert!(corpus.contains("Page B content"));
}

#[tokio::test]
async fn test_seed_returning_404_completes_empty() {
    let site = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&site)
        .await;

    let (report, corpus) = run_crawl(test_config(50), &format!("{}/missing", site.uri())).await;

    assert_eq!(report.pages_accepted, 0);
    assert_eq!(report.urls_visited, 1);
    assert_eq!(report.outcome, CrawlOutcome::FrontierExhausted);
    assert!(corpus.is_empty());
}

#[tokio::test]
async fn test_pdf_page_contributes_no_text_and_no_links() {
    let site = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(
            r#"<html><body>Index
            <a href="/report.pdf">annual report</a>
            <a href="/about">about</a>
            </body></html>"#
                .to_string(),
        ))
        .mount(&site)
        .await;

    // The PDF body carries an anchor-looking payload that must never be
    // parsed for links
    Mock::given(method("GET"))
        .and(path("/report.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<a href="/never">trap</a>"#)
                .insert_header("content-type", "application/pdf"),
        )
        .mount(&site)
        .await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html_response(
            "<html><body>About us</body></html>".to_string(),
        ))
        .mount(&site)
        .await;

    Mock::given(method("GET"))
        .and(path("/never"))
        .respond_with(html_response("<html><body>trap</body></html>".to_string()))
        .expect(0)
        .mount(&site)
        .await;

    let (report, corpus) = run_crawl(test_config(50), &format!("{}/", site.uri())).await;

    assert_eq!(report.pages_accepted, 2);
    // Index, the PDF, and /about were all attempted
    assert_eq!(report.urls_visited, 3);

    let blocks = block_urls(&corpus);
    assert!(!blocks.iter().any(|b| b.contains("report.pdf")));
    assert!(!corpus.contains("trap"));
}

#[tokio::test]
async fn test_budget_halts_at_fifty_accepted_pages() {
    let site = MockServer::start().await;

    // An index linking to 60 pages; every page links back to the index, so
    // the frontier never dries up on its own
    let mut index_body = String::from("<html><body>Index\n");
    for i in 1..=60 {
        index_body.push_str(&format!(r#"<a href="/p{}">page {}</a>"#, i, i));
    }
    index_body.push_str("</body></html>");

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(index_body))
        .mount(&site)
        .await;

    for i in 1..=60 {
        Mock::given(method("GET"))
            .and(path(format!("/p{}", i)))
            .respond_with(html_response(format!(
                r#"<html><body>Page {} <a href="/">home</a></body></html>"#,
                i
            )))
            .mount(&site)
            .await;
    }

    let (report, corpus) = run_crawl(test_config(50), &format!("{}/", site.uri())).await;

    assert_eq!(report.pages_accepted, 50);
    assert_eq!(report.outcome, CrawlOutcome::BudgetReached);
    assert_eq!(block_urls(&corpus).len(), 50);
}

#[tokio::test]
async fn test_duplicate_links_yield_single_block() {
    let site = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(
            r#"<html><body>
            <a href="/target">once</a>
            <a href="/target">twice</a>
            <a href="/other">other</a>
            </body></html>"#
                .to_string(),
        ))
        .mount(&site)
        .await;

    // A second page also points at the shared target
    Mock::given(method("GET"))
        .and(path("/other"))
        .respond_with(html_response(
            r#"<html><body><a href="/target">again</a></body></html>"#.to_string(),
        ))
        .mount(&site)
        .await;

    Mock::given(method("GET"))
        .and(path("/target"))
        .respond_with(html_response(
            "<html><body>shared target</body></html>".to_string(),
        ))
        .expect(1)
        .mount(&site)
        .await;

    let (report, corpus) = run_crawl(test_config(50), &format!("{}/", site.uri())).await;

    assert_eq!(report.pages_accepted, 3);

    let target = format!("{}/target", site.uri());
    let blocks = block_urls(&corpus);
    assert_eq!(blocks.iter().filter(|b| **b == target).count(), 1);
}

#[tokio::test]
async fn test_rerun_produces_identical_block_set() {
    let site = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(
            r#"<html><body>
            <a href="/grants">grants</a>
            <a href="/about">about</a>
            </body></html>"#
                .to_string(),
        ))
        .mount(&site)
        .await;

    Mock::given(method("GET"))
        .and(path("/grants"))
        .respond_with(html_response(
            r#"<html><body>Grants <a href="/about">about</a></body></html>"#.to_string(),
        ))
        .mount(&site)
        .await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html_response(
            "<html><body>About</body></html>".to_string(),
        ))
        .mount(&site)
        .await;

    let seed = format!("{}/", site.uri());
    let (first_report, first_corpus) = run_crawl(test_config(50), &seed).await;
    let (second_report, second_corpus) = run_crawl(test_config(50), &seed).await;

    assert_eq!(first_report.pages_accepted, second_report.pages_accepted);
    assert_eq!(block_urls(&first_corpus), block_urls(&second_corpus));
}

#[tokio::test]
async fn test_slow_page_times_out_and_crawl_continues() {
    let site = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(
            r#"<html><body>
            <a href="/slow">slow</a>
            <a href="/fast">fast</a>
            </body></html>"#
                .to_string(),
        ))
        .mount(&site)
        .await;

    // Responds well past the 1s request timeout
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            html_response("<html><body>too late</body></html>".to_string())
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&site)
        .await;

    Mock::given(method("GET"))
        .and(path("/fast"))
        .respond_with(html_response(
            "<html><body>fast page</body></html>".to_string(),
        ))
        .mount(&site)
        .await;

    let config = CrawlerConfig {
        request_timeout_secs: 1,
        ..test_config(50)
    };
    let (report, corpus) = run_crawl(config, &format!("{}/", site.uri())).await;

    // The slow page was attempted but only the index and the fast page made
    // it into the corpus
    assert_eq!(report.pages_accepted, 2);
    assert_eq!(report.urls_visited, 3);
    assert!(corpus.contains("fast page"));
    assert!(!corpus.contains("too late"));
}

#[tokio::test]
async fn test_fragment_and_mailto_links_are_not_followed_offsite() {
    let site = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(html_response(
            r#"<html><body>
            <a href="mailto:grants@example.com">mail us</a>
            <a href="javascript:void(0)">noop</a>
            <a href="tel:+15551234567">call</a>
            </body></html>"#
                .to_string(),
        ))
        .mount(&site)
        .await;

    let (report, _) = run_crawl(test_config(50), &format!("{}/page", site.uri())).await;

    // Hostless schemes fail the scope check; nothing else gets queued
    assert_eq!(report.pages_accepted, 1);
    assert_eq!(report.urls_visited, 1);
    assert_eq!(report.outcome, CrawlOutcome::FrontierExhausted);
}
