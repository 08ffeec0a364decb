//! End-to-end crawl tests
//!
//! These tests use wiremock to stand up mock HTTP servers and drive the
//! full crawl cycle: frontier traversal, host scoping, deduplication,
//! broken-link classification, and metadata collection.

use linkscout::config::CrawlConfig;
use linkscout::crawler::crawl;
use linkscout::report::{exit_code, LinkStatus};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(start_url: &str) -> CrawlConfig {
    CrawlConfig {
        start_url: start_url.to_string(),
        bypass_key: "test-key".to_string(),
        ..CrawlConfig::default()
    }
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html")
}

#[tokio::test]
async fn test_scenario_one_broken_among_two_links() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<html><body>
            <a href="/dead">Dead</a>
            <a href="/alive">Alive</a>
            </body></html>"#,
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/alive"))
        .respond_with(html_page("<html><body>No links here</body></html>"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dead"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let outcome = crawl(&test_config(&format!("{}/", server.uri())))
        .await
        .expect("crawl failed");

    assert_eq!(outcome.broken_links.len(), 1);
    assert_eq!(
        outcome.broken_links[0].url,
        format!("{}/dead", server.uri())
    );
    assert_eq!(outcome.broken_links[0].status, LinkStatus::Http(404));
    assert_eq!(exit_code(&outcome.broken_links), 1);
}

#[tokio::test]
async fn test_scenario_unreachable_start_url() {
    // Port 1 is essentially never bound, so the connection is refused
    let start = "http://127.0.0.1:1/";
    let outcome = crawl(&test_config(start)).await.expect("crawl failed");

    assert_eq!(outcome.broken_links.len(), 1);
    assert_eq!(outcome.broken_links[0].url, start);
    assert_eq!(outcome.broken_links[0].status, LinkStatus::FetchFailed);
    assert_eq!(exit_code(&outcome.broken_links), 1);
}

#[tokio::test]
async fn test_scenario_metadata_collection() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<html><head>
            <meta name="description" content="x">
            <script type="application/ld+json">{"@type": "WebSite", "name": "Example"}</script>
            </head><body></body></html>"#,
        ))
        .mount(&server)
        .await;

    let config = CrawlConfig {
        collect_metadata: true,
        ..test_config(&format!("{}/", server.uri()))
    };
    let outcome = crawl(&config).await.expect("crawl failed");

    assert!(outcome.broken_links.is_empty());
    assert_eq!(outcome.metadata_records.len(), 1);

    let record = &outcome.metadata_records[0];
    assert_eq!(record.status, 200);
    assert_eq!(record.page_metadata["description"], "x");

    let structured = record.page_metadata["structuredData"].as_array().unwrap();
    assert_eq!(structured.len(), 1);
    assert_eq!(structured[0]["@type"], "WebSite");
}

#[tokio::test]
async fn test_scenario_unparsable_href_dropped_silently() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<html><body>
            <a href="javascript:void(0)">Click</a>
            <a href="mailto:someone@example.com">Mail</a>
            </body></html>"#,
        ))
        .mount(&server)
        .await;

    let outcome = crawl(&test_config(&format!("{}/", server.uri())))
        .await
        .expect("crawl failed");

    assert!(outcome.broken_links.is_empty());
    assert_eq!(outcome.pages_visited, 1);
    assert_eq!(exit_code(&outcome.broken_links), 0);
}

#[tokio::test]
async fn test_broken_url_reported_once_despite_many_referrers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<html><body><a href="/a">A</a> <a href="/b">B</a></body></html>"#,
        ))
        .mount(&server)
        .await;

    for page in ["/a", "/b"] {
        Mock::given(method("GET"))
            .and(path(page))
            .respond_with(html_page(
                r#"<html><body><a href="/dead">Dead</a></body></html>"#,
            ))
            .mount(&server)
            .await;
    }

    // Reachable from both /a and /b, but dequeued and fetched exactly once
    Mock::given(method("GET"))
        .and(path("/dead"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = crawl(&test_config(&format!("{}/", server.uri())))
        .await
        .expect("crawl failed");

    assert_eq!(outcome.broken_links.len(), 1);
}

#[tokio::test]
async fn test_cross_host_links_never_fetched() {
    let server = MockServer::start().await;
    let external = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(&format!(
            r#"<html><body><a href="{}/missing">External</a></body></html>"#,
            external.uri()
        )))
        .mount(&server)
        .await;

    // The external host must never see a request, even though the target
    // would be broken if fetched
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(0)
        .mount(&external)
        .await;

    let outcome = crawl(&test_config(&format!("{}/", server.uri())))
        .await
        .expect("crawl failed");

    assert!(outcome.broken_links.is_empty());
    assert!(outcome.metadata_records.is_empty());
}

#[tokio::test]
async fn test_fragment_variants_visited_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r##"<html><body>
            <a href="/page#intro">Intro</a>
            <a href="/page#details">Details</a>
            </body></html>"##,
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(html_page("<html><body>One page</body></html>"))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = crawl(&test_config(&format!("{}/", server.uri())))
        .await
        .expect("crawl failed");

    assert!(outcome.broken_links.is_empty());
    assert_eq!(outcome.pages_visited, 2);
}

#[tokio::test]
async fn test_acyclic_graph_terminates_clean() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<html><body><a href="/level1">L1</a></body></html>"#,
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/level1"))
        .respond_with(html_page(
            r#"<html><body><a href="/level2">L2</a> <a href="/">Home</a></body></html>"#,
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/level2"))
        .respond_with(html_page("<html><body>Leaf</body></html>"))
        .mount(&server)
        .await;

    let outcome = crawl(&test_config(&format!("{}/", server.uri())))
        .await
        .expect("crawl failed");

    assert!(outcome.broken_links.is_empty());
    assert_eq!(outcome.pages_visited, 3);
    assert_eq!(exit_code(&outcome.broken_links), 0);
}

#[tokio::test]
async fn test_bypass_header_sent_on_every_request() {
    let server = MockServer::start().await;

    // Mocks only match when the bypass header is present; a missing header
    // falls through to wiremock's default 404 and shows up as broken
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("x-vercel-protection-bypass", "test-key"))
        .respond_with(html_page(
            r#"<html><body><a href="/next">Next</a></body></html>"#,
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/next"))
        .and(header("x-vercel-protection-bypass", "test-key"))
        .respond_with(html_page("<html><body>Done</body></html>"))
        .mount(&server)
        .await;

    let outcome = crawl(&test_config(&format!("{}/", server.uri())))
        .await
        .expect("crawl failed");

    assert!(outcome.broken_links.is_empty());
    assert_eq!(outcome.pages_visited, 2);
}

#[tokio::test]
async fn test_redirects_followed_to_final_destination() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<html><body><a href="/moved">Moved</a></body></html>"#,
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/moved"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("location", format!("{}/final", server.uri()).as_str()),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/final"))
        .respond_with(html_page("<html><body>Landed</body></html>"))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = crawl(&test_config(&format!("{}/", server.uri())))
        .await
        .expect("crawl failed");

    assert!(outcome.broken_links.is_empty());
}

#[tokio::test]
async fn test_non_html_success_yields_no_links_or_metadata() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<html><body><a href="/report.pdf">Report</a></body></html>"#,
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/report.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(vec![0x25, 0x50, 0x44, 0x46]) // %PDF
                .insert_header("content-type", "application/pdf"),
        )
        .mount(&server)
        .await;

    let config = CrawlConfig {
        collect_metadata: true,
        ..test_config(&format!("{}/", server.uri()))
    };
    let outcome = crawl(&config).await.expect("crawl failed");

    assert!(outcome.broken_links.is_empty());
    // Only the HTML start page produces a metadata record
    assert_eq!(outcome.metadata_records.len(), 1);
    assert_eq!(outcome.pages_visited, 2);
}

#[tokio::test]
async fn test_invalid_start_url_is_fatal() {
    let result = crawl(&test_config("not a url")).await;
    assert!(result.is_err());
}
