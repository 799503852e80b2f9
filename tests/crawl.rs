// tests/crawl.rs
// =============================================================================
// End-to-end crawl tests against local mock servers.
//
// Each test serves a small site from an httpmock MockServer. A second server
// (different port, so a different host) or a closed port stands in for
// external sites.
// =============================================================================

use broken_link_checker::crawl::{CrawlOrigin, CrawlRun, Crawler, LinkRecord, NoProgress};
use broken_link_checker::{crawl_site, CrawlConfig, CrawlError};
use httpmock::Method::{self, GET, HEAD};
use httpmock::{Mock, MockServer};
use std::time::Duration;

// Nothing listens on port 1, so connections are refused right away
const DEAD_LINK: &str = "http://127.0.0.1:1/x";

fn page(links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!("<a href=\"{}\">link</a>", href))
        .collect();
    format!("<html><body>{}</body></html>", anchors)
}

// Serves an HTML page linking to `links` on GET `path`
async fn serve_page<'a>(server: &'a MockServer, path: &str, links: &[&str]) -> Mock<'a> {
    let body = page(links);
    server
        .mock_async(|when, then| {
            when.method(GET).path(path);
            then.status(200).body(body);
        })
        .await
}

// Answers `method` on `path` with a bare status code
async fn serve_status<'a>(server: &'a MockServer, method: Method, path: &str, status: u16) -> Mock<'a> {
    server
        .mock_async(|when, then| {
            when.method(method).path(path);
            then.status(status);
        })
        .await
}

fn config(max_depth: usize) -> CrawlConfig {
    CrawlConfig {
        max_depth,
        check_timeout: Duration::from_secs(2),
        page_timeout: Duration::from_secs(2),
        ..CrawlConfig::default()
    }
}

async fn crawl(server: &MockServer, config: CrawlConfig) -> CrawlRun {
    let origin = CrawlOrigin::parse(&server.url("/")).unwrap();
    let crawler = Crawler::new(origin, config).unwrap();
    crawler.run(&mut NoProgress).await
}

fn record(url: String, status: Option<u16>, reachable: bool, note: &str) -> LinkRecord {
    LinkRecord {
        url,
        status,
        reachable,
        note: note.to_string(),
    }
}

#[tokio::test]
async fn test_internal_and_external_links() {
    let server = MockServer::start_async().await;
    serve_page(&server, "/", &["/about", DEAD_LINK]).await;
    serve_status(&server, HEAD, "/about", 200).await;
    let about_page = serve_page(&server, "/about", &["/team"]).await;
    serve_status(&server, HEAD, "/team", 200).await;
    let team_page = serve_page(&server, "/team", &[]).await;

    let run = crawl(&server, config(1)).await;
    let summary = run.summarize();

    assert_eq!(
        summary.links,
        vec![
            record(server.url("/about"), Some(200), true, ""),
            record(server.url("/team"), Some(200), true, ""),
            record(DEAD_LINK.to_string(), None, false, ""),
        ]
    );
    assert_eq!(summary.total, 3);
    assert_eq!(summary.working, 2);
    assert_eq!(summary.broken, 1);

    // /about is at depth 1 and gets fetched; /team would be depth 2
    about_page.assert_async().await;
    team_page.assert_hits_async(0).await;
    assert_eq!(run.stats.pages_fetched, 2);
}

#[tokio::test]
async fn test_depth_zero_only_fetches_seed() {
    let server = MockServer::start_async().await;
    let seed = serve_page(&server, "/", &["/a", "/b"]).await;
    serve_status(&server, HEAD, "/a", 200).await;
    serve_status(&server, HEAD, "/b", 200).await;
    let page_a = serve_page(&server, "/a", &[]).await;
    let page_b = serve_page(&server, "/b", &[]).await;

    let run = crawl(&server, config(0)).await;

    seed.assert_async().await;
    page_a.assert_hits_async(0).await;
    page_b.assert_hits_async(0).await;
    assert_eq!(run.records.len(), 2);
    assert!(run.records.iter().all(|r| r.reachable));
    assert_eq!(run.visited.len(), 1);
}

#[tokio::test]
async fn test_failing_seed_yields_single_page_error() {
    let server = MockServer::start_async().await;
    serve_status(&server, GET, "/", 404).await;

    let run = crawl(&server, config(2)).await;
    let summary = run.summarize();

    assert_eq!(
        run.records,
        vec![record(server.url("/"), None, false, "PAGE ERROR")]
    );
    assert_eq!((summary.total, summary.working, summary.broken), (1, 0, 1));
    assert_eq!(run.stats.pages_failed, 1);
}

#[tokio::test]
async fn test_link_cycle_terminates() {
    let server = MockServer::start_async().await;
    let home = serve_page(&server, "/", &["/b"]).await;
    serve_status(&server, HEAD, "/b", 200).await;
    let b = serve_page(&server, "/b", &["/", "/b"]).await;

    let run = crawl(&server, config(3)).await;

    home.assert_async().await;
    b.assert_async().await;
    // "/" and "/b" are both visited pages by the time /b's links are looked at
    assert_eq!(run.records, vec![record(server.url("/b"), Some(200), true, "")]);
    assert_eq!(run.visited.len(), 2);
}

#[tokio::test]
async fn test_external_links_are_checked_not_crawled() {
    let site = MockServer::start_async().await;
    let external = MockServer::start_async().await;
    let external_url = external.url("/page");

    serve_page(&site, "/", &[external_url.as_str()]).await;
    let external_head = serve_status(&external, HEAD, "/page", 200).await;
    let external_get = serve_page(&external, "/page", &["/elsewhere"]).await;

    let run = crawl(&site, config(3)).await;

    external_head.assert_async().await;
    external_get.assert_hits_async(0).await;
    assert_eq!(run.records, vec![record(external_url, Some(200), true, "")]);
}

#[tokio::test]
async fn test_host_spelling_decides_scope() {
    let server = MockServer::start_async().await;
    let port = server.address().port();
    let shouting = format!("http://LOCALHOST:{}/page", port);
    serve_page(&server, "/", &[shouting.as_str()]).await;
    let head = serve_status(&server, HEAD, "/page", 200).await;
    let page = serve_page(&server, "/page", &["/deeper"]).await;

    // Same server, but the link spells the host differently from the seed
    let origin = CrawlOrigin::parse(&format!("http://localhost:{}/", port)).unwrap();
    assert_eq!(origin.host, format!("localhost:{}", port));
    let run = Crawler::new(origin, config(2)).unwrap().run(&mut NoProgress).await;

    head.assert_async().await;
    page.assert_hits_async(0).await;
    assert_eq!(
        run.records,
        vec![record(format!("http://localhost:{}/page", port), Some(200), true, "")]
    );
    assert_eq!(run.visited.len(), 1);
}

// Site used by the ordering tests:
//   /   -> /a /c /d dead
//   /a  -> /b /c
//   /d answers HEAD with 404 but still serves a page
async fn ordering_site(server: &MockServer) {
    serve_page(server, "/", &["/a", "/c", "/d", DEAD_LINK]).await;
    serve_page(server, "/a", &["/b", "/c"]).await;
    for path in ["/b", "/c", "/d"] {
        serve_page(server, path, &[]).await;
    }
    for path in ["/a", "/b", "/c"] {
        serve_status(server, HEAD, path, 200).await;
    }
    serve_status(server, HEAD, "/d", 404).await;
}

#[tokio::test]
async fn test_progress_follows_depth_first_order() {
    let server = MockServer::start_async().await;
    ordering_site(&server).await;

    let origin = CrawlOrigin::parse(&server.url("/")).unwrap();
    let crawler = Crawler::new(origin, config(2)).unwrap();
    let mut seen = Vec::new();
    let run = crawler
        .run(&mut |r: &LinkRecord| seen.push(r.url.clone()))
        .await;

    // /c is checked from /a; by the time the seed page gets to it, it is a
    // visited page and is skipped
    let expected = vec![
        server.url("/a"),
        server.url("/b"),
        server.url("/c"),
        server.url("/d"),
        DEAD_LINK.to_string(),
    ];
    assert_eq!(seen, expected);
    let recorded: Vec<_> = run.records.iter().map(|r| r.url.clone()).collect();
    assert_eq!(recorded, expected);
}

#[tokio::test]
async fn test_concurrent_checks_keep_order() {
    let server = MockServer::start_async().await;
    ordering_site(&server).await;

    let sequential = crawl(&server, config(2)).await;
    let concurrent = crawl(
        &server,
        CrawlConfig {
            check_concurrency: 4,
            ..config(2)
        },
    )
    .await;

    assert_eq!(concurrent.records, sequential.records);
    assert_eq!(concurrent.visited, sequential.visited);
    assert_eq!(
        sequential.summarize().broken_links().map(|r| r.url.clone()).collect::<Vec<_>>(),
        vec![server.url("/d"), DEAD_LINK.to_string()]
    );
}

#[tokio::test]
async fn test_internal_page_failure_overrides_check() {
    let server = MockServer::start_async().await;
    serve_page(&server, "/", &["/flaky"]).await;
    serve_status(&server, HEAD, "/flaky", 200).await;
    serve_status(&server, GET, "/flaky", 500).await;

    let run = crawl(&server, config(1)).await;
    assert_eq!(
        run.records,
        vec![
            record(server.url("/flaky"), Some(200), true, ""),
            record(server.url("/flaky"), None, false, "PAGE ERROR"),
        ]
    );

    let summary = run.summarize();
    assert_eq!(
        summary.links,
        vec![record(server.url("/flaky"), None, false, "PAGE ERROR")]
    );
    assert_eq!(summary.broken, 1);
}

// Two pages that both link to /shared
async fn shared_link_site(server: &MockServer) -> Mock<'_> {
    serve_page(server, "/", &["/p1", "/p2"]).await;
    for path in ["/p1", "/p2"] {
        serve_page(server, path, &["/shared"]).await;
        serve_status(server, HEAD, path, 200).await;
    }
    serve_status(server, HEAD, "/shared", 200).await
}

#[tokio::test]
async fn test_shared_link_is_checked_once_per_page() {
    let server = MockServer::start_async().await;
    let shared = shared_link_site(&server).await;

    let run = crawl(&server, config(1)).await;

    shared.assert_hits_async(2).await;
    assert_eq!(run.records.len(), 4);
    assert_eq!(run.stats.links_checked, 4);
    assert_eq!(run.summarize().total, 3);
}

#[tokio::test]
async fn test_dedupe_checks_probes_shared_link_once() {
    let server = MockServer::start_async().await;
    let shared = shared_link_site(&server).await;

    let run = crawl(
        &server,
        CrawlConfig {
            dedupe_checks: true,
            ..config(1)
        },
    )
    .await;

    shared.assert_hits_async(1).await;
    assert_eq!(run.records.len(), 4);
    assert_eq!(run.stats.links_checked, 3);
    assert_eq!(run.summarize().total, 3);
}

#[tokio::test]
async fn test_non_http_references() {
    let server = MockServer::start_async().await;
    serve_page(&server, "/", &["mailto:team@example.com", "/ok"]).await;
    serve_status(&server, HEAD, "/ok", 200).await;
    serve_page(&server, "/ok", &[]).await;

    // A host-less reference counts as internal, so it is also "fetched" and fails
    let run = crawl(&server, config(1)).await;
    assert_eq!(
        run.summarize().links,
        vec![
            record("mailto:team@example.com".to_string(), None, false, "PAGE ERROR"),
            record(server.url("/ok"), Some(200), true, ""),
        ]
    );

    let run = crawl(
        &server,
        CrawlConfig {
            http_only: true,
            ..config(1)
        },
    )
    .await;
    assert_eq!(
        run.summarize().links,
        vec![record(server.url("/ok"), Some(200), true, "")]
    );
}

#[tokio::test]
async fn test_crawl_site_summarizes() {
    let server = MockServer::start_async().await;
    serve_page(&server, "/", &["/missing", "/missing#part"]).await;
    serve_status(&server, HEAD, "/missing", 404).await;

    let mut checked = 0;
    let summary = crawl_site(&server.url("/"), config(0), &mut |_: &LinkRecord| checked += 1)
        .await
        .unwrap();

    assert_eq!(checked, 2);
    assert_eq!(summary.total, 2);
    assert_eq!(summary.broken, 2);
    assert_eq!(summary.working + summary.broken, summary.total);
    assert!(summary.links.iter().all(|r| r.status == Some(404)));
}

#[tokio::test]
async fn test_crawl_site_rejects_invalid_seed() {
    let err = crawl_site("example.com/no-scheme", config(1), &mut NoProgress)
        .await
        .unwrap_err();
    assert!(matches!(err, CrawlError::InvalidUrl { .. }));
}

#[tokio::test]
async fn test_estimate_counts_seed_links() {
    let server = MockServer::start_async().await;
    serve_page(&server, "/", &["/a", "/b", "/a"]).await;

    let origin = CrawlOrigin::parse(&server.url("/")).unwrap();
    let crawler = Crawler::new(origin, config(1)).unwrap();
    assert_eq!(crawler.estimate_links().await, 2);
}
