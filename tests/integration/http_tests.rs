//! Integration tests against a mock HTTP site
//!
//! The crawler is blocking, so each crawl runs on a blocking thread while the
//! wiremock server keeps serving on the async runtime.

use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use word_ripple::config::CrawlerConfig;
use word_ripple::crawler::build_crawler;
use word_ripple::{
    CrawlResult, CrawlScheduler, CrawlSettings, HtmlPageParser, PageParser, ParseError, Profiler,
    SystemClock, WebCrawler,
};

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html")
}

/// Mounts a small site: `/` links to `/a` and `/b`, which link home; `/a` also links to a 404
async fn mount_site(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<h1>Welcome home</h1><a href="/a">A</a> <a href="b">B</a>"#,
        ))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(html(
            r#"<p>Rust rust RUST.</p><a href="/">Home</a><a href="/missing">Gone</a>"#,
        ))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(html(r#"<p>Crab, rust!</p><a href="/#top">Home</a>"#))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
}

fn crawl_blocking(
    settings: CrawlSettings,
    seeds: Vec<String>,
) -> tokio::task::JoinHandle<CrawlResult> {
    tokio::task::spawn_blocking(move || {
        let parser = HtmlPageParser::new(Duration::from_secs(5), vec![]).unwrap();
        let crawler =
            CrawlScheduler::new(settings, Arc::new(parser), Arc::new(SystemClock)).unwrap();
        crawler.crawl(&seeds)
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn test_crawl_mock_site() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let settings = CrawlSettings::new(Duration::from_secs(30), 10, 3).with_parallelism(4);
    let result = crawl_blocking(settings, vec![format!("{}/", server.uri())])
        .await
        .unwrap();

    // "/", "/a", "/b" and the failing "/missing"
    assert_eq!(result.urls_visited(), 4);
    assert_eq!(result.word_counts()[0], ("rust".to_string(), 4));
    assert_eq!(result.count_of("home"), Some(3));
    assert_eq!(result.count_of("crab"), Some(1));
    assert_eq!(result.count_of("welcome"), Some(1));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_depth_limits_mock_site() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let settings = CrawlSettings::new(Duration::from_secs(30), 10, 1);
    let result = crawl_blocking(settings, vec![format!("{}/", server.uri())])
        .await
        .unwrap();

    assert_eq!(result.urls_visited(), 1);
    assert_eq!(result.count_of("rust"), None);
    assert_eq!(result.count_of("welcome"), Some(1));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_http_error_status_is_parse_error() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let url = format!("{}/missing", server.uri());

    let outcome = tokio::task::spawn_blocking(move || {
        let parser = HtmlPageParser::new(Duration::from_secs(5), vec![]).unwrap();
        parser.parse(&url)
    })
    .await
    .unwrap();

    assert!(matches!(
        outcome,
        Err(ParseError::Status { status: 404, .. })
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_built_crawler_profiles_mock_site() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let config = CrawlerConfig {
        start_pages: vec![format!("{}/", server.uri())],
        ignored_urls: vec![".*/missing".to_string()],
        ignored_words: vec!["home".to_string()],
        parallelism: Some(2),
        implementation: None,
        max_depth: 3,
        timeout_seconds: 30,
        popular_word_count: 2,
    };

    let (result, report) = tokio::task::spawn_blocking(move || {
        let profiler = Profiler::new(Arc::new(SystemClock));
        let crawler = build_crawler(&config, &profiler, Arc::new(SystemClock)).unwrap();
        let result = crawler.crawl(&config.start_pages);

        let mut report = Vec::new();
        profiler.write_data(&mut report).unwrap();
        (result, String::from_utf8(report).unwrap())
    })
    .await
    .unwrap();

    assert_eq!(result.urls_visited(), 3);
    assert_eq!(result.count_of("home"), None);
    assert_eq!(result.word_counts().len(), 2);
    assert_eq!(result.word_counts()[0], ("rust".to_string(), 4));

    assert!(report.starts_with("Run at "));
    assert!(report.contains("#crawl took "));
    assert!(report.contains("HtmlPageParser#parse took "));
}
