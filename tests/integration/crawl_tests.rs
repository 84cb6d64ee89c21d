//! Integration tests for the crawlers
//!
//! Most tests crawl an in-memory link graph so the visit rules can be checked
//! exactly; the last ones crawl a small site of local HTML files.

use crate::common::{epoch, seeds, tree_parser, GraphParser};
use std::fs;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use url::Url;
use word_ripple::config::parse_config;
use word_ripple::crawler::{run_crawl, WEB_CRAWLER_CAPABILITIES};
use word_ripple::matcher::compile_patterns;
use word_ripple::parser::PAGE_PARSER_CAPABILITIES;
use word_ripple::profiler::ProfiledKey;
use word_ripple::{
    CrawlScheduler, CrawlSettings, HtmlPageParser, ManualClock, Profiler, SequentialCrawler,
    SystemClock, WebCrawler,
};

fn settings(max_depth: u32) -> CrawlSettings {
    CrawlSettings::new(Duration::from_secs(60), 100, max_depth).with_parallelism(4)
}

fn scheduler(settings: CrawlSettings, parser: &Arc<GraphParser>) -> CrawlScheduler {
    CrawlScheduler::new(
        settings,
        parser.clone(),
        Arc::new(ManualClock::new(epoch())),
    )
    .unwrap()
}

#[test]
fn test_shared_page_visited_once() {
    let parser = Arc::new(
        GraphParser::new()
            .page("http://site/a", &[("alpha", 1)], &["http://site/c"])
            .page("http://site/b", &[("beta", 1)], &["http://site/c"])
            .page("http://site/c", &[("shared", 4)], &[]),
    );

    let result =
        scheduler(settings(3), &parser).crawl(&seeds(&["http://site/a", "http://site/b"]));

    assert_eq!(result.urls_visited(), 3);
    assert_eq!(parser.calls("http://site/c"), 1);
    assert_eq!(result.count_of("shared"), Some(4));
}

#[test]
fn test_cycle_terminates() {
    let parser = Arc::new(
        GraphParser::new()
            .page("http://site/a", &[("ping", 1)], &["http://site/b"])
            .page("http://site/b", &[("pong", 1)], &["http://site/a"]),
    );

    let result = scheduler(settings(50), &parser).crawl(&seeds(&["http://site/a"]));

    assert_eq!(result.urls_visited(), 2);
    assert_eq!(parser.total_calls(), 2);
}

#[test]
fn test_zero_depth_visits_nothing() {
    let parser = Arc::new(tree_parser(3));

    let result = scheduler(settings(0), &parser).crawl(&seeds(&["n"]));

    assert_eq!(result.urls_visited(), 0);
    assert!(result.word_counts().is_empty());
    assert_eq!(parser.total_calls(), 0);
}

#[test]
fn test_depth_one_visits_only_seeds() {
    let parser = Arc::new(tree_parser(3));

    let result = scheduler(settings(1), &parser).crawl(&seeds(&["n", "n0"]));

    assert_eq!(result.urls_visited(), 2);
    assert_eq!(parser.calls("n00"), 0);
}

#[test]
fn test_depth_bounds_tree() {
    let parser = Arc::new(tree_parser(6));

    let result = scheduler(settings(4), &parser).crawl(&seeds(&["n"]));

    assert_eq!(result.urls_visited(), 15);
    assert_eq!(result.count_of("node"), Some(15));
}

#[test]
fn test_ignored_seed_and_its_links_are_skipped() {
    let parser = Arc::new(
        GraphParser::new()
            .page("http://site/a", &[("hidden", 1)], &["http://site/c"])
            .page("http://site/b", &[("shown", 1)], &[])
            .page("http://site/c", &[("deep", 1)], &[]),
    );
    let ignored = compile_patterns(&["http://site/a".to_string()]).unwrap();

    let result = scheduler(settings(3).with_ignored_urls(ignored), &parser)
        .crawl(&seeds(&["http://site/a", "http://site/b"]));

    assert_eq!(result.urls_visited(), 1);
    assert_eq!(parser.calls("http://site/a"), 0);
    assert_eq!(parser.calls("http://site/c"), 0);
    assert_eq!(result.count_of("shown"), Some(1));
}

#[test]
fn test_ignore_patterns_match_whole_url() {
    let parser = Arc::new(GraphParser::new().page("http://site/a", &[("word", 1)], &[]));

    let partial = compile_patterns(&["site".to_string()]).unwrap();
    let result = scheduler(settings(1).with_ignored_urls(partial), &parser)
        .crawl(&seeds(&["http://site/a"]));
    assert_eq!(result.urls_visited(), 1);

    let whole = compile_patterns(&["http://site/.*".to_string()]).unwrap();
    let result = scheduler(settings(1).with_ignored_urls(whole), &parser)
        .crawl(&seeds(&["http://site/a"]));
    assert_eq!(result.urls_visited(), 0);
}

#[test]
fn test_zero_timeout_visits_nothing() {
    let parser = Arc::new(tree_parser(3));
    let settings = CrawlSettings::new(Duration::ZERO, 10, 3).with_parallelism(4);

    let result = scheduler(settings, &parser).crawl(&seeds(&["n"]));

    assert_eq!(result.urls_visited(), 0);
    assert!(result.word_counts().is_empty());
}

#[test]
fn test_deadline_stops_crawl() {
    let clock = Arc::new(ManualClock::new(epoch()));
    let mut parser = GraphParser::new();
    for i in 0..20 {
        let next = format!("p{}", i + 1);
        parser = parser.page(&format!("p{}", i), &[("hop", 1)], &[next.as_str()]);
    }
    let parser =
        Arc::new(parser.with_parse_time(Arc::clone(&clock), chrono::Duration::seconds(1)));

    let settings = CrawlSettings::new(Duration::from_secs(3), 10, 100).with_parallelism(2);
    let crawler = CrawlScheduler::new(settings, parser, clock).unwrap();
    let result = crawler.crawl(&seeds(&["p0"]));

    // One second per page: pages started at t=0, 1 and 2 fit before the deadline
    assert_eq!(result.urls_visited(), 3);
    assert_eq!(result.count_of("hop"), Some(3));
}

#[test]
fn test_parse_failure_is_skipped() {
    let parser = Arc::new(
        GraphParser::new()
            .page("http://site/a", &[("lost", 1)], &["http://site/c"])
            .page("http://site/b", &[("kept", 2)], &[])
            .broken("http://site/a"),
    );

    let result =
        scheduler(settings(3), &parser).crawl(&seeds(&["http://site/a", "http://site/b"]));

    assert_eq!(result.urls_visited(), 2);
    assert_eq!(result.count_of("kept"), Some(2));
    assert_eq!(result.count_of("lost"), None);
    assert_eq!(parser.calls("http://site/c"), 0);
}

#[test]
fn test_ranking_breaks_ties_by_length_then_alphabet() {
    let parser = Arc::new(GraphParser::new().page(
        "http://site/a",
        &[("the", 5), ("a", 5), ("cat", 3), ("dog", 3), ("mouse", 3)],
        &[],
    ));
    let settings = CrawlSettings::new(Duration::from_secs(60), 4, 1);

    let result = scheduler(settings, &parser).crawl(&seeds(&["http://site/a"]));

    let ranked: Vec<(&str, u64)> = result
        .word_counts()
        .iter()
        .map(|(word, count)| (word.as_str(), *count))
        .collect();
    assert_eq!(ranked, vec![("the", 5), ("a", 5), ("mouse", 3), ("cat", 3)]);
}

#[test]
fn test_sequential_matches_parallel() {
    let parser = Arc::new(tree_parser(7));
    let start = seeds(&["n"]);

    let parallel = scheduler(settings(6).with_parallelism(8), &parser).crawl(&start);
    let sequential = SequentialCrawler::new(
        settings(6),
        parser.clone(),
        Arc::new(ManualClock::new(epoch())),
    )
    .crawl(&start);

    assert_eq!(parallel.urls_visited(), 63);
    assert_eq!(parallel, sequential);
}

#[test]
fn test_profiled_crawl_records_crawl_and_parse_time() {
    let clock = Arc::new(ManualClock::new(epoch()));
    let profiler = Profiler::new(clock.clone());
    let graph = GraphParser::new()
        .page("http://site/a", &[("one", 1)], &["http://site/b", "http://site/c"])
        .with_parse_time(Arc::clone(&clock), chrono::Duration::milliseconds(10));

    let parser = profiler.wrap(&PAGE_PARSER_CAPABILITIES, graph).unwrap();
    // One worker so parse timings never overlap on the shared clock
    let settings = settings(2).with_parallelism(1);
    let crawler = CrawlScheduler::new(settings, Arc::new(parser), clock.clone()).unwrap();
    let crawler = profiler.wrap(&WEB_CRAWLER_CAPABILITIES, crawler).unwrap();

    let result = crawler.crawl(&seeds(&["http://site/a"]));
    assert_eq!(result.urls_visited(), 3);

    let parse_key = ProfiledKey::new(std::any::type_name::<GraphParser>(), "parse");
    let crawl_key = ProfiledKey::new(std::any::type_name::<CrawlScheduler>(), "crawl");
    assert_eq!(
        profiler.state().total(&parse_key),
        Some(Duration::from_millis(30))
    );
    assert_eq!(
        profiler.state().total(&crawl_key),
        Some(Duration::from_millis(30))
    );

    let mut report = Vec::new();
    profiler.write_data(&mut report).unwrap();
    let report = String::from_utf8(report).unwrap();
    assert!(report.contains("CrawlScheduler#crawl took 0m 0s 30ms\n"));
    assert!(report.contains("GraphParser#parse took 0m 0s 30ms\n"));
}

/// Writes a two-page site that links back to itself
fn write_site(dir: &TempDir) -> String {
    fs::write(
        dir.path().join("index.html"),
        r#"<html><head><title>Ignored title</title></head><body>
        <p>The ripple spreads. The ripple fades!</p>
        <a href="about.html">About</a>
        <script>var hidden = 1;</script>
        </body></html>"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("about.html"),
        r#"<html><body>
        <h1>About ripples</h1>
        <p>A ripple is small.</p>
        <a href="index.html#top">Home</a>
        </body></html>"#,
    )
    .unwrap();

    Url::from_file_path(dir.path().join("index.html"))
        .unwrap()
        .to_string()
}

#[test]
fn test_crawl_local_site() {
    let dir = TempDir::new().unwrap();
    let index = write_site(&dir);
    let ignored_words = compile_patterns(&["the".to_string(), "a".to_string()]).unwrap();
    let parser = HtmlPageParser::new(Duration::from_secs(5), ignored_words).unwrap();

    let crawler =
        CrawlScheduler::new(settings(5), Arc::new(parser), Arc::new(SystemClock)).unwrap();
    let result = crawler.crawl(&[index]);

    assert_eq!(result.urls_visited(), 2);
    assert_eq!(result.word_counts()[0], ("ripple".to_string(), 3));
    assert_eq!(result.word_counts()[1], ("about".to_string(), 2));
    assert_eq!(result.count_of("home"), Some(1));
    assert_eq!(result.count_of("the"), None);
    assert_eq!(result.count_of("a"), None);
    assert_eq!(result.count_of("hidden"), None);
    assert_eq!(result.count_of("title"), None);
}

#[test]
fn test_run_crawl_from_config() {
    let dir = TempDir::new().unwrap();
    let index = write_site(&dir);
    let config = parse_config(&format!(
        r#"
[crawler]
start-pages = ["{}"]
ignored-words = ["the", "a", "is"]
parallelism = 1
max-depth = 2
timeout-seconds = 30
popular-word-count = 2
"#,
        index
    ))
    .unwrap();
    let profiler = Profiler::new(Arc::new(SystemClock));

    let result = run_crawl(&config, &profiler, Arc::new(SystemClock)).unwrap();

    assert_eq!(result.urls_visited(), 2);
    assert_eq!(
        result.word_counts(),
        &[("ripple".to_string(), 3), ("about".to_string(), 2)]
    );

    let keys: Vec<String> = profiler
        .state()
        .snapshot()
        .into_iter()
        .map(|(key, _)| key.to_string())
        .collect();
    assert_eq!(keys.len(), 2);
    assert!(keys.iter().any(|key| key.ends_with("HtmlPageParser#parse")));
    assert!(keys.iter().any(|key| key.ends_with("SequentialCrawler#crawl")));
}
