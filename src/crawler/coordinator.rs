//! Crawler assembly - turns configuration into a ready, profiled crawler
//!
//! This module wires the pieces of a crawl together:
//! - Building the page parser and wrapping it for profiling
//! - Choosing between the parallel and sequential crawler
//! - Wrapping the chosen crawler so whole crawls are timed
//! - Running a crawl over the configured start pages

use crate::clock::Clock;
use crate::config::{Config, CrawlerConfig, CrawlerImplementation};
use crate::crawler::{
    CrawlResult, CrawlScheduler, CrawlSettings, SequentialCrawler, WebCrawler,
    WEB_CRAWLER_CAPABILITIES,
};
use crate::parser::{HtmlPageParser, PageParser, PAGE_PARSER_CAPABILITIES};
use crate::profiler::Profiler;
use crate::RippleError;
use std::sync::Arc;

/// Builds the HTML page parser for `config`, profiled by `profiler`
pub fn build_page_parser(
    config: &CrawlerConfig,
    profiler: &Profiler,
) -> Result<Arc<dyn PageParser>, RippleError> {
    let parser = HtmlPageParser::from_config(config)?;
    Ok(Arc::new(profiler.wrap(&PAGE_PARSER_CAPABILITIES, parser)?))
}

/// Builds the crawler selected by `config`
///
/// Both the crawler and its page parser are wrapped by `profiler`, so the
/// report shows total crawl time next to the time spent parsing pages.
///
/// # Errors
///
/// Returns an error if a configured pattern does not compile, the HTTP client
/// or worker pool cannot be built, or a component cannot be profiled.
pub fn build_crawler(
    config: &CrawlerConfig,
    profiler: &Profiler,
    clock: Arc<dyn Clock>,
) -> Result<Box<dyn WebCrawler>, RippleError> {
    let settings = CrawlSettings::from_config(config)?;
    let parser = build_page_parser(config, profiler)?;

    // Wrapped inside each branch so the report names the concrete crawler
    let crawler: Box<dyn WebCrawler> = match config.implementation() {
        CrawlerImplementation::Parallel => {
            let scheduler = CrawlScheduler::new(settings, parser, clock)?;
            tracing::info!(
                "Using parallel crawler with {} worker threads",
                scheduler.worker_threads()
            );
            Box::new(profiler.wrap(&WEB_CRAWLER_CAPABILITIES, scheduler)?)
        }
        CrawlerImplementation::Sequential => {
            tracing::info!("Using sequential crawler");
            let crawler = SequentialCrawler::new(settings, parser, clock);
            Box::new(profiler.wrap(&WEB_CRAWLER_CAPABILITIES, crawler)?)
        }
    };

    Ok(crawler)
}

/// Runs one crawl over the configured start pages
///
/// # Example
///
/// ```no_run
/// use word_ripple::config::load_config;
/// use word_ripple::crawler::run_crawl;
/// use word_ripple::{Profiler, SystemClock};
/// use std::path::Path;
/// use std::sync::Arc;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// let profiler = Profiler::new(Arc::new(SystemClock));
/// let result = run_crawl(&config, &profiler, Arc::new(SystemClock))?;
/// println!("{} URLs visited", result.urls_visited());
/// # Ok(())
/// # }
/// ```
pub fn run_crawl(
    config: &Config,
    profiler: &Profiler,
    clock: Arc<dyn Clock>,
) -> Result<CrawlResult, RippleError> {
    let crawler = build_crawler(&config.crawler, profiler, clock)?;
    Ok(crawler.crawl(&config.crawler.start_pages))
}
