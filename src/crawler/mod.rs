//! Crawler module for bounded word-frequency crawls
//!
//! This module contains the core crawling logic, including:
//! - The fork/join task tree and its worker pool
//! - Depth and deadline cutoffs with exactly-once visitation
//! - Deterministic ranking of the merged word counts
//! - Building a (profiled) crawler from configuration

mod context;
mod coordinator;
mod ranking;
mod result;
mod scheduler;
mod sequential;
mod task;

pub use context::{deadline_after, CrawlContext};
pub use coordinator::{build_crawler, build_page_parser, run_crawl};
pub use ranking::{compare_word_counts, rank_words};
pub use result::CrawlResult;
pub use scheduler::CrawlScheduler;
pub use sequential::SequentialCrawler;
pub use task::CrawlTask;

use crate::config::CrawlerConfig;
use crate::matcher::compile_patterns;
use crate::profiler::{CapabilitySet, Operation, Profiled};
use crate::ConfigError;
use regex::Regex;
use std::num::NonZeroUsize;
use std::time::Duration;

/// A crawler that turns seed URLs into ranked word counts
pub trait WebCrawler: Send + Sync {
    /// Crawls from `starting_urls` and returns the popular words found
    fn crawl(&self, starting_urls: &[String]) -> CrawlResult;

    /// Largest number of threads this crawler can make use of
    fn max_parallelism(&self) -> usize;
}

/// Operations of [`WebCrawler`] and which of them are profiled
pub const WEB_CRAWLER_CAPABILITIES: CapabilitySet = CapabilitySet::new(
    "WebCrawler",
    &[
        Operation::profiled("crawl"),
        Operation::passthrough("max_parallelism"),
    ],
);

impl<C: WebCrawler> WebCrawler for Profiled<C> {
    fn crawl(&self, starting_urls: &[String]) -> CrawlResult {
        self.intercept("crawl", |crawler| crawler.crawl(starting_urls))
    }

    fn max_parallelism(&self) -> usize {
        self.intercept("max_parallelism", |crawler| crawler.max_parallelism())
    }
}

/// Number of threads the hardware can run at once
pub fn hardware_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Limits applied to one crawl
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    /// Wall-clock budget measured from the start of each crawl
    pub timeout: Duration,

    /// Number of top-ranked words kept
    pub popular_word_count: usize,

    /// Maximum link depth from each seed; zero visits nothing
    pub max_depth: u32,

    /// URLs matching any of these are never visited
    pub ignored_urls: Vec<Regex>,

    /// Requested worker threads, capped by the hardware
    pub parallelism: usize,
}

impl CrawlSettings {
    /// Creates settings with no ignored URLs and full hardware parallelism
    pub fn new(timeout: Duration, popular_word_count: usize, max_depth: u32) -> Self {
        Self {
            timeout,
            popular_word_count,
            max_depth,
            ignored_urls: Vec::new(),
            parallelism: hardware_parallelism(),
        }
    }

    pub fn with_ignored_urls(mut self, ignored_urls: Vec<Regex>) -> Self {
        self.ignored_urls = ignored_urls;
        self
    }

    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Builds settings from the crawler configuration, compiling its URL patterns
    pub fn from_config(config: &CrawlerConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            config.timeout(),
            config.popular_word_count as usize,
            config.max_depth,
        )
        .with_ignored_urls(compile_patterns(&config.ignored_urls)?)
        .with_parallelism(config.parallelism()))
    }
}
