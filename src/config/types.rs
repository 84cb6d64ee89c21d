use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Word-Ripple
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Seed URLs the crawl starts from
    #[serde(rename = "start-pages", default)]
    pub start_pages: Vec<String>,

    /// Patterns of URLs that are never visited (full-string match)
    #[serde(rename = "ignored-urls", default)]
    pub ignored_urls: Vec<String>,

    /// Patterns of words that are never counted (full-string match)
    #[serde(rename = "ignored-words", default)]
    pub ignored_words: Vec<String>,

    /// Number of worker threads; defaults to the hardware parallelism
    #[serde(default)]
    pub parallelism: Option<u32>,

    /// Forces a crawler implementation regardless of `parallelism`
    #[serde(default)]
    pub implementation: Option<CrawlerImplementation>,

    /// Maximum link depth followed from each seed
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Wall-clock budget for the whole crawl, in seconds
    #[serde(rename = "timeout-seconds")]
    pub timeout_seconds: u64,

    /// Number of top-ranked words kept in the result
    #[serde(rename = "popular-word-count")]
    pub popular_word_count: u32,
}

impl CrawlerConfig {
    /// Returns the crawl timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Returns the configured parallelism, or the hardware parallelism when unset
    pub fn parallelism(&self) -> usize {
        self.parallelism
            .map(|p| p as usize)
            .unwrap_or_else(crate::crawler::hardware_parallelism)
    }

    /// Resolves which crawler implementation to build
    ///
    /// An explicit `implementation` wins. Otherwise a parallelism of one selects
    /// the sequential crawler and anything larger selects the parallel one.
    pub fn implementation(&self) -> CrawlerImplementation {
        match self.implementation {
            Some(implementation) => implementation,
            None if self.parallelism() <= 1 => CrawlerImplementation::Sequential,
            None => CrawlerImplementation::Parallel,
        }
    }
}

/// Available crawler implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrawlerImplementation {
    /// Fork/join crawl on a worker pool
    Parallel,
    /// Depth-first crawl on the calling thread
    Sequential,
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Path of the JSON crawl result; stdout when unset or empty
    #[serde(rename = "result-path", default)]
    pub result_path: Option<String>,

    /// Path of the profiling report; stdout when unset or empty
    #[serde(rename = "profile-output-path", default)]
    pub profile_output_path: Option<String>,
}

impl OutputConfig {
    /// Returns the result path if one is configured
    pub fn result_path(&self) -> Option<&str> {
        self.result_path.as_deref().filter(|p| !p.is_empty())
    }

    /// Returns the profile output path if one is configured
    pub fn profile_output_path(&self) -> Option<&str> {
        self.profile_output_path.as_deref().filter(|p| !p.is_empty())
    }
}
