//! Word-Ripple: a bounded, parallel word-frequency crawler
//!
//! This crate crawls outward from a set of seed URLs up to a maximum link depth
//! and a wall-clock deadline, counts the words on every page it visits exactly
//! once, and reports the most popular words. A profiling layer can wrap any
//! component to measure how long its operations take.

pub mod clock;
pub mod config;
pub mod crawler;
pub mod matcher;
pub mod output;
pub mod parser;
pub mod profiler;

use thiserror::Error;

/// Main error type for Word-Ripple operations
#[derive(Debug, Error)]
pub enum RippleError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Page parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Profiler error: {0}")]
    Profiler(#[from] profiler::ProfilerError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

/// Errors raised while fetching or parsing a single page
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to read {url}: {source}")]
    Io {
        url: String,
        source: std::io::Error,
    },

    #[error("Failed to parse URL: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("URL does not name a local file: {0}")]
    NotAFilePath(String),
}

/// Result type alias for Word-Ripple operations
pub type Result<T> = std::result::Result<T, RippleError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for page parsing operations
pub type ParseResult<T> = std::result::Result<T, ParseError>;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use crawler::{CrawlResult, CrawlScheduler, CrawlSettings, SequentialCrawler, WebCrawler};
pub use parser::{HtmlPageParser, PageParseResult, PageParser};
pub use profiler::{CapabilitySet, Operation, Profiled, Profiler};
