//! Page parsing for the crawler
//!
//! The crawler treats page parsing as one synchronous call per URL that yields
//! the page's word counts and its outbound links. [`PageParser`] is that seam;
//! [`HtmlPageParser`] is the implementation that fetches and parses real pages.

mod fetcher;
mod html;

pub use fetcher::{build_http_client, fetch_page};
pub use html::{count_words, parse_html};

use crate::config::CrawlerConfig;
use crate::matcher::compile_patterns;
use crate::profiler::{CapabilitySet, Operation, Profiled};
use crate::{ParseError, RippleError};
use regex::Regex;
use reqwest::blocking::Client;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Words and links extracted from one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageParseResult {
    /// Occurrences of each word on the page
    pub word_counts: HashMap<String, u64>,

    /// Outbound links, in document order
    pub links: Vec<String>,
}

/// Produces the words and links of a page
pub trait PageParser: Send + Sync {
    /// Parses the page at `url`
    fn parse(&self, url: &str) -> Result<PageParseResult, ParseError>;
}

/// Operations of [`PageParser`] and which of them are profiled
pub const PAGE_PARSER_CAPABILITIES: CapabilitySet =
    CapabilitySet::new("PageParser", &[Operation::profiled("parse")]);

impl<P: PageParser> PageParser for Profiled<P> {
    fn parse(&self, url: &str) -> Result<PageParseResult, ParseError> {
        self.intercept("parse", |parser| parser.parse(url))
    }
}

/// Fetches pages over HTTP(S) or from disk and extracts their words and links
pub struct HtmlPageParser {
    client: Client,
    ignored_words: Vec<Regex>,
}

impl HtmlPageParser {
    /// Creates a parser whose requests time out after `timeout`
    pub fn new(timeout: Duration, ignored_words: Vec<Regex>) -> Result<Self, RippleError> {
        Ok(Self {
            client: build_http_client(timeout)?,
            ignored_words,
        })
    }

    /// Creates a parser from the crawler configuration
    pub fn from_config(config: &CrawlerConfig) -> Result<Self, RippleError> {
        let ignored_words = compile_patterns(&config.ignored_words)?;
        Self::new(config.timeout(), ignored_words)
    }
}

impl PageParser for HtmlPageParser {
    fn parse(&self, url: &str) -> Result<PageParseResult, ParseError> {
        let url = Url::parse(url)?;
        let body = fetch_page(&self.client, &url)?;
        Ok(parse_html(&body, &url, &self.ignored_words))
    }
}
