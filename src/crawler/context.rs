//! Shared state of one crawl invocation and the single-URL visit procedure

use crate::clock::Clock;
use crate::matcher::matches_any;
use crate::parser::PageParser;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Returns the instant `timeout` after `start`, saturating far in the future
pub fn deadline_after(start: DateTime<Utc>, timeout: Duration) -> DateTime<Utc> {
    chrono::Duration::from_std(timeout)
        .ok()
        .and_then(|timeout| start.checked_add_signed(timeout))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// State shared by every branch of one crawl
///
/// Marking a URL visited is an atomic check-and-insert, so each URL is parsed
/// by exactly one branch. A page's word counts are merged under a single lock
/// acquisition, so no branch observes half of a page. Parsing and link
/// recursion run outside both locks.
pub struct CrawlContext<'a> {
    clock: &'a dyn Clock,
    parser: &'a dyn PageParser,
    ignored_urls: &'a [Regex],
    deadline: DateTime<Utc>,
    visited: Mutex<HashSet<String>>,
    word_counts: Mutex<HashMap<String, u64>>,
}

impl<'a> CrawlContext<'a> {
    pub fn new(
        clock: &'a dyn Clock,
        parser: &'a dyn PageParser,
        ignored_urls: &'a [Regex],
        deadline: DateTime<Utc>,
    ) -> Self {
        Self {
            clock,
            parser,
            ignored_urls,
            deadline,
            visited: Mutex::new(HashSet::new()),
            word_counts: Mutex::new(HashMap::new()),
        }
    }

    /// Visits `url` with `depth` levels of links still allowed, then its links
    ///
    /// Links are followed depth-first in document order from an explicit
    /// worklist, so arbitrarily long link chains use constant stack.
    ///
    /// Depth exhaustion, a passed deadline, an ignored URL and an already
    /// visited URL all end a visit silently. A page that fails to parse stays
    /// visited but contributes no words or links.
    pub fn visit(&self, url: &str, depth: u32) {
        let mut pending = vec![(url.to_string(), depth)];

        while let Some((url, depth)) = pending.pop() {
            let Some(links) = self.visit_page(&url, depth) else {
                continue;
            };

            // Reversed so the first link is popped first
            pending.extend(links.into_iter().rev().map(|link| (link, depth - 1)));
        }
    }

    /// Visits a single page, returning its links if it was parsed
    fn visit_page(&self, url: &str, depth: u32) -> Option<Vec<String>> {
        if depth == 0 || self.deadline_passed() {
            return None;
        }

        if matches_any(self.ignored_urls, url) {
            tracing::trace!("Ignoring {}", url);
            return None;
        }

        if !self.mark_visited(url) {
            return None;
        }

        let page = match self.parser.parse(url) {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", url, e);
                return None;
            }
        };

        tracing::debug!(
            "Visited {} ({} distinct words, {} links, depth {})",
            url,
            page.word_counts.len(),
            page.links.len(),
            depth
        );

        self.merge_word_counts(page.word_counts);

        // Links of a page at depth one could never be visited
        if depth == 1 {
            return None;
        }
        Some(page.links)
    }

    /// A deadline equal to the current instant counts as passed
    fn deadline_passed(&self) -> bool {
        self.clock.now() >= self.deadline
    }

    /// Returns true if `url` was not visited before and is now marked
    fn mark_visited(&self, url: &str) -> bool {
        let mut visited = self.visited.lock().unwrap_or_else(PoisonError::into_inner);
        if visited.contains(url) {
            return false;
        }
        visited.insert(url.to_string())
    }

    fn merge_word_counts(&self, page_counts: HashMap<String, u64>) {
        let mut word_counts = self
            .word_counts
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        for (word, count) in page_counts {
            *word_counts.entry(word).or_insert(0) += count;
        }
    }

    /// Consumes the context, returning the merged word counts and visited URL count
    pub fn into_totals(self) -> (HashMap<String, u64>, usize) {
        let visited = self
            .visited
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        let word_counts = self
            .word_counts
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        (word_counts, visited.len())
    }
}
