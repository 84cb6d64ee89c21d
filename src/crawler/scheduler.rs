//! Parallel crawl scheduler
//!
//! This module handles:
//! - Sizing and owning the worker pool
//! - Computing the deadline of each crawl
//! - Driving the fork/join task tree to completion
//! - Ranking the merged word counts

use crate::clock::Clock;
use crate::crawler::context::{deadline_after, CrawlContext};
use crate::crawler::ranking::rank_words;
use crate::crawler::task::CrawlTask;
use crate::crawler::{hardware_parallelism, CrawlResult, CrawlSettings, WebCrawler};
use crate::parser::PageParser;
use crate::RippleError;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::Arc;
use std::time::Instant;

/// Crawls seed lists in parallel on a fixed-size work-stealing pool
///
/// The pool is built once and reused by every call to
/// [`crawl`](WebCrawler::crawl). Each call gets its own visited set and word
/// counts, so calls never see each other's state.
pub struct CrawlScheduler {
    settings: CrawlSettings,
    parser: Arc<dyn PageParser>,
    clock: Arc<dyn Clock>,
    pool: ThreadPool,
}

impl CrawlScheduler {
    /// Creates a scheduler with `min(settings.parallelism, hardware threads)` workers
    ///
    /// # Errors
    ///
    /// Returns an error if the worker pool cannot be started.
    pub fn new(
        settings: CrawlSettings,
        parser: Arc<dyn PageParser>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, RippleError> {
        let threads = settings.parallelism.clamp(1, hardware_parallelism());
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("crawl-worker-{}", index))
            .build()?;

        tracing::debug!("Crawl scheduler started with {} worker threads", threads);

        Ok(Self {
            settings,
            parser,
            clock,
            pool,
        })
    }

    /// Number of threads in the worker pool
    pub fn worker_threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl WebCrawler for CrawlScheduler {
    fn crawl(&self, starting_urls: &[String]) -> CrawlResult {
        let deadline = deadline_after(self.clock.now(), self.settings.timeout);
        let context = CrawlContext::new(
            self.clock.as_ref(),
            self.parser.as_ref(),
            &self.settings.ignored_urls,
            deadline,
        );

        tracing::info!(
            "Crawling {} seed URLs (max depth {}, deadline {})",
            starting_urls.len(),
            self.settings.max_depth,
            deadline
        );
        let started = Instant::now();

        self.pool.install(|| {
            CrawlTask::new(starting_urls, self.settings.max_depth, &context).compute()
        });

        let (word_counts, urls_visited) = context.into_totals();
        tracing::info!(
            "Crawl finished: {} URLs visited, {} distinct words in {:?}",
            urls_visited,
            word_counts.len(),
            started.elapsed()
        );

        if word_counts.is_empty() {
            return CrawlResult::new(Vec::new(), urls_visited);
        }

        CrawlResult::new(
            rank_words(&word_counts, self.settings.popular_word_count),
            urls_visited,
        )
    }

    fn max_parallelism(&self) -> usize {
        hardware_parallelism()
    }
}
