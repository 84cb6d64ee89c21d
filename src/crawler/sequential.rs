use crate::clock::Clock;
use crate::crawler::context::{deadline_after, CrawlContext};
use crate::crawler::ranking::rank_words;
use crate::crawler::{CrawlResult, CrawlSettings, WebCrawler};
use crate::parser::PageParser;
use std::sync::Arc;

/// Crawls every seed in order on the calling thread
///
/// Applies the same depth, deadline, ignore and visited rules as
/// [`CrawlScheduler`](super::CrawlScheduler); useful when parallelism is one
/// and as a reference for the parallel result.
pub struct SequentialCrawler {
    settings: CrawlSettings,
    parser: Arc<dyn PageParser>,
    clock: Arc<dyn Clock>,
}

impl SequentialCrawler {
    pub fn new(
        settings: CrawlSettings,
        parser: Arc<dyn PageParser>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            settings,
            parser,
            clock,
        }
    }
}

impl WebCrawler for SequentialCrawler {
    fn crawl(&self, starting_urls: &[String]) -> CrawlResult {
        let deadline = deadline_after(self.clock.now(), self.settings.timeout);
        let context = CrawlContext::new(
            self.clock.as_ref(),
            self.parser.as_ref(),
            &self.settings.ignored_urls,
            deadline,
        );

        for url in starting_urls {
            context.visit(url, self.settings.max_depth);
        }

        let (word_counts, urls_visited) = context.into_totals();
        tracing::info!("Sequential crawl visited {} URLs", urls_visited);

        if word_counts.is_empty() {
            return CrawlResult::new(Vec::new(), urls_visited);
        }
        CrawlResult::new(
            rank_words(&word_counts, self.settings.popular_word_count),
            urls_visited,
        )
    }

    fn max_parallelism(&self) -> usize {
        1
    }
}
