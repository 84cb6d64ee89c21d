//! Recursive fork/join unit of crawl work

use crate::crawler::context::CrawlContext;

/// A list of pending URLs, all with the same remaining depth
///
/// Lists longer than one are split in half and both halves run through
/// `rayon::join`, so a task only returns once its whole subtree has finished.
/// Run inside `ThreadPool::install` to use a dedicated pool.
pub struct CrawlTask<'a, 'ctx> {
    urls: &'a [String],
    depth: u32,
    context: &'a CrawlContext<'ctx>,
}

impl<'a, 'ctx> CrawlTask<'a, 'ctx> {
    pub fn new(urls: &'a [String], depth: u32, context: &'a CrawlContext<'ctx>) -> Self {
        Self {
            urls,
            depth,
            context,
        }
    }

    pub fn compute(self) {
        match self.urls {
            [] => {}
            [url] => self.context.visit(url, self.depth),
            urls => {
                let (left, right) = urls.split_at(urls.len() / 2);
                rayon::join(
                    || CrawlTask::new(left, self.depth, self.context).compute(),
                    || CrawlTask::new(right, self.depth, self.context).compute(),
                );
            }
        }
    }
}
