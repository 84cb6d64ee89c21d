use serde::{Serialize, Serializer};

/// Outcome of one crawl
///
/// Serializes as `{"wordCounts": {"word": count, ...}, "urlsVisited": n}` with
/// the word counts in rank order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResult {
    #[serde(serialize_with = "serialize_ranked")]
    word_counts: Vec<(String, u64)>,
    urls_visited: usize,
}

impl CrawlResult {
    pub fn new(word_counts: Vec<(String, u64)>, urls_visited: usize) -> Self {
        Self {
            word_counts,
            urls_visited,
        }
    }

    /// Top-ranked words with their counts, most popular first
    pub fn word_counts(&self) -> &[(String, u64)] {
        &self.word_counts
    }

    /// Number of distinct URLs visited
    pub fn urls_visited(&self) -> usize {
        self.urls_visited
    }

    /// Returns the count of `word`, if it made the ranking
    pub fn count_of(&self, word: &str) -> Option<u64> {
        self.word_counts
            .iter()
            .find(|(candidate, _)| candidate == word)
            .map(|(_, count)| *count)
    }
}

fn serialize_ranked<S: Serializer>(
    word_counts: &[(String, u64)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(word_counts.iter().map(|(word, count)| (word, count)))
}
