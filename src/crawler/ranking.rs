//! Deterministic ranking of word counts
//!
//! Words are ordered by:
//! 1. Count, most frequent first
//! 2. Length, longest first
//! 3. Alphabetical order
//!
//! No two distinct words compare equal, so the top-K selection never depends on
//! hash map iteration order.

use std::cmp::Ordering;
use std::collections::HashMap;

/// Compares two `(word, count)` pairs in rank order (lower ranks first)
pub fn compare_word_counts(a: (&str, u64), b: (&str, u64)) -> Ordering {
    b.1.cmp(&a.1)
        .then_with(|| b.0.chars().count().cmp(&a.0.chars().count()))
        .then_with(|| a.0.cmp(b.0))
}

/// Returns the `popular_word_count` top-ranked words with their counts
///
/// The result holds `min(popular_word_count, word_counts.len())` entries in
/// rank order.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use word_ripple::crawler::rank_words;
///
/// let counts = HashMap::from([
///     ("ripple".to_string(), 4),
///     ("wave".to_string(), 4),
///     ("pond".to_string(), 9),
/// ]);
///
/// let ranked = rank_words(&counts, 2);
/// assert_eq!(ranked, vec![("pond".to_string(), 9), ("ripple".to_string(), 4)]);
/// ```
pub fn rank_words(
    word_counts: &HashMap<String, u64>,
    popular_word_count: usize,
) -> Vec<(String, u64)> {
    let mut entries: Vec<(&str, u64)> = word_counts
        .iter()
        .map(|(word, count)| (word.as_str(), *count))
        .collect();

    if popular_word_count < entries.len() {
        // Partition so only the kept prefix has to be fully sorted
        entries.select_nth_unstable_by(popular_word_count, |a, b| {
            compare_word_counts(*a, *b)
        });
        entries.truncate(popular_word_count);
    }
    entries.sort_unstable_by(|a, b| compare_word_counts(*a, *b));

    entries
        .into_iter()
        .map(|(word, count)| (word.to_string(), count))
        .collect()
}
