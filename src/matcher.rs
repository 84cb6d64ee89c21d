//! Full-string pattern matching for ignored URLs and ignored words
//!
//! Configured patterns are regular expressions that must match the *whole*
//! candidate, not a substring of it. Each pattern is anchored once at compile
//! time so matching is a single `is_match` call.

use crate::ConfigError;
use regex::Regex;

/// Compiles a pattern so that it only matches complete strings
///
/// # Examples
///
/// ```
/// use word_ripple::matcher::compile_full_match;
///
/// let re = compile_full_match(r".*\.pdf").unwrap();
/// assert!(re.is_match("https://example.com/file.pdf"));
/// assert!(!re.is_match("https://example.com/file.pdf?download=1"));
/// ```
pub fn compile_full_match(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Compiles every pattern in `patterns`, failing on the first invalid one
pub fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>, ConfigError> {
    patterns.iter().map(|p| compile_full_match(p)).collect()
}

/// Returns true if `candidate` fully matches any of `patterns`
pub fn matches_any(patterns: &[Regex], candidate: &str) -> bool {
    patterns.iter().any(|re| re.is_match(candidate))
}
