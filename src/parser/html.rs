//! HTML parser for extracting words and links
//!
//! This module turns an HTML document into:
//! - per-word counts of the visible body text
//! - the outbound links to follow (from `<a href>` tags)

use crate::matcher::matches_any;
use crate::parser::PageParseResult;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashMap;
use url::Url;

/// Elements whose text is never shown to a reader
const INVISIBLE_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Parses HTML content into word counts and outbound links
///
/// # Word Extraction Rules
///
/// - Only text inside `<body>` is counted, skipping script and style content
/// - Text is split on whitespace
/// - ASCII punctuation is stripped and words are lowercased
/// - Empty words and words fully matching an ignored-word pattern are dropped
///
/// # Link Extraction Rules
///
/// **Include:** `<a href="...">` resolved against `base_url`, with the fragment removed
///
/// **Exclude:**
/// - `javascript:`, `mailto:`, `tel:` links and data URIs
/// - Fragment-only links (same page anchors)
/// - Anything that does not resolve to `http`, `https` or `file`
///
/// # Example
///
/// ```
/// use word_ripple::parser::parse_html;
/// use url::Url;
///
/// let html = r#"<html><body>Ripple, ripple! <a href="/next">Next</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let page = parse_html(html, &base_url, &[]);
/// assert_eq!(page.word_counts["ripple"], 2);
/// assert_eq!(page.links, vec!["https://example.com/next".to_string()]);
/// ```
pub fn parse_html(html: &str, base_url: &Url, ignored_words: &[Regex]) -> PageParseResult {
    let document = Html::parse_document(html);

    PageParseResult {
        word_counts: extract_word_counts(&document, ignored_words),
        links: extract_links(&document, base_url),
    }
}

/// Counts the visible words of the document body
fn extract_word_counts(document: &Html, ignored_words: &[Regex]) -> HashMap<String, u64> {
    let mut word_counts = HashMap::new();

    let Ok(body_selector) = Selector::parse("body") else {
        return word_counts;
    };

    for body in document.select(&body_selector) {
        for node in body.descendants() {
            let Some(text) = node.value().as_text() else {
                continue;
            };

            let hidden = node
                .parent()
                .and_then(|parent| parent.value().as_element())
                .is_some_and(|element| INVISIBLE_ELEMENTS.contains(&element.name()));
            if hidden {
                continue;
            }

            let content: &str = text;
            count_words(content, ignored_words, &mut word_counts);
        }
    }

    word_counts
}

/// Adds every countable word of `text` to `word_counts`
pub fn count_words(text: &str, ignored_words: &[Regex], word_counts: &mut HashMap<String, u64>) {
    for raw in text.split_whitespace() {
        let word = normalize_word(raw);
        if word.is_empty() || matches_any(ignored_words, &word) {
            continue;
        }
        *word_counts.entry(word).or_insert(0) += 1;
    }
}

/// Strips ASCII punctuation and lowercases a word
fn normalize_word(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_ascii_punctuation())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Extracts all followable links from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL without its fragment
///
/// Returns None if the link should not be followed.
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let mut absolute_url = base_url.join(href).ok()?;
    if !matches!(absolute_url.scheme(), "http" | "https" | "file") {
        return None;
    }
    absolute_url.set_fragment(None);

    Some(absolute_url.to_string())
}
