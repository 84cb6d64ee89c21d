//! Output module for writing crawl results
//!
//! This module handles:
//! - Serializing a [`CrawlResult`](crate::CrawlResult) as one JSON document
//! - Appending results to a file or writing them to any stream

mod json;

pub use json::CrawlResultWriter;

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize result: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
