//! JSON crawl result output

use crate::crawler::CrawlResult;
use crate::output::OutputResult;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes a crawl result as a single JSON document
///
/// The document has the form
/// `{"wordCounts":{"word":count,...},"urlsVisited":n}` with the words in rank
/// order.
pub struct CrawlResultWriter<'a> {
    result: &'a CrawlResult,
}

impl<'a> CrawlResultWriter<'a> {
    pub fn new(result: &'a CrawlResult) -> Self {
        Self { result }
    }

    /// Appends the result and a trailing newline to `path`, creating the file if needed
    pub fn write_to_path(&self, path: &Path) -> OutputResult<()> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = BufWriter::new(file);
        self.write(&mut writer)?;
        writeln!(writer)?;
        writer.flush()?;

        tracing::debug!("Wrote crawl result to {}", path.display());
        Ok(())
    }

    /// Writes the result to `writer` without a trailing newline
    pub fn write<W: Write>(&self, writer: W) -> OutputResult<()> {
        serde_json::to_writer(writer, self.result)?;
        Ok(())
    }
}
