//! Call-timing instrumentation
//!
//! A [`Profiler`] wraps any component behind its own trait and records how long
//! the operations flagged as profiled take. All proxies produced by one
//! profiler share a single accumulator, which is written out as a plain-text
//! report:
//!
//! ```text
//! Run at Mon, 1 Jan 2024 00:00:00 GMT
//! word_ripple::crawler::scheduler::CrawlScheduler#crawl took 0m 7s 12ms
//! word_ripple::parser::HtmlPageParser#parse took 0m 41s 380ms
//!
//! ```

mod capability;
mod interceptor;
mod state;

pub use capability::{CapabilitySet, Operation};
pub use interceptor::Profiled;
pub use state::{format_duration, ProfiledKey, ProfilingState};

use crate::clock::Clock;
use chrono::{DateTime, Utc};
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by the profiler
#[derive(Debug, Error)]
pub enum ProfilerError {
    #[error("Capability set '{0}' does not declare any profiled operations")]
    NoProfiledOperations(&'static str),
}

/// Wraps components for timing and reports the accumulated durations
pub struct Profiler {
    clock: Arc<dyn Clock>,
    state: Arc<ProfilingState>,
    start_time: DateTime<Utc>,
}

impl Profiler {
    /// Creates a profiler whose report is stamped with the clock's current time
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let start_time = clock.now();
        Self {
            clock,
            state: Arc::new(ProfilingState::new()),
            start_time,
        }
    }

    /// Wraps `delegate` so that the profiled operations of `capabilities` are timed
    ///
    /// # Errors
    ///
    /// Returns [`ProfilerError::NoProfiledOperations`] if the capability set has
    /// nothing to time. The delegate is not touched in that case.
    pub fn wrap<T>(
        &self,
        capabilities: &CapabilitySet,
        delegate: T,
    ) -> Result<Profiled<T>, ProfilerError> {
        if !capabilities.has_profiled_operations() {
            return Err(ProfilerError::NoProfiledOperations(capabilities.name()));
        }

        tracing::debug!(
            "Profiling {} as {}",
            std::any::type_name::<T>(),
            capabilities.name()
        );

        Ok(Profiled::new(
            delegate,
            *capabilities,
            Arc::clone(&self.state),
            Arc::clone(&self.clock),
        ))
    }

    /// Returns the accumulator shared by every proxy of this profiler
    pub fn state(&self) -> &ProfilingState {
        &self.state
    }

    /// Writes the report to `writer`
    pub fn write_data<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "Run at {}", format_rfc1123(self.start_time))?;
        self.state.write(writer)?;
        writeln!(writer)?;
        Ok(())
    }

    /// Appends the report to the file at `path`, creating it if needed
    pub fn write_data_to_path(&self, path: &Path) -> io::Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = BufWriter::new(file);
        self.write_data(&mut writer)?;
        writer.flush()
    }
}

/// Formats an instant the way HTTP dates are written, e.g. `Tue, 3 Jun 2008 11:05:30 GMT`
fn format_rfc1123(instant: DateTime<Utc>) -> String {
    instant.format("%a, %-d %b %Y %H:%M:%S GMT").to_string()
}
