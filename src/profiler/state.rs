//! Shared accumulator of profiled call durations

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Identifies one profiled operation of one implementation type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProfiledKey {
    type_name: &'static str,
    operation: &'static str,
}

impl ProfiledKey {
    pub fn new(type_name: &'static str, operation: &'static str) -> Self {
        Self {
            type_name,
            operation,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }
}

impl fmt::Display for ProfiledKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.type_name, self.operation)
    }
}

/// Cumulative elapsed time per [`ProfiledKey`]
///
/// Entries only ever grow. A single mutex guards the whole map, so a report
/// always sees a consistent snapshot.
#[derive(Debug, Default)]
pub struct ProfilingState {
    data: Mutex<BTreeMap<ProfiledKey, Duration>>,
}

impl ProfilingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `elapsed` to the running total for `key`
    pub fn record(&self, key: ProfiledKey, elapsed: Duration) {
        let mut data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        let total = data.entry(key).or_default();
        *total = total.saturating_add(elapsed);
    }

    /// Returns the total recorded for `key`, if any call was recorded
    pub fn total(&self, key: &ProfiledKey) -> Option<Duration> {
        self.data
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .copied()
    }

    /// Returns a copy of every entry, in key order
    pub fn snapshot(&self) -> Vec<(ProfiledKey, Duration)> {
        self.data
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(key, elapsed)| (*key, *elapsed))
            .collect()
    }

    /// Writes one `"<type>#<operation> took <duration>"` line per entry
    pub fn write<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        for (key, elapsed) in self.snapshot() {
            writeln!(writer, "{} took {}", key, format_duration(elapsed))?;
        }
        Ok(())
    }
}

/// Formats a duration as `"<minutes>m <seconds>s <millis>ms"`
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!(
        "{}m {}s {}ms",
        secs / 60,
        secs % 60,
        duration.subsec_millis()
    )
}
