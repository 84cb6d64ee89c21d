//! Timing proxy produced by [`Profiler::wrap`](super::Profiler::wrap)

use crate::clock::Clock;
use crate::profiler::capability::CapabilitySet;
use crate::profiler::state::{ProfiledKey, ProfilingState};
use chrono::{DateTime, Utc};
use std::any::type_name;
use std::sync::Arc;

/// A delegate wrapped so that its profiled operations are timed
///
/// Each wrappable trait implements itself for `Profiled<T>` by routing every
/// method through [`Profiled::intercept`]. The capability table fixed at wrap
/// time decides which of those calls are timed; the rest are forwarded as-is.
pub struct Profiled<T> {
    delegate: T,
    capabilities: CapabilitySet,
    state: Arc<ProfilingState>,
    clock: Arc<dyn Clock>,
}

impl<T> Profiled<T> {
    pub(crate) fn new(
        delegate: T,
        capabilities: CapabilitySet,
        state: Arc<ProfilingState>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            delegate,
            capabilities,
            state,
            clock,
        }
    }

    /// Returns the wrapped implementation
    pub fn delegate(&self) -> &T {
        &self.delegate
    }

    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    /// Invokes `call` on the delegate, timing it if `operation` is profiled
    ///
    /// The elapsed time is recorded under `(T, operation)` when the call
    /// returns, whatever it returns, and also when it unwinds. The return value
    /// is handed back untouched, so errors reach the caller unchanged.
    pub fn intercept<R>(&self, operation: &'static str, call: impl FnOnce(&T) -> R) -> R {
        debug_assert!(
            self.capabilities
                .operations()
                .iter()
                .any(|op| op.name() == operation),
            "operation `{}` is not declared by {}",
            operation,
            self.capabilities.name()
        );

        if !self.capabilities.is_profiled(operation) {
            return call(&self.delegate);
        }

        let _timer = CallTimer {
            key: ProfiledKey::new(type_name::<T>(), operation),
            start: self.clock.now(),
            clock: self.clock.as_ref(),
            state: &self.state,
        };
        call(&self.delegate)
    }
}

/// Records the elapsed time of one call when dropped
struct CallTimer<'a> {
    key: ProfiledKey,
    start: DateTime<Utc>,
    clock: &'a dyn Clock,
    state: &'a ProfilingState,
}

impl Drop for CallTimer<'_> {
    fn drop(&mut self) {
        // A clock moving backwards counts as zero rather than a negative time
        let elapsed = (self.clock.now() - self.start)
            .to_std()
            .unwrap_or_default();
        self.state.record(self.key, elapsed);
    }
}
