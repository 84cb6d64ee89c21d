//! Operation tables describing what a wrapped capability set exposes

/// One operation of a capability set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    name: &'static str,
    profiled: bool,
}

impl Operation {
    /// An operation whose duration is recorded on every call
    pub const fn profiled(name: &'static str) -> Self {
        Self {
            name,
            profiled: true,
        }
    }

    /// An operation that is forwarded without timing
    pub const fn passthrough(name: &'static str) -> Self {
        Self {
            name,
            profiled: false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_profiled(&self) -> bool {
        self.profiled
    }
}

/// The fixed table of operations a trait exposes, each flagged as profiled or not
///
/// Every trait that can be wrapped by a [`Profiler`](super::Profiler) declares one
/// of these next to its `impl Trait for Profiled<T>` forwarding code.
///
/// # Example
///
/// ```
/// use word_ripple::profiler::{CapabilitySet, Operation};
///
/// const STORE: CapabilitySet = CapabilitySet::new(
///     "Store",
///     &[Operation::profiled("load"), Operation::passthrough("len")],
/// );
///
/// assert!(STORE.is_profiled("load"));
/// assert!(!STORE.is_profiled("len"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CapabilitySet {
    name: &'static str,
    operations: &'static [Operation],
}

impl CapabilitySet {
    pub const fn new(name: &'static str, operations: &'static [Operation]) -> Self {
        Self { name, operations }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn operations(&self) -> &'static [Operation] {
        self.operations
    }

    /// Returns true if at least one operation is profiled
    pub fn has_profiled_operations(&self) -> bool {
        self.operations.iter().any(Operation::is_profiled)
    }

    /// Returns true if `operation` is declared and flagged as profiled
    pub fn is_profiled(&self, operation: &str) -> bool {
        self.operations
            .iter()
            .any(|op| op.name == operation && op.profiled)
    }
}
