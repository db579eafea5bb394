//! Log configurations
//!
//! A [`Configuration`] binds a severity threshold to a set of recorders
//! and selects the dispatch mode used to reach them. Several
//! configurations can coexist in one receptacle, each with its own
//! threshold and recorders.

use super::recorder::Recorder;
use super::severity::Severity;
use std::sync::Arc;

/// A severity threshold, a recorder set, and a dispatch mode.
pub struct Configuration {
    minimum_severity: Severity,
    recorders: Vec<Arc<dyn Recorder>>,
    synchronous: bool,
}

impl Configuration {
    /// Creates a configuration that dispatches entries at or above
    /// `minimum_severity` to `recorders`.
    ///
    /// With `synchronous` set, every log call routed through this
    /// configuration blocks until its recorders have appended the message.
    /// Synchronous mode trades throughput for immediacy and belongs in
    /// debugging builds, not production.
    pub fn new(
        minimum_severity: Severity,
        recorders: Vec<Arc<dyn Recorder>>,
        synchronous: bool,
    ) -> Self {
        Self {
            minimum_severity,
            recorders,
            synchronous,
        }
    }

    /// The lowest severity this configuration accepts.
    pub fn minimum_severity(&self) -> Severity {
        self.minimum_severity
    }

    /// The recorders entries are fanned out to.
    pub fn recorders(&self) -> &[Arc<dyn Recorder>] {
        &self.recorders
    }

    /// Whether log calls block until this configuration has recorded.
    pub fn is_synchronous(&self) -> bool {
        self.synchronous
    }

    /// Whether an entry of the given severity passes the threshold.
    pub fn accepts(&self, severity: Severity) -> bool {
        severity >= self.minimum_severity
    }
}
