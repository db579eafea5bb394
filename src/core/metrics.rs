//! Dispatch counters
//!
//! Lock-free counters maintained by the receptacle. Values are advisory:
//! they are read without coordination and may momentarily lag in-flight
//! deliveries.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for one receptacle.
#[derive(Debug, Default)]
pub struct ReceptacleMetrics {
    entries_dispatched: AtomicU64,
    entries_filtered: AtomicU64,
    messages_recorded: AtomicU64,
    formatter_misses: AtomicU64,
    record_failures: AtomicU64,
}

/// A point-in-time copy of a receptacle's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Entries accepted by at least one configuration.
    pub entries_dispatched: u64,
    /// Entries rejected by every configuration's severity threshold.
    pub entries_filtered: u64,
    /// Messages handed to a recorder after formatting.
    pub messages_recorded: u64,
    /// Entries a recorder dropped because none of its formatters produced
    /// output.
    pub formatter_misses: u64,
    /// Recording attempts that panicked.
    pub record_failures: u64,
}

impl ReceptacleMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn entry_dispatched(&self) {
        self.entries_dispatched.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn entry_filtered(&self) {
        self.entries_filtered.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn message_recorded(&self) {
        self.messages_recorded.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn formatter_miss(&self) {
        self.formatter_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failure(&self) {
        self.record_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Copies the current counter values.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            entries_dispatched: self.entries_dispatched.load(Ordering::Relaxed),
            entries_filtered: self.entries_filtered.load(Ordering::Relaxed),
            messages_recorded: self.messages_recorded.load(Ordering::Relaxed),
            formatter_misses: self.formatter_misses.load(Ordering::Relaxed),
            record_failures: self.record_failures.load(Ordering::Relaxed),
        }
    }
}
