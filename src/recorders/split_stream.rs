//! Severity-split standard streams recorder
//!
//! Routine output (info and below) goes to stdout; warnings and worse go
//! to stderr. Both streams are fed from a single delivery queue so their
//! relative order matches the order entries were dispatched, even when a
//! shell merges the two streams back together.

use super::stream::write_line;
use crate::core::entry::Entry;
use crate::core::queue::DeliveryQueue;
use crate::core::recorder::Recorder;
use crate::core::severity::Severity;
use crate::formatters::Formatter;
use parking_lot::Mutex;
use std::io;
use std::sync::Arc;

/// Records to stdout or stderr depending on the entry severity.
pub struct StandardStreamsRecorder {
    formatters: Vec<Box<dyn Formatter>>,
    queue: Arc<DeliveryQueue>,
    stdout: Mutex<io::Stdout>,
    stderr: Mutex<io::Stderr>,
}

impl StandardStreamsRecorder {
    pub fn new(formatters: Vec<Box<dyn Formatter>>) -> Self {
        Self {
            formatters,
            queue: DeliveryQueue::new("log-pipeline.recorder.standard-streams"),
            stdout: Mutex::new(io::stdout()),
            stderr: Mutex::new(io::stderr()),
        }
    }

    fn uses_stdout(severity: Severity) -> bool {
        severity <= Severity::Info
    }
}

impl Recorder for StandardStreamsRecorder {
    fn name(&self) -> &str {
        "standard-streams"
    }

    fn formatters(&self) -> &[Box<dyn Formatter>] {
        &self.formatters
    }

    fn queue(&self) -> &Arc<DeliveryQueue> {
        &self.queue
    }

    fn record(&self, message: &str, entry: &Entry, synchronous: bool) {
        let result = if Self::uses_stdout(entry.severity) {
            write_line(&mut *self.stdout.lock(), message, synchronous)
        } else {
            write_line(&mut *self.stderr.lock(), message, synchronous)
        };
        if let Err(error) = result {
            eprintln!(
                "[log-pipeline] recorder 'standard-streams' failed to write: {}",
                error
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_selection_splits_at_info() {
        assert!(StandardStreamsRecorder::uses_stdout(Severity::Trace));
        assert!(StandardStreamsRecorder::uses_stdout(Severity::Debug));
        assert!(StandardStreamsRecorder::uses_stdout(Severity::Info));
        assert!(!StandardStreamsRecorder::uses_stdout(Severity::Warn));
        assert!(!StandardStreamsRecorder::uses_stdout(Severity::Error));
        assert!(!StandardStreamsRecorder::uses_stdout(Severity::Fatal));
    }

    #[test]
    fn test_both_streams_share_one_queue() {
        let recorder = StandardStreamsRecorder::new(Vec::new());
        let queue = Arc::clone(recorder.queue());
        assert!(Arc::ptr_eq(&queue, recorder.queue()));
    }
}
