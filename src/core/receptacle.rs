//! Entry dispatch
//!
//! The [`Receptacle`] is the hub of the pipeline. Channels hand it
//! entries; it fans each entry out to every configuration whose severity
//! threshold the entry passes, formats it per recorder, and delivers the
//! formatted message on the recorder's own queue.

use super::configuration::Configuration;
use super::entry::Entry;
use super::metrics::ReceptacleMetrics;
use super::queue::DeliveryQueue;
use super::recorder::Recorder;
use super::severity::Severity;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Fans log entries out to a fixed set of configurations.
///
/// The configuration set is immutable after construction; swapping the
/// active set means building a new receptacle.
pub struct Receptacle {
    configurations: Vec<Arc<Configuration>>,
    queue: Arc<DeliveryQueue>,
    metrics: Arc<ReceptacleMetrics>,
}

impl Receptacle {
    pub fn new(configurations: Vec<Configuration>) -> Self {
        Self {
            configurations: configurations.into_iter().map(Arc::new).collect(),
            queue: DeliveryQueue::new("log-pipeline.receptacle"),
            metrics: Arc::new(ReceptacleMetrics::new()),
        }
    }

    /// The lowest severity any configuration accepts. A receptacle with no
    /// configurations accepts nothing, so this reports the highest
    /// severity.
    pub fn minimum_severity(&self) -> Severity {
        self.configurations
            .iter()
            .map(|config| config.minimum_severity())
            .min()
            .unwrap_or(Severity::Fatal)
    }

    /// Dispatch counters for this receptacle.
    pub fn metrics(&self) -> &ReceptacleMetrics {
        &self.metrics
    }

    /// Dispatches one entry.
    ///
    /// Asynchronous configurations are scheduled first so that a trailing
    /// synchronous configuration, which blocks this call until it has
    /// recorded, also waits out the asynchronous deliveries queued ahead
    /// of it on the coordination queue.
    pub fn log(&self, entry: Entry) {
        let severity = entry.severity;
        let accepting: Vec<&Arc<Configuration>> = self
            .configurations
            .iter()
            .filter(|config| config.accepts(severity))
            .collect();
        if accepting.is_empty() {
            self.metrics.entry_filtered();
            return;
        }
        self.metrics.entry_dispatched();

        let entry = Arc::new(entry);
        let asynchronous = accepting.iter().filter(|c| !c.is_synchronous());
        let synchronous = accepting.iter().filter(|c| c.is_synchronous());
        for config in asynchronous.chain(synchronous) {
            let config = Arc::clone(config);
            let entry = Arc::clone(&entry);
            let metrics = Arc::clone(&self.metrics);
            let wait = config.is_synchronous();
            self.queue.dispatch(
                move || Self::deliver(&config, &entry, &metrics),
                wait,
            );
        }
    }

    /// Schedules one task per recorder of the configuration, in declared
    /// order. Runs on the coordination queue; formatting and recording
    /// both happen on the recorder's own queue.
    fn deliver(config: &Arc<Configuration>, entry: &Arc<Entry>, metrics: &Arc<ReceptacleMetrics>) {
        for recorder in config.recorders() {
            let recorder = Arc::clone(recorder);
            let entry = Arc::clone(entry);
            let metrics = Arc::clone(metrics);
            let synchronous = config.is_synchronous();
            recorder.queue().clone().dispatch(
                move || {
                    let formatted = recorder
                        .formatters()
                        .iter()
                        .find_map(|formatter| formatter.format(&entry));
                    let Some(message) = formatted else {
                        metrics.formatter_miss();
                        return;
                    };
                    let outcome = catch_unwind(AssertUnwindSafe(|| {
                        recorder.record(&message, &entry, synchronous)
                    }));
                    match outcome {
                        Ok(()) => metrics.message_recorded(),
                        Err(_) => {
                            metrics.record_failure();
                            eprintln!(
                                "[log-pipeline] recorder '{}' panicked while recording",
                                recorder.name()
                            );
                        }
                    }
                },
                synchronous,
            );
        }
    }

    /// Blocks until every entry dispatched before this call has been fully
    /// recorded.
    pub fn drain(&self) {
        self.queue.barrier();
        let mut seen: Vec<*const DeliveryQueue> = Vec::new();
        for config in &self.configurations {
            for recorder in config.recorders() {
                let queue = recorder.queue();
                let ptr = Arc::as_ptr(queue);
                if !seen.contains(&ptr) {
                    seen.push(ptr);
                    queue.barrier();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::{CallSite, Payload};
    use crate::formatters::{Formatter, PayloadMessageFormatter};
    use parking_lot::Mutex;

    struct CollectingRecorder {
        name: String,
        formatters: Vec<Box<dyn Formatter>>,
        queue: Arc<DeliveryQueue>,
        messages: Arc<Mutex<Vec<String>>>,
        panic_on_record: bool,
    }

    impl CollectingRecorder {
        fn new(name: &str, formatters: Vec<Box<dyn Formatter>>) -> (Arc<Self>, Arc<Mutex<Vec<String>>>) {
            let messages = Arc::new(Mutex::new(Vec::new()));
            let recorder = Arc::new(Self {
                name: name.to_string(),
                formatters,
                queue: DeliveryQueue::new(format!("test.{}", name)),
                messages: Arc::clone(&messages),
                panic_on_record: false,
            });
            (recorder, messages)
        }
    }

    impl Recorder for CollectingRecorder {
        fn name(&self) -> &str {
            &self.name
        }

        fn formatters(&self) -> &[Box<dyn Formatter>] {
            &self.formatters
        }

        fn queue(&self) -> &Arc<DeliveryQueue> {
            &self.queue
        }

        fn record(&self, message: &str, _entry: &Entry, _synchronous: bool) {
            if self.panic_on_record {
                panic!("sink exploded");
            }
            self.messages.lock().push(message.to_string());
        }
    }

    fn entry(severity: Severity, text: &str) -> Entry {
        Entry::new(
            Payload::message(text),
            severity,
            CallSite {
                file: "src/app.rs",
                line: 10,
                function: "app::run",
            },
        )
    }

    fn message_only() -> Vec<Box<dyn Formatter>> {
        vec![Box::new(PayloadMessageFormatter) as Box<dyn Formatter>]
    }

    #[test]
    fn test_severity_filtering_is_inclusive() {
        let (recorder, messages) = CollectingRecorder::new("filter", message_only());
        let receptacle = Receptacle::new(vec![Configuration::new(
            Severity::Warn,
            vec![recorder],
            true,
        )]);

        receptacle.log(entry(Severity::Info, "dropped"));
        receptacle.log(entry(Severity::Warn, "kept"));
        receptacle.log(entry(Severity::Fatal, "also kept"));
        receptacle.drain();

        assert_eq!(*messages.lock(), vec!["kept", "also kept"]);
        let snapshot = receptacle.metrics().snapshot();
        assert_eq!(snapshot.entries_filtered, 1);
        assert_eq!(snapshot.entries_dispatched, 2);
        assert_eq!(snapshot.messages_recorded, 2);
    }

    #[test]
    fn test_first_successful_formatter_wins() {
        let miss = Box::new(|_: &Entry| None) as Box<dyn Formatter>;
        let first = Box::new(|_: &Entry| Some("first".to_string())) as Box<dyn Formatter>;
        let second = Box::new(|_: &Entry| Some("second".to_string())) as Box<dyn Formatter>;
        let (recorder, messages) = CollectingRecorder::new("chain", vec![miss, first, second]);
        let receptacle = Receptacle::new(vec![Configuration::new(
            Severity::Trace,
            vec![recorder],
            true,
        )]);

        receptacle.log(entry(Severity::Info, "ignored"));
        receptacle.drain();

        assert_eq!(*messages.lock(), vec!["first"]);
    }

    #[test]
    fn test_all_formatters_missing_drops_entry() {
        let miss = Box::new(|_: &Entry| None) as Box<dyn Formatter>;
        let (recorder, messages) = CollectingRecorder::new("miss", vec![miss]);
        let receptacle = Receptacle::new(vec![Configuration::new(
            Severity::Trace,
            vec![recorder],
            true,
        )]);

        receptacle.log(entry(Severity::Info, "unformattable"));
        receptacle.drain();

        assert!(messages.lock().is_empty());
        assert_eq!(receptacle.metrics().snapshot().formatter_misses, 1);
    }

    #[test]
    fn test_entry_reaches_every_accepting_configuration() {
        let (loose, loose_messages) = CollectingRecorder::new("loose", message_only());
        let (strict, strict_messages) = CollectingRecorder::new("strict", message_only());
        let receptacle = Receptacle::new(vec![
            Configuration::new(Severity::Trace, vec![loose], false),
            Configuration::new(Severity::Error, vec![strict], true),
        ]);

        receptacle.log(entry(Severity::Info, "routine"));
        receptacle.log(entry(Severity::Error, "broken"));
        receptacle.drain();

        assert_eq!(*loose_messages.lock(), vec!["routine", "broken"]);
        assert_eq!(*strict_messages.lock(), vec!["broken"]);
    }

    #[test]
    fn test_panicking_recorder_is_isolated() {
        let messages = Arc::new(Mutex::new(Vec::new()));
        let panicking = Arc::new(CollectingRecorder {
            name: "bomb".to_string(),
            formatters: message_only(),
            queue: DeliveryQueue::new("test.bomb"),
            messages: Arc::clone(&messages),
            panic_on_record: true,
        });
        let (healthy, healthy_messages) = CollectingRecorder::new("healthy", message_only());
        let receptacle = Receptacle::new(vec![Configuration::new(
            Severity::Trace,
            vec![panicking, healthy],
            true,
        )]);

        receptacle.log(entry(Severity::Info, "survives"));
        receptacle.drain();

        assert_eq!(*healthy_messages.lock(), vec!["survives"]);
        let snapshot = receptacle.metrics().snapshot();
        assert_eq!(snapshot.record_failures, 1);
        assert_eq!(snapshot.messages_recorded, 1);
    }

    #[test]
    fn test_minimum_severity_over_configurations() {
        let (a, _) = CollectingRecorder::new("a", message_only());
        let (b, _) = CollectingRecorder::new("b", message_only());
        let receptacle = Receptacle::new(vec![
            Configuration::new(Severity::Debug, vec![a], false),
            Configuration::new(Severity::Error, vec![b], false),
        ]);
        assert_eq!(receptacle.minimum_severity(), Severity::Debug);

        let empty = Receptacle::new(Vec::new());
        assert_eq!(empty.minimum_severity(), Severity::Fatal);
    }

    #[test]
    fn test_synchronous_configuration_records_before_log_returns() {
        let (recorder, messages) = CollectingRecorder::new("sync", message_only());
        let receptacle = Receptacle::new(vec![Configuration::new(
            Severity::Trace,
            vec![recorder],
            true,
        )]);

        receptacle.log(entry(Severity::Info, "immediate"));
        // No drain: synchronous mode already waited.
        assert_eq!(*messages.lock(), vec!["immediate"]);
    }
}
