//! End-to-end pipeline tests: entries flowing from channels through the
//! receptacle to recorders, with real delivery queues.

use log_pipeline::core::entry::{CallSite, Entry, Payload};
use log_pipeline::core::{
    Channel, Configuration, DeliveryQueue, Receptacle, Recorder, Severity,
};
use log_pipeline::formatters::{Formatter, PayloadMessageFormatter};
use log_pipeline::recorders::{RemoteRecorder, StreamRecorder, Transport};
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

struct CollectingRecorder {
    name: String,
    formatters: Vec<Box<dyn Formatter>>,
    queue: Arc<DeliveryQueue>,
    messages: Arc<Mutex<Vec<String>>>,
}

impl CollectingRecorder {
    fn new(name: &str) -> (Arc<Self>, Arc<Mutex<Vec<String>>>) {
        let queue = DeliveryQueue::new(format!("it.{}", name));
        Self::on_queue(name, queue)
    }

    fn on_queue(name: &str, queue: Arc<DeliveryQueue>) -> (Arc<Self>, Arc<Mutex<Vec<String>>>) {
        let messages = Arc::new(Mutex::new(Vec::new()));
        let tag = name.to_string();
        let tagging = move |entry: &Entry| {
            PayloadMessageFormatter
                .format(entry)
                .map(|text| format!("{}:{}", tag, text))
        };
        let recorder = Arc::new(Self {
            name: name.to_string(),
            formatters: vec![Box::new(tagging) as Box<dyn Formatter>],
            queue,
            messages: Arc::clone(&messages),
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
        self.messages.lock().push(message.to_string());
    }
}

fn site() -> CallSite {
    CallSite {
        file: "tests/integration.rs",
        line: 1,
        function: "integration::scenario",
    }
}

fn entry(severity: Severity, text: &str) -> Entry {
    Entry::new(Payload::message(text), severity, site())
}

#[test]
fn test_channels_filter_by_configuration_threshold() {
    let (recorder, messages) = CollectingRecorder::new("threshold");
    let receptacle = Arc::new(Receptacle::new(vec![Configuration::new(
        Severity::Warn,
        vec![recorder],
        false,
    )]));

    let info = Channel::new(Severity::Info, Arc::clone(&receptacle));
    let warn = Channel::new(Severity::Warn, Arc::clone(&receptacle));
    let fatal = Channel::new(Severity::Fatal, Arc::clone(&receptacle));

    info.message("too quiet", site());
    warn.message("heard", site());
    fatal.message("also heard", site());
    receptacle.drain();

    assert_eq!(
        *messages.lock(),
        vec!["threshold:heard", "threshold:also heard"]
    );
    let snapshot = receptacle.metrics().snapshot();
    assert_eq!(snapshot.entries_filtered, 1);
    assert_eq!(snapshot.entries_dispatched, 2);
}

#[test]
fn test_asynchronous_configurations_record_before_synchronous_ones() {
    // Both recorders share one delivery queue and one message log, so the
    // log shows the order the receptacle scheduled them in.
    let shared = DeliveryQueue::new("it.shared");
    let combined = Arc::new(Mutex::new(Vec::new()));
    let synchronous = tagging_recorder("sync", Arc::clone(&shared), Arc::clone(&combined));
    let asynchronous = tagging_recorder("async", Arc::clone(&shared), Arc::clone(&combined));

    // The synchronous configuration is declared first, yet must be
    // scheduled after the asynchronous one.
    let receptacle = Receptacle::new(vec![
        Configuration::new(Severity::Trace, vec![synchronous], true),
        Configuration::new(Severity::Trace, vec![asynchronous], false),
    ]);

    receptacle.log(entry(Severity::Info, "one"));
    receptacle.drain();

    assert_eq!(*combined.lock(), vec!["async:one", "sync:one"]);
}

struct SharedLogRecorder {
    name: String,
    formatters: Vec<Box<dyn Formatter>>,
    queue: Arc<DeliveryQueue>,
    log: Arc<Mutex<Vec<String>>>,
}

impl Recorder for SharedLogRecorder {
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
        self.log.lock().push(message.to_string());
    }
}

fn tagging_recorder(
    tag: &str,
    queue: Arc<DeliveryQueue>,
    log: Arc<Mutex<Vec<String>>>,
) -> Arc<dyn Recorder> {
    let tag_owned = tag.to_string();
    let tagging = move |entry: &Entry| {
        PayloadMessageFormatter
            .format(entry)
            .map(|text| format!("{}:{}", tag_owned, text))
    };
    Arc::new(SharedLogRecorder {
        name: tag.to_string(),
        formatters: vec![Box::new(tagging) as Box<dyn Formatter>],
        queue,
        log,
    })
}

struct SharedSink(Arc<Mutex<Vec<u8>>>);

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_stream_recorder_emits_one_line_per_entry() {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::new(StreamRecorder::new(
        "memory",
        vec![Box::new(PayloadMessageFormatter) as Box<dyn Formatter>],
        SharedSink(Arc::clone(&buffer)),
    ));
    let receptacle = Receptacle::new(vec![Configuration::new(
        Severity::Trace,
        vec![recorder],
        false,
    )]);

    receptacle.log(entry(Severity::Info, "plain"));
    receptacle.log(entry(Severity::Info, "terminated\n"));
    receptacle.drain();

    assert_eq!(
        String::from_utf8(buffer.lock().clone()).expect("utf8 output"),
        "plain\nterminated\n"
    );
}

struct CapturingTransport {
    bodies: Mutex<Vec<Vec<u8>>>,
}

impl Transport for CapturingTransport {
    fn submit(&self, _endpoint: &str, body: Vec<u8>) {
        self.bodies.lock().push(body);
    }
}

#[test]
fn test_remote_recorder_ships_decodable_wire_bodies() {
    let transport = Arc::new(CapturingTransport {
        bodies: Mutex::new(Vec::new()),
    });
    let recorder = Arc::new(RemoteRecorder::new(
        Some("https://logs.example.com/ingest".to_string()),
        Some(Arc::clone(&transport) as Arc<dyn Transport>),
    ));
    let receptacle = Receptacle::new(vec![Configuration::new(
        Severity::Warn,
        vec![recorder],
        false,
    )]);

    receptacle.log(entry(Severity::Info, "below threshold"));
    receptacle.log(entry(Severity::Error, "shipped"));
    receptacle.drain();

    let bodies = transport.bodies.lock();
    assert_eq!(bodies.len(), 1);

    let decoded: Entry = serde_json::from_slice(&bodies[0]).expect("wire body decodes");
    assert_eq!(decoded.severity, Severity::Error);
    match decoded.payload {
        Payload::Message(text) => assert_eq!(text, "shipped"),
        other => panic!("expected a message payload, got {:?}", other),
    }
    assert_eq!(decoded.calling_file_path, "tests/integration.rs");
}

#[test]
fn test_one_entry_reaches_differently_formatted_recorders() {
    let (first, first_messages) = CollectingRecorder::new("first");
    let (second, second_messages) = CollectingRecorder::new("second");
    let receptacle = Receptacle::new(vec![Configuration::new(
        Severity::Trace,
        vec![first, second],
        false,
    )]);

    receptacle.log(entry(Severity::Debug, "fanout"));
    receptacle.drain();

    assert_eq!(*first_messages.lock(), vec!["first:fanout"]);
    assert_eq!(*second_messages.lock(), vec!["second:fanout"]);
}

#[test]
fn test_per_recorder_order_is_stable_under_concurrent_producers() {
    let (recorder, messages) = CollectingRecorder::new("concurrent");
    let receptacle = Arc::new(Receptacle::new(vec![Configuration::new(
        Severity::Trace,
        vec![recorder],
        false,
    )]));

    let mut producers = Vec::new();
    for producer in 0..4 {
        let receptacle = Arc::clone(&receptacle);
        producers.push(std::thread::spawn(move || {
            for i in 0..50 {
                receptacle.log(entry(Severity::Info, &format!("{}-{}", producer, i)));
            }
        }));
    }
    for producer in producers {
        producer.join().expect("producer thread");
    }
    receptacle.drain();

    // Every producer's own messages stay in its submission order.
    let recorded = messages.lock().clone();
    assert_eq!(recorded.len(), 200);
    for producer in 0..4 {
        let prefix = format!("concurrent:{}-", producer);
        let sequence: Vec<&String> = recorded
            .iter()
            .filter(|message| message.starts_with(&prefix))
            .collect();
        assert_eq!(sequence.len(), 50);
        for (i, message) in sequence.iter().enumerate() {
            assert_eq!(**message, format!("{}{}", prefix, i));
        }
    }
}
