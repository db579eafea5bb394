//! Byte-stream recorder
//!
//! Appends formatted messages to any `Write` sink, one line per message.

use crate::core::entry::Entry;
use crate::core::queue::DeliveryQueue;
use crate::core::recorder::Recorder;
use crate::formatters::Formatter;
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// Records formatted messages to a `Write` sink.
///
/// Messages already ending in a line break are written as-is; otherwise a
/// `\n` is appended, so a message is one line regardless of whether the
/// formatter terminated it. The sink is flushed after every synchronous
/// record so the output is visible before the log call returns.
pub struct StreamRecorder<W: Write + Send> {
    name: String,
    formatters: Vec<Box<dyn Formatter>>,
    queue: Arc<DeliveryQueue>,
    stream: Mutex<W>,
}

impl<W: Write + Send> StreamRecorder<W> {
    /// Creates a recorder with its own delivery queue.
    pub fn new(name: impl Into<String>, formatters: Vec<Box<dyn Formatter>>, stream: W) -> Self {
        let name = name.into();
        let queue = DeliveryQueue::new(format!("log-pipeline.recorder.{}", name));
        Self::with_queue(name, formatters, stream, queue)
    }

    /// Creates a recorder on an existing queue. Recorders sharing a queue
    /// keep their relative output order.
    pub fn with_queue(
        name: impl Into<String>,
        formatters: Vec<Box<dyn Formatter>>,
        stream: W,
        queue: Arc<DeliveryQueue>,
    ) -> Self {
        Self {
            name: name.into(),
            formatters,
            queue,
            stream: Mutex::new(stream),
        }
    }
}

impl StreamRecorder<io::Stdout> {
    pub fn stdout(formatters: Vec<Box<dyn Formatter>>) -> Self {
        Self::new("stdout", formatters, io::stdout())
    }
}

impl StreamRecorder<io::Stderr> {
    pub fn stderr(formatters: Vec<Box<dyn Formatter>>) -> Self {
        Self::new("stderr", formatters, io::stderr())
    }
}

pub(crate) fn write_line<W: Write>(
    stream: &mut W,
    message: &str,
    flush: bool,
) -> io::Result<()> {
    stream.write_all(message.as_bytes())?;
    if !message.ends_with('\n') && !message.ends_with('\r') {
        stream.write_all(b"\n")?;
    }
    if flush {
        stream.flush()?;
    }
    Ok(())
}

impl<W: Write + Send> Recorder for StreamRecorder<W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn formatters(&self) -> &[Box<dyn Formatter>] {
        &self.formatters
    }

    fn queue(&self) -> &Arc<DeliveryQueue> {
        &self.queue
    }

    fn record(&self, message: &str, _entry: &Entry, synchronous: bool) {
        let mut stream = self.stream.lock();
        if let Err(error) = write_line(&mut *stream, message, synchronous) {
            eprintln!(
                "[log-pipeline] recorder '{}' failed to write: {}",
                self.name, error
            );
        }
    }
}
