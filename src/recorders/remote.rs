//! Remote recorder
//!
//! Serializes whole entries to the wire format and hands the bodies to a
//! pluggable [`Transport`]. The recorder itself knows nothing about HTTP;
//! the transport decides how (and whether) bodies leave the process.
//! There is no retry policy: a body handed to the transport is the
//! transport's problem.

use crate::core::entry::Entry;
use crate::core::error::Result;
use crate::core::queue::DeliveryQueue;
use crate::core::recorder::Recorder;
use crate::formatters::Formatter;
use std::sync::Arc;

/// Delivers serialized entry bodies to a remote endpoint.
pub trait Transport: Send + Sync {
    /// Hands one serialized entry body off for delivery.
    fn submit(&self, endpoint: &str, body: Vec<u8>);
}

/// Records entries by serializing them and submitting the bodies to a
/// [`Transport`].
///
/// Without a transport or an endpoint, `record` still serializes (so
/// encoding problems surface early in development) but the body goes
/// nowhere.
pub struct RemoteRecorder {
    formatters: Vec<Box<dyn Formatter>>,
    queue: Arc<DeliveryQueue>,
    endpoint: Option<String>,
    transport: Option<Arc<dyn Transport>>,
}

impl RemoteRecorder {
    pub fn new(endpoint: Option<String>, transport: Option<Arc<dyn Transport>>) -> Self {
        // The wire body is built from the entry itself; the formatter
        // chain only has to accept every entry.
        let accept_all = |_: &Entry| Some(String::new());
        Self {
            formatters: vec![Box::new(accept_all) as Box<dyn Formatter>],
            queue: DeliveryQueue::new("log-pipeline.recorder.remote"),
            endpoint,
            transport,
        }
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Encodes one entry as the wire body.
    pub fn serialize(entry: &Entry) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(entry)?)
    }
}

impl Recorder for RemoteRecorder {
    fn name(&self) -> &str {
        "remote"
    }

    fn formatters(&self) -> &[Box<dyn Formatter>] {
        &self.formatters
    }

    fn queue(&self) -> &Arc<DeliveryQueue> {
        &self.queue
    }

    fn record(&self, _message: &str, entry: &Entry, _synchronous: bool) {
        let body = match Self::serialize(entry) {
            Ok(body) => body,
            Err(error) => {
                eprintln!(
                    "[log-pipeline] recorder 'remote' failed to serialize an entry: {}",
                    error
                );
                return;
            }
        };
        if let (Some(transport), Some(endpoint)) = (&self.transport, &self.endpoint) {
            transport.submit(endpoint, body);
        }
    }
}
