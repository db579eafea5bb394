//! Log entry model
//!
//! An [`Entry`] describes one log event. Entries are immutable once
//! constructed and are shared read-only by every configuration, recorder,
//! and formatter that processes them, so no downstream synchronization is
//! needed.

use super::severity::Severity;
use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

// Thread ids are handed out once per thread and cached thread-locally.
// They identify a thread only for its lifetime.
static NEXT_THREAD_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static CALLING_THREAD_ID: u64 = NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed);
}

/// The id of the calling thread, assigned on first use and stable for the
/// thread's lifetime.
pub fn current_thread_id() -> u64 {
    CALLING_THREAD_ID.with(|id| *id)
}

/// Process identity, looked up once per process and cached.
struct ProcessIdentification {
    name: String,
    id: u32,
}

fn process_identification() -> &'static ProcessIdentification {
    static CURRENT: OnceLock<ProcessIdentification> = OnceLock::new();
    CURRENT.get_or_init(|| {
        let name = std::env::current_exe()
            .ok()
            .and_then(|path| path.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "unknown".to_string());
        ProcessIdentification {
            name,
            id: std::process::id(),
        }
    })
}

/// Call-site metadata captured by the caller and supplied to the core.
///
/// Use the [`call_site!`](crate::call_site) macro to capture the current
/// file, line, and enclosing function signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    /// Path of the source file issuing the log request.
    pub file: &'static str,
    /// Line within the source file.
    pub line: u32,
    /// Signature of the enclosing function.
    pub function: &'static str,
}

/// An arbitrary value carried by a [`Payload::Value`] entry.
///
/// The standard adapter created by [`Payload::value_of`] captures any
/// `T: fmt::Debug` and uses its debug representation as the description.
/// Implement this trait directly to substitute a different representation.
pub trait LogValue: Send + Sync {
    /// The name of the value's type.
    fn type_name(&self) -> &str;
    /// A human-readable description of the value.
    fn description(&self) -> String;
}

struct CapturedValue<V> {
    value: V,
    type_name: &'static str,
}

impl<V: fmt::Debug + Send + Sync> LogValue for CapturedValue<V> {
    fn type_name(&self) -> &str {
        short_type_name(self.type_name)
    }

    fn description(&self) -> String {
        format!("{:?}", self.value)
    }
}

/// A value decoded from the wire format. Only the description survives the
/// round trip; the original type is gone.
struct OpaqueValue {
    description: String,
}

impl LogValue for OpaqueValue {
    fn type_name(&self) -> &str {
        "Opaque"
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}

/// Strips the module path from a type name, leaving generic arguments
/// untouched (`alloc::string::String` becomes `String`).
fn short_type_name(full: &str) -> &str {
    let base_end = full.find('<').unwrap_or(full.len());
    match full[..base_end].rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}

/// The payload contained within a log entry.
#[derive(Clone)]
pub enum Payload {
    /// An execution trace marker with no explicit payload.
    Trace,
    /// A text message.
    Message(String),
    /// An arbitrary value, or `None`.
    Value(Option<Arc<dyn LogValue>>),
}

impl Payload {
    /// Creates a message payload.
    pub fn message(text: impl Into<String>) -> Self {
        Payload::Message(text.into())
    }

    /// Creates a value payload from any debuggable value, or an absent one.
    pub fn value_of<V: fmt::Debug + Send + Sync + 'static>(value: Option<V>) -> Self {
        Payload::Value(value.map(|value| {
            Arc::new(CapturedValue {
                value,
                type_name: std::any::type_name::<V>(),
            }) as Arc<dyn LogValue>
        }))
    }

    /// The wire name of this payload kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Trace => "trace",
            Payload::Message(_) => "message",
            Payload::Value(_) => "value",
        }
    }

    fn wire_value(&self) -> Option<String> {
        match self {
            Payload::Trace => None,
            Payload::Message(text) => Some(text.clone()),
            Payload::Value(value) => value.as_ref().map(|v| v.description()),
        }
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Trace => write!(f, "Trace"),
            Payload::Message(text) => f.debug_tuple("Message").field(text).finish(),
            Payload::Value(None) => write!(f, "Value(None)"),
            Payload::Value(Some(value)) => write!(
                f,
                "Value({}: {})",
                value.type_name(),
                value.description()
            ),
        }
    }
}

/// One immutable log event record.
#[derive(Debug, Clone)]
pub struct Entry {
    /// The payload of the log entry.
    pub payload: Payload,
    /// The severity of the log entry.
    pub severity: Severity,
    /// Path of the source file containing the calling function.
    pub calling_file_path: String,
    /// Line within the source file at which the log request was issued.
    pub calling_file_line: u32,
    /// Stack frame signature of the caller.
    pub calling_stack_frame: String,
    /// Id of the calling thread; recycled ids identify a thread only for
    /// its lifetime.
    pub calling_thread_id: u64,
    /// The instant the entry was created.
    pub timestamp: DateTime<Utc>,
    /// Name of the executing process.
    pub process_name: String,
    /// Id of the executing process; valid only for the process lifetime.
    pub process_id: u32,
}

impl Entry {
    /// Builds an entry for the calling thread, timestamped now, with
    /// process identity resolved once per process and cached.
    pub fn new(payload: Payload, severity: Severity, call_site: CallSite) -> Self {
        let process = process_identification();
        Self {
            payload,
            severity,
            calling_file_path: call_site.file.to_string(),
            calling_file_line: call_site.line,
            calling_stack_frame: call_site.function.to_string(),
            calling_thread_id: current_thread_id(),
            timestamp: Utc::now(),
            process_name: process.name.clone(),
            process_id: process.id,
        }
    }

    /// Replaces the creation timestamp. Mainly useful for tests that need
    /// deterministic formatting output.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// The wire/debug encoding of an [`Entry`], consumed by the remote recorder
/// as the HTTP body.
#[derive(Serialize, Deserialize)]
struct WireEntry {
    #[serde(rename = "payload.type")]
    payload_type: String,
    #[serde(rename = "payload.value")]
    payload_value: Option<String>,
    severity: Severity,
    #[serde(rename = "callingFilePath")]
    calling_file_path: String,
    #[serde(rename = "callingFileLine")]
    calling_file_line: u32,
    #[serde(rename = "callingStackFrame")]
    calling_stack_frame: String,
    #[serde(rename = "callingThreadID")]
    calling_thread_id: u64,
    timestamp: DateTime<Utc>,
    #[serde(rename = "processName")]
    process_name: String,
    #[serde(rename = "processID")]
    process_id: u32,
}

impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireEntry {
            payload_type: self.payload.kind().to_string(),
            payload_value: self.payload.wire_value(),
            severity: self.severity,
            calling_file_path: self.calling_file_path.clone(),
            calling_file_line: self.calling_file_line,
            calling_stack_frame: self.calling_stack_frame.clone(),
            calling_thread_id: self.calling_thread_id,
            timestamp: self.timestamp,
            process_name: self.process_name.clone(),
            process_id: self.process_id,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Entry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WireEntry::deserialize(deserializer)?;
        let payload = match wire.payload_type.as_str() {
            "trace" => Payload::Trace,
            "message" => Payload::Message(wire.payload_value.unwrap_or_default()),
            "value" => Payload::Value(
                wire.payload_value
                    .map(|description| Arc::new(OpaqueValue { description }) as Arc<dyn LogValue>),
            ),
            other => {
                return Err(de::Error::custom(format!(
                    "unknown payload type: '{}'",
                    other
                )))
            }
        };
        Ok(Entry {
            payload,
            severity: wire.severity,
            calling_file_path: wire.calling_file_path,
            calling_file_line: wire.calling_file_line,
            calling_stack_frame: wire.calling_stack_frame,
            calling_thread_id: wire.calling_thread_id,
            timestamp: wire.timestamp,
            process_name: wire.process_name,
            process_id: wire.process_id,
        })
    }
}
