//! # Log Pipeline
//!
//! A structured logging pipeline with severity channels, pluggable
//! formatting, and per-sink delivery queues.
//!
//! ## Features
//!
//! - **Asynchronous by default**: log calls enqueue and return; each sink
//!   drains its own FIFO delivery queue
//! - **Multiple recorders**: standard streams, the platform log facade,
//!   and remote endpoints, each with an independent severity threshold
//! - **Composable formatting**: per-recorder formatter chains where the
//!   first formatter to produce output wins
//! - **Thread safe**: entries are immutable and shared without locking

pub mod config;
pub mod core;
pub mod formatters;
pub mod macros;
pub mod recorders;

pub mod prelude {
    pub use crate::config::{ConsoleConfiguration, RemoteConfiguration, StandardStreamsMode};
    pub use crate::core::{
        CallSite, Channel, Configuration, DeliveryQueue, Entry, Log, LogValue, MetricsSnapshot,
        Payload, PipelineError, Receptacle, ReceptacleMetrics, Recorder, Result, Severity,
    };
    pub use crate::formatters::{
        ConcatenatingFormatter, ConsoleFormatter, Field, FieldBasedFormatter, Formatter,
        ReadableFormatter, StandardFormatter,
    };
    pub use crate::recorders::{
        RemoteRecorder, StandardStreamsRecorder, StreamRecorder, Transport,
    };

    #[cfg(feature = "platform")]
    pub use crate::recorders::{LevelTranslator, PlatformLogLevel, PlatformLogRecorder};
}

pub use crate::config::{ConsoleConfiguration, RemoteConfiguration, StandardStreamsMode};
pub use crate::core::{
    CallSite, Channel, Configuration, DeliveryQueue, Entry, Log, LogValue, MetricsSnapshot,
    Payload, PipelineError, Receptacle, ReceptacleMetrics, Recorder, Result, Severity,
};
pub use crate::formatters::Formatter;
pub use crate::recorders::{RemoteRecorder, StandardStreamsRecorder, StreamRecorder, Transport};

#[cfg(feature = "platform")]
pub use crate::recorders::{LevelTranslator, PlatformLogLevel, PlatformLogRecorder};
