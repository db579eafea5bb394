//! Recording sinks
//!
//! Concrete [`Recorder`](crate::core::Recorder) implementations: generic
//! byte-stream output, severity-split standard streams, the platform log
//! facade, and a remote HTTP sink.

pub mod remote;
pub mod split_stream;
pub mod stream;

#[cfg(feature = "platform")]
pub mod platform;

pub use remote::{RemoteRecorder, Transport};
pub use split_stream::StandardStreamsRecorder;
pub use stream::StreamRecorder;

#[cfg(feature = "platform")]
pub use platform::{LevelTranslator, PlatformLogLevel, PlatformLogRecorder};
