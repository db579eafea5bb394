//! Core pipeline types
//!
//! The pipeline moves one [`Entry`](entry::Entry) from a severity
//! [`Channel`](channel::Channel) through the
//! [`Receptacle`](receptacle::Receptacle), which fans it out to every
//! [`Configuration`](configuration::Configuration) that accepts its
//! severity. Each configuration's recorders format the entry and append
//! the result on their own [`DeliveryQueue`](queue::DeliveryQueue).

pub mod channel;
pub mod configuration;
pub mod entry;
pub mod error;
pub mod global;
pub mod metrics;
pub mod queue;
pub mod recorder;
pub mod receptacle;
pub mod severity;

pub use channel::Channel;
pub use configuration::Configuration;
pub use entry::{CallSite, Entry, LogValue, Payload};
pub use error::{PipelineError, Result};
pub use global::Log;
pub use metrics::{MetricsSnapshot, ReceptacleMetrics};
pub use queue::DeliveryQueue;
pub use recorder::Recorder;
pub use receptacle::Receptacle;
pub use severity::Severity;
