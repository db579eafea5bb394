//! Severity channels
//!
//! A [`Channel`] is the entry point for log calls at one fixed severity.
//! It stamps each request with its severity and call-site metadata, builds
//! the [`Entry`], and hands it to the receptacle. The per-severity macros
//! in [`crate::macros`] route through the channels of the global
//! [`Log`](super::global::Log) surface.

use super::entry::{CallSite, Entry, Payload};
use super::receptacle::Receptacle;
use super::severity::Severity;
use std::fmt;
use std::sync::Arc;

/// A log entry point fixed to one severity.
pub struct Channel {
    severity: Severity,
    receptacle: Arc<Receptacle>,
}

impl Channel {
    pub fn new(severity: Severity, receptacle: Arc<Receptacle>) -> Self {
        Self {
            severity,
            receptacle,
        }
    }

    /// The severity every entry from this channel carries.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Logs an execution trace marker for the given call site.
    pub fn trace(&self, call_site: CallSite) {
        self.log(Payload::Trace, call_site);
    }

    /// Logs a text message.
    pub fn message(&self, text: impl Into<String>, call_site: CallSite) {
        self.log(Payload::message(text), call_site);
    }

    /// Logs an arbitrary value, or its absence.
    pub fn value<V: fmt::Debug + Send + Sync + 'static>(
        &self,
        value: Option<V>,
        call_site: CallSite,
    ) {
        self.log(Payload::value_of(value), call_site);
    }

    fn log(&self, payload: Payload, call_site: CallSite) {
        self.receptacle
            .log(Entry::new(payload, self.severity, call_site));
    }
}
