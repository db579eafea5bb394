//! The recorder seam
//!
//! A [`Recorder`] owns an ordered formatter chain and a delivery queue.
//! The receptacle walks the chain, takes the first formatter that returns
//! `Some`, and enqueues the resulting message on the recorder's queue. A
//! recorder whose entire chain returns `None` silently drops the entry.

use super::entry::Entry;
use super::queue::DeliveryQueue;
use crate::formatters::Formatter;
use std::sync::Arc;

/// Appends formatted log messages to an underlying sink.
///
/// `record` is only ever invoked from the recorder's own delivery queue,
/// one message at a time, so implementations need no additional
/// synchronization for the sink itself. Shared interior state still needs
/// protection when a recorder also exposes it outside the queue.
pub trait Recorder: Send + Sync {
    /// A short name identifying this recorder in diagnostics.
    fn name(&self) -> &str;

    /// The ordered formatter chain. The first formatter to produce output
    /// for an entry wins.
    fn formatters(&self) -> &[Box<dyn Formatter>];

    /// The queue this recorder's messages are delivered on.
    fn queue(&self) -> &Arc<DeliveryQueue>;

    /// Appends one formatted message to the sink.
    ///
    /// `synchronous` is `true` when the originating configuration runs in
    /// synchronous mode; recorders buffering their sink should flush
    /// eagerly in that case so output is visible before the log call
    /// returns.
    fn record(&self, message: &str, entry: &Entry, synchronous: bool);
}
