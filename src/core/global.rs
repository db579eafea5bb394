//! The process-wide logging surface
//!
//! [`Log`] owns one receptacle and up to six severity channels for the
//! whole process. Enabling is a one-time latch: the first `enable_*` call
//! wins and later calls are ignored, so libraries racing the application
//! cannot swap the pipeline out from under in-flight log calls.
//!
//! Channels below the receptacle's minimum severity are never
//! materialized; their accessors return `None` and the per-severity macros
//! skip payload construction entirely.

use super::channel::Channel;
use super::configuration::Configuration;
use super::receptacle::Receptacle;
use super::severity::Severity;
use crate::config::ConsoleConfiguration;
use std::sync::{Arc, OnceLock};

struct ActivePipeline {
    receptacle: Arc<Receptacle>,
    trace: Option<Channel>,
    debug: Option<Channel>,
    info: Option<Channel>,
    warn: Option<Channel>,
    error: Option<Channel>,
    fatal: Option<Channel>,
}

static ACTIVE: OnceLock<ActivePipeline> = OnceLock::new();

/// The process-wide logging interface.
pub struct Log;

impl Log {
    /// Enables console logging at `Info` and above.
    ///
    /// Returns `false` if the pipeline was already enabled, in which case
    /// the earlier configuration stays active.
    pub fn enable() -> bool {
        Self::enable_with_severity(Severity::Info)
    }

    /// Enables console logging at `minimum_severity` and above.
    pub fn enable_with_severity(minimum_severity: Severity) -> bool {
        Self::enable_configurations(vec![ConsoleConfiguration::new()
            .minimum_severity(minimum_severity)
            .build()])
    }

    /// Enables logging with an explicit configuration set.
    pub fn enable_configurations(configurations: Vec<Configuration>) -> bool {
        Self::enable_receptacle(Receptacle::new(configurations))
    }

    /// Enables logging with a fully built receptacle.
    pub fn enable_receptacle(receptacle: Receptacle) -> bool {
        let receptacle = Arc::new(receptacle);
        let minimum = receptacle.minimum_severity();
        let channel = |severity: Severity| {
            (severity >= minimum).then(|| Channel::new(severity, Arc::clone(&receptacle)))
        };
        ACTIVE
            .set(ActivePipeline {
                trace: channel(Severity::Trace),
                debug: channel(Severity::Debug),
                info: channel(Severity::Info),
                warn: channel(Severity::Warn),
                error: channel(Severity::Error),
                fatal: channel(Severity::Fatal),
                receptacle,
            })
            .is_ok()
    }

    /// Whether an `enable_*` call has taken effect.
    pub fn is_enabled() -> bool {
        ACTIVE.get().is_some()
    }

    /// The channel for a severity, if the pipeline is enabled and the
    /// severity clears the receptacle's minimum.
    pub fn channel(severity: Severity) -> Option<&'static Channel> {
        let active = ACTIVE.get()?;
        match severity {
            Severity::Trace => active.trace.as_ref(),
            Severity::Debug => active.debug.as_ref(),
            Severity::Info => active.info.as_ref(),
            Severity::Warn => active.warn.as_ref(),
            Severity::Error => active.error.as_ref(),
            Severity::Fatal => active.fatal.as_ref(),
        }
    }

    pub fn trace() -> Option<&'static Channel> {
        Self::channel(Severity::Trace)
    }

    pub fn debug() -> Option<&'static Channel> {
        Self::channel(Severity::Debug)
    }

    pub fn info() -> Option<&'static Channel> {
        Self::channel(Severity::Info)
    }

    pub fn warn() -> Option<&'static Channel> {
        Self::channel(Severity::Warn)
    }

    pub fn error() -> Option<&'static Channel> {
        Self::channel(Severity::Error)
    }

    pub fn fatal() -> Option<&'static Channel> {
        Self::channel(Severity::Fatal)
    }

    /// The active receptacle, if enabled.
    pub fn receptacle() -> Option<&'static Arc<Receptacle>> {
        ACTIVE.get().map(|active| &active.receptacle)
    }

    /// Blocks until everything logged so far has been recorded. A no-op
    /// when the pipeline is not enabled.
    pub fn drain() {
        if let Some(active) = ACTIVE.get() {
            active.receptacle.drain();
        }
    }
}
