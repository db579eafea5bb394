//! Configuration presets
//!
//! Builders that assemble the common recorder arrangements into ready
//! [`Configuration`]s: console output (platform facade and/or standard
//! streams) and a remote sink.

use crate::core::configuration::Configuration;
use crate::core::recorder::Recorder;
use crate::core::severity::Severity;
use crate::formatters::presets::PlatformMimicFormatter;
use crate::formatters::{ConcatenatingFormatter, ConsoleFormatter, Formatter};
use crate::recorders::{RemoteRecorder, StandardStreamsRecorder, Transport};
use std::sync::Arc;

#[cfg(feature = "platform")]
use crate::recorders::{LevelTranslator, PlatformLogRecorder};

/// Environment variable that disables the platform facility. When set to
/// the literal `disable`, console output goes to the standard streams
/// regardless of facility availability.
pub const ACTIVITY_MODE_VAR: &str = "LOG_PIPELINE_ACTIVITY_MODE";

fn activity_mode_disabled() -> bool {
    std::env::var(ACTIVITY_MODE_VAR)
        .map(|value| value == "disable")
        .unwrap_or(false)
}

#[cfg(feature = "platform")]
fn platform_facility_available() -> bool {
    PlatformLogRecorder::available()
}

#[cfg(not(feature = "platform"))]
fn platform_facility_available() -> bool {
    false
}

/// How console output balances the platform facility against the
/// process's standard streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StandardStreamsMode {
    /// Standard streams only when the platform facility is unusable.
    #[default]
    UseAsFallback,
    /// Standard streams always, alongside the platform facility when it
    /// is usable.
    UseAlways,
    /// Standard streams only; the platform facility is never used.
    UseExclusively,
}

impl StandardStreamsMode {
    fn selects_platform(self, available: bool, disabled: bool) -> bool {
        match self {
            StandardStreamsMode::UseExclusively => false,
            StandardStreamsMode::UseAsFallback | StandardStreamsMode::UseAlways => {
                available && !disabled
            }
        }
    }

    fn selects_streams(self, available: bool, disabled: bool) -> bool {
        match self {
            StandardStreamsMode::UseAlways | StandardStreamsMode::UseExclusively => true,
            StandardStreamsMode::UseAsFallback => !self.selects_platform(available, disabled),
        }
    }

    /// Whether console output will go through the platform facility.
    pub fn will_use_platform_facility(self) -> bool {
        self.selects_platform(platform_facility_available(), activity_mode_disabled())
    }

    /// Whether console output will go to the standard streams.
    pub fn will_use_standard_streams(self) -> bool {
        self.selects_streams(platform_facility_available(), activity_mode_disabled())
    }
}

/// Builds the console [`Configuration`].
pub struct ConsoleConfiguration {
    minimum_severity: Severity,
    standard_streams_mode: StandardStreamsMode,
    mimic_platform_output: bool,
    show_call_site: bool,
    synchronous: bool,
}

impl ConsoleConfiguration {
    pub fn new() -> Self {
        Self {
            minimum_severity: Severity::Info,
            standard_streams_mode: StandardStreamsMode::default(),
            mimic_platform_output: false,
            show_call_site: true,
            synchronous: false,
        }
    }

    pub fn minimum_severity(mut self, severity: Severity) -> Self {
        self.minimum_severity = severity;
        self
    }

    pub fn standard_streams_mode(mut self, mode: StandardStreamsMode) -> Self {
        self.standard_streams_mode = mode;
        self
    }

    /// Prefixes standard-streams output with the platform log line shape
    /// (timestamp, process name, pid and thread id) so fallback output
    /// reads the same as facility output.
    pub fn mimic_platform_output(mut self, mimic: bool) -> Self {
        self.mimic_platform_output = mimic;
        self
    }

    pub fn show_call_site(mut self, show: bool) -> Self {
        self.show_call_site = show;
        self
    }

    /// Blocks each log call until the console has the message. For
    /// debugging sessions, not production.
    pub fn synchronous(mut self, synchronous: bool) -> Self {
        self.synchronous = synchronous;
        self
    }

    pub fn build(self) -> Configuration {
        let mut recorders: Vec<Arc<dyn Recorder>> = Vec::new();

        #[cfg(feature = "platform")]
        if self.standard_streams_mode.will_use_platform_facility() {
            let formatters: Vec<Box<dyn Formatter>> =
                vec![Box::new(ConsoleFormatter::new(self.show_call_site))];
            // Availability was just checked, but the facility can race a
            // logger teardown; fall through to the streams on failure.
            if let Ok(recorder) = PlatformLogRecorder::new(formatters, LevelTranslator::Default) {
                recorders.push(Arc::new(recorder));
            }
        }

        if recorders.is_empty() || self.standard_streams_mode.will_use_standard_streams() {
            let console: Box<dyn Formatter> = Box::new(ConsoleFormatter::new(self.show_call_site));
            let formatter: Box<dyn Formatter> = if self.mimic_platform_output {
                Box::new(ConcatenatingFormatter::new(
                    vec![Box::new(PlatformMimicFormatter::new()), console],
                    true,
                ))
            } else {
                console
            };
            recorders.push(Arc::new(StandardStreamsRecorder::new(vec![formatter])));
        }

        Configuration::new(self.minimum_severity, recorders, self.synchronous)
    }
}

impl Default for ConsoleConfiguration {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the remote [`Configuration`].
pub struct RemoteConfiguration {
    endpoint: Option<String>,
    transport: Option<Arc<dyn Transport>>,
    minimum_severity: Severity,
    synchronous: bool,
}

impl RemoteConfiguration {
    pub fn new() -> Self {
        Self {
            endpoint: None,
            transport: None,
            minimum_severity: Severity::Warn,
            synchronous: false,
        }
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn minimum_severity(mut self, severity: Severity) -> Self {
        self.minimum_severity = severity;
        self
    }

    pub fn synchronous(mut self, synchronous: bool) -> Self {
        self.synchronous = synchronous;
        self
    }

    pub fn build(self) -> Configuration {
        let recorder = Arc::new(RemoteRecorder::new(self.endpoint, self.transport));
        Configuration::new(self.minimum_severity, vec![recorder], self.synchronous)
    }
}

impl Default for RemoteConfiguration {
    fn default() -> Self {
        Self::new()
    }
}
