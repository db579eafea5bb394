//! Platform log facade recorder
//!
//! Bridges the pipeline into the `log` facade so formatted messages also
//! reach whatever logger the hosting application installed. The facade has
//! its own five-value level vocabulary; a [`LevelTranslator`] decides how
//! pipeline severities map onto it.

use crate::core::entry::Entry;
use crate::core::error::{PipelineError, Result};
use crate::core::queue::DeliveryQueue;
use crate::core::recorder::Recorder;
use crate::core::severity::Severity;
use crate::formatters::Formatter;
use std::sync::Arc;

/// The level vocabulary of the platform facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformLogLevel {
    Debug,
    Info,
    /// The facility's middle level, between informational and error.
    Default,
    Error,
    /// The facility's most severe level.
    Fault,
}

impl PlatformLogLevel {
    /// The nearest `log` facade level. `Default` lands on `Warn`; `Fault`
    /// collapses onto `Error` because the facade has nothing above it.
    pub(crate) fn facade_level(self) -> log::Level {
        match self {
            PlatformLogLevel::Debug => log::Level::Debug,
            PlatformLogLevel::Info => log::Level::Info,
            PlatformLogLevel::Default => log::Level::Warn,
            PlatformLogLevel::Error => log::Level::Error,
            PlatformLogLevel::Fault => log::Level::Error,
        }
    }
}

/// Maps an entry to a [`PlatformLogLevel`].
#[derive(Clone)]
pub enum LevelTranslator {
    /// The straightforward mapping: info stays info, warnings take the
    /// facility's default level, and only fatal entries become faults.
    Default,
    /// Escalates by one step so platform-side filtering at `Error` still
    /// shows pipeline warnings.
    Strict,
    /// De-escalates errors to the default level for chatty environments
    /// where faults page someone.
    Relaxed,
    AllAsDefault,
    AllAsInfo,
    AllAsDebug,
    /// Full custom control per entry.
    Function(Arc<dyn Fn(&Entry) -> PlatformLogLevel + Send + Sync>),
}

impl LevelTranslator {
    pub fn level_for(&self, entry: &Entry) -> PlatformLogLevel {
        use PlatformLogLevel::*;
        match self {
            LevelTranslator::Default => match entry.severity {
                Severity::Trace | Severity::Debug => Debug,
                Severity::Info => Info,
                Severity::Warn => Default,
                Severity::Error => Error,
                Severity::Fatal => Fault,
            },
            LevelTranslator::Strict => match entry.severity {
                Severity::Trace | Severity::Debug => Debug,
                Severity::Info => Default,
                Severity::Warn => Error,
                Severity::Error | Severity::Fatal => Fault,
            },
            LevelTranslator::Relaxed => match entry.severity {
                Severity::Trace | Severity::Debug => Debug,
                Severity::Info => Info,
                Severity::Warn | Severity::Error | Severity::Fatal => Default,
            },
            LevelTranslator::AllAsDefault => Default,
            LevelTranslator::AllAsInfo => Info,
            LevelTranslator::AllAsDebug => Debug,
            LevelTranslator::Function(function) => function(entry),
        }
    }
}

impl std::fmt::Debug for LevelTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LevelTranslator::Default => "Default",
            LevelTranslator::Strict => "Strict",
            LevelTranslator::Relaxed => "Relaxed",
            LevelTranslator::AllAsDefault => "AllAsDefault",
            LevelTranslator::AllAsInfo => "AllAsInfo",
            LevelTranslator::AllAsDebug => "AllAsDebug",
            LevelTranslator::Function(_) => "Function",
        };
        f.write_str(name)
    }
}

/// Records through the `log` facade.
pub struct PlatformLogRecorder {
    formatters: Vec<Box<dyn Formatter>>,
    queue: Arc<DeliveryQueue>,
    translator: LevelTranslator,
    target: String,
}

impl PlatformLogRecorder {
    /// Whether the facility can carry messages right now: the facade must
    /// not be compiled out and a logger must be installed.
    pub fn available() -> bool {
        log::STATIC_MAX_LEVEL != log::LevelFilter::Off
            && log::max_level() != log::LevelFilter::Off
    }

    /// Creates a recorder, or fails when the facility is unavailable.
    /// Availability is checked once here, not per record.
    pub fn new(formatters: Vec<Box<dyn Formatter>>, translator: LevelTranslator) -> Result<Self> {
        Self::with_target(formatters, translator, "log-pipeline")
    }

    /// Like [`new`](Self::new) with an explicit facade target.
    pub fn with_target(
        formatters: Vec<Box<dyn Formatter>>,
        translator: LevelTranslator,
        target: impl Into<String>,
    ) -> Result<Self> {
        if !Self::available() {
            return Err(PipelineError::unavailable("platform log facade"));
        }
        Ok(Self {
            formatters,
            queue: DeliveryQueue::new("log-pipeline.recorder.platform"),
            translator,
            target: target.into(),
        })
    }
}

impl Recorder for PlatformLogRecorder {
    fn name(&self) -> &str {
        "platform"
    }

    fn formatters(&self) -> &[Box<dyn Formatter>] {
        &self.formatters
    }

    fn queue(&self) -> &Arc<DeliveryQueue> {
        &self.queue
    }

    fn record(&self, message: &str, entry: &Entry, synchronous: bool) {
        let level = self.translator.level_for(entry).facade_level();
        log::log!(target: &self.target, level, "{}", message);
        if synchronous {
            log::logger().flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::{CallSite, Payload};

    fn entry(severity: Severity) -> Entry {
        Entry::new(
            Payload::message("x"),
            severity,
            CallSite {
                file: "src/job.rs",
                line: 12,
                function: "job::step",
            },
        )
    }

    fn levels_for(translator: LevelTranslator) -> Vec<PlatformLogLevel> {
        Severity::ALL
            .iter()
            .map(|&severity| translator.level_for(&entry(severity)))
            .collect()
    }

    #[test]
    fn test_default_translation_table() {
        use PlatformLogLevel::*;
        assert_eq!(
            levels_for(LevelTranslator::Default),
            vec![Debug, Debug, Info, Default, Error, Fault]
        );
    }

    #[test]
    fn test_strict_translation_table() {
        use PlatformLogLevel::*;
        assert_eq!(
            levels_for(LevelTranslator::Strict),
            vec![Debug, Debug, Default, Error, Fault, Fault]
        );
    }

    #[test]
    fn test_relaxed_translation_table() {
        use PlatformLogLevel::*;
        assert_eq!(
            levels_for(LevelTranslator::Relaxed),
            vec![Debug, Debug, Info, Default, Default, Default]
        );
    }

    #[test]
    fn test_uniform_translators() {
        use PlatformLogLevel::*;
        assert!(levels_for(LevelTranslator::AllAsDefault)
            .iter()
            .all(|&l| l == Default));
        assert!(levels_for(LevelTranslator::AllAsInfo)
            .iter()
            .all(|&l| l == Info));
        assert!(levels_for(LevelTranslator::AllAsDebug)
            .iter()
            .all(|&l| l == Debug));
    }

    #[test]
    fn test_function_translator_sees_the_entry() {
        let translator = LevelTranslator::Function(Arc::new(|entry: &Entry| {
            if entry.severity >= Severity::Error {
                PlatformLogLevel::Fault
            } else {
                PlatformLogLevel::Debug
            }
        }));
        assert_eq!(
            translator.level_for(&entry(Severity::Info)),
            PlatformLogLevel::Debug
        );
        assert_eq!(
            translator.level_for(&entry(Severity::Fatal)),
            PlatformLogLevel::Fault
        );
    }

    #[test]
    fn test_facade_level_mapping() {
        assert_eq!(PlatformLogLevel::Default.facade_level(), log::Level::Warn);
        assert_eq!(PlatformLogLevel::Fault.facade_level(), log::Level::Error);
    }

    #[test]
    fn test_construction_fails_without_a_logger() {
        // Nothing installs a facade logger in this test binary, so the
        // facility reports unavailable and construction must fail.
        if !PlatformLogRecorder::available() {
            let result = PlatformLogRecorder::new(Vec::new(), LevelTranslator::Default);
            assert!(matches!(
                result,
                Err(PipelineError::FacilityUnavailable { .. })
            ));
        }
    }
}
