//! Severity level definitions

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The importance of a log entry.
///
/// Severities form a total order, `Trace` being the least important and
/// `Fatal` the most. The numeric values (1 through 6) are part of the wire
/// format used by the remote recorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Severity {
    /// Step-by-step execution detail, useful only during extended debugging.
    Trace = 1,
    /// Granular information useful while debugging.
    Debug = 2,
    /// Purely informative events that can be ignored during normal operation.
    #[default]
    Info = 3,
    /// Unexpected behavior that does not prevent key functionality.
    Warn = 4,
    /// One or more functionalities are not working correctly.
    Error = 5,
    /// Key business functionality is broken.
    Fatal = 6,
}

impl Severity {
    /// All severities, in ascending order of importance.
    pub const ALL: [Severity; 6] = [
        Severity::Trace,
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
    ];

    /// The human-readable description of this severity.
    ///
    /// Note that `Warn` renders as `"Warning"`.
    pub fn description(&self) -> &'static str {
        match self {
            Severity::Trace => "Trace",
            Severity::Debug => "Debug",
            Severity::Info => "Info",
            Severity::Warn => "Warning",
            Severity::Error => "Error",
            Severity::Fatal => "Fatal",
        }
    }

    /// The numeric wire value (1–6) of this severity.
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Reconstructs a severity from its numeric wire value.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Severity::Trace),
            2 => Some(Severity::Debug),
            3 => Some(Severity::Info),
            4 => Some(Severity::Warn),
            5 => Some(Severity::Error),
            6 => Some(Severity::Fatal),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TRACE" => Ok(Severity::Trace),
            "DEBUG" => Ok(Severity::Debug),
            "INFO" => Ok(Severity::Info),
            "WARN" | "WARNING" => Ok(Severity::Warn),
            "ERROR" => Ok(Severity::Error),
            "FATAL" => Ok(Severity::Fatal),
            _ => Err(format!("Invalid severity: '{}'", s)),
        }
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.value())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u8::deserialize(deserializer)?;
        Severity::from_value(value)
            .ok_or_else(|| de::Error::custom(format!("invalid severity value: {}", value)))
    }
}
