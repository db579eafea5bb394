//! Rendering styles for the elementary field formatters

use crate::core::severity::Severity;
use chrono::{DateTime, Utc};

/// Governs how a timestamp field is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TimestampStyle {
    /// The default pattern: `2025-01-08 10:30:45.123 +00:00`.
    #[default]
    Default,
    /// Seconds elapsed since the Unix epoch.
    Unix,
    /// A custom strftime-compatible pattern.
    Custom(String),
}

impl TimestampStyle {
    pub(crate) fn render(&self, timestamp: &DateTime<Utc>) -> String {
        match self {
            TimestampStyle::Default => timestamp.format("%Y-%m-%d %H:%M:%S%.3f %:z").to_string(),
            TimestampStyle::Unix => timestamp.timestamp().to_string(),
            TimestampStyle::Custom(pattern) => timestamp.format(pattern).to_string(),
        }
    }
}

/// The textual form a severity takes in formatted output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRepresentation {
    /// A human-readable word with initial capitalization (`Warning`).
    Capitalized,
    /// A human-readable word in lowercase (`warning`).
    Lowercase,
    /// A human-readable word in uppercase (`WARNING`).
    Uppercase,
    /// The numeric severity value as a string (`4`).
    Numeric,
    /// A fixed severity-to-symbol table for color-coded display. The
    /// specific symbols may change over time; not suitable for parsing.
    ColorCoded,
}

impl TextRepresentation {
    pub fn render(&self, severity: Severity) -> String {
        match self {
            TextRepresentation::Capitalized => severity.description().to_string(),
            TextRepresentation::Lowercase => severity.description().to_lowercase(),
            TextRepresentation::Uppercase => severity.description().to_uppercase(),
            TextRepresentation::Numeric => severity.value().to_string(),
            TextRepresentation::ColorCoded => match severity {
                Severity::Trace => "▫️",
                Severity::Debug => "▪️",
                Severity::Info => "🔷",
                Severity::Warn => "🔶",
                Severity::Error => "❌",
                Severity::Fatal => "‼️",
            }
            .to_string(),
        }
    }
}

/// Governs how a severity field is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SeverityStyle {
    /// Initial capitalization; no padding, truncation, or alignment.
    #[default]
    Simple,
    /// The color-coded symbol table, making important messages easy to
    /// spot in a console.
    Symbol,
    /// The numeric severity value; no padding, truncation, or alignment.
    Numeric,
    /// Full customization: a text representation, optional truncation
    /// width, optional pad width, and pad alignment.
    Custom {
        representation: TextRepresentation,
        truncate_at_width: Option<usize>,
        pad_to_width: Option<usize>,
        right_align: bool,
    },
}

impl SeverityStyle {
    pub(crate) fn representation(&self) -> TextRepresentation {
        match self {
            SeverityStyle::Simple => TextRepresentation::Capitalized,
            SeverityStyle::Symbol => TextRepresentation::ColorCoded,
            SeverityStyle::Numeric => TextRepresentation::Numeric,
            SeverityStyle::Custom { representation, .. } => *representation,
        }
    }

    pub(crate) fn truncate_at_width(&self) -> Option<usize> {
        match self {
            SeverityStyle::Custom {
                truncate_at_width, ..
            } => *truncate_at_width,
            _ => None,
        }
    }

    pub(crate) fn pad_to_width(&self) -> Option<usize> {
        match self {
            SeverityStyle::Custom { pad_to_width, .. } => *pad_to_width,
            _ => None,
        }
    }

    pub(crate) fn right_align(&self) -> bool {
        match self {
            SeverityStyle::Custom { right_align, .. } => *right_align,
            _ => false,
        }
    }
}

/// Governs how a calling-thread field renders the thread id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallingThreadStyle {
    /// Zero-padded 8-digit hex (`0000002A`).
    #[default]
    Hex,
    /// Decimal (`42`).
    Integer,
}

impl CallingThreadStyle {
    pub(crate) fn render(&self, thread_id: u64) -> String {
        match self {
            CallingThreadStyle::Hex => format!("{:08X}", thread_id),
            CallingThreadStyle::Integer => thread_id.to_string(),
        }
    }
}

/// The content of a delimiter field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DelimiterStyle {
    /// A pipe with a space on each side: `" | "`.
    #[default]
    SpacedPipe,
    /// A hyphen with a space on each side: `" - "`.
    SpacedHyphen,
    /// The tab character.
    Tab,
    /// The space character.
    Space,
    /// A custom delimiter string.
    Custom(String),
}

impl DelimiterStyle {
    /// The delimiter string this style stands for.
    pub fn delimiter(&self) -> &str {
        match self {
            DelimiterStyle::SpacedPipe => " | ",
            DelimiterStyle::SpacedHyphen => " - ",
            DelimiterStyle::Tab => "\t",
            DelimiterStyle::Space => " ",
            DelimiterStyle::Custom(sep) => sep,
        }
    }
}
