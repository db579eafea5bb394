//! Preset formatters
//!
//! Ready-made field compositions covering the common output shapes: a
//! standard pipe-delimited line, a width-aligned readable variant, and a
//! console format that gives execution traces a distinct rendering.

use super::styles::{CallingThreadStyle, DelimiterStyle, SeverityStyle, TextRepresentation, TimestampStyle};
use super::{Field, FieldBasedFormatter, Formatter};
use crate::core::entry::{Entry, Payload};

/// Options shared by [`StandardFormatter`] and [`ReadableFormatter`].
///
/// A `None` style suppresses that field entirely.
#[derive(Default)]
pub struct StandardFormatterOptions {
    pub timestamp_style: Option<TimestampStyle>,
    pub severity_style: Option<SeverityStyle>,
    /// Overrides the default field delimiters when set.
    pub delimiter_style: Option<DelimiterStyle>,
    pub calling_thread_style: Option<CallingThreadStyle>,
    pub show_call_site: bool,
}

impl StandardFormatterOptions {
    fn standard() -> Self {
        Self {
            timestamp_style: Some(TimestampStyle::Default),
            severity_style: Some(SeverityStyle::Simple),
            delimiter_style: None,
            calling_thread_style: Some(CallingThreadStyle::Hex),
            show_call_site: true,
        }
    }

    fn readable() -> Self {
        Self {
            severity_style: Some(SeverityStyle::Custom {
                representation: TextRepresentation::Capitalized,
                truncate_at_width: Some(7),
                pad_to_width: Some(7),
                right_align: false,
            }),
            ..Self::standard()
        }
    }
}

/// The standard log line: `timestamp | severity | thread | file:line - payload`.
pub struct StandardFormatter {
    inner: FieldBasedFormatter,
}

impl StandardFormatter {
    pub fn new() -> Self {
        Self::with_options(StandardFormatterOptions::standard())
    }

    pub fn with_options(options: StandardFormatterOptions) -> Self {
        let delimiter = options.delimiter_style.clone();
        let field_delimiter =
            || Field::Delimiter(delimiter.clone().unwrap_or(DelimiterStyle::SpacedPipe));

        let mut fields = Vec::new();
        if let Some(style) = options.timestamp_style {
            fields.push(Field::Timestamp(style));
            fields.push(field_delimiter());
        }
        if let Some(style) = options.severity_style {
            fields.push(Field::Severity(style));
            fields.push(field_delimiter());
        }
        if let Some(style) = options.calling_thread_style {
            fields.push(Field::CallingThread(style));
            fields.push(field_delimiter());
        }
        if options.show_call_site {
            fields.push(Field::CallSite);
            fields.push(Field::Delimiter(
                options.delimiter_style.unwrap_or(DelimiterStyle::SpacedHyphen),
            ));
        }
        fields.push(Field::Payload);

        Self {
            inner: FieldBasedFormatter::new(fields),
        }
    }
}

impl Default for StandardFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for StandardFormatter {
    fn format(&self, entry: &Entry) -> Option<String> {
        self.inner.format(entry)
    }
}

/// A [`StandardFormatter`] with the severity truncated and padded to a
/// fixed width of 7 so that consecutive lines align.
pub struct ReadableFormatter {
    inner: StandardFormatter,
}

impl ReadableFormatter {
    pub fn new() -> Self {
        Self {
            inner: StandardFormatter::with_options(StandardFormatterOptions::readable()),
        }
    }
}

impl Default for ReadableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for ReadableFormatter {
    fn format(&self, entry: &Entry) -> Option<String> {
        self.inner.format(entry)
    }
}

/// A trace-only composite: formats only entries whose payload is a trace
/// marker (`symbol -> file:line - signature`), returning `None` for
/// everything else. Used to give trace calls a distinct rendering while
/// sharing a recorder with message and value entries.
pub struct ConsoleTraceFormatter {
    inner: FieldBasedFormatter,
}

impl ConsoleTraceFormatter {
    pub fn new() -> Self {
        Self {
            inner: FieldBasedFormatter::new(vec![
                Field::Severity(SeverityStyle::Symbol),
                Field::Literal(" -> ".to_string()),
                Field::CallSite,
                Field::Delimiter(DelimiterStyle::SpacedHyphen),
                Field::Payload,
            ]),
        }
    }
}

impl Default for ConsoleTraceFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for ConsoleTraceFormatter {
    fn format(&self, entry: &Entry) -> Option<String> {
        match entry.payload {
            Payload::Trace => self.inner.format(entry),
            _ => None,
        }
    }
}

/// The console format: a severity symbol followed by the payload, with an
/// optional trailing call site. Trace entries take the
/// [`ConsoleTraceFormatter`] rendering instead.
pub struct ConsoleFormatter {
    trace_formatter: ConsoleTraceFormatter,
    default_formatter: FieldBasedFormatter,
}

impl ConsoleFormatter {
    pub fn new(show_call_site: bool) -> Self {
        let mut fields = vec![
            Field::Severity(SeverityStyle::Symbol),
            Field::Delimiter(DelimiterStyle::Space),
            Field::Payload,
        ];
        if show_call_site {
            fields.push(Field::Literal(" (".to_string()));
            fields.push(Field::CallSite);
            fields.push(Field::Literal(")".to_string()));
        }
        Self {
            trace_formatter: ConsoleTraceFormatter::new(),
            default_formatter: FieldBasedFormatter::new(fields),
        }
    }
}

impl Formatter for ConsoleFormatter {
    fn format(&self, entry: &Entry) -> Option<String> {
        self.trace_formatter
            .format(entry)
            .or_else(|| self.default_formatter.format(entry))
    }
}

/// Prefix that mimics the platform log line shape:
/// `timestamp process[pid:tid] [log-pipeline] `. Concatenated in front of
/// a [`ConsoleFormatter`] by the console configuration.
pub(crate) struct PlatformMimicFormatter {
    inner: FieldBasedFormatter,
}

impl PlatformMimicFormatter {
    pub(crate) fn new() -> Self {
        Self {
            inner: FieldBasedFormatter::new(vec![
                Field::Timestamp(TimestampStyle::Custom(
                    "%Y-%m-%d %H:%M:%S%.6f".to_string(),
                )),
                Field::Literal(" ".to_string()),
                Field::ProcessName,
                Field::Literal("[".to_string()),
                Field::ProcessId,
                Field::Literal(":".to_string()),
                Field::CallingThread(CallingThreadStyle::Integer),
                Field::Literal("] [log-pipeline] ".to_string()),
            ]),
        }
    }
}

impl Formatter for PlatformMimicFormatter {
    fn format(&self, entry: &Entry) -> Option<String> {
        self.inner.format(entry)
    }
}
