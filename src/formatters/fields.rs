//! Elementary field formatters
//!
//! Each formatter here renders exactly one aspect of an [`Entry`]. They are
//! typically combined within a
//! [`ConcatenatingFormatter`](super::ConcatenatingFormatter) or declared
//! through [`Field`](super::Field) lists.

use super::styles::{CallingThreadStyle, DelimiterStyle, SeverityStyle, TimestampStyle};
use super::Formatter;
use crate::core::entry::{Entry, Payload};
use std::path::Path;

/// Renders the entry timestamp in a [`TimestampStyle`].
pub struct TimestampFormatter {
    style: TimestampStyle,
}

impl TimestampFormatter {
    pub fn new(style: TimestampStyle) -> Self {
        Self { style }
    }
}

impl Formatter for TimestampFormatter {
    fn format(&self, entry: &Entry) -> Option<String> {
        Some(self.style.render(&entry.timestamp))
    }
}

/// Renders the entry severity in a [`SeverityStyle`], applying truncation
/// before padding when the style asks for either.
pub struct SeverityFormatter {
    style: SeverityStyle,
}

impl SeverityFormatter {
    pub fn new(style: SeverityStyle) -> Self {
        Self { style }
    }
}

impl Formatter for SeverityFormatter {
    fn format(&self, entry: &Entry) -> Option<String> {
        let mut tag = self.style.representation().render(entry.severity);
        if let Some(width) = self.style.truncate_at_width() {
            if tag.chars().count() > width {
                tag = tag.chars().take(width).collect();
            }
        }
        if let Some(width) = self.style.pad_to_width() {
            let len = tag.chars().count();
            if len < width {
                let padding = " ".repeat(width - len);
                if self.style.right_align() {
                    tag = padding + &tag;
                } else {
                    tag += &padding;
                }
            }
        }
        Some(tag)
    }
}

/// Renders the call site as `file:line`, where `file` is the last path
/// component of the calling file path. Paths with no components render as
/// the literal `redacted`.
pub struct CallSiteFormatter;

impl Formatter for CallSiteFormatter {
    fn format(&self, entry: &Entry) -> Option<String> {
        let file = Path::new(&entry.calling_file_path)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("redacted");
        Some(format!("{}:{}", file, entry.calling_file_line))
    }
}

/// Renders the stack frame signature of the caller.
pub struct StackFrameFormatter;

impl Formatter for StackFrameFormatter {
    fn format(&self, entry: &Entry) -> Option<String> {
        Some(entry.calling_stack_frame.clone())
    }
}

/// Renders the calling thread id in a [`CallingThreadStyle`].
pub struct CallingThreadFormatter {
    style: CallingThreadStyle,
}

impl CallingThreadFormatter {
    pub fn new(style: CallingThreadStyle) -> Self {
        Self { style }
    }
}

impl Formatter for CallingThreadFormatter {
    fn format(&self, entry: &Entry) -> Option<String> {
        Some(self.style.render(entry.calling_thread_id))
    }
}

/// Renders the payload by dispatching on its variant to one of three
/// sub-formatters.
pub struct PayloadFormatter {
    trace_formatter: Box<dyn Formatter>,
    message_formatter: Box<dyn Formatter>,
    value_formatter: Box<dyn Formatter>,
}

impl PayloadFormatter {
    pub fn new(
        trace_formatter: Box<dyn Formatter>,
        message_formatter: Box<dyn Formatter>,
        value_formatter: Box<dyn Formatter>,
    ) -> Self {
        Self {
            trace_formatter,
            message_formatter,
            value_formatter,
        }
    }
}

impl Default for PayloadFormatter {
    fn default() -> Self {
        Self::new(
            Box::new(PayloadTraceFormatter),
            Box::new(PayloadMessageFormatter),
            Box::new(PayloadValueFormatter),
        )
    }
}

impl Formatter for PayloadFormatter {
    fn format(&self, entry: &Entry) -> Option<String> {
        match entry.payload {
            Payload::Trace => self.trace_formatter.format(entry),
            Payload::Message(_) => self.message_formatter.format(entry),
            Payload::Value(_) => self.value_formatter.format(entry),
        }
    }
}

/// Formats trace payloads as the caller's stack frame signature; misses on
/// everything else.
pub struct PayloadTraceFormatter;

impl Formatter for PayloadTraceFormatter {
    fn format(&self, entry: &Entry) -> Option<String> {
        match entry.payload {
            Payload::Trace => Some(entry.calling_stack_frame.clone()),
            _ => None,
        }
    }
}

/// Formats message payloads as their text; misses on everything else.
pub struct PayloadMessageFormatter;

impl Formatter for PayloadMessageFormatter {
    fn format(&self, entry: &Entry) -> Option<String> {
        match &entry.payload {
            Payload::Message(text) => Some(text.clone()),
            _ => None,
        }
    }
}

/// Formats value payloads as `= nil` or `= <TypeName>: <description>`;
/// misses on everything else.
pub struct PayloadValueFormatter;

impl Formatter for PayloadValueFormatter {
    fn format(&self, entry: &Entry) -> Option<String> {
        match &entry.payload {
            Payload::Value(None) => Some("= nil".to_string()),
            Payload::Value(Some(value)) => {
                Some(format!("= {}: {}", value.type_name(), value.description()))
            }
            _ => None,
        }
    }
}

/// Renders the name of the executing process.
pub struct ProcessNameFormatter;

impl Formatter for ProcessNameFormatter {
    fn format(&self, entry: &Entry) -> Option<String> {
        Some(entry.process_name.clone())
    }
}

/// Renders the id of the executing process.
pub struct ProcessIdFormatter;

impl Formatter for ProcessIdFormatter {
    fn format(&self, entry: &Entry) -> Option<String> {
        Some(entry.process_id.to_string())
    }
}

/// Renders a constant delimiter string.
pub struct DelimiterFormatter {
    style: DelimiterStyle,
}

impl DelimiterFormatter {
    pub fn new(style: DelimiterStyle) -> Self {
        Self { style }
    }
}

impl Formatter for DelimiterFormatter {
    fn format(&self, _entry: &Entry) -> Option<String> {
        Some(self.style.delimiter().to_string())
    }
}

/// Renders a constant string literal.
pub struct LiteralFormatter {
    literal: String,
}

impl LiteralFormatter {
    pub fn new(literal: impl Into<String>) -> Self {
        Self {
            literal: literal.into(),
        }
    }
}

impl Formatter for LiteralFormatter {
    fn format(&self, _entry: &Entry) -> Option<String> {
        Some(self.literal.clone())
    }
}
