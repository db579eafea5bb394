//! Formatter composition
//!
//! A [`Formatter`] is a pure function from an [`Entry`] to an optional
//! string. Formatters compose two ways: concatenation
//! ([`ConcatenatingFormatter`]) joins the output of several children, and
//! recorders hold an ordered chain where the first formatter to return
//! `Some` wins.

pub mod fields;
pub mod presets;
pub mod styles;

use crate::core::entry::Entry;

pub use fields::{
    CallSiteFormatter, CallingThreadFormatter, DelimiterFormatter, LiteralFormatter,
    PayloadFormatter, PayloadMessageFormatter, PayloadTraceFormatter, PayloadValueFormatter,
    ProcessIdFormatter, ProcessNameFormatter, SeverityFormatter, StackFrameFormatter,
    TimestampFormatter,
};
pub use presets::{
    ConsoleFormatter, ConsoleTraceFormatter, ReadableFormatter, StandardFormatter,
};
pub use styles::{
    CallingThreadStyle, DelimiterStyle, SeverityStyle, TextRepresentation, TimestampStyle,
};

/// Attempts to create a string representation of a log entry.
pub trait Formatter: Send + Sync {
    /// Returns a string representation of `entry`, or `None` if this
    /// formatter cannot format it.
    fn format(&self, entry: &Entry) -> Option<String>;
}

/// Concatenates the output of several formatters with no separator.
///
/// When `hard_fail` is `false`, children returning `None` are simply
/// skipped and the result is `None` only if every child returned `None`.
/// When `hard_fail` is `true`, any child returning `None` makes the whole
/// result `None`.
pub struct ConcatenatingFormatter {
    formatters: Vec<Box<dyn Formatter>>,
    hard_fail: bool,
}

impl ConcatenatingFormatter {
    pub fn new(formatters: Vec<Box<dyn Formatter>>, hard_fail: bool) -> Self {
        Self {
            formatters,
            hard_fail,
        }
    }

    /// The formatters whose output is concatenated.
    pub fn formatters(&self) -> &[Box<dyn Formatter>] {
        &self.formatters
    }

    /// Whether a single `None` child aborts the whole concatenation.
    pub fn hard_fail(&self) -> bool {
        self.hard_fail
    }
}

impl Formatter for ConcatenatingFormatter {
    fn format(&self, entry: &Entry) -> Option<String> {
        let mut formatted: Vec<String> = Vec::with_capacity(self.formatters.len());
        for formatter in &self.formatters {
            match formatter.format(entry) {
                Some(piece) => formatted.push(piece),
                None if self.hard_fail => return None,
                None => {}
            }
        }
        if formatted.is_empty() {
            return None;
        }
        Some(formatted.concat())
    }
}

/// A named field of a [`FieldBasedFormatter`]. Each field maps to exactly
/// one elementary formatter.
pub enum Field {
    /// The entry timestamp, rendered in a [`TimestampStyle`].
    Timestamp(TimestampStyle),
    /// The entry severity, rendered in a [`SeverityStyle`].
    Severity(SeverityStyle),
    /// The call site: file name and line number.
    CallSite,
    /// The stack frame signature of the caller.
    StackFrame,
    /// The id of the calling thread, rendered in a [`CallingThreadStyle`].
    CallingThread(CallingThreadStyle),
    /// The entry payload.
    Payload,
    /// The name of the executing process.
    ProcessName,
    /// The id of the executing process.
    ProcessId,
    /// A text delimiter.
    Delimiter(DelimiterStyle),
    /// A string literal.
    Literal(String),
    /// The output of an arbitrary nested formatter.
    Custom(Box<dyn Formatter>),
}

impl Field {
    fn into_formatter(self) -> Box<dyn Formatter> {
        match self {
            Field::Timestamp(style) => Box::new(TimestampFormatter::new(style)),
            Field::Severity(style) => Box::new(SeverityFormatter::new(style)),
            Field::CallSite => Box::new(CallSiteFormatter),
            Field::StackFrame => Box::new(StackFrameFormatter),
            Field::CallingThread(style) => Box::new(CallingThreadFormatter::new(style)),
            Field::Payload => Box::new(PayloadFormatter::default()),
            Field::ProcessName => Box::new(ProcessNameFormatter),
            Field::ProcessId => Box::new(ProcessIdFormatter),
            Field::Delimiter(style) => Box::new(DelimiterFormatter::new(style)),
            Field::Literal(literal) => Box::new(LiteralFormatter::new(literal)),
            Field::Custom(formatter) => formatter,
        }
    }
}

/// Builds a formatter from an ordered list of named [`Field`]s.
///
/// The field list is realized as a [`ConcatenatingFormatter`] with
/// `hard_fail = false`.
///
/// ```
/// use log_pipeline::formatters::{Field, FieldBasedFormatter};
/// use log_pipeline::formatters::styles::{DelimiterStyle, SeverityStyle, TimestampStyle};
///
/// let formatter = FieldBasedFormatter::new(vec![
///     Field::Timestamp(TimestampStyle::Unix),
///     Field::Delimiter(DelimiterStyle::Tab),
///     Field::Severity(SeverityStyle::Numeric),
///     Field::Delimiter(DelimiterStyle::Tab),
///     Field::Payload,
/// ]);
/// ```
pub struct FieldBasedFormatter {
    inner: ConcatenatingFormatter,
}

impl FieldBasedFormatter {
    pub fn new(fields: Vec<Field>) -> Self {
        let formatters = fields.into_iter().map(Field::into_formatter).collect();
        Self {
            inner: ConcatenatingFormatter::new(formatters, false),
        }
    }
}

impl Formatter for FieldBasedFormatter {
    fn format(&self, entry: &Entry) -> Option<String> {
        self.inner.format(entry)
    }
}

// Closures are formatters; handy for tests and custom fields.
impl<F> Formatter for F
where
    F: Fn(&Entry) -> Option<String> + Send + Sync,
{
    fn format(&self, entry: &Entry) -> Option<String> {
        self(entry)
    }
}
