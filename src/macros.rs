//! Logging macros
//!
//! Call-site capture plus one macro per severity. The per-severity macros
//! route through the global [`Log`](crate::core::global::Log) channels, so
//! a severity below the enabled minimum costs one `Option` check and never
//! builds a payload.

/// Captures the signature of the enclosing function.
#[macro_export]
macro_rules! function_signature {
    () => {{
        fn here() {}
        fn name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = name_of(here);
        name.strip_suffix("::here").unwrap_or(name)
    }};
}

/// Captures the current file, line, and enclosing function as a
/// [`CallSite`](crate::core::entry::CallSite).
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::core::entry::CallSite {
            file: ::std::file!(),
            line: ::std::line!(),
            function: $crate::function_signature!(),
        }
    };
}

/// Logs an execution trace at `Trace` severity, a formatted message, or a
/// value with `value:`.
#[macro_export]
macro_rules! trace {
    () => {
        if let ::std::option::Option::Some(channel) = $crate::core::global::Log::trace() {
            channel.trace($crate::call_site!());
        }
    };
    (value: $value:expr) => {
        if let ::std::option::Option::Some(channel) = $crate::core::global::Log::trace() {
            channel.value($value, $crate::call_site!());
        }
    };
    ($fmt:literal $($arg:tt)*) => {
        if let ::std::option::Option::Some(channel) = $crate::core::global::Log::trace() {
            channel.message(::std::format!($fmt $($arg)*), $crate::call_site!());
        }
    };
}

/// Logs a formatted message at `Debug` severity, or a value with `value:`.
#[macro_export]
macro_rules! debug {
    (value: $value:expr) => {
        if let ::std::option::Option::Some(channel) = $crate::core::global::Log::debug() {
            channel.value($value, $crate::call_site!());
        }
    };
    ($fmt:literal $($arg:tt)*) => {
        if let ::std::option::Option::Some(channel) = $crate::core::global::Log::debug() {
            channel.message(::std::format!($fmt $($arg)*), $crate::call_site!());
        }
    };
}

/// Logs a formatted message at `Info` severity, or a value with `value:`.
#[macro_export]
macro_rules! info {
    (value: $value:expr) => {
        if let ::std::option::Option::Some(channel) = $crate::core::global::Log::info() {
            channel.value($value, $crate::call_site!());
        }
    };
    ($fmt:literal $($arg:tt)*) => {
        if let ::std::option::Option::Some(channel) = $crate::core::global::Log::info() {
            channel.message(::std::format!($fmt $($arg)*), $crate::call_site!());
        }
    };
}

/// Logs a formatted message at `Warn` severity, or a value with `value:`.
#[macro_export]
macro_rules! warn {
    (value: $value:expr) => {
        if let ::std::option::Option::Some(channel) = $crate::core::global::Log::warn() {
            channel.value($value, $crate::call_site!());
        }
    };
    ($fmt:literal $($arg:tt)*) => {
        if let ::std::option::Option::Some(channel) = $crate::core::global::Log::warn() {
            channel.message(::std::format!($fmt $($arg)*), $crate::call_site!());
        }
    };
}

/// Logs a formatted message at `Error` severity, or a value with `value:`.
#[macro_export]
macro_rules! error {
    (value: $value:expr) => {
        if let ::std::option::Option::Some(channel) = $crate::core::global::Log::error() {
            channel.value($value, $crate::call_site!());
        }
    };
    ($fmt:literal $($arg:tt)*) => {
        if let ::std::option::Option::Some(channel) = $crate::core::global::Log::error() {
            channel.message(::std::format!($fmt $($arg)*), $crate::call_site!());
        }
    };
}

/// Logs a formatted message at `Fatal` severity, or a value with `value:`.
#[macro_export]
macro_rules! fatal {
    (value: $value:expr) => {
        if let ::std::option::Option::Some(channel) = $crate::core::global::Log::fatal() {
            channel.value($value, $crate::call_site!());
        }
    };
    ($fmt:literal $($arg:tt)*) => {
        if let ::std::option::Option::Some(channel) = $crate::core::global::Log::fatal() {
            channel.message(::std::format!($fmt $($arg)*), $crate::call_site!());
        }
    };
}
