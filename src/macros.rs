// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg → String::new()
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! join {
    // String-type concatenation shorthand!
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut s = ::std::string::String::from($first);
        $(
            s.push_str($rest);
        )+
        s
    }};
}

// Logging shorthands. First argument is a `Log` handle (see src/log.rs),
// the rest goes straight to the matching `tracing` macro, fields included.
// A disabled handle swallows the event.
//
//   logf!(self.log, query = %name, "found in cache");

/// Info-level event under the handle's span; nothing for a disabled handle.
#[macro_export]
macro_rules! logf {
    ($log:expr, $($arg:tt)+) => {
        if let Some(__span) = $log.span() {
            ::tracing::info!(parent: __span, $($arg)+)
        }
    };
}

/// Debug-level event under the handle's span; nothing for a disabled handle.
#[macro_export]
macro_rules! logd {
    ($log:expr, $($arg:tt)+) => {
        if let Some(__span) = $log.span() {
            ::tracing::debug!(parent: __span, $($arg)+)
        }
    };
}

/// Warn-level event under the handle's span; nothing for a disabled handle.
#[macro_export]
macro_rules! logw {
    ($log:expr, $($arg:tt)+) => {
        if let Some(__span) = $log.span() {
            ::tracing::warn!(parent: __span, $($arg)+)
        }
    };
}

/// Error-level event under the handle's span; nothing for a disabled handle.
#[macro_export]
macro_rules! loge {
    ($log:expr, $($arg:tt)+) => {
        if let Some(__span) = $log.span() {
            ::tracing::error!(parent: __span, $($arg)+)
        }
    };
}
