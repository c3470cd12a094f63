// SPDX-License-Identifier: MIT OR Apache-2.0

//! Logging macros.
//!
//! Every macro takes an optional explicit tag followed by `format!`-style arguments:
//!
//! ```rust
//! # use calltag::InMemoryLogger;
//! # use std::sync::Arc;
//! # let logger = Arc::new(InMemoryLogger::new());
//! # calltag::global::set_global_loggers(vec![logger.clone()]);
//! calltag::info!("derived tag, {} args", 2);
//! calltag::info!(tag: "Net", "explicit tag");
//! calltag::log!(calltag::Level::Verbose, "any level");
//! # assert!(logger.drain_logs().contains("[Net]: explicit tag"));
//! ```
//!
//! Without an explicit tag the statement is tagged with the function that contains it.
//! The macros panic if that tag can't be resolved; see [`log`](crate::log()).

/// Logs at the given [`Level`](crate::Level).
#[macro_export]
macro_rules! log {
    ($level:expr, tag: $tag:expr, $($arg:tt)+) => {
        $crate::log(
            $level,
            ::core::option::Option::Some($tag),
            ::core::format_args!($($arg)+),
        )
    };
    ($level:expr, $($arg:tt)+) => {
        $crate::log(
            $level,
            ::core::option::Option::None,
            ::core::format_args!($($arg)+),
        )
    };
}

/// Logs at [`Level::Verbose`](crate::Level::Verbose).
#[macro_export]
macro_rules! verbose {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Verbose, $($arg)+)
    };
}

/// Logs at [`Level::Debug`](crate::Level::Debug).
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Debug, $($arg)+)
    };
}

/// Logs at [`Level::Info`](crate::Level::Info).
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Info, $($arg)+)
    };
}

/// Logs at [`Level::Warn`](crate::Level::Warn).
#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Warn, $($arg)+)
    };
}

/// Logs at [`Level::Error`](crate::Level::Error).
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Error, $($arg)+)
    };
}

/// Logs a condition that should never happen, at [`Level::Assert`](crate::Level::Assert).
#[macro_export]
macro_rules! wtf {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Assert, $($arg)+)
    };
}

/**
The crate's own diagnostics, enabled with the `calltag_internal` feature.

Records carry the fixed tag `calltag` and skip tag resolution, so this is safe to use from
inside the tagger.
*/
macro_rules! debuginternal {
    ($($arg:tt)+) => {
        if cfg!(feature = "calltag_internal") {
            $crate::dispatch::internal(::std::format!($($arg)+));
        }
    };
}
pub(crate) use debuginternal;
