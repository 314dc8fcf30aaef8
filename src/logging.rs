//! Logging backend selection.
//!
//! Every diagnostic the history emits goes through the macros below, which
//! forward to [`log`](https://docs.rs/log) or [`tracing`](https://docs.rs/tracing)
//! depending on the enabled feature. Enable at most one of the two.
//!
//! | Feature    | Backend         | Default |
//! |------------|-----------------|---------|
//! | `log`      | `log` crate     | yes     |
//! | `tracing`  | `tracing` crate | no      |
//!
//! With neither feature enabled the macros expand to nothing and their
//! arguments are not evaluated.
//!
//! What gets logged where:
//!
//! - `trace`: approval requests and listener fan-out.
//! - `debug`: committed and blocked transitions.
//! - `warn`: caller misuse (redundant state argument, replaced prompt).
//! - `error`: a confirmation strategy is missing when one is required.

/// Forwards a record at the given level to the active backend.
#[doc(hidden)]
#[macro_export]
macro_rules! __history_log {
    ($level:ident, $($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::$level!($($arg)*);
        #[cfg(feature = "log")]
        ::log::$level!($($arg)*);
    };
}

/// Emit a **trace**-level record. Accepts `format!`-style arguments.
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        $crate::__history_log!(trace, $($arg)*);
    };
}

/// Emit a **debug**-level record. Accepts `format!`-style arguments.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        $crate::__history_log!(debug, $($arg)*);
    };
}

/// Emit an **info**-level record. Accepts `format!`-style arguments.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        $crate::__history_log!(info, $($arg)*);
    };
}

/// Emit a **warn**-level record. Accepts `format!`-style arguments.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        $crate::__history_log!(warn, $($arg)*);
    };
}

/// Emit an **error**-level record. Accepts `format!`-style arguments.
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        $crate::__history_log!(error, $($arg)*);
    };
}
