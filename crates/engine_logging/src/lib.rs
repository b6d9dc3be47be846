#![deny(missing_docs)]
//! Shared logging utilities for the VideoMancer workspace.
//!
//! This crate provides the `engine_*` logging macros used across the codebase,
//! a per-thread "current run" context that prefixes log lines emitted while a
//! simulated generation is being driven, and a minimal test initializer for the
//! global logger.

use std::cell::Cell;

thread_local! {
    /// Thread-local storage for the generation run currently being driven.
    static CURRENT_RUN: Cell<Option<u64>> = const { Cell::new(None) };
}

/// Marks `run` as the generation run being driven on the current thread.
///
/// Pass `None` once the run has completed or was cancelled.
pub fn set_current_run(run: Option<u64>) {
    CURRENT_RUN.with(|v| v.set(run));
}

/// Returns the generation run being driven on the current thread, if any.
pub fn current_run() -> Option<u64> {
    CURRENT_RUN.with(|v| v.get())
}

/// Runs `f` with `run` installed as the current run, restoring the previous value after.
pub fn with_run<T>(run: u64, f: impl FnOnce() -> T) -> T {
    let previous = current_run();
    set_current_run(Some(run));
    let out = f();
    set_current_run(previous);
    out
}

/// Shared body of the `engine_*` macros; prefixes the current run when set.
#[doc(hidden)]
#[macro_export]
macro_rules! __engine_log {
    ($level:ident, $($arg:tt)*) => {{
        match $crate::current_run() {
            Some(run) => log::$level!("[run {}] {}", run, format_args!($($arg)*)),
            None => log::$level!($($arg)*),
        }
    }};
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {
        $crate::__engine_log!(trace, $($arg)*)
    };
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {
        $crate::__engine_log!(info, $($arg)*)
    };
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {
        $crate::__engine_log!(debug, $($arg)*)
    };
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {
        $crate::__engine_log!(warn, $($arg)*)
    };
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {
        $crate::__engine_log!(error, $($arg)*)
    };
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_run_restores_previous_context() {
        set_current_run(Some(1));
        let seen = with_run(7, current_run);
        assert_eq!(seen, Some(7));
        assert_eq!(current_run(), Some(1));
        set_current_run(None);
        assert_eq!(current_run(), None);
    }

    #[test]
    fn macros_accept_format_arguments() {
        initialize_for_tests();
        engine_info!("plain message");
        with_run(3, || engine_debug!("tick progress={}", 15));
    }
}
