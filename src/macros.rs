//! Logging macros for ergonomic message formatting.
//!
//! These macros take the logger first, then `format!`-style arguments.
//!
//! # Examples
//!
//! ```
//! use context_logger::prelude::*;
//! use context_logger::{logf, logln};
//!
//! let buffer = SharedBuffer::new();
//! let logger: Logger = Logger::new(buffer.clone());
//!
//! let port = 8080;
//! logln!(logger, "listening on port {}", port);
//! logf!(logger, "{}+{}", 1, 2);
//!
//! assert_eq!(buffer.contents(), "listening on port 8080\n1+2");
//! ```

/// Write a formatted record with `Logger::printf`.
#[macro_export]
macro_rules! logf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.printf(format_args!($($arg)+))
    };
}

/// Write a formatted record with `Logger::println`.
#[macro_export]
macro_rules! logln {
    ($logger:expr, $($arg:tt)+) => {
        $logger.println(format_args!($($arg)+))
    };
}

/// Write a debug record through a `LevelLogger`.
///
/// # Examples
///
/// ```
/// # use context_logger::prelude::*;
/// # let logger = LevelLogger::new(Logger::new(SharedBuffer::new()).with_context(WithLevel::new(Level::Debug)));
/// use context_logger::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debugf(format_args!($($arg)+))
    };
}

/// Write an info record through a `LevelLogger`.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.infof(format_args!($($arg)+))
    };
}

/// Write a warning record through a `LevelLogger`.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warningf(format_args!($($arg)+))
    };
}

/// Write an error record through a `LevelLogger`.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.errorf(format_args!($($arg)+))
    };
}

/// Write a fatal record through a `LevelLogger`.
///
/// Only logs; it does not stop the process.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatalf(format_args!($($arg)+))
    };
}
