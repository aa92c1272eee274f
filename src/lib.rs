//! # Context Logger
//!
//! A synchronous structured logger. Every logger carries a caller-defined
//! context value; each record runs through an ordered chain of hooks, an
//! optional formatter, and is written to its sink in one piece.
//!
//! ## Features
//!
//! - **Immutable configuration**: `with_context`, `with_formatter` and
//!   `add_hook` derive new loggers and leave the original untouched
//! - **Ordered hooks**: each hook may rewrite the record, skip it, or fail it
//! - **Fail-soft**: a failing hook or formatter becomes a diagnostic line
//!   instead of a lost record or a crash
//! - **Thread safe**: loggers of one lineage share a write lock, so records
//!   never interleave
//! - **Writer adapter**: a logger is itself an `io::Write`, one record per line

pub mod core;
pub mod field;
pub mod format;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        AnyContext, FieldValue, Flow, Formatter, Hook, LogContext, Logger, LoggerError,
        PipelineMetrics, Result, DIAGNOSTIC_MARKER, MAX_LINE_LEN,
    };
    pub use crate::field::{
        hook_any_level_skip, hook_level_skip, hook_update_time, is_active, Level, LevelLogger,
        LevelWriter, Leveler, Timer, WithLevel, WithTime,
    };
    pub use crate::format;
    pub use crate::sinks::{FileSink, SharedBuffer};
    #[cfg(feature = "file")]
    pub use crate::sinks::LockedFileSink;
}

pub use crate::core::{
    AnyContext, FieldValue, Flow, Formatter, Hook, LogContext, Logger, LoggerError,
    PipelineMetrics, Result, DIAGNOSTIC_MARKER, MAX_LINE_LEN,
};
pub use field::{
    hook_any_level_skip, hook_level_skip, hook_update_time, is_active, Level, LevelLogger,
    LevelWriter, Leveler, Timer, WithLevel, WithTime,
};
pub use sinks::{FileSink, SharedBuffer};
#[cfg(feature = "file")]
pub use sinks::LockedFileSink;
