//! Hook chain and formatter stage of the write path
//!
//! A record travels `hooks -> formatter -> sink`. Every hook receives the
//! working `(context, message)` pair and decides, through [`Flow`], whether
//! the record continues, is silently suppressed, or fails.

use super::error::{LoggerError, Result};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// What a hook decided to do with a record
#[derive(Debug)]
pub enum Flow<C> {
    /// Hand the (possibly replaced) context and message to the next stage
    Continue(C, String),
    /// Drop the record: nothing is written and nothing is reported
    Skip,
    /// Abort the record and write a diagnostic line instead
    Fail(LoggerError),
}

impl<C> Flow<C> {
    /// Shorthand for `Flow::Fail` with any error convertible to `LoggerError`
    pub fn fail(err: impl Into<LoggerError>) -> Self {
        Flow::Fail(err.into())
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, Flow::Skip)
    }
}

/// Pre-write transformation step
pub type Hook<C> = Arc<dyn Fn(C, String) -> Flow<C> + Send + Sync>;

/// Final rendering step
pub type Formatter<C> = Arc<dyn Fn(&C, &str) -> Result<String> + Send + Sync>;

/// Result of running a record through hooks and formatter
#[derive(Debug)]
pub(crate) enum Outcome {
    Render(String),
    Skipped,
    Failed(LoggerError),
}

/// Run `message` through the hook chain, then the formatter.
///
/// The context is a working copy: whatever the hooks return is only seen by
/// later hooks and the formatter of this record. A panicking hook or
/// formatter is turned into a failure.
pub(crate) fn process<C>(
    hooks: &[Hook<C>],
    formatter: Option<&Formatter<C>>,
    mut context: C,
    mut message: String,
) -> Outcome {
    for hook in hooks {
        let flow = catch_unwind(AssertUnwindSafe(|| hook(context, message)));
        match flow {
            Ok(Flow::Continue(next_context, next_message)) => {
                context = next_context;
                message = next_message;
            }
            Ok(Flow::Skip) => return Outcome::Skipped,
            Ok(Flow::Fail(err)) => return Outcome::Failed(err),
            Err(panic_info) => return Outcome::Failed(panicked(panic_info)),
        }
    }

    let Some(formatter) = formatter else {
        return Outcome::Render(message);
    };

    match catch_unwind(AssertUnwindSafe(|| formatter(&context, &message))) {
        Ok(Ok(rendered)) => Outcome::Render(rendered),
        Ok(Err(err)) => Outcome::Failed(err),
        Err(panic_info) => Outcome::Failed(panicked(panic_info)),
    }
}

fn panicked(panic_info: Box<dyn Any + Send>) -> LoggerError {
    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    };
    LoggerError::Panicked(panic_msg)
}
