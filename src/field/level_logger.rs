//! Level-aware facade over `Logger`

use super::level::{is_active, Level, Leveler};
use crate::core::{Flow, Logger, Result};
use std::fmt;
use std::io::{self, Write};

/// Logger with one entry point per level
///
/// Each call checks the level against the context's minimum, then writes
/// through a derived logger whose context carries that level, so hooks and
/// formatters can read it.
///
/// # Example
///
/// ```
/// use context_logger::{Level, LevelLogger, Logger, SharedBuffer, WithLevel};
///
/// let buffer = SharedBuffer::new();
/// let logger = LevelLogger::new(
///     Logger::new(buffer.clone())
///         .with_context(WithLevel::new(Level::Warning))
///         .with_formatter(|ctx: &WithLevel, msg: &str| {
///             use context_logger::Leveler;
///             Ok(format!("{}: {}\n", ctx.level(), msg))
///         }),
/// );
///
/// logger.info("hidden");
/// logger.error("disk full");
/// assert_eq!(buffer.contents(), "error: disk full\n");
/// ```
#[derive(Debug, Clone)]
pub struct LevelLogger<C> {
    logger: Logger<C>,
}

macro_rules! level_methods {
    ($level:expr, $name:literal, $plain:ident, $line:ident, $args:ident) => {
        #[doc = concat!("Write a ", $name, " record as-is")]
        pub fn $plain(&self, message: impl fmt::Display) {
            self.output($level, |logger| logger.print(message));
        }

        #[doc = concat!("Write a ", $name, " record followed by a newline")]
        pub fn $line(&self, message: impl fmt::Display) {
            self.output($level, |logger| logger.println(message));
        }

        #[doc = concat!("Write a ", $name, " record built with `format_args!`")]
        pub fn $args(&self, args: fmt::Arguments<'_>) {
            self.output($level, |logger| logger.printf(args));
        }
    };
}

impl<C: Leveler + Clone> LevelLogger<C> {
    /// Wrap `logger`
    pub fn new(logger: Logger<C>) -> Self {
        Self { logger }
    }

    /// Get the wrapped logger
    pub fn logger(&self) -> &Logger<C> {
        &self.logger
    }

    /// Unwrap the logger
    pub fn into_inner(self) -> Logger<C> {
        self.logger
    }

    /// See [`Logger::with_context`]
    #[must_use = "builder methods return a new value"]
    pub fn with_context(&self, context: C) -> Self {
        Self::new(self.logger.with_context(context))
    }

    /// See [`Logger::with_formatter`]
    #[must_use = "builder methods return a new value"]
    pub fn with_formatter<F>(&self, formatter: F) -> Self
    where
        F: Fn(&C, &str) -> Result<String> + Send + Sync + 'static,
    {
        Self::new(self.logger.with_formatter(formatter))
    }

    /// See [`Logger::add_hook`]
    #[must_use = "builder methods return a new value"]
    pub fn add_hook<H>(&self, hook: H) -> Self
    where
        H: Fn(C, String) -> Flow<C> + Send + Sync + 'static,
    {
        Self::new(self.logger.add_hook(hook))
    }

    /// Write without touching the context's level
    pub fn print(&self, message: impl fmt::Display) {
        self.logger.print(message);
    }

    /// Write followed by a newline, without touching the level
    pub fn println(&self, message: impl fmt::Display) {
        self.logger.println(message);
    }

    /// Write a message built with `format_args!`, without touching the level
    pub fn printf(&self, args: fmt::Arguments<'_>) {
        self.logger.printf(args);
    }

    /// Run `output` with a logger whose context carries `level`
    ///
    /// Does nothing and returns `false` when `level` is below the context's
    /// minimum.
    pub fn output<F>(&self, level: Level, output: F) -> bool
    where
        F: FnOnce(&Logger<C>),
    {
        match self.leveled(level) {
            Some(logger) => {
                output(&logger);
                true
            }
            None => false,
        }
    }

    fn leveled(&self, level: Level) -> Option<Logger<C>> {
        let mut context = self.logger.context();
        if !is_active(context.level_min(), level) {
            return None;
        }
        context.set_level(level);
        Some(self.logger.with_context(context))
    }

    level_methods!(Level::Debug, "debug", debug, debugln, debugf);
    level_methods!(Level::Info, "info", info, infoln, infof);
    level_methods!(Level::Warning, "warning", warning, warningln, warningf);
    level_methods!(Level::Error, "error", error, errorln, errorf);
    level_methods!(Level::Fatal, "fatal", fatal, fatalln, fatalf);

    /// `io::Write` adapter logging every written line at `level`
    ///
    /// The level check happens once, here. An inactive writer accepts and
    /// discards everything.
    pub fn writer(&self, level: Level) -> LevelWriter<C> {
        LevelWriter {
            logger: self.leveled(level),
        }
    }
}

/// Writer returned by [`LevelLogger::writer`]
#[derive(Debug)]
pub struct LevelWriter<C> {
    logger: Option<Logger<C>>,
}

impl<C> LevelWriter<C> {
    /// Whether written lines reach the logger
    pub fn is_active(&self) -> bool {
        self.logger.is_some()
    }
}

impl<C: Clone> Write for LevelWriter<C> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &self.logger {
            Some(logger) => {
                let mut target: &Logger<C> = logger;
                Write::write(&mut target, buf)
            }
            None => Ok(buf.len()),
        }
    }

    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        self.write_all(fmt::format(args).as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::level::WithLevel;
    use crate::sinks::SharedBuffer;

    fn level_logger(min: Level) -> (SharedBuffer, LevelLogger<WithLevel>) {
        let buffer = SharedBuffer::new();
        let logger = Logger::new(buffer.clone())
            .with_context(WithLevel::new(min))
            .with_formatter(|ctx: &WithLevel, msg: &str| {
                Ok(format!("{}: {}\n", ctx.level().as_str().to_uppercase(), msg))
            });
        (buffer, LevelLogger::new(logger))
    }

    #[test]
    fn test_levels_below_minimum_are_dropped() {
        let (buffer, logger) = level_logger(Level::Warning);

        logger.debug("mylog");
        logger.info("mylog");
        logger.warning("mylog");
        logger.error("mylog");
        logger.fatalf(format_args!("{}", "mylog"));

        assert_eq!(buffer.lines(), vec!["WARNING: mylog", "ERROR: mylog", "FATAL: mylog"]);
    }

    #[test]
    fn test_output_reports_activity() {
        let (_, logger) = level_logger(Level::Info);
        assert!(!logger.output(Level::Debug, |_| panic!("must not run")));
        assert!(logger.output(Level::Info, |l| assert_eq!(l.context().level(), Level::Info)));
        // the base context keeps its level
        assert_eq!(logger.logger().context().level(), Level::Unset);
    }

    #[test]
    fn test_writer() {
        let (buffer, logger) = level_logger(Level::Info);

        let mut warn = logger.writer(Level::Warning);
        warn.write_all(b"mylog1").unwrap();
        warn.write_all(b"mylog2").unwrap();

        let mut debug = logger.writer(Level::Debug);
        assert!(!debug.is_active());
        debug.write_all(b"mylog3").unwrap();

        assert_eq!(buffer.lines(), vec!["WARNING: mylog1", "WARNING: mylog2"]);
    }

    #[test]
    fn test_writer_formatted_line_is_one_record() {
        let (buffer, logger) = level_logger(Level::Info);

        let mut error = logger.writer(Level::Error);
        writeln!(error, "retry {} of {}", 2, 3).unwrap();

        let mut debug = logger.writer(Level::Debug);
        writeln!(debug, "hidden {}", 1).unwrap();

        assert_eq!(buffer.contents(), "ERROR: retry 2 of 3\n");
        assert_eq!(logger.logger().metrics().written_count(), 1);
    }
}
