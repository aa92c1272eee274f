//! Main logger implementation

use super::{
    error::LoggerError,
    metrics::PipelineMetrics,
    pipeline::{self, Flow, Formatter, Hook, Outcome},
};
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

/// Prefix of the line written to the sink when a hook or formatter fails
pub const DIAGNOSTIC_MARKER: &str = "logger error";

/// Longest line accepted by the `io::Write` adapter (64 KiB)
pub const MAX_LINE_LEN: usize = 64 * 1024;

type Sink = Box<dyn Write + Send>;

/// How the rendered record is framed on the sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Framing {
    /// Written as-is
    Plain,
    /// Followed by a newline unless a formatter owns the framing
    Line,
}

/// Logger with a caller-defined context, ordered hooks and an optional formatter
///
/// Configuration is immutable: [`with_context`](Logger::with_context),
/// [`with_formatter`](Logger::with_formatter) and
/// [`add_hook`](Logger::add_hook) return a new `Logger` and never touch the
/// receiver.
///
/// A derived logger keeps the same write lock and sink slot as the logger it
/// came from, so records written through any member of one lineage never
/// interleave. Loggers created by separate [`Logger::new`] calls have their own
/// locks and may interleave on a common underlying writer.
///
/// Hooks and formatters run while the write lock is held. They must not log
/// through a logger of the same lineage.
///
/// # Example
///
/// ```
/// use context_logger::{Logger, SharedBuffer};
///
/// let buffer = SharedBuffer::new();
/// let logger: Logger<&str> = Logger::new(buffer.clone())
///     .with_context("api")
///     .with_formatter(|ctx: &&str, msg: &str| Ok(format!("[{}] {}\n", ctx, msg)));
///
/// logger.print("started");
/// assert_eq!(buffer.contents(), "[api] started\n");
/// ```
pub struct Logger<C = ()> {
    sink: Arc<Mutex<Sink>>,
    metrics: Arc<PipelineMetrics>,
    context: RwLock<C>,
    formatter: Option<Formatter<C>>,
    hooks: Vec<Hook<C>>,
}

impl<C: Default> Logger<C> {
    /// Create a logger writing to `sink` with a fresh write lock, the default
    /// context, no formatter and no hooks
    #[must_use]
    pub fn new<W: Write + Send + 'static>(sink: W) -> Self {
        Self {
            sink: Arc::new(Mutex::new(Box::new(sink))),
            metrics: Arc::new(PipelineMetrics::new()),
            context: RwLock::new(C::default()),
            formatter: None,
            hooks: Vec::new(),
        }
    }
}

impl<C: Clone> Logger<C> {
    fn derive(&self, context: C) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
            metrics: Arc::clone(&self.metrics),
            context: RwLock::new(context),
            formatter: self.formatter.clone(),
            hooks: self.hooks.clone(),
        }
    }

    /// Derive a logger carrying `context`
    #[must_use = "builder methods return a new value"]
    pub fn with_context(&self, context: C) -> Self {
        self.derive(context)
    }

    /// Derive a logger rendering records with `formatter`
    ///
    /// Replaces any previous formatter.
    #[must_use = "builder methods return a new value"]
    pub fn with_formatter<F>(&self, formatter: F) -> Self
    where
        F: Fn(&C, &str) -> super::error::Result<String> + Send + Sync + 'static,
    {
        let mut logger = self.derive(self.context());
        logger.formatter = Some(Arc::new(formatter));
        logger
    }

    /// Derive a logger with `hook` appended to a copy of the hook chain
    ///
    /// Hooks run in the order they were added.
    #[must_use = "builder methods return a new value"]
    pub fn add_hook<H>(&self, hook: H) -> Self
    where
        H: Fn(C, String) -> Flow<C> + Send + Sync + 'static,
    {
        let mut logger = self.derive(self.context());
        logger.hooks.push(Arc::new(hook));
        logger
    }

    /// Snapshot of the current context
    pub fn context(&self) -> C {
        self.context.read().clone()
    }

    /// Replace the context of this logger in place
    ///
    /// `update` runs under the write lock and sees the current context. When it
    /// returns an error the context is left untouched and the error is handed
    /// back.
    ///
    /// `update` may read the context, but it must not print, call
    /// `update_context` or `set_output` on any logger of this lineage: those
    /// wait for the write lock it is running under.
    pub fn update_context<F, E>(&self, update: F) -> std::result::Result<(), E>
    where
        F: FnOnce(&C) -> std::result::Result<C, E>,
    {
        let _sink = self.sink.lock();
        // Stored contexts only change under the write lock, so the snapshot
        // stays current until the write below.
        let current = self.context();
        let updated = update(&current)?;
        *self.context.write() = updated;
        Ok(())
    }

    /// Write `message` as-is
    pub fn print(&self, message: impl fmt::Display) {
        let _ = self.write_record(message.to_string(), Framing::Plain);
    }

    /// Write `message` followed by a newline when no formatter is set
    pub fn println(&self, message: impl fmt::Display) {
        let _ = self.write_record(message.to_string(), Framing::Line);
    }

    /// Write a message built with `format_args!`
    pub fn printf(&self, args: fmt::Arguments<'_>) {
        let _ = self.write_record(fmt::format(args), Framing::Plain);
    }

    /// Run one record through the pipeline under the write lock.
    ///
    /// Only sink errors for the record itself are returned; skips and
    /// diagnostics are not errors for the caller.
    fn write_record(&self, message: String, framing: Framing) -> io::Result<()> {
        let mut sink = self.sink.lock();
        let context = self.context();

        let rendered = match pipeline::process(&self.hooks, self.formatter.as_ref(), context, message)
        {
            Outcome::Render(rendered) => rendered,
            Outcome::Skipped => {
                self.metrics.record_skipped();
                return Ok(());
            }
            Outcome::Failed(err) => {
                self.metrics.record_failed();
                self.write_diagnostic(&mut sink, &err);
                return Ok(());
            }
        };

        let mut bytes = rendered.into_bytes();
        if framing == Framing::Line && self.formatter.is_none() {
            bytes.push(b'\n');
        }

        match sink.write_all(&bytes) {
            Ok(()) => {
                self.metrics.record_written();
                Ok(())
            }
            Err(err) => {
                self.metrics.record_sink_error();
                Err(err)
            }
        }
    }

    fn write_diagnostic(&self, sink: &mut Sink, err: &LoggerError) {
        let line = format!("{}: {}\n", DIAGNOSTIC_MARKER, err);
        if sink.write_all(line.as_bytes()).is_err() {
            self.metrics.record_sink_error();
        }
    }

    /// Split `buf` into lines and log each one.
    ///
    /// Stops at the first line that cannot be logged, either because the sink
    /// failed or because it exceeds [`MAX_LINE_LEN`]. Lines already logged are
    /// reported as consumed; the error is only returned when nothing was, so a
    /// caller retrying the rest never logs a line twice.
    fn write_lines(&self, buf: &[u8]) -> io::Result<usize> {
        let mut consumed = 0;

        for (line, end) in scan_lines(buf) {
            let result: io::Result<()> = if line.len() > MAX_LINE_LEN {
                Err(LoggerError::line_too_long(line.len(), MAX_LINE_LEN).into())
            } else {
                let message = String::from_utf8_lossy(line).into_owned();
                self.write_record(message, Framing::Line)
            };

            if let Err(err) = result {
                return match consumed {
                    0 => Err(err),
                    consumed => Ok(consumed),
                };
            }
            consumed = end;
        }

        Ok(consumed)
    }
}

impl<C> Logger<C> {
    /// Replace the destination of this logger and of every logger sharing its
    /// write lock
    pub fn set_output<W: Write + Send + 'static>(&self, sink: W) {
        *self.sink.lock() = Box::new(sink);
    }

    /// Whether both loggers serialize their writes through the same lock
    pub fn shares_lock_with<D>(&self, other: &Logger<D>) -> bool {
        Arc::ptr_eq(&self.sink, &other.sink)
    }

    /// Counters shared by this logger's lineage
    pub fn metrics(&self) -> &PipelineMetrics {
        &self.metrics
    }

    /// Number of hooks in the chain
    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    /// Whether a formatter is set
    pub fn has_formatter(&self) -> bool {
        self.formatter.is_some()
    }
}

/// Lines of `buf` without their `\n` or `\r\n` terminator, each paired with
/// the offset just past it. A trailing unterminated line is still yielded.
fn scan_lines(buf: &[u8]) -> impl Iterator<Item = (&[u8], usize)> {
    let mut start = 0;

    std::iter::from_fn(move || {
        let rest = buf.get(start..).filter(|rest| !rest.is_empty())?;
        let (line, len) = match rest.iter().position(|byte| *byte == b'\n') {
            Some(pos) => (&rest[..pos], pos + 1),
            None => (rest, rest.len()),
        };
        start += len;
        Some((line.strip_suffix(b"\r").unwrap_or(line), start))
    })
}

impl<C: Clone> Clone for Logger<C> {
    fn clone(&self) -> Self {
        self.derive(self.context())
    }
}

impl<C: fmt::Debug> fmt::Debug for Logger<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("context", &*self.context.read())
            .field("hooks", &self.hooks.len())
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}

impl<C: Clone> Write for &Logger<C> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_lines(buf)
    }

    /// Render the whole message before scanning, so `writeln!` with
    /// arguments yields one record per line rather than one per fragment
    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        self.write_all(fmt::format(args).as_bytes())
    }

    /// The logger never flushes its sink
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<C: Clone> Write for Logger<C> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_lines(buf)
    }

    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        self.write_all(fmt::format(args).as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
