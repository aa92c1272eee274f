//! Core logger types

pub mod context;
pub mod error;
pub mod logger;
pub mod metrics;
pub mod pipeline;

pub use context::{AnyContext, FieldValue, LogContext};
pub use error::{LoggerError, Result};
pub use logger::{Logger, DIAGNOSTIC_MARKER, MAX_LINE_LEN};
pub use metrics::PipelineMetrics;
pub use pipeline::{Flow, Formatter, Hook};
