//! Error types for the logger

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File sink error with path
    #[error("File sink error for '{path}': {source}")]
    FileSinkError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Formatter error with format type
    #[error("Formatter error ({format_type}): {message}")]
    FormatterError {
        format_type: String,
        message: String,
    },

    /// The context does not provide what a hook or formatter needs
    #[error("{found}: not implementing {expected}")]
    CapabilityMismatch { found: String, expected: String },

    /// A hook or formatter panicked while holding the write lock
    #[error("panicked: {0}")]
    Panicked(String),

    /// A line handed to the writer adapter exceeds the scan limit
    #[error("line of {len} bytes exceeds the {max} byte limit")]
    LineTooLong { len: usize, max: usize },

    /// Unknown level name
    #[error("{0}: unknown level")]
    UnknownLevel(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create a formatter error
    pub fn formatter(format_type: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FormatterError {
            format_type: format_type.into(),
            message: message.into(),
        }
    }

    /// Create a file sink error
    pub fn file_sink(path: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::FileSinkError {
            path: path.into(),
            source,
        }
    }

    /// Create a capability mismatch error
    ///
    /// `found` names the concrete shape of the context, `expected` the
    /// capability the caller needed.
    pub fn capability(found: impl Into<String>, expected: impl Into<String>) -> Self {
        LoggerError::CapabilityMismatch {
            found: found.into(),
            expected: expected.into(),
        }
    }

    /// Create a line too long error
    pub fn line_too_long(len: usize, max: usize) -> Self {
        LoggerError::LineTooLong { len, max }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}

impl From<LoggerError> for std::io::Error {
    fn from(err: LoggerError) -> Self {
        match err {
            LoggerError::IoError(io) => io,
            too_long @ LoggerError::LineTooLong { .. } => {
                std::io::Error::new(std::io::ErrorKind::InvalidData, too_long)
            }
            other => std::io::Error::new(std::io::ErrorKind::Other, other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::capability("u32", "the Leveler trait");
        assert!(matches!(err, LoggerError::CapabilityMismatch { .. }));

        let err = LoggerError::line_too_long(70_000, 65_536);
        assert!(matches!(err, LoggerError::LineTooLong { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::capability("alloc::string::String", "the Timer trait");
        assert_eq!(
            err.to_string(),
            "alloc::string::String: not implementing the Timer trait"
        );

        let err = LoggerError::formatter("JSON", "key must be a string");
        assert_eq!(err.to_string(), "Formatter error (JSON): key must be a string");

        let err = LoggerError::other("boom");
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_into_io_error() {
        let io: std::io::Error = LoggerError::line_too_long(10, 5).into();
        assert_eq!(io.kind(), std::io::ErrorKind::InvalidData);

        let io: std::io::Error = LoggerError::IoError(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "pipe closed",
        ))
        .into();
        assert_eq!(io.kind(), std::io::ErrorKind::BrokenPipe);
    }
}
