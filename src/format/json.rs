//! JSON formatter
//!
//! Renders each record as one JSON object per line:
//! `{"context":<context>,"message":"<message>"}`. The context is written with
//! its own `Serialize` implementation, so embedded capability fields such as
//! `WithLevel` or `WithTime` control their own shape.

use crate::core::{LoggerError, Result};
use serde::Serialize;

#[derive(Serialize)]
struct Record<'a, C> {
    context: &'a C,
    message: &'a str,
}

/// Format `context` and `message` as a single JSON line
///
/// # Example
///
/// ```
/// use context_logger::{format, LogContext, Logger, SharedBuffer};
///
/// let buffer = SharedBuffer::new();
/// let logger = Logger::new(buffer.clone())
///     .with_context(LogContext::new().with_field("n", 1))
///     .with_formatter(format::json);
///
/// logger.println("hi");
/// assert_eq!(buffer.contents(), "{\"context\":{\"n\":1},\"message\":\"hi\"}\n");
/// ```
pub fn json<C: Serialize>(context: &C, message: &str) -> Result<String> {
    let mut line = serde_json::to_string(&Record { context, message })
        .map_err(|err| LoggerError::formatter("JSON", err.to_string()))?;
    line.push('\n');
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Serialize)]
    struct Pair {
        #[serde(rename = "A")]
        a: &'static str,
        #[serde(rename = "B")]
        b: &'static str,
    }

    #[test]
    fn test_json_shape() {
        let got = json(&Pair { a: "a", b: "b" }, "coucou").unwrap();
        assert_eq!(got, "{\"context\":{\"A\":\"a\",\"B\":\"b\"},\"message\":\"coucou\"}\n");
    }

    #[test]
    fn test_json_escapes_message() {
        let got = json(&(), "say \"hi\"\n").unwrap();
        assert_eq!(got, "{\"context\":null,\"message\":\"say \\\"hi\\\"\\n\"}\n");
    }

    #[test]
    fn test_json_unserializable_context() {
        let mut context = HashMap::new();
        context.insert(vec![1u8], "value");

        let err = json(&context, "m").unwrap_err();
        assert!(matches!(err, LoggerError::FormatterError { .. }));
        assert!(err.to_string().starts_with("Formatter error (JSON): "));
    }
}
