//! Basic logger usage example
//!
//! Demonstrates a level-aware logger with a colored formatter, hooks and the
//! `io::Write` adapter.
//!
//! Run with: cargo run --example basic_usage

use context_logger::prelude::*;
use context_logger::{info, warning};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Default, Serialize)]
struct Request {
    #[serde(flatten)]
    time: WithTime,
    #[serde(flatten)]
    level: WithLevel,
    path: String,
}

impl Leveler for Request {
    fn level_min(&self) -> Level {
        self.level.level_min()
    }

    fn level(&self) -> Level {
        self.level.level()
    }

    fn set_level(&mut self, level: Level) {
        self.level.set_level(level);
    }
}

impl Timer for Request {
    fn time(&self) -> chrono::DateTime<chrono::Utc> {
        self.time.time()
    }

    fn set_time(&mut self, time: chrono::DateTime<chrono::Utc>) {
        self.time.set_time(time);
    }
}

fn main() -> Result<()> {
    println!("=== Context Logger - Basic Usage Example ===\n");

    let root: Logger<Request> = Logger::new(std::io::stdout());

    // Text output with colored levels
    let text = LevelLogger::new(
        root.with_context(Request {
            level: WithLevel::new(Level::Info),
            path: "/health".to_string(),
            ..Request::default()
        })
        .add_hook(hook_level_skip::<Request>)
        .add_hook(hook_update_time::<Request>)
        .with_formatter(|ctx: &Request, msg: &str| {
            Ok(format!(
                "{} [{}] {} {}\n",
                ctx.time().format("%H:%M:%S%.3f"),
                ctx.level().colored(),
                ctx.path,
                msg
            ))
        }),
    );

    println!("1. Logging at different levels (debug is filtered):");
    text.debug("This is a debug message");
    text.info("This is an info message");
    warning!(text, "Retry {} of {}", 1, 3);
    text.error("This is an error message");

    println!("\n2. JSON output from the same lineage:");
    let json = text.with_formatter(format::json);
    info!(json, "Request handled in {}ms", 12);

    println!("\n3. Piping another writer through the logger:");
    let mut writer = text.writer(Level::Warning);
    writer.write_all(b"first line\nsecond line\n")?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
