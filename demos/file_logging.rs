//! File logging example
//!
//! Demonstrates writing JSON records to a file and retargeting a logger
//! lineage at runtime.
//!
//! Run with: cargo run --example file_logging

use context_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== Context Logger - File Logging Example ===\n");

    let logger = Logger::new(FileSink::open("context_logger_demo.log")?)
        .with_context(LogContext::new().with_field("service", "demo"))
        .with_formatter(format::json);

    println!("1. Writing to context_logger_demo.log");
    for i in 0..5 {
        logger.println(format_args!("Message #{}", i));
    }

    println!("2. Updating the context in place");
    logger.update_context(|ctx| Ok::<_, LoggerError>(ctx.clone().with_field("stage", "ready")))?;
    logger.println("Context updated");

    #[cfg(feature = "file")]
    {
        println!("3. Switching the whole lineage to a locked sink");
        logger.set_output(LockedFileSink::open("context_logger_demo.log")?);
        logger.println("Written under an exclusive file lock");
    }

    let metrics = logger.metrics();
    println!(
        "\nWritten: {}, failed: {}, sink errors: {}",
        metrics.written_count(),
        metrics.failed_count(),
        metrics.sink_error_count()
    );

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
