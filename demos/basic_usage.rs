//! Basic logger usage example
//!
//! Demonstrates MDC fields, leveled logging and a flush to a local Loki.
//!
//! Run with: cargo run --example basic_usage
//! (expects Loki on http://localhost:3100; delivery errors are only printed)

use loki_batch_logger::prelude::*;
use loki_batch_logger::{info, warn};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== Loki Batch Logger - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .url("http://localhost:3100")
        .stream_label("app", "basic_usage")
        .stream_label("env", "dev")
        .mdc("host", "laptop")
        .request_timeout(Duration::from_secs(2))
        .build()?;

    println!("1. Logging at different levels:");
    logger.info("This is an info message");
    logger.warn("This is a warning message", None);
    let err = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml missing");
    logger.error("Could not load config", Some(&err));
    logger.fatal("This is a fatal message (label only)", None);

    println!("\n2. Scoped MDC fields:");
    {
        let _request = logger.mdc_scope("request_id", "req-42");
        info!(logger, "Handling request for user {}", 7);
        warn!(logger, err = &err; "Falling back to defaults after {} ms", 12);
    }
    logger.info("request_id is gone again");

    println!("\n3. Flushing {} buffered lines:", logger.len());
    logger.flush().await;

    let metrics = logger.metrics();
    println!(
        "   batches: {}, lines: {}, failed deliveries: {}",
        metrics.batches_flushed(),
        metrics.entries_flushed(),
        metrics.delivery_failures()
    );

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
