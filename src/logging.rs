// src/logging.rs

//! Logging setup for `taskdag` hosts using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. explicit `level` argument (if provided)
//! 2. `TASKDAG_LOG` environment variable (e.g. "info", "debug")
//! 3. default to `warn`
//!
//! Logs are sent to STDERR so that stdout stays free for help output and
//! whatever the task bodies print.

use tracing_subscriber::fmt;

/// Initialise the global logging subscriber.
///
/// Call once at startup, before the first entry-point call; a second call
/// panics inside `tracing-subscriber`.
pub fn init_logging(level: Option<tracing::Level>) {
    let level = match level {
        Some(lvl) => lvl,
        None => std::env::var("TASKDAG_LOG")
            .ok()
            .and_then(|s| parse_level_str(&s))
            .unwrap_or(tracing::Level::WARN),
    };

    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}
