//! Logging configuration with file-based output and size-based rotation.
//!
//! Writes logs to `~/.config/item-hovers/item-hovers.log` (or platform
//! equivalent) with 10 MB size-based rotation. Set `DEBUG_LOGGING=1` to
//! enable debug output for the hover crates.

use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEBUG_DIRECTIVE: &str = "info,hovers_core=debug,hovers_cli=debug";

/// Initialize logging to the log file and stderr.
///
/// Returns a `WorkerGuard` that must be held for the application lifetime
/// so buffered log lines are flushed on shutdown. Returns `None` when the
/// log file cannot be created; logging then goes to stderr only.
///
/// Stderr keeps log lines out of the REPL's stdout.
pub fn init() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    let log_dir = match dirs::config_dir() {
        Some(config) => config.join("item-hovers"),
        None => {
            init_stderr_only(debug_logging);
            return None;
        }
    };

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        // Subscriber not initialized yet
        eprintln!(
            "Failed to create log directory {:?}: {}, using stderr only",
            log_dir, e
        );
        init_stderr_only(debug_logging);
        return None;
    }

    let log_path = log_dir.join("item-hovers.log");
    let file_appender = match BasicRollingFileAppender::new(
        &log_path,
        RollingConditionBasic::new().max_size(10 * 1024 * 1024),
        1,
    ) {
        Ok(appender) => appender,
        Err(e) => {
            eprintln!("Failed to create log file at {:?}: {}", log_path, e);
            init_stderr_only(debug_logging);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .with(filter(debug_logging))
        .init();

    tracing::info!(log_file = ?log_path, debug_logging, "Hover logging initialized");

    Some(guard)
}

fn init_stderr_only(debug_logging: bool) {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(filter(debug_logging))
        .init();

    tracing::info!(debug_logging, "Hover logging initialized (stderr only)");
}

fn filter(debug_logging: bool) -> EnvFilter {
    EnvFilter::new(if debug_logging { DEBUG_DIRECTIVE } else { "info" })
}
