//! Logging Infrastructure
//!
//! Console output is human readable. When a log directory is configured,
//! events are also written as JSON lines to a daily rolling file.

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the filter: `RUST_LOG` wins over the configured level
fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the global subscriber
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// lifetime of the process.
pub fn init_logger(log_level: &str, log_dir: Option<&str>) -> std::io::Result<Option<WorkerGuard>> {
    let console = fmt::layer()
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(Path::new(dir))?;
            let appender = tracing_appender::rolling::daily(dir, "order-server.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let init = tracing_subscriber::registry()
        .with(env_filter(log_level))
        .with(console)
        .with(file_layer)
        .try_init();
    if let Err(e) = init {
        // already set (tests call this repeatedly)
        tracing::debug!("Logger already initialized: {}", e);
    }

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_with_file_output() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        let guard = init_logger("debug", logs.to_str()).unwrap();
        assert!(guard.is_some());
        assert!(logs.is_dir());

        // second init is a no-op, not a panic
        assert!(init_logger("info", None).unwrap().is_none());
    }
}
