use crate::config::GroovyscopeConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global tracing subscriber for `component`.
///
/// Logs roll daily under `~/.groovyscope/logs` (files like `cli.log.2026-10-19`).
/// `RUST_LOG` takes precedence over the configured filter. Keep the returned
/// guard alive for the lifetime of the process, or buffered lines are lost.
pub fn init_logging(component: &str, config: &GroovyscopeConfig, to_stderr: bool) -> WorkerGuard {
    let log_dir = GroovyscopeConfig::home_dir().join("logs");
    let _ = std::fs::create_dir_all(&log_dir);

    let file_appender = tracing_appender::rolling::daily(&log_dir, format!("{component}.log"));
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.as_str()));

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    if to_stderr {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false);
        registry.with(stderr_layer).init();
    } else {
        registry.init();
    }

    guard
}
