//! Structured logging bootstrap: a rotation-strategy switch over a rolling
//! file appender, plus a JSON-vs-text layer chosen from [`AppConfig`].

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::app_config::AppConfig;

pub fn init_logging(config: &AppConfig) -> WorkerGuard {
    let file_appender = match config.log_rotation.as_str() {
        "hourly" => tracing_appender::rolling::hourly(&config.log_dir, &config.log_file_prefix),
        "daily" => tracing_appender::rolling::daily(&config.log_dir, &config.log_file_prefix),
        _ => tracing_appender::rolling::never(&config.log_dir, &config.log_file_prefix),
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    let registry = tracing_subscriber::registry().with(filter);

    if config.log_json {
        let file_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_writer(non_blocking)
            .with_ansi(false);
        registry.with(file_layer).init();
    } else {
        let file_layer = fmt::layer()
            .with_target(false)
            .with_writer(non_blocking)
            .with_ansi(false);
        let stdout_layer = fmt::layer().with_target(false).with_ansi(true);
        registry.with(file_layer).with(stdout_layer).init();
    }

    guard
}
