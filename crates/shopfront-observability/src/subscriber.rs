//! Tracing subscriber initialization.

use tracing_subscriber::EnvFilter;

use crate::logging::{LogFormat, LogLevel};

/// Install the process-wide `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `level`. Safe to call more than once;
/// later calls are no-ops. Returns whether this call installed it.
pub fn init_tracing(format: LogFormat, level: LogLevel) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        LogFormat::Json => builder.json().try_init().is_ok(),
        LogFormat::Human => builder.compact().try_init().is_ok(),
    }
}
