use crate::config::LoggingConfig;
use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global tracing subscriber.
///
/// RUST_LOG wins when set; otherwise the configured level applies.
/// Safe to call more than once: later calls are ignored.
pub fn init_logging(config: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr);

    let _ = if config.json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
}
