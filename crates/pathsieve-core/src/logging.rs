//! Logging setup for pathsieve.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging for pathsieve.
///
/// Uses `RUST_LOG` environment variable for filtering.
/// Default level: info. Output goes to stderr so stdout stays parseable.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pathsieve=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Initialize logging with a custom log level, written to stderr.
pub fn init_with_level(level: &str) {
    let filter = EnvFilter::new(format!("pathsieve={level}"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
