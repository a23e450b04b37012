//! Logging utilities wrapping `tracing` initialisation

use tracing_subscriber::EnvFilter;

/// Initialise the global tracing subscriber.
///
/// Defaults to `info`; override with the `QR_STUDIO_LOG` environment
/// variable (e.g. `QR_STUDIO_LOG=debug`).
pub fn init() {
    let filter = std::env::var("QR_STUDIO_LOG")
        .ok()
        .and_then(|level| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
