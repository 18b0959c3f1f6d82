// src/utils/logging.rs
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber. `RUST_LOG` picks the filter (e.g.
/// `RUST_LOG=date_extractor=trace` shows every kept or dropped fragment);
/// without it only `info` and above are shown.
pub fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        // stdout is reserved for the `saved` listing
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Logging setup complete.");
}
