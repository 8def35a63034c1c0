//! Logging setup for the command line.

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr so listings on stdout stay machine-readable.
pub fn init_logging(verbosity: u8) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    // Only warnings from wlctrl by default, -v raises the level.
    // Users can override with RUST_LOG environment variable
    let default = match verbosity {
        0 => "wlctrl=warn",
        1 => "wlctrl=debug",
        _ => "wlctrl=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
