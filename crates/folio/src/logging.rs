//! Logging initialization.
//!
//! Logs go to stderr so stdout stays clean for the shoot JSON.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the logging subsystem.
///
/// `level` is the default filter directive; RUST_LOG overrides it when set.
/// `json_format` switches from human-readable lines to structured JSON.
pub fn init(level: &str, json_format: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(true),
            )
            .init();
    }
}

/// Initialize logging from the `[logging]` config section, with CLI overrides.
pub fn init_from_config(config: &folio_core::Config, verbose: bool, json_logs: bool) {
    init(
        effective_level(&config.logging.level, verbose),
        json_logs || config.logging.format == "json",
    );
}

/// `--verbose` raises the level to debug but never lowers a trace setting.
fn effective_level(configured: &str, verbose: bool) -> &str {
    if verbose && !configured.eq_ignore_ascii_case("trace") {
        "debug"
    } else {
        configured
    }
}
