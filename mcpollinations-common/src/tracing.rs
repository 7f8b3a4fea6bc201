//! Tracing initialization for the MCPollinations server.
//!
//! Log output always goes to **stderr**: with the stdio transport, stdout is
//! the MCP channel and any stray byte on it corrupts the protocol stream.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Controls the log level and filtering. Examples:
//!   - `RUST_LOG=debug` - Enable debug logging for all modules
//!   - `RUST_LOG=mcpollinations=debug` - Enable debug for the server crate
//!   - `RUST_LOG=warn,mcpollinations_common=debug` - Warn by default, debug for common

use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, format::FmtSpan},
    prelude::*,
};

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

fn stderr_layer() -> impl Layer<Registry> + Send + Sync {
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .with_span_events(FmtSpan::NONE)
}

/// Initialize the tracing subscriber with `RUST_LOG` filtering (default `info`).
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_tracing() {
    init_tracing_with_default("info");
}

/// Initialize tracing with a custom default level used when `RUST_LOG` is unset.
///
/// ```no_run
/// use mcpollinations_common::tracing::init_tracing_with_default;
///
/// init_tracing_with_default("debug");
/// tracing::debug!("verbose logging enabled");
/// ```
pub fn init_tracing_with_default(default_level: &str) {
    tracing_subscriber::registry()
        .with(stderr_layer())
        .with(env_filter(default_level))
        .init();
}

/// Try to initialize tracing, returning an error if already initialized.
///
/// Useful in tests, where several test cases may race to install the
/// global subscriber.
pub fn try_init_tracing() -> Result<(), ()> {
    tracing_subscriber::registry()
        .with(stderr_layer())
        .with(env_filter("info"))
        .try_init()
        .map_err(|_| ())
}
