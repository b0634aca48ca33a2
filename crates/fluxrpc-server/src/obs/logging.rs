//! Tracing initialization for embedding processes.

use tracing_subscriber::{fmt, EnvFilter};

/// Install the default fmt subscriber with env-filter control.
///
/// Call once at process start, before serving traffic. Embedders with their
/// own subscriber stack can skip this and install their own layers instead.
pub fn init() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
}
