//! Observability side-channel.
//!
//! Metrics and logging feed diagnostics only; correctness of the dispatch
//! pipeline never depends on either.

pub mod logging;
pub mod metrics;

pub use metrics::ServerMetrics;
