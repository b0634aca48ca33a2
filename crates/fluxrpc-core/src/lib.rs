//! fluxrpc core: transport-agnostic envelope primitives and error types.
//!
//! This crate defines the request/response envelope model and the error
//! surface shared by the server pipeline and any framing/transport layer
//! built on top of it. It intentionally carries no runtime dependencies so
//! it can be reused by clients, codecs, and tooling.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `FluxError`/`Result` so a serving
//! process does not crash on bad traffic.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{FluxError, Result};
