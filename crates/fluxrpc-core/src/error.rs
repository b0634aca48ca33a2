//! Shared error type across fluxrpc crates.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Peer-facing fault kinds (stable API).
///
/// Kinds are disjoint: each corresponds to the point where the server
/// detects the failure, not to a severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FaultKind {
    /// The pool refused the work before it started.
    Overload,
    /// The business invocation failed with a domain error.
    ServerError,
    /// The business invocation outlived its declared deadline.
    Timeout,
    /// Anything unexpected while waiting for the invocation's outcome.
    Unknown,
}

impl FaultKind {
    /// String representation used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            FaultKind::Overload => "OVERLOAD",
            FaultKind::ServerError => "SERVER_ERROR",
            FaultKind::Timeout => "TIMEOUT",
            FaultKind::Unknown => "UNKNOWN",
        }
    }

    /// Fixed response message per kind. Stable, so peers and tests can rely
    /// on the kind alone.
    pub fn message(self) -> &'static str {
        match self {
            FaultKind::Overload => "server overload",
            FaultKind::ServerError => "server error",
            FaultKind::Timeout => "server timeout",
            FaultKind::Unknown => "unknown error",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, FluxError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum FluxError {
    #[error("server overload")]
    Overload,
    #[error("invoke failed: {0}")]
    Invoke(String),
    #[error("server timeout")]
    Timeout,
    #[error("write failed: {0}")]
    Write(String),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl FluxError {
    /// Map an internal error to the fault kind reported to the peer.
    pub fn fault_kind(&self) -> FaultKind {
        match self {
            FluxError::Overload => FaultKind::Overload,
            FluxError::Invoke(_) => FaultKind::ServerError,
            FluxError::Timeout => FaultKind::Timeout,
            FluxError::Write(_) | FluxError::Config(_) | FluxError::Internal(_) => {
                FaultKind::Unknown
            }
        }
    }
}
