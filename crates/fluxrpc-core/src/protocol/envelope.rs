//! Request/response envelopes.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::FaultKind;

/// Decoded request envelope. Immutable once received.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestEnvelope {
    /// Correlation token, unique per in-flight request on a connection.
    pub id: u64,
    /// Liveness probe; answered with an ack and nothing else.
    #[serde(default)]
    pub heartbeat: bool,
    /// The caller expects no response.
    #[serde(default)]
    pub oneway: bool,
    /// Deadline in milliseconds; 0 means unbounded.
    #[serde(default)]
    pub timeout_ms: u64,
    /// Routing attribute consumed by pool selection.
    pub method: String,
    /// Opaque payload for the business invoker.
    #[serde(default)]
    pub payload: Bytes,
}

impl RequestEnvelope {
    /// Plain two-way request with no deadline.
    pub fn new(id: u64, method: impl Into<String>, payload: Bytes) -> Self {
        Self {
            id,
            heartbeat: false,
            oneway: false,
            timeout_ms: 0,
            method: method.into(),
            payload,
        }
    }

    /// Liveness probe.
    pub fn heartbeat(id: u64) -> Self {
        Self {
            id,
            heartbeat: true,
            oneway: false,
            timeout_ms: 0,
            method: String::new(),
            payload: Bytes::new(),
        }
    }
}

/// Fault descriptor carried by an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fault {
    pub kind: FaultKind,
    pub message: String,
}

/// Response body variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ResponseBody {
    /// Ack for a liveness probe.
    HeartbeatAck,
    /// Successful invocation result.
    Success(Bytes),
    /// Failed request.
    Fault(Fault),
}

/// Response envelope, correlated to its request by `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub id: u64,
    pub body: ResponseBody,
}

impl ResponseEnvelope {
    /// Ack for a heartbeat request.
    pub fn heartbeat_ack(id: u64) -> Self {
        Self {
            id,
            body: ResponseBody::HeartbeatAck,
        }
    }

    /// Successful response carrying the invocation result.
    pub fn success(id: u64, payload: Bytes) -> Self {
        Self {
            id,
            body: ResponseBody::Success(payload),
        }
    }

    /// Error response carrying a fault descriptor.
    pub fn fault(id: u64, kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            id,
            body: ResponseBody::Fault(Fault {
                kind,
                message: message.into(),
            }),
        }
    }

    /// Fault kind, if this is an error response.
    pub fn fault_kind(&self) -> Option<FaultKind> {
        match &self.body {
            ResponseBody::Fault(f) => Some(f.kind),
            _ => None,
        }
    }
}
