//! Envelope model for the request-processing core.
//!
//! Requests are produced by the framing layer (out of scope here) and
//! consumed exactly once by the dispatcher; responses are produced by the
//! builders on [`envelope::ResponseEnvelope`] and handed to the connection
//! exactly once. Payloads stay opaque `Bytes` end to end.

pub mod envelope;
