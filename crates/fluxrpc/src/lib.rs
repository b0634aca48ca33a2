//! Top-level facade crate for fluxrpc.
//!
//! Re-exports core types and the server library so users can depend on a
//! single crate.

pub mod core {
    pub use fluxrpc_core::*;
}

pub mod server {
    pub use fluxrpc_server::*;
}
