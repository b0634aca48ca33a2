//! Worker pools and pool selection.
//!
//! Pools are shared, read-mostly configuration handed to the dispatcher at
//! construction; nothing mutates a pool besides its own admission counter.

pub mod selector;
pub mod worker;

pub use selector::{MethodPoolSelector, PoolSelector};
pub use worker::WorkerPool;
