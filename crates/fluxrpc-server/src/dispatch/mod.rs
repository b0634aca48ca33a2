//! Request dispatch pipeline.
//!
//! Re-exports the dispatcher, its collaborator traits, and the
//! timeout-guarded execution primitives so downstream consumers can depend
//! on this module directly.

pub mod dispatcher;
pub mod guard;

pub use dispatcher::{Connection, Dispatcher, Invoker};
pub use guard::{Outcome, Submission};
