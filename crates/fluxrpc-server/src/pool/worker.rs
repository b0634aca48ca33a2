//! Bounded worker pools.
//!
//! A pool admits work through a semaphore sized to its configured capacity.
//! Admission is non-blocking: when every permit is out, `try_submit` refuses
//! immediately and the caller reports overload. Admitted work is spawned
//! onto the runtime holding its permit until completion, so a pool never
//! runs more than `capacity` invocations at once.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use tokio::sync::Semaphore;

use fluxrpc_core::error::{FluxError, Result};

/// Bounded executor for business invocations.
pub struct WorkerPool {
    name: String,
    capacity: usize,
    permits: Arc<Semaphore>,
}

impl WorkerPool {
    pub fn new(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            capacity,
            permits: Arc::new(Semaphore::new(capacity)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Permits not currently held by running work.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Admit and run a unit of work, or refuse when saturated.
    pub fn try_submit(&self, work: BoxFuture<'static, ()>) -> Result<()> {
        let permit = Arc::clone(&self.permits)
            .try_acquire_owned()
            .map_err(|_| FluxError::Overload)?;
        tokio::spawn(async move {
            let _permit = permit;
            work.await;
        });
        Ok(())
    }
}
