//! Timeout-guarded execution.
//!
//! A submission runs the business future on the selected worker pool while
//! the caller waits on an independently scheduled timeout race. The two
//! scheduling domains are deliberately separate: the watch never runs on
//! the pool it watches, so a saturated pool cannot stall its own deadline.
//!
//! Timed-out work is abandoned, not cancelled: the pool task runs to
//! completion and its result send fails silently once the receiver is gone.
//! Sustained timeout pressure therefore accumulates abandoned work; pool
//! capacity is the operator's knob for that.

use bytes::Bytes;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use tokio::sync::oneshot;
use tokio::time::{self, Duration};

use fluxrpc_core::error::{FaultKind, Result};

use crate::pool::WorkerPool;

/// Deadline used when a request declares `timeout_ms == 0`, so the watch
/// mechanism stays uniform. tokio's timer rejects far-future deadlines;
/// one year stands in for unbounded.
const UNBOUNDED: Duration = Duration::from_secs(365 * 24 * 60 * 60);

fn deadline_for(timeout_ms: u64) -> Duration {
    if timeout_ms == 0 {
        UNBOUNDED
    } else {
        Duration::from_millis(timeout_ms)
    }
}

/// Terminal outcome of a two-way submission. Exactly one per request.
#[derive(Debug)]
pub enum Outcome {
    Success(Bytes),
    Fault(FaultKind),
}

/// Handle to an in-flight invocation.
pub struct Submission {
    rx: oneshot::Receiver<Result<Bytes>>,
    deadline: Duration,
}

/// Submit `invoke` to `pool`. Two-way submissions return a handle to await;
/// one-way submissions return `None`: the work still runs for its side
/// effects, but nothing ever waits on it.
pub fn submit(
    pool: &WorkerPool,
    invoke: BoxFuture<'static, Result<Bytes>>,
    timeout_ms: u64,
    oneway: bool,
) -> Result<Option<Submission>> {
    let (tx, rx) = oneshot::channel();
    let work = async move {
        // The receiver may already be gone (one-way, or the deadline fired).
        let _ = tx.send(invoke.await);
    }
    .boxed();
    pool.try_submit(work)?;

    if oneway {
        return Ok(None);
    }
    Ok(Some(Submission {
        rx,
        deadline: deadline_for(timeout_ms),
    }))
}

impl Submission {
    /// Wait for the invocation under its deadline.
    ///
    /// Must be awaited from a task scheduled outside the worker pool that
    /// runs the invocation.
    pub async fn outcome(self) -> Outcome {
        match time::timeout(self.deadline, self.rx).await {
            Ok(Ok(Ok(payload))) => Outcome::Success(payload),
            Ok(Ok(Err(e))) => {
                tracing::debug!(error = %e, "invocation failed");
                Outcome::Fault(e.fault_kind())
            }
            // Sender dropped without a result: the invocation died before
            // reporting (panicked or was torn down).
            Ok(Err(_)) => Outcome::Fault(FaultKind::Unknown),
            Err(_) => Outcome::Fault(FaultKind::Timeout),
        }
    }
}
