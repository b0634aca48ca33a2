//! Server-side request processor.
//!
//! Classifies each decoded request (heartbeat vs call), selects a worker
//! pool, and hands the invocation to timeout-guarded execution. Every
//! failure mode converges on a well-formed response or deliberate silence;
//! nothing propagates out of [`Dispatcher::process`].

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::FutureExt;
use tokio::time::Instant;

use fluxrpc_core::error::{FaultKind, Result};
use fluxrpc_core::protocol::envelope::{RequestEnvelope, ResponseEnvelope};

use crate::dispatch::guard::{self, Outcome};
use crate::obs::ServerMetrics;
use crate::pool::PoolSelector;

/// The business invocation, opaque to this core. An `Err` is a domain
/// fault and becomes an error response; it never tears down the pipeline.
#[async_trait]
pub trait Invoker: Send + Sync {
    async fn invoke(&self, req: RequestEnvelope) -> Result<Bytes>;
}

/// Write-only sink for response envelopes. A failed write is terminal for
/// that response: logged, counted, never retried.
#[async_trait]
pub trait Connection: Send + Sync {
    async fn write(&self, rsp: ResponseEnvelope) -> Result<()>;
}

/// Request dispatcher.
///
/// Per request, terminal on the first applicable step:
/// heartbeat ack, overload rejection, one-way fire-and-forget, or a
/// timeout-guarded two-way invocation whose watch task writes the response.
pub struct Dispatcher {
    invoker: Arc<dyn Invoker>,
    selector: Arc<dyn PoolSelector>,
    metrics: Arc<ServerMetrics>,
}

impl Dispatcher {
    pub fn new(
        invoker: Arc<dyn Invoker>,
        selector: Arc<dyn PoolSelector>,
        metrics: Arc<ServerMetrics>,
    ) -> Self {
        Self {
            invoker,
            selector,
            metrics,
        }
    }

    /// Process one decoded request.
    ///
    /// Control does not re-enter the dispatcher after submission: for
    /// two-way calls the spawned watch task performs the response write.
    pub async fn process(&self, req: RequestEnvelope, conn: Arc<dyn Connection>) {
        if req.heartbeat {
            self.metrics.requests.inc(&[("kind", "heartbeat")]);
            tracing::debug!(id = req.id, "heartbeat ack");
            self.write(&*conn, ResponseEnvelope::heartbeat_ack(req.id))
                .await;
            return;
        }

        self.metrics.requests.inc(&[("kind", "call")]);

        let id = req.id;
        let oneway = req.oneway;
        let timeout_ms = req.timeout_ms;

        let pool = match self.selector.select(&req) {
            Ok(pool) => pool,
            Err(e) => {
                tracing::warn!(id, error = %e, "pool selection failed");
                self.reject_overload(id, "select", &*conn).await;
                return;
            }
        };

        let invoker = Arc::clone(&self.invoker);
        let invoke = async move { invoker.invoke(req).await }.boxed();

        let submission = match guard::submit(&pool, invoke, timeout_ms, oneway) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(id, pool = pool.name(), error = %e, "pool saturated");
                self.reject_overload(id, "submit", &*conn).await;
                return;
            }
        };

        // One-way: submitted for side effects only; no response, ever.
        let Some(submission) = submission else { return };

        // The deadline watch gets its own task: a saturated worker pool
        // must not be able to stall its own timeout.
        let metrics = Arc::clone(&self.metrics);
        let started = Instant::now();
        tokio::spawn(async move {
            let outcome = submission.outcome().await;
            metrics.dispatch_duration.observe(&[], started.elapsed());
            let rsp = match outcome {
                Outcome::Success(payload) => {
                    metrics.responses.inc(&[("outcome", "success")]);
                    ResponseEnvelope::success(id, payload)
                }
                Outcome::Fault(kind) => {
                    metrics.responses.inc(&[("outcome", kind.as_str())]);
                    ResponseEnvelope::fault(id, kind, kind.message())
                }
            };
            tracing::debug!(id, "writing response");
            if let Err(e) = conn.write(rsp).await {
                metrics.write_failures.inc(&[]);
                tracing::warn!(id, error = %e, "response write failed");
            }
        });
    }

    /// Overload is reported even for one-way requests: the server could not
    /// even start the work.
    async fn reject_overload(&self, id: u64, stage: &'static str, conn: &dyn Connection) {
        self.metrics.overloads.inc(&[("stage", stage)]);
        let kind = FaultKind::Overload;
        self.write(conn, ResponseEnvelope::fault(id, kind, kind.message()))
            .await;
    }

    async fn write(&self, conn: &dyn Connection, rsp: ResponseEnvelope) {
        let id = rsp.id;
        if let Err(e) = conn.write(rsp).await {
            self.metrics.write_failures.inc(&[]);
            tracing::warn!(id, error = %e, "response write failed");
        }
    }
}
