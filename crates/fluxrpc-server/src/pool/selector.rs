//! Pool selection.
//!
//! The routing policy maps a request's method to the pool that should run
//! it. The policy itself is pluggable (deployments route by method, tenant,
//! priority); `MethodPoolSelector` is the config-driven default: exact-match
//! route table with a fallback pool. Selection is deterministic for a given
//! method, so semantically identical requests land on the same pool class.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;

use fluxrpc_core::error::{FluxError, Result};
use fluxrpc_core::protocol::envelope::RequestEnvelope;

use crate::config::ServerConfig;

use super::worker::WorkerPool;

/// Resolves the pool that should execute a request.
///
/// A lookup failure is treated by the dispatcher exactly like saturation:
/// the peer sees an OVERLOAD fault either way.
pub trait PoolSelector: Send + Sync {
    fn select(&self, req: &RequestEnvelope) -> Result<Arc<WorkerPool>>;
}

/// Config-driven selector: exact match on `method`, else the default pool.
pub struct MethodPoolSelector {
    routes: DashMap<String, Arc<WorkerPool>>,
    default_pool: Arc<WorkerPool>,
}

impl MethodPoolSelector {
    pub fn new(default_pool: Arc<WorkerPool>) -> Self {
        Self {
            routes: DashMap::new(),
            default_pool,
        }
    }

    /// Build pools and the route table from a config.
    pub fn from_config(cfg: &ServerConfig) -> Result<Self> {
        let mut pools: HashMap<&str, Arc<WorkerPool>> = HashMap::new();
        for p in &cfg.pools {
            pools.insert(
                p.name.as_str(),
                Arc::new(WorkerPool::new(p.name.clone(), p.capacity)),
            );
        }

        let default_pool = pools
            .get(cfg.server.default_pool.as_str())
            .cloned()
            .ok_or_else(|| {
                FluxError::Config(format!(
                    "unknown default pool: {}",
                    cfg.server.default_pool
                ))
            })?;

        let selector = Self::new(default_pool);
        for r in &cfg.routes {
            let pool = pools.get(r.pool.as_str()).cloned().ok_or_else(|| {
                FluxError::Config(format!(
                    "route {} refers to unknown pool: {}",
                    r.method, r.pool
                ))
            })?;
            selector.register(r.method.clone(), pool);
        }
        Ok(selector)
    }

    /// Route a method to a pool. A later registration for the same method
    /// replaces the earlier one.
    pub fn register(&self, method: impl Into<String>, pool: Arc<WorkerPool>) {
        self.routes.insert(method.into(), pool);
    }

    pub fn registered_methods(&self) -> Vec<String> {
        self.routes.iter().map(|e| e.key().clone()).collect()
    }
}

impl PoolSelector for MethodPoolSelector {
    fn select(&self, req: &RequestEnvelope) -> Result<Arc<WorkerPool>> {
        match self.routes.get(&req.method) {
            Some(p) => Ok(Arc::clone(p.value())),
            None => Ok(Arc::clone(&self.default_pool)),
        }
    }
}
