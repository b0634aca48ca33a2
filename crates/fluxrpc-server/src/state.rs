//! Shared server state.
//!
//! Builds worker pools from config, compiles the route table, and hands the
//! dispatcher its collaborators. Startup errors are explicit (`Result`
//! instead of panic).

use std::sync::Arc;

use fluxrpc_core::error::Result;

use crate::config::ServerConfig;
use crate::dispatch::{Dispatcher, Invoker};
use crate::obs::ServerMetrics;
use crate::pool::MethodPoolSelector;

#[derive(Clone)]
pub struct ServerState {
    inner: Arc<ServerStateInner>,
    dispatcher: Arc<Dispatcher>,
}

struct ServerStateInner {
    cfg: ServerConfig,
    metrics: Arc<ServerMetrics>,
}

impl ServerState {
    /// Build server state from a validated config and a business invoker.
    pub fn new(cfg: ServerConfig, invoker: Arc<dyn Invoker>) -> Result<Self> {
        let selector = Arc::new(MethodPoolSelector::from_config(&cfg)?);
        let metrics = Arc::new(ServerMetrics::default());
        let dispatcher = Arc::new(Dispatcher::new(invoker, selector, Arc::clone(&metrics)));

        Ok(Self {
            inner: Arc::new(ServerStateInner { cfg, metrics }),
            dispatcher,
        })
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn metrics(&self) -> Arc<ServerMetrics> {
        Arc::clone(&self.inner.metrics)
    }

    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        Arc::clone(&self.dispatcher)
    }
}
