use std::collections::HashSet;

use serde::Deserialize;

use fluxrpc_core::error::{FluxError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub pools: Vec<PoolConfig>,

    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(FluxError::Config("version must be 1".into()));
        }
        if self.pools.is_empty() {
            return Err(FluxError::Config("pools must not be empty".into()));
        }

        let mut names = HashSet::new();
        for p in &self.pools {
            p.validate()?;
            if !names.insert(p.name.as_str()) {
                return Err(FluxError::Config(format!(
                    "duplicate pool name: {}",
                    p.name
                )));
            }
        }

        if !names.contains(self.server.default_pool.as_str()) {
            return Err(FluxError::Config(format!(
                "server.default_pool refers to undeclared pool: {}",
                self.server.default_pool
            )));
        }

        let mut methods = HashSet::new();
        for r in &self.routes {
            if !names.contains(r.pool.as_str()) {
                return Err(FluxError::Config(format!(
                    "route {} refers to undeclared pool: {}",
                    r.method, r.pool
                )));
            }
            if !methods.insert(r.method.as_str()) {
                return Err(FluxError::Config(format!(
                    "duplicate route method: {}",
                    r.method
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_pool_name")]
    pub default_pool: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            default_pool: default_pool_name(),
        }
    }
}

/// One bounded worker pool. Capacity is the admission limit: how many
/// invocations may run on this pool at once. Timed-out work is abandoned,
/// not cancelled, and keeps holding capacity until it finishes, so size
/// pools with sustained timeout pressure in mind.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PoolConfig {
    pub name: String,
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl PoolConfig {
    fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(FluxError::Config("pool name must not be empty".into()));
        }
        if !(1..=65536).contains(&self.capacity) {
            return Err(FluxError::Config(format!(
                "pool {} capacity must be between 1 and 65536",
                self.name
            )));
        }
        Ok(())
    }
}

/// Exact-match route from a request method to a pool name.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteConfig {
    pub method: String,
    pub pool: String,
}

fn default_pool_name() -> String {
    "default".into()
}
fn default_capacity() -> usize {
    64
}
