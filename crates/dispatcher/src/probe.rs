//! Health probes

use std::net::SocketAddr;
use std::time::Duration;

use contracts::{HealthConfig, HealthProbe, ProbeType};
use tokio::net::TcpStream;
use tracing::{debug, warn};

use crate::error::DispatchError;

/// Reference probe, always healthy
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysHealthy;

impl HealthProbe for AlwaysHealthy {
    fn name(&self) -> &str {
        "always"
    }

    async fn check(&self) -> bool {
        true
    }
}

/// Probe with a fixed outcome
#[derive(Debug, Clone, Copy)]
pub struct StaticProbe(pub bool);

impl HealthProbe for StaticProbe {
    fn name(&self) -> &str {
        "static"
    }

    async fn check(&self) -> bool {
        self.0
    }
}

/// Checks that the application accepts TCP connections
#[derive(Debug, Clone)]
pub struct TcpProbe {
    addr: SocketAddr,
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(addr: SocketAddr, timeout: Duration) -> Self {
        Self { addr, timeout }
    }
}

impl HealthProbe for TcpProbe {
    fn name(&self) -> &str {
        "tcp"
    }

    async fn check(&self) -> bool {
        match tokio::time::timeout(self.timeout, TcpStream::connect(self.addr)).await {
            Ok(Ok(_)) => {
                debug!(addr = %self.addr, "Application reachable");
                true
            }
            Ok(Err(e)) => {
                warn!(addr = %self.addr, error = %e, "Application unreachable");
                false
            }
            Err(_) => {
                warn!(
                    addr = %self.addr,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Application probe timed out"
                );
                false
            }
        }
    }
}

/// Probe selected by configuration
#[derive(Debug, Clone)]
pub enum ConfiguredProbe {
    Always(AlwaysHealthy),
    Tcp(TcpProbe),
}

impl ConfiguredProbe {
    /// Build the probe described by `config`
    pub fn from_config(config: &HealthConfig) -> Result<Self, DispatchError> {
        match config.probe {
            ProbeType::Always => Ok(Self::Always(AlwaysHealthy)),
            ProbeType::Tcp => {
                let addr = config
                    .addr
                    .as_deref()
                    .ok_or_else(|| DispatchError::probe_config("tcp probe requires 'addr'"))?;
                let addr: SocketAddr = addr.parse().map_err(|e| {
                    DispatchError::probe_config(format!("invalid address '{}': {}", addr, e))
                })?;
                Ok(Self::Tcp(TcpProbe::new(
                    addr,
                    Duration::from_millis(config.timeout_ms),
                )))
            }
        }
    }
}

impl HealthProbe for ConfiguredProbe {
    fn name(&self) -> &str {
        match self {
            Self::Always(p) => p.name(),
            Self::Tcp(p) => p.name(),
        }
    }

    async fn check(&self) -> bool {
        match self {
            Self::Always(p) => p.check().await,
            Self::Tcp(p) => p.check().await,
        }
    }
}
