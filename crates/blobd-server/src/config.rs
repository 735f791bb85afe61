use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use blobd_crypto::OidStrategy;
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Port the service listens on unless configured otherwise.
pub const DEFAULT_PORT: u16 = 8282;

/// Server configuration, loadable from TOML. Every field has a default.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Largest accepted request body for create, in bytes.
    pub max_blob_size: usize,
    pub oid_strategy: OidStrategy,
    /// How long in-flight requests may take to drain after a shutdown signal.
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            max_blob_size: 64 * 1024 * 1024,
            oid_strategy: OidStrategy::Random,
            shutdown_timeout_secs: 10,
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(s: &str) -> ServerResult<Self> {
        toml::from_str(s).map_err(|e| ServerError::Config(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> ServerResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> ServerResult<String> {
        toml::to_string(self).map_err(|e| ServerError::Config(e.to_string()))
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}
