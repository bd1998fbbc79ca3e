//! Provider configuration
//!
//! Defaults, optionally overlaid by a TOML file, optionally overlaid by
//! command-line flags.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use crate::error::{ProviderError, Result};
use crate::telemetry::DEFAULT_EVENT_CAPACITY;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// IP address to bind
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Notifications buffered per event-stream subscriber
    pub event_capacity: usize,

    pub log_format: LogFormat,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            event_capacity: DEFAULT_EVENT_CAPACITY,
            log_format: LogFormat::Json,
        }
    }
}

impl ProviderConfig {
    /// Load from a TOML file; missing keys keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ProviderError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides
    pub fn with_overrides(
        mut self,
        host: Option<String>,
        port: Option<u16>,
        log_format: Option<LogFormat>,
    ) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        if let Some(format) = log_format {
            self.log_format = format;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.event_capacity == 0 {
            return Err(ProviderError::config("event_capacity must be greater than 0"));
        }
        self.socket_addr().map(|_| ())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| ProviderError::address(format!("{}:{}", self.host, self.port)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
