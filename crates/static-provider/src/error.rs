//! Error types for the Static Provider
//!
//! Startup and configuration failures. Request-time errors live with the
//! HTTP layer in [`crate::handler::ApiError`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    /// Invalid configuration value or file contents
    #[error("Configuration error: {0}")]
    Config(String),

    /// File access or socket I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Host/port pair does not form a socket address
    #[error("Invalid listen address: {0}")]
    Address(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ProviderError {
    pub fn config(msg: impl Into<String>) -> Self {
        ProviderError::Config(msg.into())
    }

    pub fn address(msg: impl Into<String>) -> Self {
        ProviderError::Address(msg.into())
    }
}

impl From<toml::de::Error> for ProviderError {
    fn from(err: toml::de::Error) -> Self {
        ProviderError::Config(format!("TOML error: {}", err))
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Serialization(format!("JSON error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;
