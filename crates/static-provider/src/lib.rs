//! Static Provider
//!
//! Mock NGSI context provider. Answers liveness checks and v1 queryContext
//! requests with fixed values chosen by attribute type, so a context broker
//! and its proxies can be exercised without a real data source.
//!
//! # Design Principles
//! - Deterministic: same request, same response
//! - Stateless: the canned value table is built once and only read
//! - Observable: every request publishes a notification on a named channel

pub mod client;
pub mod config;
pub mod engine;
pub mod error;
pub mod handler;
pub mod telemetry;

// Re-export contracts
#[path = "../contracts/mod.rs"]
pub mod contracts;

pub use contracts::*;
pub use error::ProviderError;
