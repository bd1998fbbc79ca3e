//! Static Provider Contracts
//!
//! Attribute categories, the health body, and the notification payloads the
//! provider emits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Notification channel for liveness checks
pub const HEALTH_CHANNEL: &str = "health";

/// Payload emitted on [`HEALTH_CHANNEL`]
pub const HEALTH_MESSAGE: &str = "Static API is healthy";

/// Notification channel for queryContext requests
pub const V1_CHANNEL: &str = "v1";

/// Payload emitted on [`V1_CHANNEL`]
pub const V1_MESSAGE: &str = "Data requested from Static API";

/// Canonical attribute categories the provider has canned values for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeCategory {
    Array,
    Boolean,
    Number,
    StructuredValue,
    Text,
}

impl AttributeCategory {
    /// Every category, in health-body order
    pub const ALL: [AttributeCategory; 5] = [
        AttributeCategory::Array,
        AttributeCategory::Boolean,
        AttributeCategory::Number,
        AttributeCategory::StructuredValue,
        AttributeCategory::Text,
    ];
}

/// Body of the health endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub array: Value,
    pub boolean: Value,
    pub number: Value,
    #[serde(rename = "structuredValue")]
    pub structured_value: Value,
    pub text: Value,
}

/// A message published on a notification channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub channel: String,
    pub message: String,
    pub emitted_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(channel: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            message: message.into(),
            emitted_at: Utc::now(),
        }
    }
}
