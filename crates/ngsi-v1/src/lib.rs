//! NGSI v1 queryContext formatting.
//!
//! Context providers registered with a broker in legacy forwarding mode receive
//! `queryContext` requests and must answer with a `contextResponses` envelope.
//! This crate owns that wire format so providers only have to supply values.
//!
//! # Usage
//!
//! 1. Wrap the inbound HTTP body in an [`InboundRequest`].
//! 2. Implement [`ValueResolver`] (any `Fn(&str, &str) -> Option<Value>` works).
//! 3. Call [`format_as_v1_response`] or go through the [`ResponseFormatter`] trait.
//!
//! ```rust
//! use ngsi_v1::{format_as_v1_response, InboundRequest};
//! use serde_json::{json, Value};
//!
//! let request = InboundRequest::new(json!({
//!     "entities": [{ "type": "Store", "isPattern": "false", "id": "urn:ngsi-ld:Store:001" }],
//!     "attributes": [{ "name": "temperature", "type": "number" }]
//! }));
//!
//! let resolver = |_name: &str, _attr_type: &str| -> Option<Value> { Some(json!(21.5)) };
//! let response = format_as_v1_response(&request, None, &resolver).unwrap();
//! assert_eq!(response.context_responses.len(), 1);
//! ```

pub mod error;
pub mod formatter;
pub mod types;

pub use error::{ErrorCode, ErrorResponse, FormatError};
pub use formatter::{format_as_v1_response, ResponseFormatter, V1Formatter, DEFAULT_ATTRIBUTE_TYPE};
pub use types::*;

use serde_json::Value;

/// Supplies attribute values while the formatter walks the requested entities.
///
/// The formatter drives iteration; implementors only answer one lookup at a time.
pub trait ValueResolver {
    /// Value for the attribute `name` declared with `attr_type`, or `None`
    /// when no value is available.
    fn resolve(&self, name: &str, attr_type: &str) -> Option<Value>;
}

impl<F> ValueResolver for F
where
    F: Fn(&str, &str) -> Option<Value>,
{
    fn resolve(&self, name: &str, attr_type: &str) -> Option<Value> {
        self(name, attr_type)
    }
}
