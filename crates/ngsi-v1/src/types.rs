//! Request and response shapes for NGSI v1 queryContext.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw inbound request as seen by a context provider endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundRequest {
    /// JSON request body
    pub body: Value,

    /// Attribute type taken from the endpoint path, applied to bare attribute names
    pub attribute_type: Option<String>,
}

impl InboundRequest {
    /// Create a request with no path-supplied attribute type
    pub fn new(body: Value) -> Self {
        Self {
            body,
            attribute_type: None,
        }
    }

    /// Set the attribute type used for bare attribute names
    pub fn with_attribute_type(mut self, attribute_type: impl Into<String>) -> Self {
        self.attribute_type = Some(attribute_type.into());
        self
    }
}

/// Parsed queryContext request body
#[derive(Debug, Clone, Deserialize)]
pub struct QueryContextRequest {
    pub entities: Vec<EntityRef>,

    #[serde(default)]
    pub attributes: Vec<AttributeRef>,
}

/// Entity selector in a queryContext request
#[derive(Debug, Clone, Deserialize)]
pub struct EntityRef {
    pub id: String,

    #[serde(rename = "type", default)]
    pub entity_type: Option<String>,

    /// Either a boolean or the strings `"true"` / `"false"`
    #[serde(rename = "isPattern", default)]
    pub is_pattern: Option<Value>,
}

impl EntityRef {
    /// `isPattern` as the string form v1 responses use
    pub fn is_pattern_flag(&self) -> &'static str {
        match &self.is_pattern {
            Some(Value::Bool(true)) => "true",
            Some(Value::String(s)) if s.eq_ignore_ascii_case("true") => "true",
            _ => "false",
        }
    }
}

/// Requested attribute: a bare name or a name with a declared type
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AttributeRef {
    Name(String),
    Typed {
        name: String,
        #[serde(rename = "type", default)]
        attr_type: Option<String>,
    },
}

impl AttributeRef {
    pub fn name(&self) -> &str {
        match self {
            AttributeRef::Name(name) => name,
            AttributeRef::Typed { name, .. } => name,
        }
    }

    /// Declared type, if the request carried one for this attribute
    pub fn declared_type(&self) -> Option<&str> {
        match self {
            AttributeRef::Name(_) => None,
            AttributeRef::Typed { attr_type, .. } => attr_type.as_deref(),
        }
    }
}

/// queryContext response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryContextResponse {
    #[serde(rename = "contextResponses")]
    pub context_responses: Vec<ContextElementResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextElementResponse {
    #[serde(rename = "contextElement")]
    pub context_element: ContextElement,

    #[serde(rename = "statusCode")]
    pub status_code: StatusCode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextElement {
    pub attributes: Vec<ContextAttribute>,
    pub id: String,
    #[serde(rename = "isPattern")]
    pub is_pattern: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextAttribute {
    pub name: String,
    #[serde(rename = "type")]
    pub attr_type: String,
    /// `null` when the provider has no value for the attribute
    pub value: Value,
}

/// NGSI v1 status block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCode {
    pub code: String,
    #[serde(rename = "reasonPhrase")]
    pub reason_phrase: String,
}

impl StatusCode {
    pub fn ok() -> Self {
        Self {
            code: "200".to_string(),
            reason_phrase: "OK".to_string(),
        }
    }
}
