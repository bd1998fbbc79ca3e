//! Formatting errors and their NGSI v1 error envelope.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while turning a queryContext request into a response
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Body is not a JSON object or does not match the queryContext shape
    #[error("Malformed queryContext request: {0}")]
    MalformedRequest(String),

    /// `entities` is absent, not an array, or empty
    #[error("queryContext request has no entities")]
    MissingEntities,
}

impl FormatError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        FormatError::MalformedRequest(msg.into())
    }

    /// NGSI v1 error code, as the HTTP status the broker expects
    pub fn code(&self) -> u16 {
        match self {
            FormatError::MalformedRequest(_) | FormatError::MissingEntities => 400,
        }
    }

    pub fn reason_phrase(&self) -> String {
        self.to_string()
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error_code: ErrorCode {
                code: self.code().to_string(),
                reason_phrase: self.reason_phrase(),
            },
        }
    }
}

/// `{ "errorCode": { "code": "...", "reasonPhrase": "..." } }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "errorCode")]
    pub error_code: ErrorCode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorCode {
    pub code: String,
    #[serde(rename = "reasonPhrase")]
    pub reason_phrase: String,
}
