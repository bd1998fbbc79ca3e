//! queryContext response construction.

use serde_json::Value;

use crate::error::FormatError;
use crate::types::*;
use crate::ValueResolver;

/// Type given to bare attribute names when the endpoint path names none
pub const DEFAULT_ATTRIBUTE_TYPE: &str = "Text";

/// Builds v1 queryContext responses.
///
/// Providers depend on this trait rather than on [`V1Formatter`] so the wire
/// format can be swapped or doubled in tests.
pub trait ResponseFormatter: Send + Sync {
    fn format_as_v1_response(
        &self,
        request: &InboundRequest,
        context_data: Option<&Value>,
        resolver: &dyn ValueResolver,
    ) -> Result<QueryContextResponse, FormatError>;
}

/// Default formatter: one context response per requested entity
#[derive(Debug, Clone, Copy, Default)]
pub struct V1Formatter;

impl ResponseFormatter for V1Formatter {
    fn format_as_v1_response(
        &self,
        request: &InboundRequest,
        context_data: Option<&Value>,
        resolver: &dyn ValueResolver,
    ) -> Result<QueryContextResponse, FormatError> {
        let parsed = parse_request(&request.body)?;
        let fallback_type = request
            .attribute_type
            .as_deref()
            .unwrap_or(DEFAULT_ATTRIBUTE_TYPE);

        let context_responses = parsed
            .entities
            .iter()
            .map(|entity| {
                let attributes = parsed
                    .attributes
                    .iter()
                    .map(|attribute| {
                        let attr_type = attribute.declared_type().unwrap_or(fallback_type);
                        let value = context_value(context_data, attribute.name())
                            .or_else(|| resolver.resolve(attribute.name(), attr_type))
                            .unwrap_or(Value::Null);

                        ContextAttribute {
                            name: attribute.name().to_string(),
                            attr_type: title_case(attr_type),
                            value,
                        }
                    })
                    .collect();

                ContextElementResponse {
                    context_element: ContextElement {
                        attributes,
                        id: entity.id.clone(),
                        is_pattern: entity.is_pattern_flag().to_string(),
                        entity_type: entity.entity_type.clone(),
                    },
                    status_code: StatusCode::ok(),
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            entities = context_responses.len(),
            attributes = parsed.attributes.len(),
            "Formatted queryContext response"
        );

        Ok(QueryContextResponse { context_responses })
    }
}

/// Format with the default [`V1Formatter`]
pub fn format_as_v1_response(
    request: &InboundRequest,
    context_data: Option<&Value>,
    resolver: &dyn ValueResolver,
) -> Result<QueryContextResponse, FormatError> {
    V1Formatter.format_as_v1_response(request, context_data, resolver)
}

fn parse_request(body: &Value) -> Result<QueryContextRequest, FormatError> {
    let object = body
        .as_object()
        .ok_or_else(|| FormatError::malformed("request body must be a JSON object"))?;

    match object.get("entities") {
        Some(Value::Array(entities)) if !entities.is_empty() => {}
        _ => return Err(FormatError::MissingEntities),
    }

    serde_json::from_value(body.clone()).map_err(|e| FormatError::malformed(e.to_string()))
}

fn context_value(context_data: Option<&Value>, name: &str) -> Option<Value> {
    context_data
        .and_then(|data| data.as_object())
        .and_then(|map| map.get(name))
        .cloned()
}

fn title_case(attr_type: &str) -> String {
    let mut chars = attr_type.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
