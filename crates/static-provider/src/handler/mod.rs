//! Handler module for the Static Provider
//!
//! [`StaticProvider`] holds the two request handlers independent of any
//! transport; `routes` mounts them on an axum router.
//!
//! ## Design Principles
//!
//! - **Stateless Execution**: nothing is kept between invocations
//! - **Deterministic Behavior**: same request, same body
//! - **Injected Collaborators**: notification sink and v1 formatter are
//!   supplied at construction

pub mod routes;

pub use routes::{create_router, ApiError, AppState};

use axum::http::StatusCode;
use ngsi_v1::{FormatError, InboundRequest, QueryContextResponse, ResponseFormatter, V1Formatter};
use std::sync::Arc;

use crate::contracts::*;
use crate::engine::TypeValueResolver;
use crate::telemetry::NotificationSink;

/// Health and queryContext handlers backed by canned values
#[derive(Clone)]
pub struct StaticProvider {
    resolver: Arc<TypeValueResolver>,
    notifier: Arc<dyn NotificationSink>,
    formatter: Arc<dyn ResponseFormatter>,
}

impl StaticProvider {
    /// Create a provider using the default v1 formatter
    pub fn new(resolver: Arc<TypeValueResolver>, notifier: Arc<dyn NotificationSink>) -> Self {
        Self {
            resolver,
            notifier,
            formatter: Arc::new(V1Formatter),
        }
    }

    /// Replace the v1 formatter
    pub fn with_formatter(mut self, formatter: Arc<dyn ResponseFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Liveness check; always succeeds
    pub fn health_check(&self) -> (StatusCode, HealthCheckResponse) {
        tracing::debug!("Static API is available - responding with some static values");
        self.notifier.emit(HEALTH_CHANNEL, HEALTH_MESSAGE);

        let body = HealthCheckResponse {
            array: self.resolver.value_for(AttributeCategory::Array),
            boolean: self.resolver.value_for(AttributeCategory::Boolean),
            number: self.resolver.value_for(AttributeCategory::Number),
            structured_value: self.resolver.value_for(AttributeCategory::StructuredValue),
            text: self.resolver.value_for(AttributeCategory::Text),
        };

        (StatusCode::OK, body)
    }

    /// Answer a v1 queryContext request.
    ///
    /// Every requested attribute is valued by its declared type alone; the
    /// formatter's result, including any error, is returned as is.
    pub fn query_context(
        &self,
        request: &InboundRequest,
    ) -> Result<QueryContextResponse, FormatError> {
        self.notifier.emit(V1_CHANNEL, V1_MESSAGE);

        self.formatter
            .format_as_v1_response(request, None, &self.resolver.by_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ngsi_v1::ValueResolver;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        emitted: Mutex<Vec<(String, String)>>,
    }

    impl RecordingSink {
        fn emitted(&self) -> Vec<(String, String)> {
            self.emitted.lock().unwrap().clone()
        }
    }

    impl NotificationSink for RecordingSink {
        fn emit(&self, channel: &str, message: &str) {
            self.emitted
                .lock()
                .unwrap()
                .push((channel.to_string(), message.to_string()));
        }
    }

    /// Records resolver calls and the notifications already emitted when invoked
    struct RecordingFormatter {
        sink: Arc<RecordingSink>,
        calls: Mutex<Vec<(String, String, Option<Value>)>>,
        emitted_before_format: Mutex<Vec<(String, String)>>,
        context_was_none: Mutex<bool>,
    }

    impl ResponseFormatter for RecordingFormatter {
        fn format_as_v1_response(
            &self,
            _request: &InboundRequest,
            context_data: Option<&Value>,
            resolver: &dyn ValueResolver,
        ) -> Result<QueryContextResponse, FormatError> {
            *self.emitted_before_format.lock().unwrap() = self.sink.emitted();
            *self.context_was_none.lock().unwrap() = context_data.is_none();

            let value = resolver.resolve("temperature", "number");
            self.calls.lock().unwrap().push((
                "temperature".to_string(),
                "number".to_string(),
                value,
            ));

            Ok(QueryContextResponse {
                context_responses: vec![],
            })
        }
    }

    struct FailingFormatter;

    impl ResponseFormatter for FailingFormatter {
        fn format_as_v1_response(
            &self,
            _request: &InboundRequest,
            _context_data: Option<&Value>,
            _resolver: &dyn ValueResolver,
        ) -> Result<QueryContextResponse, FormatError> {
            Err(FormatError::malformed("unsupported entity shape"))
        }
    }

    fn provider_with_sink() -> (StaticProvider, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        let provider = StaticProvider::new(Arc::new(TypeValueResolver::new()), sink.clone());
        (provider, sink)
    }

    #[test]
    fn test_health_check_body() {
        let (provider, _) = provider_with_sink();
        let (status, body) = provider.health_check();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "array": ["Arthur", "Dent"],
                "boolean": true,
                "number": 42,
                "structuredValue": { "somevalue": "this" },
                "text": "I never could get the hang of thursdays"
            })
        );
    }

    #[test]
    fn test_health_check_is_reproducible() {
        let (provider, _) = provider_with_sink();
        let first = serde_json::to_string(&provider.health_check().1).unwrap();
        let second = serde_json::to_string(&provider.health_check().1).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_health_check_emits_notification() {
        let (provider, sink) = provider_with_sink();
        provider.health_check();

        assert_eq!(
            sink.emitted(),
            vec![(HEALTH_CHANNEL.to_string(), HEALTH_MESSAGE.to_string())]
        );
    }

    #[test]
    fn test_query_context_resolves_by_type_only() {
        let (provider, sink) = provider_with_sink();
        let formatter = Arc::new(RecordingFormatter {
            sink: sink.clone(),
            calls: Mutex::new(Vec::new()),
            emitted_before_format: Mutex::new(Vec::new()),
            context_was_none: Mutex::new(false),
        });
        let provider = provider.with_formatter(formatter.clone());

        provider
            .query_context(&InboundRequest::new(json!({})))
            .unwrap();

        assert_eq!(
            *formatter.calls.lock().unwrap(),
            vec![(
                "temperature".to_string(),
                "number".to_string(),
                Some(json!(42))
            )]
        );
        assert!(*formatter.context_was_none.lock().unwrap());
    }

    #[test]
    fn test_query_context_notifies_before_formatting() {
        let (provider, sink) = provider_with_sink();
        let formatter = Arc::new(RecordingFormatter {
            sink: sink.clone(),
            calls: Mutex::new(Vec::new()),
            emitted_before_format: Mutex::new(Vec::new()),
            context_was_none: Mutex::new(false),
        });
        let provider = provider.with_formatter(formatter.clone());

        provider
            .query_context(&InboundRequest::new(json!({})))
            .unwrap();

        let expected = vec![(V1_CHANNEL.to_string(), V1_MESSAGE.to_string())];
        assert_eq!(*formatter.emitted_before_format.lock().unwrap(), expected);
        assert_eq!(sink.emitted(), expected);
    }

    #[test]
    fn test_query_context_with_default_formatter() {
        let (provider, _) = provider_with_sink();
        let request = InboundRequest::new(json!({
            "entities": [{ "type": "Store", "isPattern": "false", "id": "urn:ngsi-ld:Store:001" }],
            "attributes": [
                { "name": "temperature", "type": "number" },
                { "name": "humidity", "type": "Integer" },
                { "name": "tweets", "type": "array" },
                { "name": "mystery", "type": "frobnicate" }
            ]
        }));

        let response = provider.query_context(&request).unwrap();
        let values: Vec<_> = response.context_responses[0]
            .context_element
            .attributes
            .iter()
            .map(|a| a.value.clone())
            .collect();

        assert_eq!(
            values,
            vec![json!(42), json!(42), json!(["Arthur", "Dent"]), Value::Null]
        );
    }

    #[test]
    fn test_formatter_errors_pass_through_unchanged() {
        let (provider, sink) = provider_with_sink();
        let provider = provider.with_formatter(Arc::new(FailingFormatter));

        let err = provider
            .query_context(&InboundRequest::new(json!({})))
            .unwrap_err();

        assert_eq!(err, FormatError::malformed("unsupported entity shape"));
        assert_eq!(sink.emitted().len(), 1);
    }
}
