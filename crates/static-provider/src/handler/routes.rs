//! Route definitions for the Static Provider
//!
//! - GET /health - canned values for every attribute category
//! - POST /v1/queryContext - NGSI v1 queryContext
//! - POST /v1/:type/queryContext - same, with a type for bare attribute names
//! - GET /events - notification stream (Server-Sent Events)

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    routing::{get, post},
    Json, Router,
};
use futures::stream::{self, Stream};
use ngsi_v1::{FormatError, InboundRequest, QueryContextResponse};
use serde_json::Value;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::StaticProvider;
use crate::contracts::HealthCheckResponse;
use crate::engine::TypeValueResolver;
use crate::telemetry::EventBus;

/// Application state
pub struct AppState {
    pub provider: StaticProvider,
    pub events: EventBus,
}

impl AppState {
    /// Wire a provider to a fresh event bus
    pub fn new(event_capacity: usize) -> Self {
        let events = EventBus::new(event_capacity);
        let provider = StaticProvider::new(
            Arc::new(TypeValueResolver::new()),
            Arc::new(events.clone()),
        );
        Self { provider, events }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(crate::telemetry::DEFAULT_EVENT_CAPACITY)
    }
}

/// Errors surfaced by the HTTP layer
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidJson(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = match self {
            ApiError::Format(err) => err,
            ApiError::InvalidJson(msg) => FormatError::malformed(msg),
        };

        tracing::warn!(error = %error, "Rejecting queryContext request");

        let status = StatusCode::from_u16(error.code()).unwrap_or(StatusCode::BAD_REQUEST);
        (status, Json(error.to_error_response())).into_response()
    }
}

/// Create the router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/queryContext", post(query_context))
        .route("/v1/:type/queryContext", post(query_context_typed))
        .route("/events", get(event_stream))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET /health
async fn health_check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthCheckResponse>) {
    let (status, body) = state.provider.health_check();
    (status, Json(body))
}

/// POST /v1/queryContext
async fn query_context(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<QueryContextResponse>, ApiError> {
    let Json(body) = payload?;
    let response = state.provider.query_context(&InboundRequest::new(body))?;
    Ok(Json(response))
}

/// POST /v1/:type/queryContext
async fn query_context_typed(
    State(state): State<Arc<AppState>>,
    Path(attr_type): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<QueryContextResponse>, ApiError> {
    let Json(body) = payload?;
    let request = InboundRequest::new(body).with_attribute_type(attr_type);
    let response = state.provider.query_context(&request)?;
    Ok(Json(response))
}

/// GET /events
async fn event_stream(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let receiver = state.events.subscribe();

    let events = stream::unfold(receiver, |mut receiver| async move {
        loop {
            match receiver.recv().await {
                Ok(notification) => {
                    let event = Event::default()
                        .event(notification.channel)
                        .data(notification.message);
                    return Some((Ok::<_, Infallible>(event), receiver));
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event stream subscriber lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
