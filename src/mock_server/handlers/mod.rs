//! HTTP request handlers for the mock server.
//!
//! Routes are generic over the collection named in the path; the `.json`
//! suffix the client appends is stripped here.

pub mod entities;
pub mod files;
pub mod search;

pub use entities::*;
pub use files::*;
pub use search::*;

use std::sync::Arc;

use axum::{
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use tokio::sync::RwLock;

use crate::mock_server::state::{resource, MockState, ResourceKind};

pub type SharedState = Arc<RwLock<MockState>>;

/// Build an error response in the API's shape.
pub(crate) fn error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "errors": [{ "detail": message.into() }]
        })),
    )
        .into_response()
}

/// Reject the request unless it carries the required bearer token.
pub(crate) fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    let Some(token) = &state.required_token else {
        return Ok(());
    };
    let expected = format!("Bearer {token}");
    match headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(error(StatusCode::UNAUTHORIZED, "invalid or missing API key")),
    }
}

/// Strip the `.json` suffix from a path segment.
pub(crate) fn strip_json(segment: &str) -> Result<&str, Response> {
    segment
        .strip_suffix(".json")
        .ok_or_else(|| error(StatusCode::NOT_FOUND, format!("unknown path: {segment}")))
}

pub(crate) fn collection(name: &str) -> Result<&'static ResourceKind, Response> {
    resource(name).ok_or_else(|| error(StatusCode::NOT_FOUND, format!("unknown resource: {name}")))
}

/// Pull the entity out of a singular envelope.
pub(crate) fn unwrap_envelope(kind: &ResourceKind, body: &[u8]) -> Result<Map<String, Value>, Response> {
    let mut envelope: Map<String, Value> = serde_json::from_slice(body)
        .map_err(|e| error(StatusCode::BAD_REQUEST, format!("invalid JSON body: {e}")))?;
    match envelope.remove(kind.singular) {
        Some(Value::Object(entity)) => Ok(entity),
        _ => Err(error(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("body must contain a \"{}\" object", kind.singular),
        )),
    }
}

/// Wrap one entity in its singular envelope.
pub(crate) fn envelope(kind: &ResourceKind, entity: Value) -> Value {
    json!({
        kind.singular: entity,
        "included": {}
    })
}
