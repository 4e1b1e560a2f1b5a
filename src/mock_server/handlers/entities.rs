//! Get, list, create and update for every collection.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use super::{authorize, collection, envelope, error, strip_json, unwrap_envelope, SharedState};
use crate::mock_server::state::Upload;

const DEFAULT_PAGE_SIZE: usize = 50;

fn parse_id(segment: &str) -> Result<u64, Response> {
    strip_json(segment)?
        .parse()
        .map_err(|_| error(StatusCode::NOT_FOUND, format!("invalid ID: {segment}")))
}

/// GET /{collection}.json
pub async fn list_entities(
    State(state): State<SharedState>,
    Path(segment): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }
    let kind = match strip_json(&segment).and_then(collection) {
        Ok(kind) => kind,
        Err(rejection) => return rejection,
    };

    let page = query
        .get("page")
        .and_then(|p| p.parse::<usize>().ok())
        .filter(|&p| p > 0)
        .unwrap_or(1);
    let page_size = query
        .get("per_page")
        .or_else(|| query.get("pageSize"))
        .and_then(|p| p.parse::<usize>().ok())
        .filter(|&p| p > 0)
        .unwrap_or(DEFAULT_PAGE_SIZE);

    let all = state.list(kind);
    let records = all.len();
    let pages = records.div_ceil(page_size);
    let items: Vec<Value> = all
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .cloned()
        .collect();

    Json(json!({
        kind.plural: items,
        "included": {},
        "pagination": {
            "records": records,
            "pageSize": page_size,
            "pages": pages,
            "page": page,
            "hasMorePages": page < pages
        },
        "meta": {}
    }))
    .into_response()
}

/// GET /{collection}/{id}.json
pub async fn get_entity(
    State(state): State<SharedState>,
    Path((name, segment)): Path<(String, String)>,
    Query(query): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Response {
    if name == "search" {
        return super::search_tickets(&state, &segment, &query, &headers).await;
    }

    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }
    let (kind, id) = match collection(&name).and_then(|kind| Ok((kind, parse_id(&segment)?))) {
        Ok(found) => found,
        Err(rejection) => return rejection,
    };

    match state.get(kind, id) {
        Some(entity) => Json(envelope(kind, entity.clone())).into_response(),
        None => error(
            StatusCode::NOT_FOUND,
            format!("no {} with ID {id}", kind.singular),
        ),
    }
}

/// POST /{collection}.json, or the upload sink at POST /uploads.
pub async fn create_entity(
    State(state): State<SharedState>,
    Path(segment): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let mut state = state.write().await;

    if segment == "uploads" {
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.starts_with("multipart/form-data") {
            return error(StatusCode::BAD_REQUEST, "expected a multipart form");
        }
        state.uploads.push(Upload {
            content_type,
            body: body.to_vec(),
        });
        return StatusCode::CREATED.into_response();
    }

    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }
    let kind = match strip_json(&segment).and_then(collection) {
        Ok(kind) => kind,
        Err(rejection) => return rejection,
    };
    let entity = match unwrap_envelope(kind, &body) {
        Ok(entity) => entity,
        Err(rejection) => return rejection,
    };

    let stored = state.insert(kind, entity);
    (StatusCode::CREATED, Json(envelope(kind, stored))).into_response()
}

/// PUT /{collection}/{id}.json
pub async fn update_entity(
    State(state): State<SharedState>,
    Path((name, segment)): Path<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }
    let (kind, id) = match collection(&name).and_then(|kind| Ok((kind, parse_id(&segment)?))) {
        Ok(found) => found,
        Err(rejection) => return rejection,
    };
    let fields = match unwrap_envelope(kind, &body) {
        Ok(fields) => fields,
        Err(rejection) => return rejection,
    };

    match state.update(kind, id, fields) {
        Some(entity) => Json(envelope(kind, entity.clone())).into_response(),
        None => error(
            StatusCode::NOT_FOUND,
            format!("no {} with ID {id}", kind.singular),
        ),
    }
}
