//! File references and upload descriptors.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};

use super::{authorize, collection, error, SharedState};

const BUCKET: &str = "mock-desk-uploads";

/// POST /files/ref.json
///
/// Stores the file reference and answers with signed form fields that
/// point the upload at this server's sink.
pub async fn create_file_ref(
    State(state): State<SharedState>,
    Path((name, segment)): Path<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if name != "files" || segment != "ref.json" {
        return error(StatusCode::NOT_FOUND, format!("unknown path: {name}/{segment}"));
    }

    let mut state = state.write().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }
    let kind = match collection("files") {
        Ok(kind) => kind,
        Err(rejection) => return rejection,
    };

    let mut request: Map<String, Value> = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => return error(StatusCode::BAD_REQUEST, format!("invalid JSON body: {e}")),
    };
    let Some(Value::Object(file)) = request.remove("file") else {
        return error(StatusCode::UNPROCESSABLE_ENTITY, "body must contain a \"file\" object");
    };

    let stored = state.insert(kind, file);
    let filename = stored["filename"].as_str().unwrap_or("upload").to_string();
    let mime_type = stored["mimeType"]
        .as_str()
        .unwrap_or("application/octet-stream")
        .to_string();

    let descriptor = json!({
        "url": format!("{}/uploads", state.base_url),
        "params": {
            "Content-Type": mime_type,
            "bucket": BUCKET,
            "key": format!("files/{}/{}", stored["id"], filename),
            "policy": "bW9jay1wb2xpY3k=",
            "success_action_status": "201",
            "x-amz-algorithm": "AWS4-HMAC-SHA256",
            "x-amz-credential": "MOCKKEY/20240101/us-east-1/s3/aws4_request",
            "x-amz-date": "20240101T000000Z",
            "x-amz-signature": "0123456789abcdef"
        },
        "file": stored
    });

    (StatusCode::CREATED, Json(descriptor)).into_response()
}
