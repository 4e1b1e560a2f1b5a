//! Ticket search and direct file uploads.

use desk_client::{
    DeskClient, DeskError, File, FileResponse, SearchTicketsFilter, UploadParams,
};
use serde_json::json;
use wiremock::matchers::{header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_search_encodes_criteria() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/tickets.json"))
        .and(query_param("search", "refund"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tickets": [{ "id": 2, "subject": "Refund for order 1234" }],
            "pagination": { "records": 1, "pageSize": 50, "pages": 1, "page": 1 }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = DeskClient::new("test-token", &mock_server.uri()).unwrap();
    let filter = SearchTicketsFilter {
        search: Some("refund".to_string()),
        inboxes: vec![1, 2],
        ..Default::default()
    };

    let found = client.tickets().search(&filter).await.unwrap();
    assert_eq!(found.tickets.len(), 1);
    assert_eq!(found.tickets[0].subject, "Refund for order 1234");
    assert!(!found.pagination.has_more());

    let requests = mock_server.received_requests().await.unwrap();
    let inboxes: Vec<String> = requests[0]
        .url
        .query_pairs()
        .filter(|(key, _)| key == "inboxes")
        .map(|(_, value)| value.into_owned())
        .collect();
    assert_eq!(inboxes, ["1", "2"]);

    let query = requests[0].url.query().unwrap_or_default();
    assert!(query.contains("inboxes=1&inboxes=2"));
    assert!(!query.contains('['));
    assert!(!query.contains("%5B"));
    assert!(!query.contains("exact"));
    assert!(!query.contains("agents"));
}

fn descriptor(url: String, params: UploadParams) -> FileResponse {
    FileResponse {
        url,
        params,
        file: File {
            filename: "photo.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
            ..Default::default()
        },
    }
}

#[tokio::test]
async fn test_upload_posts_signed_multipart_form() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/uploads"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = DeskClient::new("test-token", &mock_server.uri()).unwrap();
    let params = UploadParams {
        content_type: "image/jpeg".to_string(),
        bucket: "desk-uploads".to_string(),
        key: "tmp/photo.jpg".to_string(),
        policy: String::new(),
        x_amz_signature: "deadbeef".to_string(),
        ..Default::default()
    };
    let target = descriptor(format!("{}/uploads", mock_server.uri()), params);

    client
        .files()
        .upload(&target, b"\xFF\xD8image-bytes\xFF\xD9".to_vec())
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let request = &requests[0];
    assert!(request.headers.get("authorization").is_none());

    let content_type = request.headers.get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data"));

    let body = String::from_utf8_lossy(&request.body);
    let position = |needle: &str| body.find(needle).unwrap_or_else(|| panic!("{needle} missing"));
    let content = position(r#"name="Content-Type""#);
    let bucket = position(r#"name="bucket""#);
    let key = position(r#"name="key""#);
    let signature = position(r#"name="x-amz-signature""#);
    let file = position(r#"name="file"; filename="photo.jpg""#);
    assert!(content < bucket && bucket < key && key < signature && signature < file);
    assert!(!body.contains(r#"name="policy""#));
    assert!(body.contains("image-bytes"));
}

#[tokio::test]
async fn test_upload_rejection_reports_status_and_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/uploads"))
        .respond_with(ResponseTemplate::new(403).set_body_string("<Error>SignatureDoesNotMatch</Error>"))
        .mount(&mock_server)
        .await;

    let client = DeskClient::new("test-token", &mock_server.uri()).unwrap();
    let target = descriptor(format!("{}/uploads", mock_server.uri()), UploadParams::default());

    let err = client.files().upload(&target, vec![1, 2, 3]).await.unwrap_err();
    match err {
        DeskError::UnexpectedStatus { status, body } => {
            assert_eq!(status, 403);
            assert!(body.contains("SignatureDoesNotMatch"));
        }
        other => panic!("expected UnexpectedStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_upload_accepts_created() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/uploads"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&mock_server)
        .await;

    let client = DeskClient::new("test-token", &mock_server.uri()).unwrap();
    let target = descriptor(format!("{}/uploads", mock_server.uri()), UploadParams::default());

    assert!(client.files().upload(&target, Vec::new()).await.is_ok());
}
