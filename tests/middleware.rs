//! Middleware chain behaviour: ordering, retries, deadlines, cancellation.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use desk_client::middleware::{
    BearerAuth, Conditional, Headers, Logging, Middleware, Next, Pipeline, RateLimit, RequestId,
    Retry, Timeout, Transport, UserAgent,
};
use desk_client::{CancellationToken, DeskClient, DeskError, Get, List, ListOptions};
use reqwest::{Method, Request, Response};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Appends `{name}-in` before and `{name}-out` after the rest of the chain.
struct Recorder {
    name: &'static str,
    log: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Middleware for Recorder {
    async fn handle(&self, request: Request, next: Next<'_>) -> desk_client::Result<Response> {
        self.log.lock().unwrap().push(format!("{}-in", self.name));
        let result = next.run(request).await;
        self.log.lock().unwrap().push(format!("{}-out", self.name));
        result
    }
}

/// Fails every call without touching the network.
#[derive(Default)]
struct FailingTransport {
    attempts: AtomicU32,
}

#[async_trait]
impl Transport for FailingTransport {
    async fn send(&self, _request: Request) -> desk_client::Result<Response> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(DeskError::Aborted("connection refused".to_string()))
    }
}

/// Fails the first `failures` calls, then delegates to a real client.
struct FlakyTransport {
    failures: AtomicU32,
    http: reqwest::Client,
}

#[async_trait]
impl Transport for FlakyTransport {
    async fn send(&self, request: Request) -> desk_client::Result<Response> {
        let remaining = self.failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures.store(remaining - 1, Ordering::SeqCst);
            return Err(DeskError::Aborted("connection reset".to_string()));
        }
        self.http.execute(request).await.map_err(DeskError::Http)
    }
}

/// Rejects every call before it reaches the transport.
struct Deny;

#[async_trait]
impl Middleware for Deny {
    async fn handle(&self, _request: Request, _next: Next<'_>) -> desk_client::Result<Response> {
        Err(DeskError::Aborted("blocked by policy".to_string()))
    }
}

async fn tag_server() -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tags/1.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tag": { "id": 1, "name": "vip" }
        })))
        .mount(&mock_server)
        .await;
    mock_server
}

#[tokio::test]
async fn test_middleware_run_in_onion_order() {
    let mock_server = tag_server().await;
    let log = Arc::new(Mutex::new(Vec::new()));

    let client = DeskClient::builder(mock_server.uri())
        .middleware(Recorder { name: "M1", log: Arc::clone(&log) })
        .middleware(Recorder { name: "M2", log: Arc::clone(&log) })
        .middleware(Recorder { name: "M3", log: Arc::clone(&log) })
        .build()
        .unwrap();

    client.tags().get(1).await.unwrap();

    assert_eq!(
        *log.lock().unwrap(),
        ["M1-in", "M2-in", "M3-in", "M3-out", "M2-out", "M1-out"]
    );
}

#[tokio::test]
async fn test_empty_chain_hits_transport_directly() {
    let mock_server = tag_server().await;
    let client = DeskClient::builder(mock_server.uri()).build().unwrap();

    let tag = client.tags().get(1).await.unwrap();
    assert_eq!(tag.tag.name, "vip");
}

#[tokio::test]
async fn test_middleware_can_abort_without_sending() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = DeskClient::builder(mock_server.uri())
        .middleware(Logging)
        .middleware(Deny)
        .build()
        .unwrap();

    let err = client.tags().get(1).await.unwrap_err();
    assert!(matches!(err, DeskError::Aborted(reason) if reason == "blocked by policy"));
}

#[tokio::test]
async fn test_retry_attempts_max_plus_one_then_returns_last_error() {
    let transport = Arc::new(FailingTransport::default());
    let client = DeskClient::builder("http://desk.invalid/api")
        .transport(Arc::clone(&transport))
        .middleware(Retry::new(3, Duration::from_millis(1)))
        .build()
        .unwrap();

    let err = client.tags().get(1).await.unwrap_err();

    assert!(matches!(err, DeskError::Aborted(_)));
    assert_eq!(transport.attempts.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_retry_zero_means_single_attempt() {
    let transport = Arc::new(FailingTransport::default());
    let client = DeskClient::builder("http://desk.invalid/api")
        .transport(Arc::clone(&transport))
        .middleware(Retry::new(0, Duration::from_millis(1)))
        .build()
        .unwrap();

    assert!(client.tags().get(1).await.is_err());
    assert_eq!(transport.attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_retry_recovers_after_transient_failures() {
    let mock_server = tag_server().await;
    let client = DeskClient::builder(mock_server.uri())
        .transport(FlakyTransport {
            failures: AtomicU32::new(2),
            http: reqwest::Client::new(),
        })
        .middleware(Retry::new(3, Duration::from_millis(5)))
        .build()
        .unwrap();

    let tag = client.tags().get(1).await.unwrap();
    assert_eq!(tag.tag.base.id, 1);
}

#[tokio::test]
async fn test_retry_does_not_retry_error_statuses() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tags/1.json"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = DeskClient::builder(mock_server.uri())
        .middleware(Retry::new(3, Duration::from_millis(1)))
        .build()
        .unwrap();

    let err = client.tags().get(1).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_cancellation_interrupts_retry_wait() {
    let transport = Arc::new(FailingTransport::default());
    let client = DeskClient::builder("http://desk.invalid/api")
        .transport(Arc::clone(&transport))
        .middleware(Retry::new(5, Duration::from_secs(30)))
        .build()
        .unwrap();

    let token = CancellationToken::new();
    let scoped = client.with_cancellation(token.clone());
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();
    });

    let started = Instant::now();
    let err = scoped.tags().get(1).await.unwrap_err();

    assert!(matches!(err, DeskError::Cancelled));
    assert!(err.is_cancelled());
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(transport.attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_cancellation_aborts_in_flight_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tags/1.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "tag": { "id": 1 } }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let client = DeskClient::new("test-token", &mock_server.uri()).unwrap();
    let token = CancellationToken::new();
    let scoped = client.with_cancellation(token.clone());
    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();
    });

    let started = Instant::now();
    let err = scoped.tags().get(1).await.unwrap_err();

    assert!(matches!(err, DeskError::Cancelled), "got {err:?}");
    assert!(started.elapsed() < Duration::from_secs(2));
    canceller.await.unwrap();
}

#[tokio::test]
async fn test_cancelled_before_send_never_reaches_server() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = DeskClient::new("test-token", &mock_server.uri()).unwrap();
    let token = CancellationToken::new();
    token.cancel();

    let err = client
        .with_cancellation(token)
        .tags()
        .list(&ListOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DeskError::Cancelled));
}

#[tokio::test]
async fn test_timeout_bounds_slow_responses() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tags/1.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "tag": { "id": 1 } }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let client = DeskClient::builder(mock_server.uri())
        .middleware(Timeout::new(Duration::from_millis(100)))
        .build()
        .unwrap();

    let started = Instant::now();
    let err = client.tags().get(1).await.unwrap_err();

    assert!(err.is_cancelled(), "expected a deadline error, got {err:?}");
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_timeout_passes_fast_responses() {
    let mock_server = tag_server().await;
    let client = DeskClient::builder(mock_server.uri())
        .middleware(Timeout::new(Duration::from_secs(5)))
        .build()
        .unwrap();

    assert_ok!(client.tags().get(1).await);
}

#[tokio::test]
async fn test_header_middleware_set_headers() {
    let mock_server = tag_server().await;
    let client = DeskClient::builder(mock_server.uri())
        .middleware(BearerAuth::new("from-middleware").unwrap())
        .middleware(UserAgent::new("deskgen-tests/1.0").unwrap())
        .middleware(RequestId)
        .middleware(Headers::from_pairs([("X-Tenant", "acme")]).unwrap())
        .build()
        .unwrap();

    client.tags().get(1).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let headers = &requests[0].headers;
    assert_eq!(headers.get("authorization").unwrap(), "Bearer from-middleware");
    assert_eq!(headers.get("user-agent").unwrap(), "deskgen-tests/1.0");
    assert_eq!(headers.get("x-tenant").unwrap(), "acme");
    let request_id = headers.get("x-request-id").unwrap().to_str().unwrap();
    assert!(request_id.starts_with("req_"));
    assert!(request_id["req_".len()..].chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn test_conditional_applies_only_when_predicate_holds() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tags/1.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tag": { "id": 1 } })))
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/tags/1.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tag": { "id": 1 } })))
        .mount(&mock_server)
        .await;

    let client = DeskClient::builder(mock_server.uri())
        .middleware(Conditional::new(
            |req| *req.method() != Method::GET,
            Headers::from_pairs([("X-Audit", "on")]).unwrap(),
        ))
        .build()
        .unwrap();

    let tags = client.tags();
    let tag = desk_client::Get::get(&tags, 1).await.unwrap();
    desk_client::Update::update(&tags, 1, &tag).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].headers.get("x-audit").is_none());
    assert_eq!(requests[1].headers.get("x-audit").unwrap(), "on");
}

#[tokio::test]
async fn test_rate_limit_spaces_calls() {
    let mock_server = tag_server().await;
    let client = DeskClient::builder(mock_server.uri())
        .middleware(RateLimit::per_second(10.0).unwrap())
        .build()
        .unwrap();

    let started = Instant::now();
    for _ in 0..3 {
        client.tags().get(1).await.unwrap();
    }

    // First call is immediate, the next two wait one interval each
    assert!(started.elapsed() >= Duration::from_millis(190));
}

#[test]
fn test_rate_limit_rejects_non_positive_rates() {
    assert_err!(RateLimit::per_second(0.0));
    assert_err!(RateLimit::per_second(-1.0));
    assert_err!(RateLimit::per_second(f64::NAN));

    let limiter = assert_ok!(RateLimit::per_second(4.0));
    assert_eq!(limiter.interval(), Duration::from_millis(250));
}

fn streaming_upload() -> Request {
    let url = reqwest::Url::parse("http://desk.invalid/api/files.json").unwrap();
    let mut request = Request::new(Method::POST, url);
    let chunks = tokio_util::io::ReaderStream::new(std::io::Cursor::new(b"chunked".to_vec()));
    *request.body_mut() = Some(reqwest::Body::wrap_stream(chunks));
    request
}

#[tokio::test]
async fn test_streaming_body_is_sent_once() {
    for max_retries in [0, 3] {
        let transport = Arc::new(FailingTransport::default());
        let chain: Vec<Arc<dyn Middleware>> =
            vec![Arc::new(Retry::new(max_retries, Duration::from_millis(1)))];
        let pipeline = Pipeline::new(Arc::clone(&transport) as Arc<dyn Transport>, chain);

        let err = pipeline
            .execute(streaming_upload(), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, DeskError::Aborted(_)), "got {err:?}");
        assert_eq!(transport.attempts.load(Ordering::SeqCst), 1);
    }
}
