//! Desk API client.
//!
//! Holds configuration and the request pipeline. Resource operations are
//! reached through per-resource services such as [`DeskClient::tickets`].

use std::env;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::error::{DeskError, Result};
use crate::middleware::{LoggingTransport, Middleware, Pipeline, Transport};

const DEFAULT_API_URL: &str = "https://mycompany.teamwork.com/desk/api/v2";
const USER_AGENT: &str = concat!("desk-client/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const JSON: &str = "application/json";

/// Desk API client.
///
/// Configuration is fixed once built. Clones share the same pipeline and
/// connection pool and may be used from many tasks at once.
///
/// # Example
///
/// ```no_run
/// use desk_client::DeskClient;
///
/// # fn example() -> desk_client::Result<()> {
/// // Create from environment variables
/// let client = DeskClient::from_env()?;
///
/// // Or configure manually
/// let client = DeskClient::new("your-api-key", "https://acme.teamwork.com/desk/api/v2")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DeskClient {
    inner: Arc<ClientInner>,
    cancel: CancellationToken,
}

struct ClientInner {
    base_url: Url,
    auth: Option<HeaderValue>,
    pipeline: Pipeline,
    /// Used for direct uploads, which bypass the pipeline.
    http: reqwest::Client,
}

impl fmt::Debug for DeskClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeskClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("pipeline", &self.inner.pipeline)
            .finish_non_exhaustive()
    }
}

impl DeskClient {
    /// Create a client from environment variables.
    ///
    /// Uses `DESK_API_KEY` for authentication and optionally `DESK_BASE_URL`
    /// for the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if `DESK_API_KEY` is not set.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("DESK_API_KEY").map_err(|_| {
            DeskError::ConfigMissing("DESK_API_KEY environment variable not set".to_string())
        })?;

        let base_url = env::var("DESK_BASE_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::new(&api_key, &base_url)
    }

    /// Create a client with the given API key and base URL and no middleware.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(api_key: &str, base_url: &str) -> Result<Self> {
        Self::builder(base_url).api_key(api_key).build()
    }

    /// Start configuring a client for `base_url`,
    /// e.g. `https://acme.teamwork.com/desk/api/v2`.
    pub fn builder(base_url: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(base_url.into())
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// A handle whose calls stop with [`DeskError::Cancelled`] once `cancel`
    /// fires. Configuration and pipeline are shared with `self`.
    pub fn with_cancellation(&self, cancel: CancellationToken) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            cancel,
        }
    }

    /// The cancellation signal observed by this handle.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Absolute URL for a resource path, with the `.json` suffix and an
    /// optional query string.
    pub(crate) fn endpoint<Q>(&self, path: &str, query: Option<&Q>) -> Result<Url>
    where
        Q: Serialize + ?Sized,
    {
        let mut url = self.inner.base_url.join(&format!("{path}.json"))?;
        if let Some(query) = query {
            let encoded = serde_qs::to_string(&query)?;
            if !encoded.is_empty() {
                url.set_query(Some(&encoded));
            }
        }
        Ok(url)
    }

    /// Build a request carrying the default headers.
    pub(crate) fn request(&self, method: Method, url: Url, body: Option<Vec<u8>>) -> Request {
        let mut request = Request::new(method, url);
        let headers = request.headers_mut();
        if let Some(auth) = &self.inner.auth {
            headers.insert(AUTHORIZATION, auth.clone());
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
        headers.insert(ACCEPT, HeaderValue::from_static(JSON));
        if let Some(body) = body {
            *request.body_mut() = Some(body.into());
        }
        request
    }

    /// Send a request through the middleware chain.
    pub async fn execute(&self, request: Request) -> Result<Response> {
        self.inner.pipeline.execute(request, &self.cancel).await
    }

    /// Send, require `expected` status, and decode the JSON body.
    #[tracing::instrument(skip(self, request), fields(method = %request.method(), url = %request.url()))]
    pub(crate) async fn exchange<R: DeserializeOwned>(
        &self,
        request: Request,
        expected: u16,
    ) -> Result<R> {
        let method = request.method().clone();
        let url = request.url().clone();

        let response = self.execute(request).await.map_err(|e| {
            tracing::error!(error = %e, method = %method, url = %url, "request failed");
            e
        })?;

        let status = response.status().as_u16();
        let body = self.read_body(response).await?;

        if status != expected {
            let body = String::from_utf8_lossy(&body).into_owned();
            tracing::error!(
                status_code = status,
                method = %method,
                url = %url,
                response_body = %body,
                "unexpected status code"
            );
            return Err(DeskError::UnexpectedStatus { status, body });
        }

        serde_json::from_slice(&body).map_err(|source| {
            tracing::error!(error = %source, method = %method, url = %url, "failed to decode response");
            DeskError::Decode {
                source,
                body: String::from_utf8_lossy(&body).into_owned(),
            }
        })
    }

    /// Read a response body, honouring cancellation.
    pub(crate) async fn read_body(&self, response: Response) -> Result<Vec<u8>> {
        let bytes = self.cancellable(response.bytes()).await?;
        Ok(bytes.to_vec())
    }

    /// Race `fut` against this handle's cancellation signal.
    pub(crate) async fn cancellable<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, reqwest::Error>>,
    {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(DeskError::Cancelled),
            result = fut => result.map_err(DeskError::Http),
        }
    }

    /// HTTP client for requests that must not pass through the pipeline.
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }
}

/// Builder for [`DeskClient`].
///
/// Middleware run in the order they are added.
pub struct ClientBuilder {
    base_url: String,
    api_key: String,
    http: Option<reqwest::Client>,
    transport: Option<Arc<dyn Transport>>,
    timeout: Duration,
    middleware: Vec<Arc<dyn Middleware>>,
}

impl ClientBuilder {
    fn new(base_url: String) -> Self {
        Self {
            base_url,
            api_key: String::new(),
            http: None,
            transport: None,
            timeout: DEFAULT_TIMEOUT,
            middleware: Vec::new(),
        }
    }

    /// API key sent as a bearer token. Empty means no authorization header.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Use a preconfigured `reqwest::Client`.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Replace the terminal transport entirely.
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Overall HTTP timeout for the default transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Append a middleware to the chain.
    pub fn middleware<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    /// Validate the configuration and build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or API key is invalid, or the HTTP
    /// client cannot be created.
    pub fn build(self) -> Result<DeskClient> {
        let trimmed = self.base_url.trim();
        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(DeskError::InvalidConfig(format!(
                "base URL must start with http:// or https://, got '{trimmed}'"
            )));
        }

        // Ensure base URL ends with / so joins keep the API prefix
        let base_url = if trimmed.ends_with('/') {
            Url::parse(trimmed)?
        } else {
            Url::parse(&format!("{trimmed}/"))?
        };

        let auth = if self.api_key.is_empty() {
            None
        } else {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|_| DeskError::InvalidConfig("API key is not a valid header value".to_string()))?;
            value.set_sensitive(true);
            Some(value)
        };

        let http = match self.http {
            Some(http) => http,
            None => reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .brotli(true)
                .gzip(true)
                .deflate(true)
                .timeout(self.timeout)
                .build()
                .map_err(DeskError::Http)?,
        };

        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(LoggingTransport::new(http.clone())));

        Ok(DeskClient {
            inner: Arc::new(ClientInner {
                base_url,
                auth,
                pipeline: Pipeline::new(transport, self.middleware),
                http,
            }),
            cancel: CancellationToken::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let client = DeskClient::new("test-token", "https://acme.teamwork.com/desk/api/v2").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("DeskClient"));
        assert!(debug.contains("base_url"));
        // Token should not be in debug output
        assert!(!debug.contains("test-token"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = DeskClient::new("token", "https://acme.teamwork.com/desk/api/v2").unwrap();
        let client2 = DeskClient::new("token", "https://acme.teamwork.com/desk/api/v2/").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    #[test]
    fn test_rejects_base_url_without_scheme() {
        let result = DeskClient::new("token", "acme.teamwork.com/desk/api/v2");
        assert!(matches!(result, Err(DeskError::InvalidConfig(_))));
    }

    #[test]
    fn test_endpoint_keeps_api_prefix() {
        let client = DeskClient::new("token", "https://acme.teamwork.com/desk/api/v2").unwrap();
        let url = client.endpoint::<()>("tickets/42", None).unwrap();
        assert_eq!(url.as_str(), "https://acme.teamwork.com/desk/api/v2/tickets/42.json");
    }

    #[test]
    fn test_endpoint_encodes_query() {
        let client = DeskClient::new("token", "https://acme.teamwork.com/desk/api/v2").unwrap();

        let options = crate::ListOptions::for_page(2, 25);
        let url = client.endpoint("tickets", Some(&options)).unwrap();
        assert_eq!(url.path(), "/desk/api/v2/tickets.json");
        assert_eq!(url.query(), Some("page=2&per_page=25"));

        let extra = std::collections::BTreeMap::from([("inboxId", "3")]);
        let url = client.endpoint("tickets", Some(&extra)).unwrap();
        assert_eq!(url.query(), Some("inboxId=3"));

        let url = client
            .endpoint("tags", Some(&crate::ListOptions::default()))
            .unwrap();
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_request_default_headers() {
        let client = DeskClient::new("secret", "https://acme.teamwork.com/desk/api/v2").unwrap();
        let url = client.endpoint::<()>("tags", None).unwrap();
        let request = client.request(Method::GET, url, None);

        assert_eq!(request.headers()[AUTHORIZATION], "Bearer secret");
        assert_eq!(request.headers()[CONTENT_TYPE], JSON);
        assert_eq!(request.headers()[ACCEPT], JSON);
    }

    #[test]
    fn test_no_auth_header_without_key() {
        let client = DeskClient::builder("https://acme.teamwork.com/desk/api/v2")
            .build()
            .unwrap();
        let url = client.endpoint::<()>("tags", None).unwrap();
        let request = client.request(Method::GET, url, None);
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_with_cancellation_shares_config() {
        let client = DeskClient::new("token", "https://acme.teamwork.com/desk/api/v2").unwrap();
        let token = CancellationToken::new();
        let scoped = client.with_cancellation(token.clone());

        token.cancel();
        assert!(scoped.cancellation().is_cancelled());
        assert!(!client.cancellation().is_cancelled());
        assert_eq!(scoped.base_url(), client.base_url());
    }
}
