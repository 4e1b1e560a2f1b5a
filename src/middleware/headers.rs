//! Header-setting middleware.

use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::{Request, Response};

use super::{Middleware, Next};
use crate::error::{DeskError, Result};

/// Sets `Authorization: Bearer {token}` when a token is configured.
#[derive(Clone)]
pub struct BearerAuth {
    value: Option<HeaderValue>,
}

impl BearerAuth {
    /// # Errors
    ///
    /// Returns an error if the token contains characters not allowed in a
    /// header value.
    pub fn new(token: &str) -> Result<Self> {
        let value = if token.is_empty() {
            None
        } else {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                DeskError::InvalidConfig("API key is not a valid header value".to_string())
            })?;
            value.set_sensitive(true);
            Some(value)
        };
        Ok(Self { value })
    }
}

impl std::fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerAuth")
            .field("configured", &self.value.is_some())
            .finish()
    }
}

#[async_trait]
impl Middleware for BearerAuth {
    async fn handle(&self, mut request: Request, next: Next<'_>) -> Result<Response> {
        if let Some(value) = &self.value {
            request.headers_mut().insert(AUTHORIZATION, value.clone());
        }
        next.run(request).await
    }
}

/// Sets a fixed group of headers on every request, replacing existing values.
#[derive(Debug, Clone, Default)]
pub struct Headers {
    headers: HeaderMap,
}

impl Headers {
    pub fn new(headers: HeaderMap) -> Self {
        Self { headers }
    }

    /// Build from string pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if a name or value is not a valid header.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut headers = HeaderMap::new();
        for (name, value) in pairs {
            let name = HeaderName::from_bytes(name.as_ref().as_bytes()).map_err(|_| {
                DeskError::InvalidConfig(format!("invalid header name '{}'", name.as_ref()))
            })?;
            let value = HeaderValue::from_str(value.as_ref()).map_err(|_| {
                DeskError::InvalidConfig(format!("invalid value for header '{name}'"))
            })?;
            headers.insert(name, value);
        }
        Ok(Self { headers })
    }
}

#[async_trait]
impl Middleware for Headers {
    async fn handle(&self, mut request: Request, next: Next<'_>) -> Result<Response> {
        for (name, value) in &self.headers {
            request.headers_mut().insert(name.clone(), value.clone());
        }
        next.run(request).await
    }
}

/// Sets the `User-Agent` header.
#[derive(Debug, Clone)]
pub struct UserAgent {
    value: HeaderValue,
}

impl UserAgent {
    /// # Errors
    ///
    /// Returns an error if `agent` is not a valid header value.
    pub fn new(agent: &str) -> Result<Self> {
        let value = HeaderValue::from_str(agent)
            .map_err(|_| DeskError::InvalidConfig(format!("invalid user agent '{agent}'")))?;
        Ok(Self { value })
    }
}

#[async_trait]
impl Middleware for UserAgent {
    async fn handle(&self, mut request: Request, next: Next<'_>) -> Result<Response> {
        request.headers_mut().insert(USER_AGENT, self.value.clone());
        next.run(request).await
    }
}

/// Tags each request with an `X-Request-ID` of the form `req_{unix-nanos}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestId;

const REQUEST_ID: &str = "x-request-id";

#[async_trait]
impl Middleware for RequestId {
    async fn handle(&self, mut request: Request, next: Next<'_>) -> Result<Response> {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let value = HeaderValue::from_str(&format!("req_{nanos}"))
            .map_err(|e| DeskError::RequestBuild(e.to_string()))?;
        request
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID), value);
        next.run(request).await
    }
}
