//! Request/response logging middleware.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::{Request, Response};

use super::{Middleware, Next};
use crate::error::Result;

/// Logs each call before it is sent and after it completes.
///
/// Records method, URL, status, duration and error. Logging never
/// affects the outcome of the call.
#[derive(Debug, Clone, Copy, Default)]
pub struct Logging;

#[async_trait]
impl Middleware for Logging {
    async fn handle(&self, request: Request, next: Next<'_>) -> Result<Response> {
        let method = request.method().clone();
        let url = request.url().clone();
        let start = Instant::now();

        tracing::info!(method = %method, url = %url, "Making HTTP request");

        let result = next.run(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(response) => tracing::info!(
                method = %method,
                url = %url,
                status = response.status().as_u16(),
                duration = ?duration,
                "HTTP request completed"
            ),
            Err(error) => tracing::error!(
                method = %method,
                url = %url,
                duration = ?duration,
                error = %error,
                "HTTP request failed"
            ),
        }

        result
    }
}
