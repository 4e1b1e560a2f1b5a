//! Default transport with debug-level wire logging.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, AUTHORIZATION};
use reqwest::{Request, Response};
use tracing::Level;

use super::Transport;
use crate::error::{DeskError, Result};

/// Wraps a `reqwest::Client` and logs every exchange at `debug` level.
///
/// Request method, URL, headers and body are logged before sending;
/// status, headers and elapsed time after. The authorization header is
/// redacted.
#[derive(Debug, Clone)]
pub struct LoggingTransport {
    http: reqwest::Client,
}

impl LoggingTransport {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

fn body_text(request: &Request) -> String {
    request
        .body()
        .and_then(|b| b.as_bytes())
        .map(|b| String::from_utf8_lossy(b).into_owned())
        .unwrap_or_default()
}

fn redacted(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let shown = if name == AUTHORIZATION {
                "[redacted]".to_string()
            } else {
                String::from_utf8_lossy(value.as_bytes()).into_owned()
            };
            (name.to_string(), shown)
        })
        .collect()
}

#[async_trait]
impl Transport for LoggingTransport {
    async fn send(&self, request: Request) -> Result<Response> {
        let verbose = tracing::enabled!(Level::DEBUG);
        if verbose {
            tracing::debug!(
                method = %request.method(),
                url = %request.url(),
                headers = ?redacted(request.headers()),
                request_body = %body_text(&request),
                "HTTP Request"
            );
        }

        let start = Instant::now();
        let result = self.http.execute(request).await.map_err(DeskError::Http);
        let duration = start.elapsed();

        match &result {
            _ if !verbose => {}
            Ok(response) => tracing::debug!(
                status_code = response.status().as_u16(),
                duration = ?duration,
                headers = ?redacted(response.headers()),
                "HTTP Response"
            ),
            Err(error) => tracing::debug!(duration = ?duration, error = %error, "HTTP transport error"),
        }

        result
    }
}
