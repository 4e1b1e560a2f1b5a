//! Fixed-delay retry middleware.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Request, Response};

use super::{Middleware, Next};
use crate::error::{DeskError, Result};

/// Re-runs the rest of the chain when it fails.
///
/// The wrapped call is attempted at most `max_retries + 1` times, one after
/// another, with `delay` between attempts. A copy of the request is kept
/// while another attempt remains; a streaming body that cannot be copied
/// is sent once and not retried. Only errors are retried; any response,
/// whatever its status, ends the loop. When every attempt fails the last error is
/// returned. Cancellation during the wait returns [`DeskError::Cancelled`].
#[derive(Debug, Clone, Copy)]
pub struct Retry {
    max_retries: u32,
    delay: Duration,
}

impl Retry {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }
}

#[async_trait]
impl Middleware for Retry {
    async fn handle(&self, mut request: Request, next: Next<'_>) -> Result<Response> {
        let mut attempt = 0;

        loop {
            let spare = if attempt < self.max_retries {
                request.try_clone()
            } else {
                None
            };
            let url = request.url().clone();

            match (next.run(request).await, spare) {
                (Ok(response), _) => return Ok(response),
                (Err(error), None) => return Err(error),
                (Err(error), Some(copy)) => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        max_retries = self.max_retries,
                        url = %url,
                        error = %error,
                        "request failed, retrying"
                    );
                    request = copy;
                }
            }

            attempt += 1;

            tokio::select! {
                biased;
                _ = next.cancellation().cancelled() => return Err(DeskError::Cancelled),
                _ = tokio::time::sleep(self.delay) => {}
            }
        }
    }
}
