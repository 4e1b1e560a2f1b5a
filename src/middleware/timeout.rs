//! Per-call deadline middleware.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Request, Response};

use super::{Middleware, Next};
use crate::error::{DeskError, Result};

/// Bounds the rest of the chain with a deadline.
///
/// The request's own transport timeout is shortened to the deadline, and
/// inner middleware observe a cancellation signal that fires when it
/// passes. On expiry the call fails with [`DeskError::Timeout`].
#[derive(Debug, Clone, Copy)]
pub struct Timeout {
    duration: Duration,
}

impl Timeout {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

#[async_trait]
impl Middleware for Timeout {
    async fn handle(&self, mut request: Request, next: Next<'_>) -> Result<Response> {
        let deadline = match request.timeout() {
            Some(existing) => (*existing).min(self.duration),
            None => self.duration,
        };
        *request.timeout_mut() = Some(deadline);

        let scoped = next.cancellation().child_token();
        let _guard = scoped.clone().drop_guard();

        match tokio::time::timeout(self.duration, next.with_cancellation(&scoped).run(request)).await
        {
            Ok(result) => result,
            Err(_) => Err(DeskError::Timeout(self.duration)),
        }
    }
}
