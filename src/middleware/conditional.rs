//! Predicate-gated middleware.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Request, Response};

use super::{Middleware, Next};
use crate::error::Result;

type Predicate = dyn Fn(&Request) -> bool + Send + Sync;

/// Runs `inner` only for requests that satisfy a predicate.
///
/// Other requests pass straight to the rest of the chain.
///
/// ```
/// use desk_client::middleware::{Conditional, Headers};
/// use reqwest::Method;
///
/// # fn example() -> desk_client::Result<()> {
/// let writes_only = Conditional::new(
///     |req| *req.method() != Method::GET,
///     Headers::from_pairs([("X-Audit", "fixture-generator")])?,
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Conditional {
    predicate: Arc<Predicate>,
    inner: Arc<dyn Middleware>,
}

impl Conditional {
    pub fn new<P, M>(predicate: P, inner: M) -> Self
    where
        P: Fn(&Request) -> bool + Send + Sync + 'static,
        M: Middleware + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
            inner: Arc::new(inner),
        }
    }
}

impl std::fmt::Debug for Conditional {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Conditional").finish_non_exhaustive()
    }
}

#[async_trait]
impl Middleware for Conditional {
    async fn handle(&self, request: Request, next: Next<'_>) -> Result<Response> {
        if (self.predicate)(&request) {
            self.inner.handle(request, next).await
        } else {
            next.run(request).await
        }
    }
}
