//! Request pipeline and interceptors.
//!
//! Every API call is handed to a [`Pipeline`]: an ordered list of
//! [`Middleware`] wrapped around a terminal [`Transport`]. For middleware
//! `M1, M2, M3` added in that order the call runs
//! `M1 → M2 → M3 → transport → M3 → M2 → M1`. Each middleware receives a
//! [`Next`] handle and decides whether and when to call it.
//!
//! ```no_run
//! use std::time::Duration;
//! use desk_client::middleware::{Logging, Retry, Timeout};
//! use desk_client::DeskClient;
//!
//! # fn example() -> desk_client::Result<()> {
//! let client = DeskClient::builder("https://acme.teamwork.com/desk/api/v2")
//!     .api_key("secret")
//!     .middleware(Logging)
//!     .middleware(Retry::new(3, Duration::from_millis(250)))
//!     .middleware(Timeout::new(Duration::from_secs(10)))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

mod conditional;
mod headers;
mod logging;
mod rate_limit;
mod retry;
mod timeout;
mod transport;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Request, Response};
use tokio_util::sync::CancellationToken;

use crate::error::{DeskError, Result};

pub use conditional::Conditional;
pub use headers::{BearerAuth, Headers, RequestId, UserAgent};
pub use logging::Logging;
pub use rate_limit::RateLimit;
pub use retry::Retry;
pub use timeout::Timeout;
pub use transport::LoggingTransport;

/// The terminal step of a pipeline: puts a request on the wire.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response>;
}

#[async_trait]
impl Transport for reqwest::Client {
    async fn send(&self, request: Request) -> Result<Response> {
        self.execute(request).await.map_err(DeskError::Http)
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: Request) -> Result<Response> {
        (**self).send(request).await
    }
}

/// An interceptor wrapped around the transport.
///
/// Implementations may change the request before calling
/// [`Next::run`], inspect the result afterwards, call it several times,
/// or return without calling it at all. Errors must be propagated, never
/// turned into a success.
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn handle(&self, request: Request, next: Next<'_>) -> Result<Response>;
}

#[async_trait]
impl<M: Middleware + ?Sized> Middleware for Arc<M> {
    async fn handle(&self, request: Request, next: Next<'_>) -> Result<Response> {
        (**self).handle(request, next).await
    }
}

/// The remainder of the chain as seen by one middleware.
///
/// `Next` is `Copy`, so a middleware can run the rest of the chain more
/// than once.
#[derive(Clone, Copy)]
pub struct Next<'a> {
    transport: &'a dyn Transport,
    chain: &'a [Arc<dyn Middleware>],
    cancel: &'a CancellationToken,
}

impl<'a> Next<'a> {
    pub fn new(
        transport: &'a dyn Transport,
        chain: &'a [Arc<dyn Middleware>],
        cancel: &'a CancellationToken,
    ) -> Self {
        Self {
            transport,
            chain,
            cancel,
        }
    }

    /// The caller's cancellation signal for this call.
    pub fn cancellation(&self) -> &'a CancellationToken {
        self.cancel
    }

    /// The same chain observing a different cancellation signal.
    pub fn with_cancellation<'b>(self, cancel: &'b CancellationToken) -> Next<'b>
    where
        'a: 'b,
    {
        Next {
            transport: self.transport,
            chain: self.chain,
            cancel,
        }
    }

    /// Run the next middleware, or the transport when none remain.
    pub async fn run(self, request: Request) -> Result<Response> {
        match self.chain.split_first() {
            Some((current, rest)) => {
                let next = Next {
                    chain: rest,
                    ..self
                };
                current.handle(request, next).await
            }
            None => {
                if self.cancel.is_cancelled() {
                    return Err(DeskError::Cancelled);
                }
                tokio::select! {
                    biased;
                    _ = self.cancel.cancelled() => Err(DeskError::Cancelled),
                    result = self.transport.send(request) => result,
                }
            }
        }
    }
}

/// A transport plus the middleware composed around it.
///
/// The middleware list is fixed at construction and shared read-only
/// between concurrent calls.
#[derive(Clone)]
pub struct Pipeline {
    transport: Arc<dyn Transport>,
    chain: Arc<[Arc<dyn Middleware>]>,
}

impl Pipeline {
    pub fn new(transport: Arc<dyn Transport>, chain: Vec<Arc<dyn Middleware>>) -> Self {
        Self {
            transport,
            chain: chain.into(),
        }
    }

    /// Number of middleware in the chain.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Send `request` through every middleware and then the transport.
    pub async fn execute(&self, request: Request, cancel: &CancellationToken) -> Result<Response> {
        Next::new(self.transport.as_ref(), &self.chain, cancel)
            .run(request)
            .await
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("middleware", &self.chain.len())
            .finish_non_exhaustive()
    }
}
