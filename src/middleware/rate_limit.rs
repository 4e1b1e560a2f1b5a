//! Admission throttling middleware.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Request, Response};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::{Middleware, Next};
use crate::error::{DeskError, Result};

/// Admits at most a fixed number of calls per second.
///
/// Admission slots are spaced `1 / rate` apart. A caller takes the next
/// free slot and sleeps until it arrives; no background task is involved.
/// The limiter is shared by every call that goes through the same client.
#[derive(Debug)]
pub struct RateLimit {
    interval: Duration,
    next_slot: Mutex<Instant>,
}

impl RateLimit {
    /// Allow `rate` calls per second.
    ///
    /// # Errors
    ///
    /// Returns an error if `rate` is not a positive, finite number.
    pub fn per_second(rate: f64) -> Result<Self> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(DeskError::InvalidConfig(format!(
                "rate limit must be a positive number of requests per second, got {rate}"
            )));
        }

        Ok(Self {
            interval: Duration::from_secs_f64(1.0 / rate),
            next_slot: Mutex::new(Instant::now()),
        })
    }

    /// Spacing between admitted calls.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait for an admission slot, or fail if `cancel` fires first.
    pub async fn acquire(&self, cancel: &CancellationToken) -> Result<()> {
        let now = Instant::now();
        let slot = {
            let mut next = self.next_slot.lock().unwrap_or_else(PoisonError::into_inner);
            let slot = (*next).max(now);
            *next = slot + self.interval;
            slot
        };

        if slot <= now {
            return Ok(());
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(DeskError::Cancelled),
            _ = tokio::time::sleep_until(slot) => Ok(()),
        }
    }
}

#[async_trait]
impl Middleware for RateLimit {
    async fn handle(&self, request: Request, next: Next<'_>) -> Result<Response> {
        self.acquire(next.cancellation()).await?;
        next.run(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_rate() {
        assert!(RateLimit::per_second(0.0).is_err());
        assert!(RateLimit::per_second(-3.0).is_err());
        assert!(RateLimit::per_second(f64::NAN).is_err());
    }

    #[test]
    fn test_interval_from_rate() {
        let limiter = RateLimit::per_second(4.0).unwrap();
        assert_eq!(limiter.interval(), Duration::from_millis(250));
    }

    #[tokio::test]
    async fn test_spaces_admissions() {
        let limiter = RateLimit::per_second(20.0).unwrap();
        let cancel = CancellationToken::new();
        let start = std::time::Instant::now();

        for _ in 0..3 {
            limiter.acquire(&cancel).await.unwrap();
        }

        // First admission is immediate, the next two wait 50ms each.
        assert!(start.elapsed() >= Duration::from_millis(95));
    }

    #[tokio::test]
    async fn test_cancel_while_waiting() {
        let limiter = RateLimit::per_second(0.5).unwrap();
        let cancel = CancellationToken::new();
        limiter.acquire(&cancel).await.unwrap();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let start = std::time::Instant::now();
        let result = limiter.acquire(&cancel).await;
        assert!(matches!(result, Err(DeskError::Cancelled)));
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
