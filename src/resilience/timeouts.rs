//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap external calls (transport connects) with a deadline
//! - Cancel the wrapped operation cleanly on timeout
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout errors are distinct from other errors

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// The wrapped operation did not finish in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("timed out after {0:?}")]
pub struct TimedOut(pub Duration);

/// Run `fut` to completion or give up after `limit`.
pub async fn with_timeout<F>(limit: Duration, fut: F) -> Result<F::Output, TimedOut>
where
    F: Future,
{
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| TimedOut(limit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_timeout_fires() {
        let result = with_timeout(Duration::from_secs(1), std::future::pending::<()>()).await;
        assert_eq!(result, Err(TimedOut(Duration::from_secs(1))));
    }

    #[tokio::test]
    async fn test_fast_future_passes_through() {
        let result = with_timeout(Duration::from_secs(1), async { 7 }).await;
        assert_eq!(result, Ok(7));
    }
}
