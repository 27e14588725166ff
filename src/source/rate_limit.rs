//! Rate-Limit Governor
//!
//! Tracks the remote API call budget and wraps every data-source call in
//! a check-then-call-then-retry discipline.
//!
//! ## States
//!
//! - **Available**: budget remains (or the reset time has passed),
//!   requests flow through
//! - **Exhausted**: `remaining == 0` and the reset time is still ahead,
//!   requests fail immediately with `RateLimited` (no silent wait)
//!
//! A rate-limited call is retried with exponential backoff (the n-th
//! retry waits `backoff_base * 2^n`) up to a fixed ceiling, after which
//! the error surfaces to the caller. Header snapshots observed on any
//! response are the only mutation path for the shared state; updates are
//! serialized through a single RwLock writer.

use std::sync::RwLock;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use backon::{ExponentialBuilder, Retryable};
use tracing::{debug, warn};

use crate::constants::governor as governor_constants;
use crate::types::{RepoGraphError, Result};

/// Budget values parsed from one response's rate-limit headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitSnapshot {
    pub remaining: u32,
    pub reset_epoch: i64,
    pub limit: u32,
}

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct GovernorConfig {
    /// Retry ceiling for rate-limited calls.
    pub max_retries: u32,
    /// Base of the exponential backoff schedule. The first retry waits
    /// `2 * backoff_base`, the second `4 * backoff_base`, and so on.
    pub backoff_base: Duration,
}

impl Default for GovernorConfig {
    fn default() -> Self {
        Self {
            max_retries: governor_constants::MAX_RETRIES,
            backoff_base: Duration::from_secs(governor_constants::BACKOFF_BASE_SECS),
        }
    }
}

/// Unified internal state - budget and retry bookkeeping in one struct
/// so observations stay consistent.
#[derive(Debug)]
struct GovernorInner {
    remaining: u32,
    reset_epoch: i64,
    limit: u32,
    retry_count: u64,
    backoff_delays: Vec<Duration>,
}

impl GovernorInner {
    fn new() -> Self {
        Self {
            remaining: governor_constants::DEFAULT_LIMIT,
            reset_epoch: 0,
            limit: governor_constants::DEFAULT_LIMIT,
            retry_count: 0,
            backoff_delays: Vec::new(),
        }
    }
}

/// Thread-safe call-budget governor. Explicitly constructed and passed to
/// the data source (one per process in production, a fresh instance per
/// test run).
pub struct RateLimitGovernor {
    config: GovernorConfig,
    inner: RwLock<GovernorInner>,
}

impl RateLimitGovernor {
    pub fn new(config: GovernorConfig) -> Self {
        Self {
            config,
            inner: RwLock::new(GovernorInner::new()),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(GovernorConfig::default())
    }

    /// Fail fast when the budget is exhausted and the reset time is
    /// still ahead.
    pub fn check(&self) -> Result<()> {
        let inner = self
            .inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if inner.remaining == 0 && epoch_now() < inner.reset_epoch {
            return Err(RepoGraphError::RateLimited {
                reset_epoch: inner.reset_epoch,
            });
        }
        Ok(())
    }

    /// Record the budget reported by one response. This is the only
    /// mutation path for the shared state.
    pub fn record(&self, snapshot: RateLimitSnapshot) {
        let mut inner = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        inner.remaining = snapshot.remaining;
        inner.reset_epoch = snapshot.reset_epoch;
        inner.limit = snapshot.limit;

        debug!(
            "rate limit budget: {}/{} remaining (resets at epoch {})",
            snapshot.remaining, snapshot.limit, snapshot.reset_epoch
        );
    }

    /// Current budget view.
    pub fn state(&self) -> RateLimitSnapshot {
        let inner = self
            .inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        RateLimitSnapshot {
            remaining: inner.remaining,
            reset_epoch: inner.reset_epoch,
            limit: inner.limit,
        }
    }

    /// Retry bookkeeping for monitoring and tests.
    pub fn stats(&self) -> GovernorStats {
        let inner = self
            .inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        GovernorStats {
            retry_count: inner.retry_count,
            backoff_delays: inner.backoff_delays.clone(),
        }
    }

    /// Run `operation` under the governor: check the budget, invoke, and
    /// retry rate-limited failures on the exponential schedule. Any other
    /// error surfaces unchanged on the first occurrence.
    pub async fn execute<T, F, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let guarded = || async {
            self.check()?;
            operation().await
        };

        let backoff = ExponentialBuilder::default()
            .with_factor(2.0)
            .with_min_delay(self.config.backoff_base * 2)
            .with_max_times(self.config.max_retries as usize);

        guarded
            .retry(backoff)
            .when(RepoGraphError::is_rate_limited)
            .notify(|err: &RepoGraphError, delay: Duration| {
                self.note_backoff(delay);
                warn!("rate limited, backing off {:?}: {}", delay, err);
            })
            .await
    }

    fn note_backoff(&self, delay: Duration) {
        let mut inner = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        inner.retry_count += 1;
        inner.backoff_delays.push(delay);
    }
}

/// Monitoring view of the governor's retry history.
#[derive(Debug, Clone)]
pub struct GovernorStats {
    pub retry_count: u64,
    pub backoff_delays: Vec<Duration>,
}

fn epoch_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
