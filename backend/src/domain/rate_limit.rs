//! Advisory per-visitor cooldown between contact submissions.
//!
//! The record is a single epoch-millisecond timestamp kept in the visitor's
//! [`KeyValueStore`]. It is only a courtesy throttle: clearing the store
//! resets it, and a missing or unreadable record never blocks a visitor.

use std::sync::Arc;
use std::time::Duration;

use mockable::Clock;
use tracing::warn;

use crate::domain::ports::{KeyValueStore, KeyValueStoreError};

/// Store key holding the last successful submission time.
pub const RATE_LIMIT_KEY: &str = "contact_form_last_submit";

/// Minimum spacing between successful submissions.
pub const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(5 * 60);

const MILLIS_PER_MINUTE: u64 = 60_000;

/// The cooldown is still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Please wait {remaining_minutes} {unit} before submitting again", unit = minute_unit(.remaining_minutes))]
pub struct RateLimited {
    remaining_minutes: u64,
}

impl RateLimited {
    /// Whole minutes left, rounded up.
    pub fn remaining_minutes(&self) -> u64 {
        self.remaining_minutes
    }
}

fn minute_unit(minutes: &u64) -> &'static str {
    if *minutes == 1 { "minute" } else { "minutes" }
}

/// Checks and records the submission cooldown.
#[derive(Clone)]
pub struct SubmissionRateLimiter {
    clock: Arc<dyn Clock>,
    window: Duration,
}

impl SubmissionRateLimiter {
    /// Limiter with the standard five-minute window.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_window(clock, RATE_LIMIT_WINDOW)
    }

    /// Limiter with a custom window.
    pub fn with_window(clock: Arc<dyn Clock>, window: Duration) -> Self {
        Self { clock, window }
    }

    /// Configured window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Pass unless a recorded submission falls inside the window.
    ///
    /// A record dated in the future counts as just submitted.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimited`] with the rounded-up minutes remaining.
    pub fn check(&self, store: &dyn KeyValueStore) -> Result<(), RateLimited> {
        let Some(last_ms) = self.last_submission(store) else {
            return Ok(());
        };
        let now_ms = self.now_millis();
        let elapsed = u64::try_from(now_ms.saturating_sub(last_ms)).unwrap_or(0);
        let window = u64::try_from(self.window.as_millis()).unwrap_or(u64::MAX);
        if elapsed >= window {
            return Ok(());
        }
        let remaining_minutes = (window - elapsed).div_ceil(MILLIS_PER_MINUTE);
        Err(RateLimited { remaining_minutes })
    }

    /// Store the current instant as the last successful submission.
    ///
    /// # Errors
    ///
    /// Propagates [`KeyValueStoreError`] from the store.
    pub fn record(&self, store: &dyn KeyValueStore) -> Result<(), KeyValueStoreError> {
        store.set(RATE_LIMIT_KEY, &self.now_millis().to_string())
    }

    fn now_millis(&self) -> i64 {
        self.clock.utc().timestamp_millis()
    }

    fn last_submission(&self, store: &dyn KeyValueStore) -> Option<i64> {
        let raw = match store.get(RATE_LIMIT_KEY) {
            Ok(raw) => raw?,
            Err(error) => {
                warn!(%error, "rate limit record unreadable; allowing submission");
                return None;
            }
        };
        match raw.trim().parse::<i64>() {
            Ok(millis) => Some(millis),
            Err(error) => {
                warn!(%error, "rate limit record is not a timestamp; ignoring it");
                None
            }
        }
    }
}
