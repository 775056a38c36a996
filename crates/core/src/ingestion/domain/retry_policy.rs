use std::time::Duration;

use crate::shared::constants::{DEFAULT_BACKOFF_BASE_MS, DEFAULT_BACKOFF_MAX_MS, DEFAULT_NUM_RETRIES};

/// Delay to wait before a given retry.
pub trait BackoffStrategy: Send + Sync {
    /// `retry` is 1-based: the delay before the first retry is `delay(1)`.
    fn delay(&self, retry: u32) -> Duration;
}

/// Doubles the delay on each retry, capped at `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExponentialBackoff {
    base: Duration,
    max: Duration,
}

impl ExponentialBackoff {
    pub fn new(base: Duration, max: Duration) -> Self {
        Self { base, max }
    }
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(DEFAULT_BACKOFF_BASE_MS),
            Duration::from_millis(DEFAULT_BACKOFF_MAX_MS),
        )
    }
}

impl BackoffStrategy for ExponentialBackoff {
    fn delay(&self, retry: u32) -> Duration {
        let factor = 1u32.checked_shl(retry.saturating_sub(1)).unwrap_or(u32::MAX);
        self.base.saturating_mul(factor).min(self.max)
    }
}

/// Same delay before every retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantBackoff(pub Duration);

impl BackoffStrategy for ConstantBackoff {
    fn delay(&self, _retry: u32) -> Duration {
        self.0
    }
}

/// Blocks the calling thread between attempts.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration);
}

pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// How many times a failed transport exchange is repeated, and how long to
/// wait in between.
pub struct RetryPolicy {
    num_retries: u32,
    backoff: Box<dyn BackoffStrategy>,
    sleeper: Box<dyn Sleeper>,
}

impl RetryPolicy {
    pub fn new(num_retries: u32, backoff: Box<dyn BackoffStrategy>) -> Self {
        Self {
            num_retries,
            backoff,
            sleeper: Box::new(ThreadSleeper),
        }
    }

    /// Single attempt, no retries.
    pub fn no_retries() -> Self {
        Self::new(0, Box::new(ConstantBackoff(Duration::ZERO)))
    }

    pub fn with_sleeper(mut self, sleeper: Box<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn num_retries(&self) -> u32 {
        self.num_retries
    }

    pub fn max_attempts(&self) -> u32 {
        self.num_retries.saturating_add(1)
    }

    /// Waits out the backoff before retry number `retry` (1-based).
    pub fn pause_before_retry(&self, retry: u32) {
        let delay = self.backoff.delay(retry);
        log::debug!("Backing off {} ms before retry {retry}", delay.as_millis());
        self.sleeper.sleep(delay);
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_NUM_RETRIES, Box::new(ExponentialBackoff::default()))
    }
}
