//! Reconnection policies for the live channel.
//!
//! Policies are stateless: the caller counts attempts since the last
//! successful open and asks for the delay of the next one. Swapping the
//! policy never touches the connection manager.

use std::fmt::Debug;
use std::time::Duration;

use super::shared::{
    BACKOFF_MULTIPLIER, DEFAULT_RECONNECT_DELAY_MS, INITIAL_RETRY_DELAY_MS, MAX_RETRY_ATTEMPTS,
    MAX_RETRY_DELAY_MS,
};

pub trait ReconnectPolicy: Send + Sync + Debug {
    /// Delay before reconnect attempt `attempt` (1-based), or `None` to give up.
    fn delay_for(&self, attempt: u32) -> Option<Duration>;
}

/// Same delay before every attempt; never gives up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_RECONNECT_DELAY_MS))
    }
}

impl ReconnectPolicy for FixedDelay {
    fn delay_for(&self, _attempt: u32) -> Option<Duration> {
        Some(self.delay)
    }
}

/// Exponential backoff with a delay ceiling and a bounded number of attempts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialBackoff {
    initial_ms: u64,
    max_ms: u64,
    multiplier: f64,
    max_attempts: u32,
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self {
            initial_ms: INITIAL_RETRY_DELAY_MS,
            max_ms: MAX_RETRY_DELAY_MS,
            multiplier: BACKOFF_MULTIPLIER,
            max_attempts: MAX_RETRY_ATTEMPTS,
        }
    }
}

impl ExponentialBackoff {
    pub fn new(initial: Duration, max: Duration, max_attempts: u32) -> Self {
        Self {
            initial_ms: initial.as_millis() as u64,
            max_ms: max.as_millis() as u64,
            max_attempts,
            ..Self::default()
        }
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier.max(1.0);
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

impl ReconnectPolicy for ExponentialBackoff {
    fn delay_for(&self, attempt: u32) -> Option<Duration> {
        if attempt > self.max_attempts {
            return None;
        }
        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let delay = ((self.initial_ms as f64) * self.multiplier.powi(exponent))
            .min(self.max_ms as f64) as u64;
        Some(Duration::from_millis(delay))
    }
}
