//! # Rate Gate Module
//!
//! Shared minimum-interval enforcement for rate-limited actions.
//!
//! The gate is a single timer: one last-fire timestamp covering *all*
//! rate-limited rules. Firing any rate-limited action delays the next
//! rate-limited action regardless of which key it maps to.
//!
//! Built on `tokio::time` so gate behavior is testable under a paused
//! clock.

use std::time::Duration;
use tokio::time::Instant;

/// Default rate for gated navigation actions (100 Hz, 10 ms period).
pub const DEFAULT_NAV_RATE_HZ: u32 = 100;

/// Shared minimum-interval timer for rate-limited actions.
///
/// Created once at mapper construction and mutated only on the mapper's
/// evaluation path, which is strictly sequential — no locking is needed.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use joykey_bridge::mapper::RateGate;
///
/// let gate = RateGate::from_rate_hz(100);
/// assert_eq!(gate.period(), Duration::from_millis(10));
/// ```
#[derive(Debug)]
pub struct RateGate {
    period: Duration,
    last_fire: Option<Instant>,
}

impl RateGate {
    /// Creates a gate with the given minimum inter-fire interval.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            last_fire: None,
        }
    }

    /// Creates a gate from a rate in Hz.
    ///
    /// A rate of 0 is clamped to 1 Hz; configuration validation rejects it
    /// before it gets here.
    #[must_use]
    pub fn from_rate_hz(rate_hz: u32) -> Self {
        Self::new(Duration::from_micros(1_000_000 / u64::from(rate_hz.max(1))))
    }

    /// Returns the minimum inter-fire interval.
    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Records a fire at the current instant.
    ///
    /// Called only after a successful press+release pair, so a failed
    /// injection does not consume the rate window.
    pub fn advance(&mut self) {
        self.last_fire = Some(Instant::now());
    }

    /// Waits until one period has elapsed since the last recorded fire.
    ///
    /// Returns immediately if the gate has never advanced or the period has
    /// already elapsed.
    pub async fn wait(&self) {
        if let Some(last_fire) = self.last_fire {
            tokio::time::sleep_until(last_fire + self.period).await;
        }
    }
}
