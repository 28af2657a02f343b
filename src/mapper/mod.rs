//! # Mapper Module
//!
//! The core of JoyKey Bridge: turns one controller snapshot into at most
//! one synthesized key tap.
//!
//! ## Dispatch Policy
//!
//! Each incoming [`ButtonSnapshot`] is scanned against the priority-ordered
//! rule table ([`RULES`]):
//!
//! - **First-match-wins**: the scan commits to the first rule whose button
//!   is pressed and skips the rest of the table. Simultaneous presses are
//!   never combined; priority is purely positional.
//! - **Immediate** rules tap press+release with no enforced delay.
//! - **Rate-limited** rules tap press+release, then hold the evaluation
//!   path until the shared [`RateGate`] period has elapsed. Because
//!   snapshots are evaluated strictly sequentially, consecutive
//!   rate-limited taps end up separated by at least one gate period.
//! - A snapshot pressing no mapped button is a no-op.
//!
//! Sink failures fail that single evaluation and leave the gate untouched;
//! snapshots shorter than a rule's button index simply cannot match it.
//!
//! ## Usage
//!
//! ```no_run
//! use joykey_bridge::keyboard::VirtualKeyboard;
//! use joykey_bridge::mapper::{ButtonSnapshot, Mapper};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let keyboard = VirtualKeyboard::create("joykey-bridge virtual keyboard")?;
//!     let mut mapper = Mapper::new(keyboard);
//!
//!     let snapshot = ButtonSnapshot::with_pressed(17, &[5]);
//!     if let Some(key) = mapper.evaluate(&snapshot).await? {
//!         println!("Tapped {}", key);
//!     }
//!     Ok(())
//! }
//! ```

pub mod gate;
pub mod rules;
pub mod snapshot;

pub use gate::{RateGate, DEFAULT_NAV_RATE_HZ};
pub use rules::{ActionRule, OutputKey, TimingClass, RULES};
pub use snapshot::ButtonSnapshot;

use std::time::Duration;
use tracing::debug;

use crate::error::Result;
use crate::keyboard::KeySink;

/// Evaluates controller snapshots against the rule table and drives the
/// key sink.
///
/// The sink and the rate gate are explicit dependencies handed in at
/// construction, so tests can substitute a recording sink and there is no
/// hidden global state.
///
/// # Thread Safety
///
/// `Mapper` is not thread-safe; snapshots must be evaluated one at a time
/// from a single task. The gate timestamp is mutated only inside
/// [`Mapper::evaluate`] under that guarantee.
#[derive(Debug)]
pub struct Mapper<S: KeySink> {
    rules: &'static [ActionRule],
    sink: S,
    gate: RateGate,
}

impl<S: KeySink> Mapper<S> {
    /// Creates a mapper over the stock rule table with the default
    /// 100 Hz navigation gate.
    #[must_use]
    pub fn new(sink: S) -> Self {
        Self::with_period(sink, RateGate::from_rate_hz(DEFAULT_NAV_RATE_HZ).period())
    }

    /// Creates a mapper over the stock rule table with a custom gate
    /// period.
    #[must_use]
    pub fn with_period(sink: S, period: Duration) -> Self {
        Self::with_rules(sink, &RULES, period)
    }

    /// Creates a mapper over a custom rule table.
    ///
    /// The table is scanned in declaration order; see [`RULES`] for the
    /// stock table.
    #[must_use]
    pub fn with_rules(sink: S, rules: &'static [ActionRule], period: Duration) -> Self {
        Self {
            rules,
            sink,
            gate: RateGate::new(period),
        }
    }

    /// Returns the gate period applied to rate-limited actions.
    #[must_use]
    pub fn gate_period(&self) -> Duration {
        self.gate.period()
    }

    /// Evaluates one snapshot and fires at most one action.
    ///
    /// Scans the rule table in priority order and acts on the first rule
    /// whose button is pressed: taps press+release on the sink, and for
    /// rate-limited rules advances the gate and waits out its period
    /// before returning.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(key))` - a rule matched and its tap was delivered
    /// * `Ok(None)` - no rule's button is pressed; no side effects
    ///
    /// # Errors
    ///
    /// Returns the sink's I/O error if press or release fails. The failure
    /// covers this evaluation only: nothing is retried, and the gate does
    /// not advance, so the rate window is not consumed by a failed tap.
    pub async fn evaluate(&mut self, snapshot: &ButtonSnapshot) -> Result<Option<OutputKey>> {
        for rule in self.rules {
            if !snapshot.pressed(rule.button) {
                continue;
            }

            self.sink.press(rule.key)?;
            self.sink.release(rule.key)?;
            debug!("Tapped {} for button {}", rule.key, rule.button);

            if rule.timing == TimingClass::RateLimited {
                self.gate.advance();
                self.gate.wait().await;
            }

            return Ok(Some(rule.key));
        }

        Ok(None)
    }
}
