//! # Action Rule Module
//!
//! The static mapping from controller buttons to output keys.
//!
//! ## Button Assignments
//!
//! | Priority | Button | Output Key | Timing |
//! |----------|--------|------------|--------|
//! | 1 | D-Pad Right (5) | `d` | immediate |
//! | 2 | D-Pad Left (7) | `a` | immediate |
//! | 3 | D-Pad Up (4) | `w` | immediate |
//! | 4 | D-Pad Down (6) | `s` | immediate |
//! | 5 | Triangle (12) | Arrow Up | rate-limited |
//! | 6 | Cross (14) | Arrow Down | rate-limited |
//! | 7 | Circle (13) | Arrow Right | rate-limited |
//! | 8 | Square (15) | Arrow Left | rate-limited |
//!
//! Declaration order in [`RULES`] *is* priority order: evaluation commits
//! to the first rule whose button is pressed and ignores the rest of the
//! table, so simultaneous presses are never combined.
//!
//! The D-Pad drives WASD panning with no pacing; the face buttons drive
//! arrow-key stepping through the shared rate gate so a held button cannot
//! flood the target application with navigation events.

use crate::controller::buttons;

/// Symbolic key identifier handed to the key sink.
///
/// The mapper treats this as opaque data; only the sink interprets it.
///
/// # Examples
///
/// ```
/// use joykey_bridge::mapper::OutputKey;
///
/// let key = OutputKey::Char('d');
/// assert_eq!(key.to_string(), "d");
/// assert_eq!(OutputKey::ArrowUp.to_string(), "Up");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKey {
    /// A printable character key (letters and digits).
    Char(char),
    /// Arrow Up navigation key.
    ArrowUp,
    /// Arrow Down navigation key.
    ArrowDown,
    /// Arrow Left navigation key.
    ArrowLeft,
    /// Arrow Right navigation key.
    ArrowRight,
}

impl std::fmt::Display for OutputKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputKey::Char(c) => write!(f, "{}", c),
            OutputKey::ArrowUp => write!(f, "Up"),
            OutputKey::ArrowDown => write!(f, "Down"),
            OutputKey::ArrowLeft => write!(f, "Left"),
            OutputKey::ArrowRight => write!(f, "Right"),
        }
    }
}

/// Timing behavior of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingClass {
    /// Fire with no enforced minimum interval between firings.
    Immediate,
    /// Fire, then hold the evaluation path until the shared rate gate
    /// period has elapsed.
    RateLimited,
}

/// Static mapping from one button index to one output key and a timing
/// behavior.
///
/// Rules are fixed data: created once, never mutated, shared read-only by
/// the mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionRule {
    /// Snapshot index of the button this rule matches.
    pub button: usize,
    /// Key tapped on the sink when the rule fires.
    pub key: OutputKey,
    /// Timing behavior applied to the fire.
    pub timing: TimingClass,
}

impl ActionRule {
    /// Creates a rule. Const so the table can live in a `static`.
    #[must_use]
    pub const fn new(button: usize, key: OutputKey, timing: TimingClass) -> Self {
        Self { button, key, timing }
    }
}

/// The priority-ordered rule table.
///
/// Scanned top to bottom on every snapshot; the first rule whose button is
/// pressed wins and the rest are not evaluated.
pub static RULES: [ActionRule; 8] = [
    ActionRule::new(buttons::DPAD_RIGHT, OutputKey::Char('d'), TimingClass::Immediate),
    ActionRule::new(buttons::DPAD_LEFT, OutputKey::Char('a'), TimingClass::Immediate),
    ActionRule::new(buttons::DPAD_UP, OutputKey::Char('w'), TimingClass::Immediate),
    ActionRule::new(buttons::DPAD_DOWN, OutputKey::Char('s'), TimingClass::Immediate),
    ActionRule::new(buttons::TRIANGLE, OutputKey::ArrowUp, TimingClass::RateLimited),
    ActionRule::new(buttons::CROSS, OutputKey::ArrowDown, TimingClass::RateLimited),
    ActionRule::new(buttons::CIRCLE, OutputKey::ArrowRight, TimingClass::RateLimited),
    ActionRule::new(buttons::SQUARE, OutputKey::ArrowLeft, TimingClass::RateLimited),
];

/// Highest button index referenced by the rule table.
///
/// Snapshots at least this long can match every rule; shorter snapshots
/// simply cannot match the tail of the table.
#[must_use]
pub fn max_rule_index() -> usize {
    RULES.iter().map(|rule| rule.button).max().unwrap_or(0)
}
