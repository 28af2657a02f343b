//! # Button Layout Module
//!
//! The stable button-index layout and the snapshot builder that folds raw
//! evdev events into [`ButtonSnapshot`]s.
//!
//! ## Button Indices
//!
//! Indices follow the classic PlayStation-style ordering, which is the
//! layout the rule table addresses:
//!
//! | Index | Button | evdev Code |
//! |-------|--------|------------|
//! | 0 | Select/Share | BTN_SELECT |
//! | 1 | L3 | BTN_THUMBL |
//! | 2 | R3 | BTN_THUMBR |
//! | 3 | Start/Options | BTN_START |
//! | 4 | D-Pad Up | ABS_HAT0Y -1 / BTN_DPAD_UP |
//! | 5 | D-Pad Right | ABS_HAT0X +1 / BTN_DPAD_RIGHT |
//! | 6 | D-Pad Down | ABS_HAT0Y +1 / BTN_DPAD_DOWN |
//! | 7 | D-Pad Left | ABS_HAT0X -1 / BTN_DPAD_LEFT |
//! | 8 | L2 | BTN_TL2 |
//! | 9 | R2 | BTN_TR2 |
//! | 10 | L1 | BTN_TL |
//! | 11 | R1 | BTN_TR |
//! | 12 | Triangle | BTN_NORTH |
//! | 13 | Circle | BTN_EAST |
//! | 14 | Cross | BTN_SOUTH |
//! | 15 | Square | BTN_WEST |
//! | 16 | PS/Guide | BTN_MODE |
//!
//! Most controllers report the d-pad as the HAT0 axis pair; some expose
//! discrete BTN_DPAD_* keys instead. Both are folded onto indices 4-7.

use evdev::{AbsoluteAxisType, InputEvent, Key};

use crate::mapper::ButtonSnapshot;

/// Number of buttons in a snapshot.
pub const BUTTON_COUNT: usize = 17;

/// Select/Share button.
pub const SELECT: usize = 0;
/// Left stick click.
pub const L3: usize = 1;
/// Right stick click.
pub const R3: usize = 2;
/// Start/Options button.
pub const START: usize = 3;
/// D-Pad Up.
pub const DPAD_UP: usize = 4;
/// D-Pad Right.
pub const DPAD_RIGHT: usize = 5;
/// D-Pad Down.
pub const DPAD_DOWN: usize = 6;
/// D-Pad Left.
pub const DPAD_LEFT: usize = 7;
/// L2 trigger click.
pub const L2: usize = 8;
/// R2 trigger click.
pub const R2: usize = 9;
/// L1 shoulder button.
pub const L1: usize = 10;
/// R1 shoulder button.
pub const R1: usize = 11;
/// Triangle face button.
pub const TRIANGLE: usize = 12;
/// Circle face button.
pub const CIRCLE: usize = 13;
/// Cross face button.
pub const CROSS: usize = 14;
/// Square face button.
pub const SQUARE: usize = 15;
/// PS/Guide button.
pub const PS: usize = 16;

/// D-Pad axis value when released.
pub const HAT_RELEASED: i32 = 0;
/// D-Pad pressed negative direction (left or up).
pub const HAT_NEGATIVE: i32 = -1;
/// D-Pad pressed positive direction (right or down).
pub const HAT_POSITIVE: i32 = 1;

/// Folds raw evdev events into button snapshots.
///
/// The builder accumulates key and hat-axis events; [`SnapshotBuilder::snapshot`]
/// returns the instantaneous state as a [`ButtonSnapshot`], one per evdev
/// SYN report at the feed boundary.
///
/// # Thread Safety
///
/// `SnapshotBuilder` is not thread-safe. Use from the single reader task
/// only.
///
/// # Examples
///
/// ```
/// use joykey_bridge::controller::buttons::SnapshotBuilder;
///
/// let builder = SnapshotBuilder::new();
/// let snapshot = builder.snapshot();
/// assert!(!snapshot.any_pressed());
/// ```
#[derive(Debug)]
pub struct SnapshotBuilder {
    pressed: [bool; BUTTON_COUNT],
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotBuilder {
    /// Creates a builder with every button released.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pressed: [false; BUTTON_COUNT],
        }
    }

    /// Returns the current state as a snapshot.
    #[must_use]
    pub fn snapshot(&self) -> ButtonSnapshot {
        ButtonSnapshot::new(self.pressed.to_vec())
    }

    /// Processes a single evdev input event and updates button state.
    ///
    /// Handles key events (face, shoulder, and system buttons) and HAT0
    /// axis events (d-pad). Other event types are ignored.
    pub fn process_event(&mut self, event: &InputEvent) {
        match event.kind() {
            evdev::InputEventKind::AbsAxis(axis) => {
                self.process_hat_event(axis, event.value());
            }
            evdev::InputEventKind::Key(key) => {
                self.process_key_event(key, event.value() != 0);
            }
            _ => {
                // Ignore sync events and other event types
            }
        }
    }

    /// Processes a d-pad hat axis event.
    ///
    /// The hat reports one value per axis, so the released state clears
    /// both directions of that axis.
    fn process_hat_event(&mut self, axis: AbsoluteAxisType, value: i32) {
        match axis {
            AbsoluteAxisType::ABS_HAT0X => {
                self.pressed[DPAD_LEFT] = value == HAT_NEGATIVE;
                self.pressed[DPAD_RIGHT] = value == HAT_POSITIVE;
            }
            AbsoluteAxisType::ABS_HAT0Y => {
                self.pressed[DPAD_UP] = value == HAT_NEGATIVE;
                self.pressed[DPAD_DOWN] = value == HAT_POSITIVE;
            }
            _ => {
                // Ignore sticks, triggers, gyro, etc.
            }
        }
    }

    /// Processes a key/button event.
    fn process_key_event(&mut self, key: Key, pressed: bool) {
        match key {
            // Face buttons
            Key::BTN_NORTH => self.pressed[TRIANGLE] = pressed,
            Key::BTN_EAST => self.pressed[CIRCLE] = pressed,
            Key::BTN_SOUTH => self.pressed[CROSS] = pressed,
            Key::BTN_WEST => self.pressed[SQUARE] = pressed,

            // Shoulder buttons
            Key::BTN_TL => self.pressed[L1] = pressed,
            Key::BTN_TR => self.pressed[R1] = pressed,
            Key::BTN_TL2 => self.pressed[L2] = pressed,
            Key::BTN_TR2 => self.pressed[R2] = pressed,

            // System buttons
            Key::BTN_SELECT => self.pressed[SELECT] = pressed,
            Key::BTN_START => self.pressed[START] = pressed,
            Key::BTN_MODE => self.pressed[PS] = pressed,

            // Stick clicks
            Key::BTN_THUMBL => self.pressed[L3] = pressed,
            Key::BTN_THUMBR => self.pressed[R3] = pressed,

            // Discrete d-pad keys (controllers without a hat axis)
            Key::BTN_DPAD_UP => self.pressed[DPAD_UP] = pressed,
            Key::BTN_DPAD_DOWN => self.pressed[DPAD_DOWN] = pressed,
            Key::BTN_DPAD_LEFT => self.pressed[DPAD_LEFT] = pressed,
            Key::BTN_DPAD_RIGHT => self.pressed[DPAD_RIGHT] = pressed,

            _ => {
                // Ignore unknown buttons
            }
        }
    }

    /// Resets all buttons to released.
    ///
    /// Useful when reconnecting a controller.
    pub fn reset(&mut self) {
        self.pressed = [false; BUTTON_COUNT];
    }
}
