//! # Controller Module
//!
//! Game controller input handling.
//!
//! This module handles:
//! - Controller detection and connection via evdev
//! - The stable button-index layout snapshots are addressed by
//! - Folding raw input events into button snapshots

pub mod buttons;
pub mod gamepad;

pub use buttons::SnapshotBuilder;
pub use gamepad::Gamepad;
