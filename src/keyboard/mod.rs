//! # Virtual Keyboard Module
//!
//! Synthesizes key events through a Linux uinput virtual device.
//!
//! This module handles:
//! - Registering a named virtual keyboard with the kernel
//! - Translating output keys to evdev key codes
//! - Emitting key press/release events followed by SYN reports
//! - The [`KeySink`] seam the mapper drives, with a mock for tests

pub mod keymap;
pub mod sink;

pub use sink::KeySink;

use evdev::uinput::{VirtualDevice, VirtualDeviceBuilder};
use evdev::{AttributeSet, EventType, InputEvent, Key};
use std::io;
use tracing::{debug, info};

use crate::error::{JoyKeyError, Result};
use crate::mapper::OutputKey;

/// Virtual keyboard handle
///
/// Registers a uinput device carrying the keymap's key capabilities and
/// injects synthetic key events into the kernel input subsystem.
pub struct VirtualKeyboard {
    device: VirtualDevice,
    device_name: String,
}

impl std::fmt::Debug for VirtualKeyboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VirtualKeyboard")
            .field("device_name", &self.device_name)
            .finish_non_exhaustive()
    }
}

impl VirtualKeyboard {
    /// Registers a virtual keyboard device under the given name.
    ///
    /// The name is how the device shows up to the rest of the system
    /// (`/proc/bus/input/devices`, compositor device lists).
    ///
    /// # Errors
    ///
    /// Returns `Keyboard` error if `/dev/uinput` is missing or not
    /// writable (typically a permissions problem).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use joykey_bridge::keyboard::VirtualKeyboard;
    ///
    /// let keyboard = VirtualKeyboard::create("joykey-bridge virtual keyboard")?;
    /// println!("Registered: {}", keyboard.device_name());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn create(name: &str) -> Result<Self> {
        let mut keys: AttributeSet<Key> = AttributeSet::new();
        for key in keymap::registered_keys() {
            keys.insert(key);
        }

        let device = VirtualDeviceBuilder::new()
            .map_err(|e| JoyKeyError::Keyboard(format!("Failed to open /dev/uinput: {}", e)))?
            .name(name)
            .with_keys(&keys)
            .map_err(|e| JoyKeyError::Keyboard(format!("Failed to set key capabilities: {}", e)))?
            .build()
            .map_err(|e| JoyKeyError::Keyboard(format!("Failed to create virtual device: {}", e)))?;

        info!("Registered virtual keyboard device '{}'", name);

        Ok(Self {
            device,
            device_name: name.to_string(),
        })
    }

    /// Returns the name the device was registered under.
    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    /// Emits one key event followed by a SYN report.
    fn emit_key(&mut self, key: OutputKey, value: i32) -> io::Result<()> {
        let code = keymap::evdev_key(key)?;

        let key_event = InputEvent::new(EventType::KEY, code.code(), value);
        // SYN event is required for the kernel to process the key event
        let syn_event = InputEvent::new(EventType::SYNCHRONIZATION, 0, 0);

        self.device.emit(&[key_event, syn_event])?;
        debug!("Emitted {} value {}", key, value);
        Ok(())
    }
}

impl KeySink for VirtualKeyboard {
    fn press(&mut self, key: OutputKey) -> io::Result<()> {
        self.emit_key(key, 1)
    }

    fn release(&mut self, key: OutputKey) -> io::Result<()> {
        self.emit_key(key, 0)
    }
}
