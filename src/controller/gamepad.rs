//! # Gamepad Module
//!
//! Game controller detection, connection, and event reading via the Linux
//! evdev interface.
//!
//! ## Controller Detection
//!
//! Any device advertising the `BTN_SOUTH` key capability is treated as a
//! gamepad; that is the marker the kernel's gamepad convention guarantees.
//! An explicit device path in the configuration bypasses detection.

use evdev::{Device, Key};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{JoyKeyError, Result};

/// Game controller handle
///
/// Represents an active connection to a controller via evdev. Provides
/// methods for reading controller input events.
pub struct Gamepad {
    device: Device,
    device_path: String,
}

impl std::fmt::Debug for Gamepad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gamepad")
            .field("device_path", &self.device_path)
            .finish_non_exhaustive()
    }
}

impl Gamepad {
    /// Detect and open the first available game controller
    ///
    /// Scans all `/dev/input/event*` devices (sorted, so selection is
    /// deterministic when several controllers are connected) and opens the
    /// first one with gamepad key capabilities.
    ///
    /// # Errors
    ///
    /// - `ControllerNotFound`: no gamepad found on the system
    /// - `Controller`: `/dev/input` missing or unreadable
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use joykey_bridge::controller::Gamepad;
    ///
    /// let gamepad = Gamepad::open()?;
    /// println!("Connected to controller at: {}", gamepad.device_path());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open() -> Result<Self> {
        let input_dir = Path::new("/dev/input");

        if !input_dir.exists() {
            return Err(JoyKeyError::Controller(
                "/dev/input directory not found".to_string(),
            ));
        }

        let mut entries: Vec<_> = std::fs::read_dir(input_dir)
            .map_err(|e| JoyKeyError::Controller(format!("Failed to read /dev/input: {}", e)))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| {
                JoyKeyError::Controller(format!("Failed to read directory entry: {}", e))
            })?;

        // Sort entries for deterministic device selection when multiple controllers are connected
        entries.sort_by_key(|entry| entry.path());

        for entry in entries {
            let path = entry.path();

            // Only check event* devices
            if let Some(filename) = path.file_name() {
                if !filename.to_string_lossy().starts_with("event") {
                    continue;
                }
            } else {
                continue;
            }

            // Try to open the device
            match Device::open(&path) {
                Ok(device) => {
                    debug!(
                        "Found input device: {} ({})",
                        path.display(),
                        device.name().unwrap_or("unnamed")
                    );

                    if Self::is_gamepad(&device) {
                        let device_path = path.to_string_lossy().to_string();
                        info!("Found game controller at: {}", device_path);

                        return Ok(Gamepad {
                            device,
                            device_path,
                        });
                    }
                }
                Err(e) => {
                    // Permission denied or other errors - skip device
                    debug!("Could not open {}: {}", path.display(), e);
                }
            }
        }

        Err(JoyKeyError::ControllerNotFound)
    }

    /// Open a controller at an explicit device path
    ///
    /// Used when the configuration pins a device instead of relying on
    /// auto-detection. The device is not required to pass the gamepad
    /// capability check.
    ///
    /// # Errors
    ///
    /// Returns `Controller` error if the device cannot be opened.
    pub fn open_at(path: &str) -> Result<Self> {
        let device = Device::open(path)
            .map_err(|e| JoyKeyError::Controller(format!("Failed to open {}: {}", path, e)))?;

        info!("Opened controller at: {}", path);

        Ok(Gamepad {
            device,
            device_path: path.to_string(),
        })
    }

    /// Checks whether a device advertises gamepad key capabilities.
    fn is_gamepad(device: &Device) -> bool {
        device
            .supported_keys()
            .map_or(false, |keys| keys.contains(Key::BTN_SOUTH))
    }

    /// Get the device path of this controller
    pub fn device_path(&self) -> &str {
        &self.device_path
    }

    /// Get controller name from evdev
    ///
    /// Returns the human-readable name of the controller device.
    pub fn name(&self) -> Option<&str> {
        self.device.name()
    }

    /// Fetch events from the controller
    ///
    /// Returns an iterator over available input events. This call may
    /// block if no events are available.
    ///
    /// # Errors
    ///
    /// Returns `Controller` error if fetching events fails (e.g.,
    /// controller disconnected).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use joykey_bridge::controller::Gamepad;
    /// # let mut gamepad = Gamepad::open()?;
    /// loop {
    ///     for event in gamepad.fetch_events()? {
    ///         println!("Event: {:?}", event);
    ///     }
    /// }
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn fetch_events(&mut self) -> Result<impl Iterator<Item = evdev::InputEvent> + '_> {
        self.device
            .fetch_events()
            .map_err(|e| JoyKeyError::Controller(format!("Failed to fetch events: {}", e)))
    }
}
