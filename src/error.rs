//! # Error Types
//!
//! Custom error types for JoyKey Bridge using `thiserror`.

use thiserror::Error;

/// Main error type for JoyKey Bridge
#[derive(Debug, Error)]
pub enum JoyKeyError {
    /// Controller device errors (scan, open, read)
    #[error("Controller error: {0}")]
    Controller(String),

    /// No supported game controller found on the system
    #[error("No game controller found")]
    ControllerNotFound,

    /// Virtual keyboard device errors (uinput creation)
    #[error("Virtual keyboard error: {0}")]
    Keyboard(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors (config file access, key injection)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for JoyKey Bridge
pub type Result<T> = std::result::Result<T, JoyKeyError>;
