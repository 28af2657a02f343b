//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::Result;
use crate::mapper::DEFAULT_NAV_RATE_HZ;

/// Default configuration file location.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub controller: ControllerConfig,

    #[serde(default)]
    pub keyboard: KeyboardConfig,

    #[serde(default)]
    pub mapper: MapperConfig,
}

/// Controller configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ControllerConfig {
    /// Explicit device path; empty means auto-detect.
    #[serde(default)]
    pub device_path: String,
}

/// Virtual keyboard configuration
#[derive(Debug, Deserialize, Clone)]
pub struct KeyboardConfig {
    /// Name the virtual device registers under.
    #[serde(default = "default_device_name")]
    pub device_name: String,
}

/// Mapper configuration
#[derive(Debug, Deserialize, Clone)]
pub struct MapperConfig {
    /// Rate gate frequency for navigation actions, in Hz.
    #[serde(default = "default_nav_rate_hz")]
    pub nav_rate_hz: u32,
}

// Default value functions
fn default_device_name() -> String {
    "joykey-bridge virtual keyboard".to_string()
}
fn default_nav_rate_hz() -> u32 {
    DEFAULT_NAV_RATE_HZ
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            device_path: String::new(),
        }
    }
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            device_name: default_device_name(),
        }
    }
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            nav_rate_hz: default_nav_rate_hz(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            controller: ControllerConfig::default(),
            keyboard: KeyboardConfig::default(),
            mapper: MapperConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use joykey_bridge::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, or fall back to defaults
    ///
    /// Missing files yield the built-in defaults so the bridge can run
    /// unconfigured; an existing but invalid file is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// The rate-gate period derived from `nav_rate_hz`.
    #[must_use]
    pub fn nav_period(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.mapper.nav_rate_hz.max(1)))
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    fn validate(&self) -> Result<()> {
        if self.keyboard.device_name.is_empty() {
            return Err(crate::error::JoyKeyError::Config(toml::de::Error::custom(
                "keyboard device_name cannot be empty",
            )));
        }

        if self.mapper.nav_rate_hz == 0 || self.mapper.nav_rate_hz > 1000 {
            return Err(crate::error::JoyKeyError::Config(toml::de::Error::custom(
                "nav_rate_hz must be between 1 and 1000",
            )));
        }

        // Controller device_path can be empty (auto-detect)
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!(config.controller.device_path.is_empty());
        assert_eq!(config.keyboard.device_name, "joykey-bridge virtual keyboard");
        assert_eq!(config.mapper.nav_rate_hz, 100);
    }

    #[test]
    fn test_default_nav_period_is_10ms() {
        let config = Config::default();
        assert_eq!(config.nav_period(), Duration::from_millis(10));
    }

    #[test]
    fn test_nav_period_from_custom_rate() {
        let mut config = Config::default();
        config.mapper.nav_rate_hz = 50;
        assert_eq!(config.nav_period(), Duration::from_millis(20));
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.mapper.nav_rate_hz, 100);
    }

    #[test]
    fn test_invalid_nav_rate_rejected() {
        let mut config = Config::default();

        config.mapper.nav_rate_hz = 0;
        assert!(config.validate().is_err());

        config.mapper.nav_rate_hz = 1001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_device_name_rejected() {
        let mut config = Config::default();
        config.keyboard.device_name = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let toml_content = r#"
[controller]
device_path = "/dev/input/event7"

[keyboard]
device_name = "test keyboard"

[mapper]
nav_rate_hz = 50
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = Config::load(temp_file.path()).unwrap();
        assert_eq!(config.controller.device_path, "/dev/input/event7");
        assert_eq!(config.keyboard.device_name, "test keyboard");
        assert_eq!(config.mapper.nav_rate_hz, 50);
    }

    #[test]
    fn test_load_invalid_config_fails() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let toml_content = r#"
[mapper]
nav_rate_hz = 0
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        assert!(Config::load(temp_file.path()).is_err());
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(Config::load("/nonexistent/joykey/config.toml").is_err());
    }

    #[test]
    fn test_load_or_default_with_missing_file() {
        let config = Config::load_or_default("/nonexistent/joykey/config.toml").unwrap();
        assert_eq!(config.mapper.nav_rate_hz, 100);
    }
}
