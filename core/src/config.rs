//! Event buffer configuration (`tminput.toml`)
//!
//! The host decides which event names exist in a buffer, but a handful of
//! names play a structural role (race markers, analog channels, the digital
//! actions that the command stream understands). Their concrete spelling is
//! configured here and defaults to the names the simulation host uses.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::eventbuffer::script::TimeNotation;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Reserved event names
    #[serde(default)]
    pub names: ReservedNames,
    /// Command-stream export settings
    #[serde(default)]
    pub export: ExportConfig,
}

/// Concrete names of the event types with a structural role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservedNames {
    /// Marker that makes the host start the race (default: `_FakeIsRaceRunning`)
    #[serde(default = "default_race_running")]
    pub race_running: String,
    /// Marker whose time anchors exported commands (default: `_FakeIsRaceRunning`)
    #[serde(default = "default_race_running")]
    pub race_start: String,
    /// Marker that ends the race (default: `_FakeFinishLine`)
    #[serde(default = "default_race_finish")]
    pub race_finish: String,
    /// Respawn input (default: `Respawn`)
    #[serde(default = "default_respawn")]
    pub respawn: String,
    /// Horn input (default: `Horn`)
    #[serde(default = "default_horn")]
    pub horn: String,
    /// Digital accelerate (default: `Accelerate`)
    #[serde(default = "default_accelerate")]
    pub accelerate: String,
    /// Digital brake (default: `Brake`)
    #[serde(default = "default_brake")]
    pub brake: String,
    /// Digital steer left (default: `SteerLeft`)
    #[serde(default = "default_steer_left")]
    pub steer_left: String,
    /// Digital steer right (default: `SteerRight`)
    #[serde(default = "default_steer_right")]
    pub steer_right: String,
    /// Analog accelerate channel (default: `Gas`)
    #[serde(default = "default_analog_accelerate")]
    pub analog_accelerate: String,
    /// Analog steer channel (default: `Steer`)
    #[serde(default = "default_analog_steer")]
    pub analog_steer: String,
}

impl Default for ReservedNames {
    fn default() -> Self {
        Self {
            race_running: default_race_running(),
            race_start: default_race_running(),
            race_finish: default_race_finish(),
            respawn: default_respawn(),
            horn: default_horn(),
            accelerate: default_accelerate(),
            brake: default_brake(),
            steer_left: default_steer_left(),
            steer_right: default_steer_right(),
            analog_accelerate: default_analog_accelerate(),
            analog_steer: default_analog_steer(),
        }
    }
}

/// Settings for [`EventBuffer::to_commands_with`](crate::EventBuffer::to_commands_with).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ExportConfig {
    /// Export every event instead of only those inside the race window
    #[serde(default)]
    pub all_events: bool,
    /// How command timestamps are written
    #[serde(default)]
    pub time_notation: TimeNotation,
}

fn default_race_running() -> String {
    "_FakeIsRaceRunning".to_string()
}
fn default_race_finish() -> String {
    "_FakeFinishLine".to_string()
}
fn default_respawn() -> String {
    "Respawn".to_string()
}
fn default_horn() -> String {
    "Horn".to_string()
}
fn default_accelerate() -> String {
    "Accelerate".to_string()
}
fn default_brake() -> String {
    "Brake".to_string()
}
fn default_steer_left() -> String {
    "SteerLeft".to_string()
}
fn default_steer_right() -> String {
    "SteerRight".to_string()
}
fn default_analog_accelerate() -> String {
    "Gas".to_string()
}
fn default_analog_steer() -> String {
    "Steer".to_string()
}

/// Errors raised while loading or saving a [`Config`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Malformed TOML
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be serialized
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// File could not be read or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Config {
    /// Parse a configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load a configuration file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the configuration to `path`
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_names() {
        let names = ReservedNames::default();
        assert_eq!(names.race_running, "_FakeIsRaceRunning");
        assert_eq!(names.race_start, names.race_running);
        assert_eq!(names.race_finish, "_FakeFinishLine");
        assert_eq!(names.analog_steer, "Steer");
        assert_eq!(names.analog_accelerate, "Gas");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [names]
            analog_steer = "AnalogSteer"

            [export]
            all_events = true
            time_notation = "decimal"
            "#,
        )
        .unwrap();

        assert_eq!(config.names.analog_steer, "AnalogSteer");
        assert_eq!(config.names.brake, "Brake");
        assert!(config.export.all_events);
        assert_eq!(config.export.time_notation, TimeNotation::Decimal);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Config::from_toml("names = 3"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tminput.toml");

        let mut config = Config::default();
        config.names.horn = "Klaxon".to_string();
        config.export.time_notation = TimeNotation::Decimal;
        config.save(&path).unwrap();

        assert_eq!(Config::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_file(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }
}
