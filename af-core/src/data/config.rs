//! Configuration loading and validation
//!
//! The config file is YAML with camelCase keys. Every key is optional and
//! falls back to [`crate::constants::defaults`]:
//!
//! ```yaml
//! mode: mean            # or max
//! interval: 3s
//! minSpeed: 1500
//! maxSpeed: 5000
//! highTemp: 70
//! normalTemp: 40
//! fan: "applesmc-isa-0300:Master"
//! output: /sys/devices/platform/applesmc.768/fan1_output
//! sensors:
//!   - "coretemp-isa-0000:Core .*"
//! ```
//!
//! Loading happens once, before the control loop starts. All checks that a
//! cycle would otherwise trip over at runtime (unknown mode, degenerate
//! temperature bounds, zero interval) are done here.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use af_error::{ConfigError, ConfigResult};

use super::interval::parse_duration;
use crate::constants::{defaults, paths};
use crate::engine::{Mode, SpeedMapper};

fn default_mode() -> String {
    defaults::MODE.to_string()
}
fn default_interval() -> String {
    defaults::INTERVAL.to_string()
}
fn default_min_speed() -> i64 {
    defaults::MIN_SPEED
}
fn default_max_speed() -> i64 {
    defaults::MAX_SPEED
}
fn default_high_temp() -> f64 {
    defaults::HIGH_TEMP
}
fn default_normal_temp() -> f64 {
    defaults::NORMAL_TEMP
}
fn default_fan() -> String {
    defaults::FAN.to_string()
}
fn default_output() -> String {
    defaults::OUTPUT.to_string()
}
fn default_sensors() -> Vec<String> {
    defaults::SENSORS.iter().map(|s| s.to_string()).collect()
}

/// Config file contents as written by the user, before validation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawConfig {
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default = "default_interval")]
    pub interval: String,
    #[serde(default = "default_min_speed")]
    pub min_speed: i64,
    #[serde(default = "default_max_speed")]
    pub max_speed: i64,
    #[serde(default = "default_high_temp")]
    pub high_temp: f64,
    #[serde(default = "default_normal_temp")]
    pub normal_temp: f64,
    #[serde(default = "default_fan")]
    pub fan: String,
    #[serde(default = "default_output")]
    pub output: String,
    /// An explicit empty list selects every non-fan reading
    #[serde(default = "default_sensors")]
    pub sensors: Vec<String>,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            interval: default_interval(),
            min_speed: default_min_speed(),
            max_speed: default_max_speed(),
            high_temp: default_high_temp(),
            normal_temp: default_normal_temp(),
            fan: default_fan(),
            output: default_output(),
            sensors: default_sensors(),
        }
    }
}

/// Validated, immutable configuration consumed by the control loop
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub interval: Duration,
    pub min_speed: i64,
    pub max_speed: i64,
    pub high_temp: f64,
    pub normal_temp: f64,
    pub fan: String,
    pub output: PathBuf,
    pub sensors: Vec<Regex>,
}

impl Config {
    /// Load and validate the config file at `path`
    pub fn load(path: &Path) -> ConfigResult<Self> {
        debug!(path = %path.display(), "Loading config");

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let raw = parse_raw(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_raw(raw)
    }

    /// Load from the default location (`$AUTOFAN_CONFIG` or `~/.autofan`)
    pub fn load_default() -> ConfigResult<(PathBuf, Self)> {
        let path = paths::config_file().ok_or(ConfigError::NoConfigPath)?;
        let config = Self::load(&path)?;
        Ok((path, config))
    }

    /// Validate raw values into a usable config
    pub fn from_raw(raw: RawConfig) -> ConfigResult<Self> {
        let mode: Mode = raw.mode.parse()?;

        let interval = parse_duration(&raw.interval)?;
        if interval.is_zero() {
            return Err(ConfigError::invalid_interval(
                raw.interval,
                "must be greater than zero",
            ));
        }

        if raw.min_speed > raw.max_speed {
            return Err(ConfigError::invalid_value(
                "minSpeed",
                format!(
                    "{} is greater than maxSpeed {}",
                    raw.min_speed, raw.max_speed
                ),
            ));
        }

        if !raw.high_temp.is_finite() {
            return Err(ConfigError::invalid_value("highTemp", "must be a finite number"));
        }
        if !raw.normal_temp.is_finite() {
            return Err(ConfigError::invalid_value("normalTemp", "must be a finite number"));
        }
        if raw.high_temp <= raw.normal_temp {
            return Err(ConfigError::invalid_value(
                "highTemp",
                format!(
                    "{} must be greater than normalTemp {}",
                    raw.high_temp, raw.normal_temp
                ),
            ));
        }

        let fan = raw.fan.trim().to_string();
        if fan.is_empty() {
            return Err(ConfigError::invalid_value("fan", "must not be empty"));
        }

        if raw.output.trim().is_empty() {
            return Err(ConfigError::invalid_value("output", "must not be empty"));
        }

        let sensors = raw
            .sensors
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<ConfigResult<Vec<_>>>()?;

        Ok(Self {
            mode,
            interval,
            min_speed: raw.min_speed,
            max_speed: raw.max_speed,
            high_temp: raw.high_temp,
            normal_temp: raw.normal_temp,
            fan,
            output: PathBuf::from(raw.output),
            sensors,
        })
    }

    /// Speed mapper for this config's bounds
    pub fn speed_mapper(&self) -> SpeedMapper {
        SpeedMapper::new(self.min_speed, self.max_speed, self.high_temp, self.normal_temp)
    }

    /// Source strings of the temperature patterns, for logging
    pub fn sensor_patterns(&self) -> Vec<&str> {
        self.sensors.iter().map(|re| re.as_str()).collect()
    }
}

/// An empty (or whitespace-only) file means "all defaults"
fn parse_raw(content: &str) -> Result<RawConfig, serde_yaml::Error> {
    if content.trim().is_empty() {
        return Ok(RawConfig::default());
    }
    serde_yaml::from_str(content)
}
