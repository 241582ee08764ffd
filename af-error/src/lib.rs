//! Error handling for Autofan
//!
//! Two error families, split by when they can happen:
//!
//! - [`ConfigError`]: raised while loading the configuration. Always fatal,
//!   the daemon refuses to start the control loop.
//! - [`CycleError`]: raised inside a single control cycle. Always recovered
//!   locally; the cycle is skipped and the next tick tries again.

use std::io;
use std::path::PathBuf;

/// Result type for configuration loading
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type for a control cycle step
pub type CycleResult<T> = std::result::Result<T, CycleError>;

/// Startup errors: anything wrong with the configuration file or its values
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    // ============================================================================
    // Loading
    // ============================================================================
    #[error("cannot determine config file location (no home directory)")]
    NoConfigPath,

    #[error("reading config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: io::Error,
    },

    #[error("reading yaml {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    // ============================================================================
    // Values
    // ============================================================================
    #[error("parsing interval '{value}': {reason}")]
    InvalidInterval {
        value: String,
        reason: String,
    },

    #[error("build regex ({pattern}): {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("unrecognized mode '{0}'. should be 'max' or 'mean'")]
    InvalidMode(String),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: String,
    },
}

impl ConfigError {
    /// Create an invalid value error for a named option
    pub fn invalid_value(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }

    /// Create an invalid interval error
    pub fn invalid_interval(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInterval {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Per-cycle errors: logged, never fatal
#[derive(thiserror::Error, Debug)]
pub enum CycleError {
    #[error("got no temperature values. check your configuration")]
    NoReadings,

    #[error("reading sensors: {reason}")]
    Sensors {
        reason: String,
    },

    #[error("setting fan speed: {source}")]
    ActuatorWrite {
        target: PathBuf,
        source: io::Error,
    },
}

impl CycleError {
    /// Create a sensor read error from anything printable
    pub fn sensors(reason: impl Into<String>) -> Self {
        Self::Sensors {
            reason: reason.into(),
        }
    }
}

impl From<io::Error> for CycleError {
    fn from(e: io::Error) -> Self {
        Self::sensors(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_mode_message() {
        let err = ConfigError::InvalidMode("median".to_string());
        assert_eq!(
            err.to_string(),
            "unrecognized mode 'median'. should be 'max' or 'mean'"
        );
    }

    #[test]
    fn test_invalid_value_message() {
        let err = ConfigError::invalid_value("highTemp", "must be greater than normalTemp");
        assert_eq!(
            err.to_string(),
            "invalid value for highTemp: must be greater than normalTemp"
        );
    }

    #[test]
    fn test_actuator_write_message_carries_cause() {
        let err = CycleError::ActuatorWrite {
            target: PathBuf::from("/sys/devices/platform/applesmc.768/fan1_output"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert_eq!(err.to_string(), "setting fan speed: permission denied");
    }

    #[test]
    fn test_io_error_becomes_sensor_error() {
        let err: CycleError = io::Error::new(io::ErrorKind::Other, "bus gone").into();
        assert!(matches!(err, CycleError::Sensors { .. }));
        assert_eq!(err.to_string(), "reading sensors: bus gone");
    }
}
