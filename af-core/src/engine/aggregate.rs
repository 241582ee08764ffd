//! Reduction of a temperature snapshot to one control value

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use af_error::ConfigError;

use crate::data::SensorSnapshot;

/// Aggregation policy for the selected temperature readings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Arithmetic mean of all readings
    #[default]
    Mean,
    /// Hottest reading
    Max,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Mean => "mean",
            Mode::Max => "max",
        }
    }

    /// Reduce the snapshot to a single value; `None` when it is empty
    pub fn aggregate(&self, snapshot: &SensorSnapshot) -> Option<f64> {
        if snapshot.is_empty() {
            return None;
        }

        let value = match self {
            Mode::Mean => snapshot.values().sum::<f64>() / snapshot.len() as f64,
            Mode::Max => snapshot.values().fold(f64::NEG_INFINITY, f64::max),
        };
        Some(value)
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "mean" => Ok(Mode::Mean),
            "max" => Ok(Mode::Max),
            other => Err(ConfigError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(values: &[f64]) -> SensorSnapshot {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| (format!("coretemp-isa-0000:Core {}", i), *v))
            .collect()
    }

    #[test]
    fn test_mean() {
        let value = Mode::Mean.aggregate(&snapshot(&[50.0, 60.0])).unwrap();
        assert!((value - 55.0).abs() < f64::EPSILON);

        let value = Mode::Mean.aggregate(&snapshot(&[41.5, 43.0, 47.25, 52.0])).unwrap();
        assert!((value - 45.9375).abs() < 1e-9);
    }

    #[test]
    fn test_max() {
        assert_eq!(Mode::Max.aggregate(&snapshot(&[50.0, 60.0, 55.0])), Some(60.0));
    }

    #[test]
    fn test_max_of_negative_readings() {
        assert_eq!(Mode::Max.aggregate(&snapshot(&[-12.0, -3.5])), Some(-3.5));
    }

    #[test]
    fn test_single_reading() {
        let single = snapshot(&[42.0]);
        assert_eq!(Mode::Mean.aggregate(&single), Some(42.0));
        assert_eq!(Mode::Max.aggregate(&single), Some(42.0));
    }

    #[test]
    fn test_empty_snapshot_has_no_value() {
        let empty = SensorSnapshot::new();
        assert_eq!(Mode::Mean.aggregate(&empty), None);
        assert_eq!(Mode::Max.aggregate(&empty), None);
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("mean".parse::<Mode>().unwrap(), Mode::Mean);
        assert_eq!("max".parse::<Mode>().unwrap(), Mode::Max);
        assert_eq!(" max ".parse::<Mode>().unwrap(), Mode::Max);
    }

    #[test]
    fn test_parse_unknown_mode() {
        for bad in ["median", "MEAN", "", "avg"] {
            let err = bad.parse::<Mode>().unwrap_err();
            assert!(matches!(err, ConfigError::InvalidMode(_)));
        }
    }

    #[test]
    fn test_display_round_trips() {
        for mode in [Mode::Mean, Mode::Max] {
            assert_eq!(mode.to_string().parse::<Mode>().unwrap(), mode);
        }
    }
}
