//! Core data types for Autofan
//!
//! Sensor readings as they come out of a provider, and the per-cycle snapshot
//! the classifier builds from them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::constants::chip;

/// One named reading from a hardware sensor provider
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SensorReading {
    /// Composed name, `"<chip>:<label>"`
    pub name: String,
    pub value: f64,
}

/// A feature (temperature, fan, voltage input) exposed by a chip
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FeatureReading {
    pub label: String,
    pub value: f64,
}

/// All feature readings of one detected chip
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChipReadings {
    /// lm-sensors style identifier, e.g. `coretemp-isa-0000`
    pub id: String,
    pub features: Vec<FeatureReading>,
}

impl ChipReadings {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            features: Vec::new(),
        }
    }

    /// Builder-style feature push, mostly for tests and fakes
    pub fn with_feature(mut self, label: impl Into<String>, value: f64) -> Self {
        self.features.push(FeatureReading {
            label: label.into(),
            value,
        });
        self
    }

    /// Readings of this chip keyed by their composed names
    pub fn readings(&self) -> impl Iterator<Item = SensorReading> + '_ {
        self.features.iter().map(move |feature| SensorReading {
            name: compose_name(&self.id, &feature.label),
            value: feature.value,
        })
    }
}

/// Build the `"<chip>:<label>"` key used for classification
pub fn compose_name(chip_id: &str, label: &str) -> String {
    format!("{}{}{}", chip_id, chip::NAME_SEPARATOR, label)
}

/// Temperature readings selected for one control cycle
///
/// Keys are kept sorted so aggregation always sums in the same order; two
/// cycles over identical readings therefore produce bit-identical control
/// values.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct SensorSnapshot(BTreeMap<String, f64>);

impl SensorSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.values().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Compact JSON rendering for log records
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_else(|_| format!("{:?}", self.0))
    }
}

impl fmt::Display for SensorSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json())
    }
}

impl FromIterator<(String, f64)> for SensorSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
