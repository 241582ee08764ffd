//! Data types, configuration and config value parsing

mod config;
mod interval;
mod types;

pub use config::{Config, RawConfig};
pub use interval::parse_duration;
pub use types::{compose_name, ChipReadings, FeatureReading, SensorReading, SensorSnapshot};
