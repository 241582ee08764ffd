//! Autofan Core Library
//!
//! Closed-loop fan speed control over Linux hwmon sensors.
//!
//! Every cycle reads all sensors, picks out the fan tachometer reading and
//! the temperatures selected by the configured patterns, reduces those
//! temperatures to one control value (mean or max) and maps it linearly onto
//! a fan set-point written to the configured output file.
//!
//! # Module Structure
//!
//! - `data/` - Configuration, sensor snapshot types, interval parsing
//! - `engine/` - Classification, aggregation, speed mapping, control loop
//! - `hw/` - hwmon sensor provider and file actuator
//!
//! # Example
//!
//! ```no_run
//! use af_core::{Config, ControlLoop, FileActuator, HwmonProvider};
//!
//! let (_, config) = Config::load_default().unwrap();
//! let actuator = FileActuator::new(&config.output);
//! let mut control = ControlLoop::new(&config, HwmonProvider::new(), actuator);
//! control.run_cycle();
//! ```

// Grouped modules
pub mod data;
pub mod engine;
pub mod hw;

// Standalone modules
pub mod constants;

pub use data::{
    compose_name, parse_duration, ChipReadings, Config, FeatureReading, RawConfig,
    SensorReading, SensorSnapshot,
};
pub use engine::{
    speed, Classified, ControlLoop, ControlState, CycleOutcome, Mode, SensorClassifier,
    SkipReason, SpeedMapper,
};
pub use hw::{chip_id, Actuator, FileActuator, HwmonProvider, SensorProvider};

pub use af_error::{ConfigError, ConfigResult, CycleError, CycleResult};
