//! Hardware interaction modules
//!
//! The sensor provider and actuator seams, with their sysfs implementations.

mod control;
mod hardware;

pub use control::{Actuator, FileActuator};
pub use hardware::{chip_id, HwmonProvider, SensorProvider};

#[cfg(test)]
pub use control::MockActuator;
#[cfg(test)]
pub use hardware::MockSensorProvider;
