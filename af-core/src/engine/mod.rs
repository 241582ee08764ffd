//! Control engine
//!
//! - `classifier` - fan/temperature selection over provider readings
//! - `aggregate` - mean/max reduction of the temperature snapshot
//! - `mapper` - linear control value to set-point mapping
//! - `control` - the per-cycle control loop

mod aggregate;
mod classifier;
mod control;
mod mapper;

pub use aggregate::Mode;
pub use classifier::{Classified, SensorClassifier};
pub use control::{ControlLoop, ControlState, CycleOutcome, SkipReason};
pub use mapper::{speed, SpeedMapper};
