//! Fan speed actuation
//!
//! The set-point is written as a plain decimal string, the format sysfs fan
//! targets such as `applesmc`'s `fanN_output` or `fanN_target` expect.

use std::fs;
use std::path::PathBuf;

use af_error::{CycleError, CycleResult};

/// Sink for fan set-points
#[cfg_attr(test, mockall::automock)]
pub trait Actuator {
    /// Apply a new set-point
    fn write(&mut self, set_point: i64) -> CycleResult<()>;

    /// Where set-points go, for log records
    fn target(&self) -> String;
}

/// Actuator writing set-points to a file
#[derive(Debug, Clone)]
pub struct FileActuator {
    path: PathBuf,
}

impl FileActuator {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Actuator for FileActuator {
    fn write(&mut self, set_point: i64) -> CycleResult<()> {
        fs::write(&self.path, set_point.to_string()).map_err(|source| CycleError::ActuatorWrite {
            target: self.path.clone(),
            source,
        })
    }

    fn target(&self) -> String {
        self.path.display().to_string()
    }
}
