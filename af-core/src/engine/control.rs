//! One control cycle: fetch, classify, aggregate, map, actuate
//!
//! A cycle ends in one of three states:
//!
//! - **Applied**: a new set-point was written
//! - **Skipped**: nothing to do (no readings, or the control value is
//!   unchanged since the last write)
//! - **Failed**: the provider or the actuator returned an error
//!
//! None of them is fatal. The last applied control value only advances after
//! a successful write, so a failed write is retried by the next cycle.

use tracing::{debug, error, info, warn};

use af_error::CycleError;

use super::{Classified, Mode, SensorClassifier, SpeedMapper};
use crate::data::{Config, SensorSnapshot};
use crate::hw::{Actuator, SensorProvider};

/// State carried from one cycle to the next
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlState {
    /// Control value that triggered the last successful write (0.0 before any)
    pub last_applied_value: f64,
    /// Set-point of the last successful write
    pub last_set_point: Option<i64>,
    /// Successful writes so far
    pub writes: u64,
}

impl ControlState {
    fn record_write(&mut self, control_value: f64, set_point: i64) {
        self.last_applied_value = control_value;
        self.last_set_point = Some(set_point);
        self.writes += 1;
    }
}

/// Why a cycle did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No temperature reading passed the filter
    NoReadings,
    /// Control value equals the last applied one
    Unchanged,
}

/// How a cycle ended
#[derive(Debug)]
pub enum CycleOutcome {
    Applied {
        snapshot: SensorSnapshot,
        control_value: f64,
        fan_speed: i64,
        set_point: i64,
    },
    Skipped(SkipReason),
    Failed(CycleError),
}

impl CycleOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, CycleOutcome::Applied { .. })
    }
}

/// The fan control loop body, owning its sensor source, actuator and state
pub struct ControlLoop<P, A> {
    provider: P,
    actuator: A,
    classifier: SensorClassifier,
    mode: Mode,
    mapper: SpeedMapper,
    state: ControlState,
}

impl<P: SensorProvider, A: Actuator> ControlLoop<P, A> {
    pub fn new(config: &Config, provider: P, actuator: A) -> Self {
        Self::from_parts(
            SensorClassifier::new(config.fan.clone(), config.sensors.clone()),
            config.mode,
            config.speed_mapper(),
            provider,
            actuator,
        )
    }

    pub fn from_parts(
        classifier: SensorClassifier,
        mode: Mode,
        mapper: SpeedMapper,
        provider: P,
        actuator: A,
    ) -> Self {
        Self {
            provider,
            actuator,
            classifier,
            mode,
            mapper,
            state: ControlState::default(),
        }
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Run a single cycle
    pub fn run_cycle(&mut self) -> CycleOutcome {
        let chips = match self.provider.chips() {
            Ok(chips) => chips,
            Err(e) => {
                error!(error = %e, "Sensor read failed, skipping cycle");
                return CycleOutcome::Failed(e);
            }
        };

        let Classified { snapshot, fan_speed } = self.classifier.classify(&chips);

        let Some(control_value) = self.mode.aggregate(&snapshot) else {
            warn!("{}", CycleError::NoReadings);
            return CycleOutcome::Skipped(SkipReason::NoReadings);
        };

        // Exact comparison: any change in the readings triggers a write
        if control_value == self.state.last_applied_value {
            debug!(value = control_value, "Control value unchanged");
            return CycleOutcome::Skipped(SkipReason::Unchanged);
        }

        let set_point = self.mapper.speed(control_value);
        if !self.mapper.in_bounds(set_point) {
            warn!(
                value = control_value,
                set_point,
                min_speed = self.mapper.min_speed,
                max_speed = self.mapper.max_speed,
                "Set-point outside speed bounds (control value outside normalTemp..highTemp)"
            );
        }

        if let Err(e) = self.actuator.write(set_point) {
            error!(output = %self.actuator.target(), set_point, "{}", e);
            return CycleOutcome::Failed(e);
        }

        self.state.record_write(control_value, set_point);

        info!(
            sensors = %snapshot,
            mode = %self.mode,
            value = format_args!("{:.1}", control_value),
            from_rpm = fan_speed,
            to_rpm = set_point,
            output = %self.actuator.target(),
            "{}:{:.1} -- from {} RPM to {} RPM",
            self.mode,
            control_value,
            fan_speed,
            set_point
        );

        CycleOutcome::Applied {
            snapshot,
            control_value,
            fan_speed,
            set_point,
        }
    }
}
