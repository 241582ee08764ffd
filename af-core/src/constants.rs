//! Constants and configuration defaults for Autofan
//!
//! Every default the configuration falls back to lives here.

/// System paths
pub mod paths {
    /// Base path for hwmon devices
    pub const HWMON_BASE: &str = "/sys/class/hwmon";

    /// Config file name, looked up in the user's home directory
    pub const CONFIG_FILE: &str = ".autofan";

    /// Environment variable overriding the config file location
    pub const CONFIG_ENV: &str = "AUTOFAN_CONFIG";

    /// Resolve the config file path: `$AUTOFAN_CONFIG` if set, else `~/.autofan`
    pub fn config_file() -> Option<std::path::PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if !path.trim().is_empty() {
                return Some(std::path::PathBuf::from(path));
            }
        }
        dirs::home_dir().map(|home| home.join(CONFIG_FILE))
    }
}

/// Configuration defaults, used for every key absent from the config file
pub mod defaults {
    /// Aggregation mode
    pub const MODE: &str = "mean";

    /// Sampling interval
    pub const INTERVAL: &str = "3s";

    /// Fan speed at `NORMAL_TEMP` (RPM)
    pub const MIN_SPEED: i64 = 1500;

    /// Fan speed at `HIGH_TEMP` (RPM)
    pub const MAX_SPEED: i64 = 5000;

    /// Temperature mapped to `MAX_SPEED` (°C)
    pub const HIGH_TEMP: f64 = 70.0;

    /// Temperature mapped to `MIN_SPEED` (°C)
    pub const NORMAL_TEMP: f64 = 40.0;

    /// Composed name of the fan tachometer reading
    pub const FAN: &str = "applesmc-isa-0300:Master";

    /// Actuator target
    pub const OUTPUT: &str = "/sys/devices/platform/applesmc.768/fan1_output";

    /// Temperature sensor patterns
    pub const SENSORS: &[&str] = &["coretemp-isa-0000:Core .*"];
}

/// Sensor value conversion
pub mod units {
    /// hwmon reports temperatures in millidegrees Celsius
    pub const MILLIDEGREE_DIVISOR: f64 = 1000.0;

    /// hwmon reports voltages in millivolts
    pub const MILLIVOLT_DIVISOR: f64 = 1000.0;
}

/// lm-sensors style chip naming
pub mod chip {
    /// Separator between chip identifier and feature label in a composed name
    pub const NAME_SEPARATOR: char = ':';

    /// Bus name used for chips without a backing device
    pub const VIRTUAL_BUS: &str = "virtual";
}
