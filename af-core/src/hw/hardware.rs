//! Hardware sensor enumeration over Linux hwmon
//!
//! Each `/sys/class/hwmon/hwmonN` directory is one chip. Chips are named the
//! way lm-sensors names them (`coretemp-isa-0000`, `nvme-pci-0100`,
//! `w83795g-i2c-1-2f`), so fan identifiers and sensor patterns written for
//! `sensors(1)` output work unchanged.
//!
//! # Features
//!
//! - **Temperature**: `tempN_input` files (millidegrees Celsius)
//! - **Fan**: `fanN_input` files (RPM)
//! - **Voltage**: `inN_input` files (millivolts)
//!
//! Labels come from the matching `*_label` file, falling back to the file
//! prefix (`temp1`, `fan2`, ...).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use af_error::CycleResult;

use crate::constants::{chip, paths, units};
use crate::data::{ChipReadings, FeatureReading};

/// Source of chip/feature readings for a control cycle
#[cfg_attr(test, mockall::automock)]
pub trait SensorProvider {
    /// All currently detected chips with their feature readings
    fn chips(&self) -> CycleResult<Vec<ChipReadings>>;
}

/// Sensor provider reading the hwmon sysfs tree
#[derive(Debug, Clone)]
pub struct HwmonProvider {
    root: PathBuf,
}

impl HwmonProvider {
    /// Provider over the system hwmon tree
    pub fn new() -> Self {
        Self::with_root(paths::HWMON_BASE)
    }

    /// Provider over an arbitrary hwmon-shaped directory
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for HwmonProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorProvider for HwmonProvider {
    fn chips(&self) -> CycleResult<Vec<ChipReadings>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(it) => it,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(root = %self.root.display(), "No hwmon directory");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut chips = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            trace!(path = %path.display(), "Reading hwmon chip");
            let chip = match read_chip(&path) {
                Ok(chip) => chip,
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "Skipping unreadable hwmon chip");
                    continue;
                }
            };
            trace!(chip = %chip.id, features = chip.features.len(), "Read hwmon chip");
            chips.push(chip);
        }

        chips.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(chips)
    }
}

fn read_chip(dir: &Path) -> io::Result<ChipReadings> {
    let name = read_trimmed(dir.join("name")).unwrap_or_else(|_| {
        dir.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string()
    });

    let mut file_names: Vec<String> = fs::read_dir(dir)?
        .flatten()
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    file_names.sort();

    let mut features = Vec::new();
    for file_name in &file_names {
        let Some((prefix, idx)) = split_input_file(file_name) else {
            continue;
        };
        let divisor = match prefix {
            "temp" => units::MILLIDEGREE_DIVISOR,
            "in" => units::MILLIVOLT_DIVISOR,
            "fan" => 1.0,
            _ => continue,
        };

        let raw = match read_trimmed(dir.join(file_name)) {
            Ok(raw) => raw,
            Err(e) => {
                // Faulty sensors commonly fail reads with EIO/ENODATA
                trace!(file = %file_name, error = %e, "Skipping unreadable input");
                continue;
            }
        };
        let Ok(value) = raw.parse::<f64>() else {
            trace!(file = %file_name, raw = %raw, "Skipping unparsable input");
            continue;
        };
        if !value.is_finite() {
            trace!(file = %file_name, raw = %raw, "Skipping non-finite input");
            continue;
        }

        let label = read_trimmed(dir.join(format!("{}{}_label", prefix, idx)))
            .unwrap_or_else(|_| format!("{}{}", prefix, idx));

        features.push(FeatureReading {
            label,
            value: value / divisor,
        });
    }

    Ok(ChipReadings {
        id: chip_id(&name, dir),
        features,
    })
}

/// `temp12_input` -> `("temp", 12)`
fn split_input_file(file_name: &str) -> Option<(&str, u32)> {
    let stem = file_name.strip_suffix("_input")?;
    let digits_at = stem.find(|c: char| c.is_ascii_digit())?;
    let (prefix, digits) = stem.split_at(digits_at);
    let idx = digits.parse().ok()?;
    Some((prefix, idx))
}

/// lm-sensors style chip identifier: `<name>-<bus>-<address>`
///
/// The bus comes from the subsystem of the chip's backing device. Chips
/// without a device (e.g. `acpitz`) are `virtual`.
pub fn chip_id(name: &str, hwmon_dir: &Path) -> String {
    let Ok(device) = fs::canonicalize(hwmon_dir.join("device")) else {
        return format!("{}-{}-0", name, chip::VIRTUAL_BUS);
    };

    let dev_name = device
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let subsystem = fs::read_link(device.join("subsystem"))
        .ok()
        .and_then(|link| link.file_name().map(|n| n.to_string_lossy().into_owned()));

    match subsystem.as_deref() {
        Some("platform") | Some("of_platform") => {
            let addr = dev_name
                .rsplit_once('.')
                .and_then(|(_, n)| n.parse::<u32>().ok())
                .unwrap_or(0);
            format!("{}-isa-{:04x}", name, addr)
        }
        Some("pci") => match parse_pci_address(&dev_name) {
            Some(addr) => format!("{}-pci-{:04x}", name, addr),
            None => format!("{}-pci-0000", name),
        },
        Some("i2c") => match dev_name.split_once('-') {
            Some((bus, addr)) => match (bus.parse::<u32>(), u32::from_str_radix(addr, 16)) {
                (Ok(bus), Ok(addr)) => format!("{}-i2c-{}-{:02x}", name, bus, addr),
                _ => format!("{}-i2c-0-00", name),
            },
            None => format!("{}-i2c-0-00", name),
        },
        Some("acpi") => {
            let addr = dev_name
                .rsplit_once(':')
                .and_then(|(_, n)| n.parse::<u32>().ok())
                .unwrap_or(0);
            format!("{}-acpi-{:x}", name, addr)
        }
        Some(other) => format!("{}-{}-0", name, other),
        None => format!("{}-{}-0", name, chip::VIRTUAL_BUS),
    }
}

/// `0000:01:00.0` -> `(bus << 8) | (slot << 3) | function`
fn parse_pci_address(dev_name: &str) -> Option<u32> {
    let mut parts = dev_name.split(':');
    let _domain = parts.next()?;
    let bus = u32::from_str_radix(parts.next()?, 16).ok()?;
    let (slot, func) = parts.next()?.split_once('.')?;
    let slot = u32::from_str_radix(slot, 16).ok()?;
    let func = u32::from_str_radix(func, 16).ok()?;
    Some((bus << 8) | (slot << 3) | func)
}

fn read_trimmed<P: AsRef<Path>>(p: P) -> io::Result<String> {
    Ok(fs::read_to_string(p)?.trim().to_string())
}
