/*
 * This file is part of Autofan.
 *
 * Copyright (C) 2025 Autofan contributors
 *
 * Autofan is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Autofan is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Autofan. If not, see <https://www.gnu.org/licenses/>.
 */

//! Autofan daemon
//!
//! Loads the configuration once, then adjusts the fan set-point every
//! interval until SIGINT or SIGTERM arrives. A configuration error exits
//! with status 1 before any cycle runs; a signal exits with status 0.

use std::process::ExitCode;

use tracing::{error, info};

use af_core::{Config, ControlLoop, FileActuator, HwmonProvider};
use autofan::logging::{self, LogTarget};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> ExitCode {
    std::panic::set_hook(Box::new(|panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown".to_string());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("PANIC at {}: {}", location, message);
    }));

    let log_target = logging::init();
    info!("STARTUP: autofan v{} logging to {}", VERSION, log_target.describe());

    let (path, config) = match Config::load_default() {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("configuring: {}", e);
            if log_target == LogTarget::Journald {
                error!("configuring: {}", e);
            }
            return ExitCode::FAILURE;
        }
    };

    info!(
        config = %path.display(),
        mode = %config.mode,
        interval = ?config.interval,
        min_speed = config.min_speed,
        max_speed = config.max_speed,
        normal_temp = config.normal_temp,
        high_temp = config.high_temp,
        fan = %config.fan,
        output = %config.output.display(),
        sensors = ?config.sensor_patterns(),
        "Configuration loaded"
    );

    let provider = HwmonProvider::new();
    info!(hwmon = %provider.root().display(), "Reading sensors");

    let control = ControlLoop::new(&config, provider, FileActuator::new(&config.output));

    match autofan::run(control, config.interval, autofan::shutdown_signal()).await {
        Ok(control) => {
            info!(
                writes = control.state().writes,
                last_set_point = ?control.state().last_set_point,
                "Shutdown complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Scheduler failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
