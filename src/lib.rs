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

//! Autofan - closed-loop fan speed daemon for Linux hwmon sensors
//!
//! The control pipeline lives in `af_core`; this crate adds the process
//! surface: log output setup and the periodic scheduler with its shutdown
//! handling.

pub mod logging;
pub mod scheduler;

pub use scheduler::{run, shutdown_signal};
