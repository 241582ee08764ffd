//! Duration strings for the `interval` option
//!
//! Accepts the same notation as Go's `time.ParseDuration`, which existing
//! autofan config files are written in: a sequence of decimal numbers, each
//! with an optional fraction and a mandatory unit, e.g. `3s`, `500ms`,
//! `1.5m`, `1h30m`. Valid units are `ns`, `us` (or `µs`), `ms`, `s`, `m`, `h`.

use std::time::Duration;

use af_error::{ConfigError, ConfigResult};

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "\u{b5}s" | "\u{3bc}s" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(60 * NANOS_PER_SEC),
        "h" => Some(3600 * NANOS_PER_SEC),
        _ => None,
    }
}

fn invalid(value: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::invalid_interval(value, reason)
}

/// Parse a duration string such as `3s` or `1m30s`
///
/// Negative durations are rejected since a `Duration` cannot hold them;
/// `0` (and `-0s`) parse to [`Duration::ZERO`] and are left for the caller
/// to reject.
pub fn parse_duration(input: &str) -> ConfigResult<Duration> {
    let mut s = input.trim();

    let negative = if let Some(rest) = s.strip_prefix('-') {
        s = rest;
        true
    } else {
        if let Some(rest) = s.strip_prefix('+') {
            s = rest;
        }
        false
    };

    if s == "0" {
        return Ok(Duration::ZERO);
    }
    if s.is_empty() {
        return Err(invalid(input, "invalid duration"));
    }

    let mut total: u128 = 0;
    let mut rest = s;

    while !rest.is_empty() {
        let int_len = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        let (int_digits, after) = rest.split_at(int_len);

        let (frac_digits, after) = match after.strip_prefix('.') {
            Some(tail) => {
                let frac_len = tail.find(|c: char| !c.is_ascii_digit()).unwrap_or(tail.len());
                tail.split_at(frac_len)
            }
            None => ("", after),
        };

        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(invalid(input, "invalid duration"));
        }

        let unit_len = after
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after.len());
        let (unit, after) = after.split_at(unit_len);

        if unit.is_empty() {
            return Err(invalid(input, "missing unit in duration"));
        }
        let per_unit = unit_nanos(unit)
            .ok_or_else(|| invalid(input, format!("unknown unit '{}' in duration", unit)))?;

        let whole: u128 = if int_digits.is_empty() {
            0
        } else {
            int_digits
                .parse()
                .map_err(|_| invalid(input, "duration out of range"))?
        };

        let mut part = whole
            .checked_mul(per_unit)
            .ok_or_else(|| invalid(input, "duration out of range"))?;

        if !frac_digits.is_empty() {
            let frac: f64 = format!("0.{}", frac_digits)
                .parse()
                .map_err(|_| invalid(input, "invalid duration"))?;
            part += (frac * per_unit as f64) as u128;
        }

        total = total
            .checked_add(part)
            .ok_or_else(|| invalid(input, "duration out of range"))?;
        rest = after;
    }

    if negative && total > 0 {
        return Err(invalid(input, "must not be negative"));
    }

    let nanos = u64::try_from(total).map_err(|_| invalid(input, "duration out of range"))?;
    Ok(Duration::from_nanos(nanos))
}
