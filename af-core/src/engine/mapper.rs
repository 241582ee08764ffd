//! Linear control value to set-point mapping
//!
//! `normal_temp` maps to `min_speed` and `high_temp` to `max_speed`; values in
//! between interpolate linearly. Values outside the band extrapolate along
//! the same line: no clamping is applied, callers decide what to do with a
//! set-point outside `[min_speed, max_speed]` (see [`SpeedMapper::in_bounds`]).

/// Map `value` onto the line through `(normal_temp, min_speed)` and
/// `(high_temp, max_speed)`, truncated toward zero.
///
/// `high_temp` must differ from `normal_temp`; config loading guarantees it.
/// The arithmetic is done in `f64` and the result saturates at the `i64`
/// range, so extreme bounds cannot overflow.
pub fn speed(min_speed: i64, max_speed: i64, high_temp: f64, normal_temp: f64, value: f64) -> i64 {
    let (min_speed, max_speed) = (min_speed as f64, max_speed as f64);
    (min_speed + (max_speed - min_speed) / (high_temp - normal_temp) * (value - normal_temp)) as i64
}

/// Speed mapping with fixed bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedMapper {
    pub min_speed: i64,
    pub max_speed: i64,
    pub high_temp: f64,
    pub normal_temp: f64,
}

impl SpeedMapper {
    pub fn new(min_speed: i64, max_speed: i64, high_temp: f64, normal_temp: f64) -> Self {
        Self {
            min_speed,
            max_speed,
            high_temp,
            normal_temp,
        }
    }

    /// Set-point for a control value
    pub fn speed(&self, value: f64) -> i64 {
        speed(
            self.min_speed,
            self.max_speed,
            self.high_temp,
            self.normal_temp,
            value,
        )
    }

    /// Whether a set-point lies within `[min_speed, max_speed]`
    pub fn in_bounds(&self, set_point: i64) -> bool {
        (self.min_speed..=self.max_speed).contains(&set_point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> SpeedMapper {
        SpeedMapper::new(1500, 5000, 70.0, 40.0)
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(mapper().speed(40.0), 1500);
        assert_eq!(mapper().speed(70.0), 5000);
    }

    #[test]
    fn test_mean_example() {
        // 1500 + (3500 / 30) * 15
        assert_eq!(mapper().speed(55.0), 3250);
    }

    #[test]
    fn test_max_example() {
        // 1500 + (3500 / 30) * 20 = 3833.33..
        assert_eq!(mapper().speed(60.0), 3833);
    }

    #[test]
    fn test_truncates_toward_zero() {
        let m = SpeedMapper::new(0, 10, 3.0, 0.0);
        assert_eq!(m.speed(1.0), 3);
        assert_eq!(m.speed(2.0), 6);
        assert_eq!(m.speed(-1.0), -3);
    }

    #[test]
    fn test_linear_between_bounds() {
        let m = mapper();
        let mut last = m.speed(40.0);
        for tenth in 401..=700 {
            let current = m.speed(tenth as f64 / 10.0);
            assert!(current >= last);
            last = current;
        }
        assert_eq!(last, 5000);
    }

    #[test]
    fn test_extrapolates_outside_band() {
        let m = mapper();
        assert_eq!(m.speed(80.0), 6166);
        assert_eq!(m.speed(30.0), 333);
        assert!(!m.in_bounds(m.speed(80.0)));
        assert!(!m.in_bounds(m.speed(30.0)));
        assert!(m.in_bounds(m.speed(55.0)));
    }

    #[test]
    fn test_free_function_matches_mapper() {
        assert_eq!(speed(1500, 5000, 70.0, 40.0, 55.0), mapper().speed(55.0));
    }

    #[test]
    fn test_extreme_bounds_do_not_overflow() {
        let m = SpeedMapper::new(-9_000_000_000_000_000_000, 9_000_000_000_000_000_000, 70.0, 40.0);
        assert!(m.speed(55.0).abs() < 1_000_000_000_000_000);
        assert_eq!(m.speed(70.0), 9_000_000_000_000_000_000);
        assert_eq!(m.speed(1000.0), i64::MAX);
        assert_eq!(m.speed(-1000.0), i64::MIN);
    }

    #[test]
    fn test_flat_speed_range() {
        let m = SpeedMapper::new(2000, 2000, 70.0, 40.0);
        assert_eq!(m.speed(20.0), 2000);
        assert_eq!(m.speed(90.0), 2000);
    }
}
