//! Numeric helpers
//!
//! All surface state is kept at a fixed decimal precision so that values
//! compare exactly after every write. These helpers are the only place that
//! precision is applied.

/// Round `value` to `precision` decimal places
pub fn round(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    let rounded = (value * factor).round() / factor;
    // Avoid handing out negative zero, it would break exact comparisons in Debug output
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Round when a precision is given, pass through otherwise
pub fn round_opt(value: f64, precision: Option<u32>) -> f64 {
    match precision {
        Some(precision) => round(value, precision),
        None => value,
    }
}

/// Clamp `value` into `[min, max]`
///
/// Unlike [`f64::clamp`] this never panics when `min > max`; `max` wins.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Clamp into `[-1, 1]`
pub fn clamp_ratio(value: f64) -> f64 {
    clamp(value, -1.0, 1.0)
}

/// Round to the nearest multiple of `step`
///
/// Public helper for hosts snapping input, such as wheel deltas or pointer
/// positions, to a grid before handing them to a surface. A zero `step`
/// passes `value` through.
///
/// ```rust
/// use tilted_core::math::round_to_nearest_multiple;
///
/// assert_eq!(round_to_nearest_multiple(37.0, 10.0), 40.0);
/// assert_eq!(round_to_nearest_multiple(-120.0, 100.0), -100.0);
/// assert_eq!(round_to_nearest_multiple(3.3, 0.0), 3.3);
/// ```
pub fn round_to_nearest_multiple(value: f64, step: f64) -> f64 {
    if step == 0.0 {
        return value;
    }
    (value / step).round() * step
}

/// Find the entry of `values` closest to `value`
///
/// Linear scan; step tables hold a handful of entries. Ties resolve to the
/// lower index. Returns `None` for an empty slice.
pub fn nearest(value: f64, values: &[f64]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &candidate) in values.iter().enumerate() {
        let distance = (candidate - value).abs();
        match best {
            Some((best_index, _)) if (values[best_index] - value).abs() <= distance => {}
            _ => best = Some((index, candidate)),
        }
    }
    best
}

/// Sign of `value` as `1.0` or `-1.0` (zero counts as positive)
pub fn sign(value: f64) -> f64 {
    if value < 0.0 {
        -1.0
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round() {
        assert_eq!(round(1.23456, 2), 1.23);
        assert_eq!(round(1.235, 0), 1.0);
        assert_eq!(round(-2.5, 0), -3.0);
        assert_eq!(round(0.1 + 0.2, 3), 0.3);
        assert!(round(-0.0001, 2).is_sign_positive());
    }

    #[test]
    fn test_round_opt_passthrough() {
        assert_eq!(round_opt(1.23456, None), 1.23456);
        assert_eq!(round_opt(1.23456, Some(1)), 1.2);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(50.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp_ratio(3.0), 1.0);
        assert_eq!(clamp_ratio(-3.0), -1.0);
    }

    #[test]
    fn test_round_to_nearest_multiple() {
        assert_eq!(round_to_nearest_multiple(7.0, 5.0), 5.0);
        assert_eq!(round_to_nearest_multiple(8.0, 5.0), 10.0);
        assert_eq!(round_to_nearest_multiple(8.0, 0.0), 8.0);
    }

    #[test]
    fn test_nearest() {
        let values = [0.25, 0.5, 0.75, 1.0];
        assert_eq!(nearest(0.6, &values), Some((1, 0.5)));
        assert_eq!(nearest(0.7, &values), Some((2, 0.75)));
        assert_eq!(nearest(5.0, &values), Some((3, 1.0)));
        assert_eq!(nearest(-5.0, &values), Some((0, 0.25)));
        assert_eq!(nearest(0.5, &[]), None);
    }
}
