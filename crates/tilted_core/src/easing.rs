//! Easing functions for animation timing
//!
//! Every curve maps a clamped time ratio in `[0, 1]` to a progress ratio and
//! returns exactly `1.0` at the end, which is what animations use to detect
//! completion.

use serde::{Deserialize, Serialize};

/// Easing curve
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Easing {
    /// No easing
    Linear,

    /// Fast start, long gentle stop; used for glides, zooms and tosses
    #[default]
    EaseOutCirc,

    /// Cubic deceleration
    EaseOutCubic,

    /// Quadratic deceleration
    EaseOutQuad,

    /// Cubic acceleration then deceleration
    EaseInOutCubic,

    /// Custom CSS-style cubic bezier with control points `(x1, y1)` and `(x2, y2)`
    ///
    /// `x1` and `x2` are clamped into `[0, 1]` when evaluated.
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Easing {
    /// `cubic-bezier(0, 0.55, 0.45, 1)`, the bezier form of [`Easing::EaseOutCirc`]
    pub const OUT_CIRC_BEZIER: Easing = Easing::CubicBezier {
        x1: 0.0,
        y1: 0.55,
        x2: 0.45,
        y2: 1.0,
    };

    /// Evaluate the curve at time ratio `t`
    pub fn evaluate(&self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        if t >= 1.0 {
            return 1.0;
        }
        if t <= 0.0 {
            return 0.0;
        }

        match *self {
            Self::Linear => t,
            Self::EaseOutCirc => (1.0 - (t - 1.0).powi(2)).sqrt(),
            Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Self::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Self::CubicBezier { x1, y1, x2, y2 } => {
                cubic_bezier(x1.clamp(0.0, 1.0), y1, x2.clamp(0.0, 1.0), y2, t)
            }
        }
    }
}

/// Evaluate a cubic bezier timing curve at progress `x`
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    let t = solve_bezier_x(x1, x2, x);
    bezier_component(y1, y2, t)
}

/// Newton-Raphson for the curve parameter whose x equals `target`, with a
/// bisection fallback when the derivative flattens out
fn solve_bezier_x(x1: f64, x2: f64, target: f64) -> f64 {
    let mut t = target;
    for _ in 0..8 {
        let error = bezier_component(x1, x2, t) - target;
        if error.abs() < 1e-7 {
            return t;
        }
        let derivative = bezier_derivative(x1, x2, t);
        if derivative.abs() < 1e-7 {
            break;
        }
        t = (t - error / derivative).clamp(0.0, 1.0);
    }

    let (mut low, mut high) = (0.0, 1.0);
    t = target;
    for _ in 0..32 {
        let x = bezier_component(x1, x2, t);
        if (x - target).abs() < 1e-7 {
            break;
        }
        if x < target {
            low = t;
        } else {
            high = t;
        }
        t = (low + high) / 2.0;
    }
    t
}

/// One coordinate of the curve: `3(1-t)²t·p1 + 3(1-t)t²·p2 + t³`
#[inline]
fn bezier_component(p1: f64, p2: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t
}

#[inline]
fn bezier_derivative(p1: f64, p2: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 0.001;

    fn all() -> [Easing; 7] {
        [
            Easing::Linear,
            Easing::EaseOutCirc,
            Easing::EaseOutCubic,
            Easing::EaseOutQuad,
            Easing::EaseInOutCubic,
            Easing::OUT_CIRC_BEZIER,
            Easing::CubicBezier {
                x1: 0.42,
                y1: 0.0,
                x2: 0.58,
                y2: 1.0,
            },
        ]
    }

    #[test]
    fn test_endpoints_exact() {
        for easing in all() {
            assert_eq!(easing.evaluate(0.0), 0.0, "{:?} at 0", easing);
            assert_eq!(easing.evaluate(1.0), 1.0, "{:?} at 1", easing);
            assert_eq!(easing.evaluate(7.0), 1.0, "{:?} past the end", easing);
            assert_eq!(easing.evaluate(-1.0), 0.0, "{:?} before the start", easing);
        }
    }

    #[test]
    fn test_monotonic() {
        for easing in all() {
            let mut previous = 0.0;
            for i in 1..=100 {
                let value = easing.evaluate(i as f64 / 100.0);
                assert!(value + EPSILON >= previous, "{:?} decreased at {}", easing, i);
                previous = value;
            }
        }
    }

    #[test]
    fn test_ease_out_is_front_loaded() {
        assert!(Easing::EaseOutCirc.evaluate(0.25) > 0.5);
        assert!(Easing::EaseOutCubic.evaluate(0.5) > 0.5);
        assert!((Easing::Linear.evaluate(0.3) - 0.3).abs() < EPSILON);
    }

    #[test]
    fn test_bezier_matches_closed_form_roughly() {
        for i in 1..10 {
            let t = i as f64 / 10.0;
            let closed = Easing::EaseOutCirc.evaluate(t);
            let bezier = Easing::OUT_CIRC_BEZIER.evaluate(t);
            assert!((closed - bezier).abs() < 0.1, "t={} closed={} bezier={}", t, closed, bezier);
        }
    }

    #[test]
    fn test_nan_input() {
        assert_eq!(Easing::EaseOutCirc.evaluate(f64::NAN), 0.0);
    }
}
