//! Geometry types in surface space
//!
//! Coordinates double as vectors: a pan request, an in-flight remainder and
//! a committed position are all [`Coords`].

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::math::{clamp, round_opt};

/// 2D point or vector
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Coords {
    pub x: f64,
    pub y: f64,
}

impl Coords {
    pub const ZERO: Coords = Coords { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Round both components, `None` leaves them untouched
    pub fn round(self, precision: Option<u32>) -> Self {
        Self::new(round_opt(self.x, precision), round_opt(self.y, precision))
    }

    /// Clamp both components into the box `[min, max]`
    pub fn clamp(self, min: Coords, max: Coords) -> Self {
        Self::new(clamp(self.x, min.x, max.x), clamp(self.y, min.y, max.y))
    }

    /// Componentwise absolute value
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl Add for Coords {
    type Output = Coords;

    fn add(self, rhs: Coords) -> Coords {
        Coords::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Coords {
    fn add_assign(&mut self, rhs: Coords) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Coords {
    type Output = Coords;

    fn sub(self, rhs: Coords) -> Coords {
        Coords::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Coords {
    type Output = Coords;

    fn mul(self, rhs: f64) -> Coords {
        Coords::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Coords {
    type Output = Coords;

    fn div(self, rhs: f64) -> Coords {
        Coords::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Coords {
    type Output = Coords;

    fn neg(self) -> Coords {
        Coords::new(-self.x, -self.y)
    }
}

impl From<(f64, f64)> for Coords {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Point in the middle of a box of this size anchored at the origin
    pub fn center(&self) -> Coords {
        Coords::new(self.width / 2.0, self.height / 2.0)
    }

    /// Both dimensions finite and strictly positive
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl From<(f64, f64)> for Size {
    fn from((width, height): (f64, f64)) -> Self {
        Self::new(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_ops() {
        let a = Coords::new(1.0, 2.0);
        let b = Coords::new(3.0, -4.0);
        assert_eq!(a + b, Coords::new(4.0, -2.0));
        assert_eq!(a - b, Coords::new(-2.0, 6.0));
        assert_eq!(a * 2.0, Coords::new(2.0, 4.0));
        assert_eq!(b / 2.0, Coords::new(1.5, -2.0));
        assert_eq!(-a, Coords::new(-1.0, -2.0));
        assert_eq!(b.abs(), Coords::new(3.0, 4.0));
        assert_eq!(b.length(), 5.0);
    }

    #[test]
    fn test_round_and_clamp() {
        let c = Coords::new(1.26, -7.5);
        assert_eq!(c.round(Some(1)), Coords::new(1.3, -7.5));
        assert_eq!(c.round(None), c);
        let clamped = c.clamp(Coords::new(-5.0, -5.0), Coords::new(1.0, 5.0));
        assert_eq!(clamped, Coords::new(1.0, -5.0));
    }

    #[test]
    fn test_size() {
        let size = Size::new(3200.0, 1800.0);
        assert_eq!(size.center(), Coords::new(1600.0, 900.0));
        assert!(size.is_valid());
        assert!(!Size::ZERO.is_valid());
        assert!(!Size::new(f64::NAN, 1.0).is_valid());
    }
}
