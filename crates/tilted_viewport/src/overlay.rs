//! Overlays: content kept upright against the surface tilt
//!
//! A Scene counter-rotates every child of a container, a Figure a single
//! element. Either way the host receives one [`OverlayTransform`] per overlay.

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use tilted_core::math;

new_key_type! {
    /// Unique identifier for an overlay on one surface
    pub struct OverlayId;
}

/// What an overlay counter-rotates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayKind {
    /// All children of a container
    #[default]
    Scene,
    /// One element
    Figure,
}

/// A registered overlay
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Overlay {
    pub kind: OverlayKind,
    /// Multiplier on the counter-rotation, 1 cancels the tilt exactly
    pub factor: f64,
}

impl Overlay {
    pub fn new(kind: OverlayKind, factor: f64) -> Self {
        Self { kind, factor }
    }

    /// Counter-rotation for a surface tilted by `rotate_x` degrees
    pub fn transform(&self, rotate_x: f64, rounding: u32) -> OverlayTransform {
        OverlayTransform {
            kind: self.kind,
            rotate_x: math::round(-rotate_x * self.factor, rounding),
        }
    }
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new(OverlayKind::Scene, 1.0)
    }
}

/// Output for one overlay
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct OverlayTransform {
    pub kind: OverlayKind,
    /// Rotation around the x axis in degrees
    pub rotate_x: f64,
}

impl OverlayTransform {
    pub fn to_css(&self) -> String {
        format!("rotateX({}deg)", self.rotate_x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_rotation() {
        let overlay = Overlay::new(OverlayKind::Figure, 0.5);
        let transform = overlay.transform(17.5, 2);
        assert_eq!(transform.rotate_x, -8.75);
        assert_eq!(transform.kind, OverlayKind::Figure);
        assert_eq!(transform.to_css(), "rotateX(-8.75deg)");
    }

    #[test]
    fn test_untilted_surface_is_not_negative_zero() {
        let transform = Overlay::default().transform(0.0, 2);
        assert_eq!(transform.to_css(), "rotateX(0deg)");
    }
}
