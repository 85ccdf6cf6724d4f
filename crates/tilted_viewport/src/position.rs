//! Clamped pan state
//!
//! Coordinates are the point of the content shown at the container center,
//! relative to the content center. They always sit inside `[min, max]` and are
//! always rounded to the committed coordinate precision once a move settles.

use tilted_animation::{Animations, GlideRequest, PositionTarget, ZoomTie};
use tilted_core::{Coords, Easing, Rounding, Size};

/// Pan limit per axis: `round(content / 2 - container / 4)`
///
/// Content smaller than half the container cannot be panned at all.
pub fn pan_limit(container: Size, content: Size) -> Coords {
    let axis = |content: f64, container: f64| (content / 2.0 - container * 0.25).round().max(0.0);
    Coords::new(
        axis(content.width, container.width),
        axis(content.height, container.height),
    )
}

/// Pan state of one surface
#[derive(Clone, Debug, PartialEq)]
pub struct Position {
    coords: Coords,
    limit: Coords,
    rounding: Rounding,
    changed: bool,
}

impl Position {
    /// Centered position for the given geometry
    pub fn new(container: Size, content: Size, rounding: Rounding) -> Self {
        Self {
            coords: Coords::ZERO,
            limit: pan_limit(container, content),
            rounding,
            changed: false,
        }
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    pub fn limit(&self) -> Coords {
        self.limit
    }

    pub fn min(&self) -> Coords {
        Coords::ZERO - self.limit
    }

    pub fn max(&self) -> Coords {
        self.limit
    }

    /// Interim and committed coordinate precision
    pub fn rounding(&self) -> Rounding {
        self.rounding
    }

    /// Recompute the limits for new geometry
    ///
    /// Coordinates are left alone; call [`Position::enforce_limits`] to pull
    /// them back inside.
    pub fn set_geometry(&mut self, container: Size, content: Size) {
        self.limit = pan_limit(container, content);
    }

    /// Move back inside the current limits; returns whether anything moved
    pub fn enforce_limits(&mut self) -> bool {
        let clamped = self.coords.clamp(self.min(), self.max());
        self.move_to(clamped)
    }

    /// Check and clear the changed flag
    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    /// Part of `vector` a glide can still add on top of `pending`
    ///
    /// `pending` is what an in-flight glide has yet to apply. The endpoint is
    /// rounded and clamped; `None` means the request adds nothing.
    pub fn reachable(&self, pending: Coords, vector: Coords, rounding: Rounding) -> Option<Coords> {
        let vector = vector.round(rounding.interim);
        if vector.is_zero() {
            return None;
        }

        let base = self.coords + pending;
        let endpoint = (base + vector)
            .round(rounding.committed)
            .clamp(self.min(), self.max());
        let contribution = (endpoint - base).round(rounding.interim);
        if contribution.is_zero() {
            None
        } else {
            Some(contribution)
        }
    }

    /// Glide by `vector`, merged with any in-flight glide
    ///
    /// Returns whether a glide was created.
    pub fn glide(
        &self,
        animations: &mut Animations,
        now: f64,
        vector: Coords,
        duration: f64,
        easing: Easing,
        tie: Option<ZoomTie>,
    ) -> bool {
        self.glide_with(animations, now, vector, duration, easing, tie, self.rounding)
    }

    /// Glide to absolute `coords`
    pub fn glide_to(
        &self,
        animations: &mut Animations,
        now: f64,
        coords: Coords,
        duration: f64,
        easing: Easing,
    ) -> bool {
        let coords = coords.round(self.rounding.committed);
        if coords == self.coords {
            return false;
        }
        let rounding = Rounding::new(None, self.rounding.committed);
        self.glide_with(animations, now, coords - self.coords, duration, easing, None, rounding)
    }

    #[allow(clippy::too_many_arguments)]
    fn glide_with(
        &self,
        animations: &mut Animations,
        now: f64,
        vector: Coords,
        duration: f64,
        easing: Easing,
        tie: Option<ZoomTie>,
        rounding: Rounding,
    ) -> bool {
        let pending = animations.storage().glide_remaining();
        let Some(contribution) = self.reachable(pending, vector, rounding) else {
            tracing::trace!("Glide ({}, {}) adds nothing", vector.x, vector.y);
            return false;
        };

        let mut request = GlideRequest::new(contribution, duration, easing);
        if let Some(tie) = tie {
            request = request.tied_to(tie);
        }
        animations.glide(now, self.coords, request, self.rounding);
        true
    }
}

impl PositionTarget for Position {
    fn coords(&self) -> Coords {
        self.coords
    }

    fn move_by(&mut self, vector: Coords, rounding: Rounding) -> bool {
        let vector = vector.round(rounding.interim);
        if vector.is_zero() {
            return false;
        }

        let next = (self.coords + vector)
            .round(rounding.committed)
            .clamp(self.min(), self.max());
        if next == self.coords {
            return false;
        }

        self.coords = next;
        self.changed = true;
        true
    }

    fn move_to(&mut self, coords: Coords) -> bool {
        let coords = coords.round(self.rounding.committed);
        if coords == self.coords {
            return false;
        }
        self.move_by(coords - self.coords, Rounding::new(None, self.rounding.committed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilted_animation::AnimationKind;

    fn position() -> Position {
        Position::new(
            Size::new(1600.0, 900.0),
            Size::new(3200.0, 1800.0),
            Rounding::new(Some(1), Some(0)),
        )
    }

    #[test]
    fn test_limits() {
        let position = position();
        assert_eq!(position.max(), Coords::new(1200.0, 675.0));
        assert_eq!(position.min(), Coords::new(-1200.0, -675.0));
    }

    #[test]
    fn test_small_content_cannot_pan() {
        let limit = pan_limit(Size::new(1600.0, 900.0), Size::new(400.0, 300.0));
        assert_eq!(limit, Coords::ZERO);
    }

    #[test]
    fn test_zero_move_is_noop() {
        let mut position = position();
        assert!(!position.move_by(Coords::ZERO, position.rounding()));
        assert!(!position.move_by(Coords::new(0.01, -0.04), position.rounding()));
        assert!(!position.take_changed());
    }

    #[test]
    fn test_move_clamps() {
        let mut position = position();
        assert!(position.move_by(Coords::new(10000.0, -10000.0), position.rounding()));
        assert_eq!(position.coords(), Coords::new(1200.0, -675.0));
        assert!(position.take_changed());
        assert!(!position.move_by(Coords::new(5.0, -5.0), position.rounding()));
    }

    #[test]
    fn test_move_to_is_idempotent() {
        let mut position = position();
        assert!(position.move_to(Coords::new(12.4, -7.6)));
        assert_eq!(position.coords(), Coords::new(12.0, -8.0));
        assert!(!position.move_to(Coords::new(12.0, -8.0)));
    }

    #[test]
    fn test_enforce_limits_after_shrink() {
        let mut position = position();
        position.move_to(Coords::new(1000.0, 600.0));
        position.set_geometry(Size::new(1600.0, 900.0), Size::new(1600.0, 900.0));
        assert_eq!(position.max(), Coords::new(400.0, 225.0));
        assert!(position.enforce_limits());
        assert_eq!(position.coords(), Coords::new(400.0, 225.0));
        assert!(!position.enforce_limits());
    }

    #[test]
    fn test_glide_clamps_against_pending_endpoint() {
        let position = position();
        let mut animations = Animations::new();

        assert!(position.glide(
            &mut animations,
            0.0,
            Coords::new(1000.0, 0.0),
            400.0,
            Easing::EaseOutCirc,
            None
        ));
        assert!(position.glide(
            &mut animations,
            0.0,
            Coords::new(1000.0, 0.0),
            400.0,
            Easing::EaseOutCirc,
            None
        ));
        let glide = animations.storage().glide().map(|glide| glide.remaining());
        assert_eq!(glide, Some(Coords::new(1200.0, 0.0)));

        // Already headed for the bound
        assert!(!position.glide(
            &mut animations,
            0.0,
            Coords::new(1.0, 0.0),
            400.0,
            Easing::EaseOutCirc,
            None
        ));
        assert!(animations.exists(AnimationKind::Glide));
    }

    #[test]
    fn test_glide_to() {
        let position = position();
        let mut animations = Animations::new();
        assert!(!position.glide_to(&mut animations, 0.0, Coords::new(0.2, -0.3), 400.0, Easing::Linear));
        assert!(position.glide_to(&mut animations, 0.0, Coords::new(-50.0, 25.0), 400.0, Easing::Linear));
        let target = animations.storage().glide().map(|glide| glide.target());
        assert_eq!(target, Some(Coords::new(-50.0, 25.0)));
    }
}
