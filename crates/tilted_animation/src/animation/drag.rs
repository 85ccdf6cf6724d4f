//! Drag: pointer-tracked pan
//!
//! Not time based; the input collaborator steps it on every pointer move.
//! A quick release hands the gesture over to a toss glide.

use tilted_core::{Coords, Rounding};

use super::{AnimationState, PositionTarget};

/// Pointer-tracked pan
#[derive(Clone, Debug)]
pub struct Drag {
    state: AnimationState,
    previous: Coords,
    displacement: Coords,
    rounding: Rounding,
}

impl Drag {
    /// Start tracking from `pointer`
    pub fn new(now: f64, pointer: Coords, rounding: Rounding) -> Self {
        tracing::debug!("Drag created at ({}, {})", pointer.x, pointer.y);
        Self {
            state: AnimationState::new(now),
            previous: pointer,
            displacement: Coords::ZERO,
            rounding,
        }
    }

    /// Total content displacement in pointer space (`start - current`)
    pub fn displacement(&self) -> Coords {
        self.displacement
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Follow the pointer to `pointer`; returns whether the position changed
    pub fn step<P: PositionTarget + ?Sized>(
        &mut self,
        now: f64,
        pointer: Coords,
        position: &mut P,
        scale: f64,
    ) -> bool {
        if self.state.is_destroyed() {
            return false;
        }

        let delta = self.previous - pointer;
        let moved = position.move_by(delta / scale, self.rounding);
        self.displacement += delta;
        self.previous = pointer;
        self.state.touch(now);
        moved
    }

    /// End the drag at `now`
    ///
    /// Returns the toss vector when the whole gesture took less than
    /// `threshold` ms: `displacement · factor / scale`.
    pub fn release(&mut self, now: f64, scale: f64, threshold: f64, factor: f64) -> Option<Coords> {
        if self.state.is_destroyed() {
            return None;
        }
        self.state.destroy();

        let elapsed = self.state.elapsed(now);
        if elapsed < threshold && !self.displacement.is_zero() {
            let toss = self.displacement * factor / scale;
            tracing::debug!(
                "Drag released after {}ms, toss ({}, {})",
                elapsed,
                toss.x,
                toss.y
            );
            Some(toss)
        } else {
            tracing::debug!("Drag released after {}ms", elapsed);
            None
        }
    }

    pub fn destroy(&mut self) {
        self.state.destroy();
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.is_destroyed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::testing::TestPosition;

    fn rounding() -> Rounding {
        Rounding::new(Some(1), Some(0))
    }

    #[test]
    fn test_drag_follows_pointer_descaled() {
        let mut position = TestPosition::new(1000.0);
        let mut drag = Drag::new(0.0, Coords::new(100.0, 100.0), rounding());

        assert!(drag.step(10.0, Coords::new(80.0, 110.0), &mut position, 0.5));
        assert_eq!(position.coords, Coords::new(40.0, -20.0));
        assert_eq!(drag.displacement(), Coords::new(20.0, -10.0));
    }

    #[test]
    fn test_quick_release_tosses() {
        let mut position = TestPosition::new(1000.0);
        let mut drag = Drag::new(0.0, Coords::new(100.0, 0.0), rounding());
        drag.step(50.0, Coords::new(50.0, 0.0), &mut position, 0.5);

        let toss = drag.release(100.0, 0.5, 150.0, 4.0);
        assert_eq!(toss, Some(Coords::new(50.0 * 4.0 / 0.5, 0.0)));
        assert!(drag.is_destroyed());
    }

    #[test]
    fn test_slow_release_does_not_toss() {
        let mut position = TestPosition::new(1000.0);
        let mut drag = Drag::new(0.0, Coords::new(100.0, 0.0), rounding());
        drag.step(50.0, Coords::new(50.0, 0.0), &mut position, 1.0);
        assert_eq!(drag.release(400.0, 1.0, 150.0, 4.0), None);
    }

    #[test]
    fn test_release_twice() {
        let mut drag = Drag::new(0.0, Coords::ZERO, rounding());
        assert_eq!(drag.release(10.0, 1.0, 150.0, 4.0), None);
        assert_eq!(drag.release(20.0, 1.0, 150.0, 4.0), None);
    }
}
