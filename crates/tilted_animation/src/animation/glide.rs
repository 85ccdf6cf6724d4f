//! Glide: eased pan toward a relative target
//!
//! Each step applies only the increment between what the easing curve asks
//! for and what was already applied, so a glide coexists with other writers
//! (an edge pan, a drag) instead of fighting them. Once the curve reaches 1
//! the glide snaps to its precomputed target, which removes any drift the
//! interim rounding accumulated.

use tilted_core::{Coords, Easing, Rounding};

use super::{AnimationState, PositionTarget, Signed};

/// Couples a glide's progress to a concurrent zoom
///
/// While scale moves from `initial` to `target`, keeping a screen point fixed
/// needs a pan that is not proportional to zoom progress. With
/// `r = initial / target`, the pan fraction for zoom progress `x` is
/// `x / (r + x·(1 − r))`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomTie {
    scale_ratio: f64,
}

impl ZoomTie {
    pub fn new(initial: f64, target: f64) -> Self {
        let scale_ratio = if target > 0.0 && initial > 0.0 {
            initial / target
        } else {
            1.0
        };
        Self { scale_ratio }
    }

    pub fn scale_ratio(&self) -> f64 {
        self.scale_ratio
    }

    /// Transform a progress ratio
    pub fn apply(&self, x: f64) -> f64 {
        if x >= 1.0 {
            return 1.0;
        }
        let r = self.scale_ratio;
        let denominator = r + x * (1.0 - r);
        if denominator <= 0.0 {
            return x;
        }
        x / denominator
    }
}

/// Eased positional animation
#[derive(Clone, Debug)]
pub struct Glide {
    state: AnimationState,
    initial: Coords,
    target: Coords,
    x: Signed,
    y: Signed,
    applied: Coords,
    duration: f64,
    easing: Easing,
    tie: Option<ZoomTie>,
    rounding: Rounding,
}

impl Glide {
    /// Glide by `vector` from `initial` over `duration` ms
    pub fn new(
        now: f64,
        initial: Coords,
        vector: Coords,
        duration: f64,
        easing: Easing,
        rounding: Rounding,
    ) -> Self {
        let glide = Self {
            state: AnimationState::new(now),
            initial,
            target: initial + vector,
            x: Signed::split(vector.x),
            y: Signed::split(vector.y),
            applied: Coords::ZERO,
            duration,
            easing,
            tie: None,
            rounding,
        };
        tracing::debug!(
            "Glide created: vector ({}, {}), initial ({}, {}), target ({}, {}), {}ms",
            vector.x,
            vector.y,
            initial.x,
            initial.y,
            glide.target.x,
            glide.target.y,
            duration
        );
        glide
    }

    /// Tie progress to a concurrent zoom
    pub fn tied_to(mut self, tie: ZoomTie) -> Self {
        self.tie = Some(tie);
        self
    }

    pub fn tie(&self) -> Option<ZoomTie> {
        self.tie
    }

    pub fn initial(&self) -> Coords {
        self.initial
    }

    pub fn target(&self) -> Coords {
        self.target
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Signed part of the vector not applied yet
    pub fn remaining(&self) -> Coords {
        Coords::new(
            self.x.remaining(self.applied.x),
            self.y.remaining(self.applied.y),
        )
    }

    /// Progress ratio at `now`, after the zoom tie if any
    pub fn move_ratio(&self, now: f64) -> f64 {
        let time_ratio = self.state.time_ratio(now, self.duration);
        let ratio = self.easing.evaluate(time_ratio);
        match self.tie {
            Some(tie) => tie.apply(ratio),
            None => ratio,
        }
    }

    /// Advance to `now`; returns whether the glide wants another step
    pub fn step<P: PositionTarget + ?Sized>(&mut self, now: f64, position: &mut P) -> bool {
        if self.state.is_destroyed() {
            return false;
        }

        let move_ratio = self.move_ratio(now);

        if move_ratio >= 1.0 {
            position.move_to(self.target);
            self.applied = Coords::new(self.x.magnitude, self.y.magnitude);
            self.state.touch(now);
            tracing::debug!(
                "Glide finished: {}ms, coords ({}, {}), target ({}, {})",
                self.state.elapsed(now),
                position.coords().x,
                position.coords().y,
                self.target.x,
                self.target.y
            );
            return false;
        }

        let precision = self.rounding.interim;
        let increment = Coords::new(
            self.x.increment(move_ratio, self.applied.x, precision),
            self.y.increment(move_ratio, self.applied.y, precision),
        );

        if increment.x > 0.0 || increment.y > 0.0 {
            position.move_by(
                Coords::new(increment.x * self.x.sign, increment.y * self.y.sign),
                self.rounding.interim_only(),
            );
            self.applied = (self.applied + increment).round(precision);
            self.state.touch(now);
            tracing::trace!(
                "Glide step: {}ms, ratio {:.4}, increment ({}, {})",
                self.state.elapsed(now),
                move_ratio,
                increment.x,
                increment.y
            );
        }

        true
    }

    pub fn destroy(&mut self) {
        self.state.destroy();
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.is_destroyed()
    }
}
