//! Zoom: eased scale animation between step-table values

use tilted_core::{Easing, Rounding};

use super::{AnimationState, ScaleTarget, Signed};

/// Eased scale animation
///
/// The target is stored as given rather than recomputed from
/// `initial + shift`, so the final write lands on the exact table value.
#[derive(Clone, Debug)]
pub struct Zoom {
    state: AnimationState,
    initial: f64,
    target: f64,
    shift: Signed,
    applied: f64,
    duration: f64,
    easing: Easing,
    rounding: Rounding,
}

impl Zoom {
    /// Zoom from `initial` to `target` over `duration` ms
    pub fn new(
        now: f64,
        initial: f64,
        target: f64,
        duration: f64,
        easing: Easing,
        rounding: Rounding,
    ) -> Self {
        tracing::debug!(
            "Zoom created: shift {}, initial {}, target {}, {}ms",
            target - initial,
            initial,
            target,
            duration
        );
        Self {
            state: AnimationState::new(now),
            initial,
            target,
            shift: Signed::split(target - initial),
            applied: 0.0,
            duration,
            easing,
            rounding,
        }
    }

    pub fn initial(&self) -> f64 {
        self.initial
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Signed total shift
    pub fn shift(&self) -> f64 {
        self.shift.magnitude * self.shift.sign
    }

    /// Signed shift not applied yet
    pub fn remaining(&self) -> f64 {
        self.shift.remaining(self.applied)
    }

    /// `initial / target`, the ratio a tied glide bends its progress by
    pub fn scale_ratio(&self) -> f64 {
        if self.target > 0.0 {
            self.initial / self.target
        } else {
            1.0
        }
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

    /// Advance to `now`; returns whether the zoom wants another step
    pub fn step<S: ScaleTarget + ?Sized>(&mut self, now: f64, scale: &mut S) -> bool {
        if self.state.is_destroyed() {
            return false;
        }

        let time_ratio = self.state.time_ratio(now, self.duration);
        let shift_ratio = self.easing.evaluate(time_ratio);

        if shift_ratio >= 1.0 {
            scale.change_to(self.target);
            self.applied = self.shift.magnitude;
            self.state.touch(now);
            tracing::debug!(
                "Zoom finished: {}ms, scale {}, target {}",
                self.state.elapsed(now),
                scale.value(),
                self.target
            );
            return false;
        }

        let precision = self.rounding.interim;
        let increment = self.shift.increment(shift_ratio, self.applied, precision);
        if increment > 0.0 {
            scale.change(increment * self.shift.sign, self.rounding.interim_only());
            self.applied = tilted_core::math::round_opt(self.applied + increment, precision);
            self.state.touch(now);
            tracing::trace!(
                "Zoom step: {}ms, ratio {:.4}, increment {}",
                self.state.elapsed(now),
                shift_ratio,
                increment
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
