//! Stepped scale state and the derived tilt
//!
//! The committed scale is always one entry of the step table. Zoom requests
//! are accumulated against the target of any in-flight zoom and snapped to
//! the nearest entry before a new zoom is created, so rapid input still
//! settles exactly on a step.

use tilted_animation::{Animations, ScaleTarget, Zoom};
use tilted_core::math::{clamp, round, round_opt};
use tilted_core::{Config, Coords, Easing, Rounding, StepTable};

/// Linear map from scale to tilt angle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tilt {
    pub scale_min: f64,
    pub scale_max: f64,
    pub angle_min: f64,
    pub angle_max: f64,
    pub rounding: u32,
}

impl Tilt {
    pub fn from_config(config: &Config) -> Self {
        Self {
            scale_min: config.scale_min,
            scale_max: config.scale_max,
            angle_min: config.tilt_min,
            angle_max: config.tilt_max,
            rounding: config.tilt_rounding,
        }
    }

    /// Tilt in degrees at `scale`
    pub fn angle(&self, scale: f64) -> f64 {
        let span = self.scale_max - self.scale_min;
        let percent = if span > 0.0 {
            (scale - self.scale_min) / span
        } else {
            1.0
        };
        round(
            self.angle_min + percent * (self.angle_max - self.angle_min),
            self.rounding,
        )
    }
}

/// A zoom that was created
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomChange {
    /// Scale when the zoom started, possibly mid-flight
    pub initial: f64,
    /// Where the previous request would have landed
    pub from: f64,
    /// Table value the zoom lands on
    pub target: f64,
}

impl ZoomChange {
    /// Shift actually scheduled relative to the previous pending target
    pub fn shift(&self) -> f64 {
        self.target - self.from
    }
}

/// Glide that keeps the point under the pointer in place while zooming
///
/// `offset` is the pointer relative to the container center, `from` the
/// pending scale before the request, `requested` the shift asked for and
/// `actual` the shift the table allowed. A zoom shortened by a bound gets a
/// proportionally shorter glide.
pub fn pointer_compensation(
    offset: Coords,
    factor: f64,
    from: f64,
    requested: f64,
    actual: f64,
) -> Coords {
    let to = from + requested;
    if requested == 0.0 || from <= 0.0 || to <= 0.0 {
        return Coords::ZERO;
    }
    offset * (factor / from * (1.0 - from / to) * (actual / requested).abs())
}

/// Scale state of one surface
#[derive(Clone, Debug, PartialEq)]
pub struct Scale {
    value: f64,
    steps: StepTable,
    rounding: Rounding,
    tilt: Tilt,
    angle: f64,
    changed: bool,
}

impl Scale {
    /// Start at `value`, snapped to the table
    pub fn new(value: f64, steps: StepTable, rounding: Rounding, tilt: Tilt) -> Self {
        let value = steps.nearest(value);
        Self {
            value,
            angle: tilt.angle(value),
            steps,
            rounding,
            tilt,
            changed: false,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Current tilt in degrees
    pub fn tilt(&self) -> f64 {
        self.angle
    }

    pub fn steps(&self) -> &StepTable {
        &self.steps
    }

    pub fn min(&self) -> f64 {
        self.steps.first()
    }

    pub fn max(&self) -> f64 {
        self.steps.last()
    }

    /// Interim and committed scale precision
    pub fn rounding(&self) -> Rounding {
        self.rounding
    }

    /// Check and clear the changed flag
    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    /// Where the scale settles once the in-flight zoom finishes
    pub fn pending(&self, animations: &Animations) -> f64 {
        round_opt(
            self.value + animations.storage().zoom_remaining(),
            self.rounding.committed,
        )
    }

    /// Shift covering `steps` table entries from the pending target
    ///
    /// Past a bound the table spacing is extrapolated, so the shift reports
    /// the full request and [`Scale::zoom`] clamps it.
    pub fn step_shift(&self, animations: &Animations, steps: i32) -> f64 {
        if steps == 0 {
            return 0.0;
        }
        let pending = self.pending(animations);
        let index = self.steps.nearest_index(pending);
        self.steps.offset(index, steps) - pending
    }

    /// Zoom by `shift`, accumulated against the in-flight zoom
    ///
    /// Returns `None` when the snapped target equals the pending one.
    pub fn zoom(
        &self,
        animations: &mut Animations,
        now: f64,
        shift: f64,
        duration: f64,
        easing: Easing,
    ) -> Option<ZoomChange> {
        if shift == 0.0 || !shift.is_finite() {
            return None;
        }

        let from = self.pending(animations);
        let projection = clamp(from + shift, self.min(), self.max());
        let target = self.steps.nearest(projection);
        if target == from {
            tracing::trace!("Zoom by {} stays on {}", shift, from);
            return None;
        }

        animations.zoom(Zoom::new(now, self.value, target, duration, easing, self.rounding));
        Some(ZoomChange {
            initial: self.value,
            from,
            target,
        })
    }

    /// Zoom toward the table step nearest to `value`
    pub fn zoom_to(
        &self,
        animations: &mut Animations,
        now: f64,
        value: f64,
        duration: f64,
        easing: Easing,
    ) -> Option<ZoomChange> {
        let target = self.steps.nearest(value);
        let shift = target - self.pending(animations);
        self.zoom(animations, now, shift, duration, easing)
    }

    fn commit(&mut self, value: f64) {
        self.value = value;
        self.angle = self.tilt.angle(value);
        self.changed = true;
    }
}

impl ScaleTarget for Scale {
    fn value(&self) -> f64 {
        self.value
    }

    fn change(&mut self, delta: f64, rounding: Rounding) -> bool {
        let delta = round_opt(delta, rounding.interim);
        if delta == 0.0 {
            return false;
        }

        let next = clamp(
            round_opt(self.value + delta, rounding.committed),
            self.min(),
            self.max(),
        );
        if next == self.value {
            return false;
        }

        self.commit(next);
        true
    }

    fn change_to(&mut self, value: f64) -> bool {
        let value = clamp(
            round_opt(value, self.rounding.committed),
            self.min(),
            self.max(),
        );
        if value == self.value {
            return false;
        }
        self.commit(value);
        true
    }
}
