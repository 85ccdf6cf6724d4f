//! Animation primitives
//!
//! Every animation starts active and ends destroyed. Destruction is terminal:
//! a destroyed animation ignores further steps and reports that it is done.

pub mod drag;
pub mod edge;
pub mod glide;
pub mod zoom;

use tilted_core::{math, Coords, Rounding};

/// The four animation kinds, in the order the executor steps them
///
/// Drag is listed last; it is driven by input, never by the executor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    Glide,
    Zoom,
    Edge,
    Drag,
}

impl AnimationKind {
    /// Kinds stepped on every tick, in stepping order
    pub const TICKED: [AnimationKind; 3] = [Self::Glide, Self::Zoom, Self::Edge];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Glide => "glide",
            Self::Zoom => "zoom",
            Self::Edge => "edge",
            Self::Drag => "drag",
        }
    }
}

/// Lifecycle shared by all animations
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationState {
    start: f64,
    last: f64,
    destroyed: bool,
}

impl AnimationState {
    /// Start a new animation at timestamp `now` (ms)
    pub fn new(now: f64) -> Self {
        Self {
            start: now,
            last: now,
            destroyed: false,
        }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn last(&self) -> f64 {
        self.last
    }

    pub fn touch(&mut self, now: f64) {
        self.last = now;
    }

    /// Milliseconds since the animation started
    pub fn elapsed(&self, now: f64) -> f64 {
        now - self.start
    }

    /// Progress through `duration`, clamped into `[0, 1]`
    pub fn time_ratio(&self, now: f64, duration: f64) -> f64 {
        let ratio = self.elapsed(now) / duration;
        if ratio.is_nan() {
            return 1.0;
        }
        ratio.clamp(0.0, 1.0)
    }

    pub fn destroy(&mut self) {
        self.destroyed = true;
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

/// Pan state an animation can drive
pub trait PositionTarget {
    /// Committed coordinates
    fn coords(&self) -> Coords;

    /// Move by `vector`; returns whether the coordinates changed
    fn move_by(&mut self, vector: Coords, rounding: Rounding) -> bool;

    /// Move to `coords` at committed precision; returns whether they changed
    fn move_to(&mut self, coords: Coords) -> bool;
}

/// Scale state an animation can drive
pub trait ScaleTarget {
    /// Current (possibly in-flight) scale
    fn value(&self) -> f64;

    /// Change by `delta`; returns whether the scale changed
    fn change(&mut self, delta: f64, rounding: Rounding) -> bool;

    /// Set exactly to `value`; returns whether the scale changed
    fn change_to(&mut self, value: f64) -> bool;
}

/// Magnitude and sign of one signed component
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Signed {
    pub(crate) magnitude: f64,
    pub(crate) sign: f64,
}

impl Signed {
    pub(crate) fn split(value: f64) -> Self {
        Self {
            magnitude: value.abs(),
            sign: math::sign(value),
        }
    }

    /// Increment still owed at `ratio` given what was already applied
    ///
    /// Never negative: an animation only moves forward.
    pub(crate) fn increment(&self, ratio: f64, applied: f64, precision: Option<u32>) -> f64 {
        if self.magnitude <= 0.0 || applied >= self.magnitude {
            return 0.0;
        }
        math::round_opt((self.magnitude * ratio - applied).max(0.0), precision)
    }

    pub(crate) fn remaining(&self, applied: f64) -> f64 {
        (self.magnitude - applied) * self.sign
    }
}
