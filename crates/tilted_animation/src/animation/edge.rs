//! Edge: continuous pan while the pointer rests near the container edge

use tilted_core::{Coords, Rounding};

use super::{AnimationState, PositionTarget};

/// Frame length the edge speed is expressed against, in ms
///
/// Empirically tuned: `edge_move_speed` px are covered per this many ms at
/// scale 1 and full edge depth.
pub const EDGE_FRAME_MS: f64 = 10.0;

/// Continuous, non-finishing pan
#[derive(Clone, Debug)]
pub struct Edge {
    state: AnimationState,
    vector: Coords,
    speed: f64,
    rounding: Rounding,
}

impl Edge {
    /// Pan along `vector` (components in `[-1, 1]`) at `speed`
    pub fn new(now: f64, vector: Coords, speed: f64, rounding: Rounding) -> Self {
        tracing::debug!("Edge created: vector ({}, {})", vector.x, vector.y);
        Self {
            state: AnimationState::new(now),
            vector,
            speed,
            rounding,
        }
    }

    /// Retarget without restarting
    pub fn update(&mut self, vector: Coords) {
        self.vector = vector;
    }

    pub fn vector(&self) -> Coords {
        self.vector
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Pan for the time since the last step; continues until destroyed
    pub fn step<P: PositionTarget + ?Sized>(&mut self, now: f64, position: &mut P, scale: f64) -> bool {
        if self.state.is_destroyed() {
            return false;
        }

        // Near-zero intervals still move by one frame's worth
        let time_factor = (now - self.state.last()).max(1.0) / EDGE_FRAME_MS;
        let delta = self.vector * (self.speed / scale * time_factor);
        position.move_by(delta, self.rounding);
        self.state.touch(now);

        true
    }

    pub fn destroy(&mut self) {
        self.state.destroy();
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.is_destroyed()
    }
}
