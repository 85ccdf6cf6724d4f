//! Frame-driven animation executor
//!
//! The executor never schedules frames itself. `initiate()` records a wake
//! request when the loop goes from idle to running; the host drains it with
//! `take_wake_request()` and then calls `tick(now)` once per frame until a tick
//! reports that nothing continues.

use smallvec::SmallVec;

use crate::animation::{AnimationKind, PositionTarget, ScaleTarget};
use crate::storage::AnimationStorage;

/// Outcome of one tick
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Whether any animation asked for another frame
    pub continued: bool,
    /// Kinds destroyed during this tick because they finished
    pub finished: SmallVec<[AnimationKind; 3]>,
}

impl TickReport {
    pub fn idle() -> Self {
        Self::default()
    }
}

/// Cooperative stepper for one animation storage
#[derive(Clone, Debug, Default)]
pub struct Executor {
    looping: bool,
    wake_requested: bool,
    frames: u64,
}

impl Executor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure the loop is running
    ///
    /// Idempotent while looping. Returns `true` when this call started it.
    pub fn initiate(&mut self) -> bool {
        if self.looping {
            return false;
        }
        self.looping = true;
        self.wake_requested = true;
        tracing::trace!("Executor initiated");
        true
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Check and clear the pending wake request
    pub fn take_wake_request(&mut self) -> bool {
        std::mem::take(&mut self.wake_requested)
    }

    /// Frames stepped since creation
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Step every stored animation once, Glide, then Zoom, then Edge
    ///
    /// A kind whose step returns `false` is destroyed right away. When nothing
    /// continues the executor goes idle until the next `initiate()`.
    pub fn tick<P, S>(
        &mut self,
        now: f64,
        storage: &mut AnimationStorage,
        position: &mut P,
        scale: &mut S,
    ) -> TickReport
    where
        P: PositionTarget + ?Sized,
        S: ScaleTarget + ?Sized,
    {
        if !self.looping {
            return TickReport::idle();
        }
        self.frames += 1;

        let mut report = TickReport::idle();
        for kind in AnimationKind::TICKED {
            let keep = match kind {
                AnimationKind::Glide => storage.glide_mut().map(|glide| glide.step(now, position)),
                AnimationKind::Zoom => storage.zoom_mut().map(|zoom| zoom.step(now, scale)),
                AnimationKind::Edge => {
                    let current = scale.value();
                    storage
                        .edge_mut()
                        .map(|edge| edge.step(now, position, current))
                }
                AnimationKind::Drag => None,
            };

            match keep {
                Some(true) => report.continued = true,
                Some(false) => {
                    storage.destroy(kind);
                    report.finished.push(kind);
                }
                None => {}
            }
        }

        self.looping = report.continued;
        if !self.looping {
            tracing::trace!("Executor idle after {} frames", self.frames);
        }
        report
    }
}
