//! Storage plus executor for one surface
//!
//! Every creation goes through [`Animations`] so the executor is always
//! initiated when something new needs frames.

use tilted_core::{Coords, Easing, Rounding};

use crate::animation::{
    drag::Drag, edge::Edge, glide::Glide, glide::ZoomTie, zoom::Zoom, AnimationKind,
    PositionTarget, ScaleTarget,
};
use crate::executor::{Executor, TickReport};
use crate::storage::AnimationStorage;

/// Parameters of a Glide request before merging
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlideRequest {
    pub vector: Coords,
    pub duration: f64,
    pub easing: Easing,
    pub tie: Option<ZoomTie>,
}

impl GlideRequest {
    pub fn new(vector: Coords, duration: f64, easing: Easing) -> Self {
        Self {
            vector,
            duration,
            easing,
            tie: None,
        }
    }

    /// Tie the glide to a concurrent zoom
    pub fn tied_to(mut self, tie: ZoomTie) -> Self {
        self.tie = Some(tie);
        self
    }
}

/// Animation engine of one surface
#[derive(Clone, Debug, Default)]
pub struct Animations {
    storage: AnimationStorage,
    executor: Executor,
}

impl Animations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn storage(&self) -> &AnimationStorage {
        &self.storage
    }

    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    pub fn glide(&mut self, now: f64, origin: Coords, request: GlideRequest, rounding: Rounding) -> &Glide {
        self.executor.initiate();
        self.storage.create_glide(now, origin, request, rounding)
    }

    pub fn zoom(&mut self, zoom: Zoom) -> &Zoom {
        self.executor.initiate();
        self.storage.create_zoom(zoom)
    }

    pub fn edge(&mut self, edge: Edge) -> &Edge {
        self.executor.initiate();
        self.storage.create_edge(edge)
    }

    /// Start a drag
    ///
    /// Drags are stepped by input, but creating one cancels other animations
    /// whose final frame still needs flushing, so the executor is initiated
    /// as well.
    pub fn drag(&mut self, drag: Drag) -> &Drag {
        self.executor.initiate();
        self.storage.create_drag(drag)
    }

    pub fn edge_mut(&mut self) -> Option<&mut Edge> {
        self.storage.edge_mut()
    }

    pub fn drag_mut(&mut self) -> Option<&mut Drag> {
        self.storage.drag_mut()
    }

    pub fn exists(&self, kind: AnimationKind) -> bool {
        self.storage.exists(kind)
    }

    pub fn destroy(&mut self, kind: AnimationKind) -> bool {
        self.storage.destroy(kind)
    }

    pub fn clear(&mut self) {
        self.storage.clear();
    }

    /// Request a frame without creating an animation
    ///
    /// Used after synchronous state changes (a drag move) so the next tick
    /// flushes them.
    pub fn initiate(&mut self) -> bool {
        self.executor.initiate()
    }

    pub fn is_looping(&self) -> bool {
        self.executor.is_looping()
    }

    pub fn take_wake_request(&mut self) -> bool {
        self.executor.take_wake_request()
    }

    pub fn tick<P, S>(&mut self, now: f64, position: &mut P, scale: &mut S) -> TickReport
    where
        P: PositionTarget + ?Sized,
        S: ScaleTarget + ?Sized,
    {
        self.executor.tick(now, &mut self.storage, position, scale)
    }
}
