//! Animation storage
//!
//! Holds at most one animation per kind. Creation applies the merge rules:
//!
//! - a new Glide absorbs the remaining vector of the Glide it replaces
//! - a new Edge cancels any Glide
//! - a new Drag cancels any Glide and any Edge
//! - every other kind simply replaces its predecessor

use tilted_core::{Coords, Rounding};

use crate::animation::{drag::Drag, edge::Edge, glide::Glide, zoom::Zoom, AnimationKind};
use crate::engine::GlideRequest;

/// One slot per animation kind
#[derive(Clone, Debug, Default)]
pub struct AnimationStorage {
    glide: Option<Glide>,
    zoom: Option<Zoom>,
    edge: Option<Edge>,
    drag: Option<Drag>,
}

impl AnimationStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a Glide from `origin`, folding in whatever the previous Glide
    /// had not applied yet
    pub fn create_glide(
        &mut self,
        now: f64,
        origin: Coords,
        request: GlideRequest,
        rounding: Rounding,
    ) -> &Glide {
        let mut vector = request.vector;
        if let Some(mut previous) = self.glide.take() {
            if !previous.is_destroyed() {
                vector += previous.remaining();
            }
            previous.destroy();
        }

        let mut glide = Glide::new(now, origin, vector, request.duration, request.easing, rounding);
        if let Some(tie) = request.tie {
            glide = glide.tied_to(tie);
        }
        self.glide.insert(glide)
    }

    pub fn create_zoom(&mut self, zoom: Zoom) -> &Zoom {
        self.destroy(AnimationKind::Zoom);
        self.zoom.insert(zoom)
    }

    pub fn create_edge(&mut self, edge: Edge) -> &Edge {
        self.destroy(AnimationKind::Glide);
        self.destroy(AnimationKind::Edge);
        self.edge.insert(edge)
    }

    pub fn create_drag(&mut self, drag: Drag) -> &Drag {
        self.destroy(AnimationKind::Glide);
        self.destroy(AnimationKind::Edge);
        self.destroy(AnimationKind::Drag);
        self.drag.insert(drag)
    }

    /// Whether a live animation of `kind` is stored
    pub fn exists(&self, kind: AnimationKind) -> bool {
        match kind {
            AnimationKind::Glide => self.glide.as_ref().is_some_and(|a| !a.is_destroyed()),
            AnimationKind::Zoom => self.zoom.as_ref().is_some_and(|a| !a.is_destroyed()),
            AnimationKind::Edge => self.edge.as_ref().is_some_and(|a| !a.is_destroyed()),
            AnimationKind::Drag => self.drag.as_ref().is_some_and(|a| !a.is_destroyed()),
        }
    }

    /// Destroy and drop the animation of `kind`; returns whether one existed
    pub fn destroy(&mut self, kind: AnimationKind) -> bool {
        let existed = self.exists(kind);
        match kind {
            AnimationKind::Glide => {
                if let Some(mut glide) = self.glide.take() {
                    glide.destroy();
                }
            }
            AnimationKind::Zoom => {
                if let Some(mut zoom) = self.zoom.take() {
                    zoom.destroy();
                }
            }
            AnimationKind::Edge => {
                if let Some(mut edge) = self.edge.take() {
                    edge.destroy();
                }
            }
            AnimationKind::Drag => {
                if let Some(mut drag) = self.drag.take() {
                    drag.destroy();
                }
            }
        }
        if existed {
            tracing::trace!("Destroyed {} animation", kind.name());
        }
        existed
    }

    /// Destroy everything
    pub fn clear(&mut self) {
        for kind in [
            AnimationKind::Glide,
            AnimationKind::Zoom,
            AnimationKind::Edge,
            AnimationKind::Drag,
        ] {
            self.destroy(kind);
        }
    }

    /// Whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.glide.is_none() && self.zoom.is_none() && self.edge.is_none() && self.drag.is_none()
    }

    pub fn glide(&self) -> Option<&Glide> {
        self.glide.as_ref()
    }

    pub fn glide_mut(&mut self) -> Option<&mut Glide> {
        self.glide.as_mut()
    }

    pub fn zoom(&self) -> Option<&Zoom> {
        self.zoom.as_ref()
    }

    pub fn zoom_mut(&mut self) -> Option<&mut Zoom> {
        self.zoom.as_mut()
    }

    pub fn edge(&self) -> Option<&Edge> {
        self.edge.as_ref()
    }

    pub fn edge_mut(&mut self) -> Option<&mut Edge> {
        self.edge.as_mut()
    }

    pub fn drag(&self) -> Option<&Drag> {
        self.drag.as_ref()
    }

    pub fn drag_mut(&mut self) -> Option<&mut Drag> {
        self.drag.as_mut()
    }

    /// Remaining vector of the in-flight Glide, zero if none
    pub fn glide_remaining(&self) -> Coords {
        self.glide
            .as_ref()
            .filter(|glide| !glide.is_destroyed())
            .map(Glide::remaining)
            .unwrap_or(Coords::ZERO)
    }

    /// Remaining shift of the in-flight Zoom, zero if none
    pub fn zoom_remaining(&self) -> f64 {
        self.zoom
            .as_ref()
            .filter(|zoom| !zoom.is_destroyed())
            .map(Zoom::remaining)
            .unwrap_or(0.0)
    }
}
