//! Surface arena and handles
//!
//! [`Viewports`] owns every surface of a host. Callers hold cheap
//! [`SurfaceHandle`]s (a key plus a weak arena reference) which resolve the
//! live surface on every call. A handle that outlived its surface or its
//! arena turns every operation into a logged no-op.
//!
//! ```rust
//! use std::rc::Rc;
//! use tilted_core::{Config, Coords, Size};
//! use tilted_viewport::{ManualClock, RecordingSink, Viewports};
//!
//! let clock = ManualClock::new(0.0);
//! let viewports = Viewports::new(Rc::new(clock.clone()));
//! let surface = viewports
//!     .create(
//!         Size::new(1600.0, 900.0),
//!         Size::new(3200.0, 1800.0),
//!         Config::default(),
//!         RecordingSink::new(),
//!     )
//!     .unwrap();
//!
//! surface.position().glide(Coords::new(300.0, 0.0));
//! let mut now = 0.0;
//! while viewports.tick(now) {
//!     now += 16.0;
//!     clock.set(now);
//! }
//! assert_eq!(surface.position().coords(), Some(Coords::new(300.0, 0.0)));
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use slotmap::{new_key_type, SlotMap};
use tilted_core::{Config, Coords, Size};

use crate::clock::Clock;
use crate::error::{Result, ViewportError};
use crate::input::{PointerButton, ZoomDirection};
use crate::overlay::{OverlayId, OverlayKind};
use crate::surface::{Surface, SurfaceSnapshot};
use crate::transform::{TransformSink, TransformValues};

new_key_type! {
    /// Unique identifier for a surface
    pub struct SurfaceId;
}

/// Callback asking the host for a frame
///
/// Called at most once per idle-to-running transition, after the arena is
/// released, so the host may call back into it.
pub type WakeCallback = Rc<dyn Fn()>;

type Arena = RefCell<SlotMap<SurfaceId, Surface>>;

/// Arena of surfaces sharing one clock and one tick source
pub struct Viewports {
    surfaces: Rc<Arena>,
    clock: Rc<dyn Clock>,
    wake_callback: Option<WakeCallback>,
}

impl Viewports {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            surfaces: Rc::new(RefCell::new(SlotMap::with_key())),
            clock,
            wake_callback: None,
        }
    }

    /// Set the callback used to request frames
    ///
    /// Only handles created afterwards use it.
    pub fn set_wake_callback<F>(&mut self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.wake_callback = Some(Rc::new(callback));
    }

    /// Create a surface and return its handle
    pub fn create(
        &self,
        container: Size,
        content: Size,
        config: Config,
        sink: impl TransformSink + 'static,
    ) -> Result<SurfaceHandle> {
        let surface = Surface::new(container, content, config, sink, Rc::clone(&self.clock))?;
        let id = self.surfaces.borrow_mut().insert(surface);
        tracing::debug!("Surface {:?} registered", id);
        Ok(self.handle(id))
    }

    /// Handle for `id`, whether or not it is still alive
    pub fn handle(&self, id: SurfaceId) -> SurfaceHandle {
        SurfaceHandle {
            id,
            surfaces: Rc::downgrade(&self.surfaces),
            wake_callback: self.wake_callback.clone(),
        }
    }

    /// Drop a surface; its handles become inert
    pub fn remove(&self, id: SurfaceId) -> bool {
        let removed = self.surfaces.borrow_mut().remove(id).is_some();
        if removed {
            tracing::debug!("Surface {:?} removed", id);
        }
        removed
    }

    pub fn contains(&self, id: SurfaceId) -> bool {
        self.surfaces.borrow().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.surfaces.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.borrow().is_empty()
    }

    /// Whether any surface wants frames
    pub fn is_animating(&self) -> bool {
        self.surfaces
            .borrow()
            .values()
            .any(|surface| surface.is_animating())
    }

    /// Tick every animating surface at `now`
    ///
    /// Returns whether another frame is needed.
    pub fn tick(&self, now: f64) -> bool {
        let mut continued = false;
        let mut surfaces = self.surfaces.borrow_mut();
        for (_, surface) in surfaces.iter_mut() {
            if surface.is_animating() {
                continued |= surface.tick(now);
            }
            // Frames are already being delivered
            surface.take_wake_request();
        }
        continued
    }
}

impl std::fmt::Debug for Viewports {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Viewports")
            .field("surfaces", &self.surfaces.try_borrow().map(|s| s.len()).ok())
            .field("wake_callback", &self.wake_callback.is_some())
            .finish()
    }
}

/// Weak handle to one surface
#[derive(Clone)]
pub struct SurfaceHandle {
    id: SurfaceId,
    surfaces: Weak<Arena>,
    wake_callback: Option<WakeCallback>,
}

impl SurfaceHandle {
    pub fn id(&self) -> SurfaceId {
        self.id
    }

    /// Whether the surface still exists
    pub fn is_alive(&self) -> bool {
        self.surfaces
            .upgrade()
            .is_some_and(|surfaces| {
                surfaces
                    .try_borrow()
                    .is_ok_and(|surfaces| surfaces.contains_key(self.id))
            })
    }

    /// Run `f` against the live surface
    ///
    /// Returns `None`, logging a warning, when the surface is gone or the
    /// arena is already borrowed. Wakes the host afterwards if `f` started
    /// animating.
    pub fn with<R>(&self, f: impl FnOnce(&mut Surface) -> R) -> Option<R> {
        let Some(surfaces) = self.surfaces.upgrade() else {
            tracing::warn!("Surface {:?}: arena dropped, call ignored", self.id);
            return None;
        };

        let (result, wake) = {
            let Ok(mut surfaces) = surfaces.try_borrow_mut() else {
                tracing::warn!("Surface {:?}: arena busy, call ignored", self.id);
                return None;
            };
            let Some(surface) = surfaces.get_mut(self.id) else {
                tracing::warn!("Surface {:?}: removed, call ignored", self.id);
                return None;
            };
            let result = f(surface);
            (result, surface.take_wake_request())
        };

        if wake {
            if let Some(callback) = &self.wake_callback {
                callback();
            }
        }
        Some(result)
    }

    /// Like [`SurfaceHandle::with`], but a missing surface is an error
    pub fn try_with<R>(&self, f: impl FnOnce(&mut Surface) -> R) -> Result<R> {
        self.with(f).ok_or(ViewportError::SurfaceGone)
    }

    pub fn position(&self) -> PositionHandle {
        PositionHandle {
            surface: self.clone(),
        }
    }

    pub fn scale(&self) -> ScaleHandle {
        ScaleHandle {
            surface: self.clone(),
        }
    }

    pub fn snapshot(&self) -> Option<SurfaceSnapshot> {
        self.with(|surface| surface.snapshot())
    }

    pub fn transform(&self) -> Option<TransformValues> {
        self.with(|surface| surface.transform())
    }

    pub fn resize(&self, container: Size, content: Size) -> Result<()> {
        self.try_with(|surface| surface.resize(container, content))?
    }

    pub fn add_overlay(&self, kind: OverlayKind, factor: f64) -> Option<OverlayId> {
        self.with(|surface| surface.add_overlay(kind, factor))
    }

    pub fn remove_overlay(&self, id: OverlayId) -> bool {
        self.with(|surface| surface.remove_overlay(id))
            .unwrap_or(false)
    }

    // =========================================================================
    // Input
    // =========================================================================

    pub fn pointer_down(&self, pointer: Coords, button: PointerButton) -> bool {
        self.with(|surface| surface.pointer_down(pointer, button))
            .unwrap_or(false)
    }

    pub fn pointer_move(&self, pointer: Coords) -> bool {
        self.with(|surface| surface.pointer_move(pointer))
            .unwrap_or(false)
    }

    pub fn pointer_up(&self) -> bool {
        self.with(|surface| surface.pointer_up()).unwrap_or(false)
    }

    pub fn pointer_leave(&self) -> bool {
        self.with(|surface| surface.pointer_leave())
            .unwrap_or(false)
    }

    pub fn wheel(&self, delta_y: f64, pointer: Coords) -> bool {
        self.with(|surface| surface.wheel(delta_y, pointer))
            .unwrap_or(false)
    }

    pub fn key(&self, key: &str) -> bool {
        self.with(|surface| surface.key(key)).unwrap_or(false)
    }

    pub fn zoom_button(&self, direction: ZoomDirection) -> bool {
        self.with(|surface| surface.zoom_button(direction))
            .unwrap_or(false)
    }
}

impl std::fmt::Debug for SurfaceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceHandle")
            .field("id", &self.id)
            .field("alive", &self.is_alive())
            .finish()
    }
}

/// Position operations of one surface
#[derive(Clone, Debug)]
pub struct PositionHandle {
    surface: SurfaceHandle,
}

impl PositionHandle {
    pub fn coords(&self) -> Option<Coords> {
        self.surface.with(|surface| surface.coords())
    }

    pub fn min(&self) -> Option<Coords> {
        self.surface.with(|surface| surface.min())
    }

    pub fn max(&self) -> Option<Coords> {
        self.surface.with(|surface| surface.max())
    }

    pub fn move_by(&self, vector: Coords) -> bool {
        self.surface
            .with(|surface| surface.move_by(vector))
            .unwrap_or(false)
    }

    pub fn move_to(&self, coords: Coords) -> bool {
        self.surface
            .with(|surface| surface.move_to(coords))
            .unwrap_or(false)
    }

    pub fn glide(&self, vector: Coords) -> bool {
        self.surface
            .with(|surface| surface.glide(vector))
            .unwrap_or(false)
    }

    pub fn glide_to(&self, coords: Coords) -> bool {
        self.surface
            .with(|surface| surface.glide_to(coords))
            .unwrap_or(false)
    }

    pub fn enforce_limits(&self) -> bool {
        self.surface
            .with(|surface| surface.enforce_limits())
            .unwrap_or(false)
    }

    pub fn cancel_ongoing_moves(&self) -> bool {
        self.surface
            .with(|surface| surface.cancel_ongoing_moves())
            .unwrap_or(false)
    }
}

/// Scale operations of one surface
#[derive(Clone, Debug)]
pub struct ScaleHandle {
    surface: SurfaceHandle,
}

impl ScaleHandle {
    pub fn value(&self) -> Option<f64> {
        self.surface.with(|surface| surface.scale_value())
    }

    pub fn pending(&self) -> Option<f64> {
        self.surface.with(|surface| surface.pending_scale())
    }

    pub fn tilt(&self) -> Option<f64> {
        self.surface.with(|surface| surface.tilt())
    }

    pub fn zoom(&self, shift: f64) -> bool {
        self.surface
            .with(|surface| surface.zoom(shift))
            .unwrap_or(false)
    }

    pub fn zoom_to(&self, value: f64) -> bool {
        self.surface
            .with(|surface| surface.zoom_to(value))
            .unwrap_or(false)
    }

    pub fn step(&self, steps: i32) -> bool {
        self.surface
            .with(|surface| surface.step(steps))
            .unwrap_or(false)
    }

    pub fn step_and_glide(&self, steps: i32, pointer: Option<Coords>) -> bool {
        self.surface
            .with(|surface| surface.step_and_glide(steps, pointer))
            .unwrap_or(false)
    }
}
