//! Surface: the aggregate that owns one viewport's state
//!
//! A surface exclusively owns its position, scale, animation engine and
//! overlays. Input and API calls mutate it synchronously and ask for frames;
//! the host then calls [`Surface::tick`] once per frame until it reports that
//! nothing continues. Each tick flushes the batched transform at most once.

use std::fmt;
use std::rc::Rc;

use serde::Serialize;
use slotmap::SlotMap;
use tilted_animation::{AnimationKind, Animations, Drag, Edge, PositionTarget, ZoomTie};
use tilted_core::{Config, Coords, Easing, Size, ValidatedConfig};

use crate::clock::Clock;
use crate::error::{Result, ViewportError};
use crate::input::edge_vector;
use crate::overlay::{Overlay, OverlayId, OverlayKind};
use crate::position::Position;
use crate::scale::{pointer_compensation, Scale, Tilt};
use crate::transform::{TransformSink, TransformValues};

fn validate_size(name: &'static str, size: Size) -> Result<()> {
    if size.is_valid() {
        Ok(())
    } else {
        Err(ViewportError::InvalidSize {
            name,
            width: size.width,
            height: size.height,
        })
    }
}

/// Point-in-time view of a surface, for logging and tooling
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SurfaceSnapshot {
    pub coords: Coords,
    pub min: Coords,
    pub max: Coords,
    pub scale: f64,
    pub pending_scale: f64,
    pub tilt: f64,
    pub animating: bool,
    pub glide: bool,
    pub zoom: bool,
    pub edge: bool,
    pub drag: bool,
}

/// One pannable, zoomable, tilted viewport
pub struct Surface {
    config: ValidatedConfig,
    container: Size,
    content: Size,
    position: Position,
    scale: Scale,
    animations: Animations,
    overlays: SlotMap<OverlayId, Overlay>,
    sink: Box<dyn TransformSink>,
    clock: Rc<dyn Clock>,
    transform: TransformValues,
}

impl Surface {
    /// Create a surface centered at the default scale
    ///
    /// The initial transform is applied to `sink` before this returns.
    pub fn new(
        container: Size,
        content: Size,
        config: Config,
        sink: impl TransformSink + 'static,
        clock: Rc<dyn Clock>,
    ) -> Result<Self> {
        validate_size("container", container)?;
        validate_size("content", content)?;
        let config = config.validate()?;

        let position = Position::new(container, content, config.coord_rounding());
        let scale = Scale::new(
            config.default_scale(),
            config.steps().clone(),
            config.scale_rounding(),
            Tilt::from_config(&config),
        );

        let mut surface = Self {
            config,
            container,
            content,
            position,
            scale,
            animations: Animations::new(),
            overlays: SlotMap::with_key(),
            sink: Box::new(sink),
            clock,
            transform: TransformValues::default(),
        };
        surface.flush(true);

        tracing::debug!(
            "Surface created: container {}x{}, content {}x{}, scale {}, limit ({}, {})",
            container.width,
            container.height,
            content.width,
            content.height,
            surface.scale.value(),
            surface.position.limit().x,
            surface.position.limit().y
        );
        Ok(surface)
    }

    fn now(&self) -> f64 {
        self.clock.now_ms()
    }

    // =========================================================================
    // State
    // =========================================================================

    pub fn config(&self) -> &ValidatedConfig {
        &self.config
    }

    pub fn container(&self) -> Size {
        self.container
    }

    pub fn content(&self) -> Size {
        self.content
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    pub fn animations(&self) -> &Animations {
        &self.animations
    }

    pub fn coords(&self) -> Coords {
        self.position.coords()
    }

    pub fn min(&self) -> Coords {
        self.position.min()
    }

    pub fn max(&self) -> Coords {
        self.position.max()
    }

    pub fn scale_value(&self) -> f64 {
        self.scale.value()
    }

    /// Scale the surface settles on once the in-flight zoom finishes
    pub fn pending_scale(&self) -> f64 {
        self.scale.pending(&self.animations)
    }

    pub fn tilt(&self) -> f64 {
        self.scale.tilt()
    }

    /// Last transform handed to the sink
    pub fn transform(&self) -> TransformValues {
        self.transform
    }

    /// Whether the surface wants frames
    pub fn is_animating(&self) -> bool {
        self.animations.is_looping()
    }

    /// Check and clear a pending request for frames
    pub fn take_wake_request(&mut self) -> bool {
        self.animations.take_wake_request()
    }

    pub fn snapshot(&self) -> SurfaceSnapshot {
        SurfaceSnapshot {
            coords: self.coords(),
            min: self.min(),
            max: self.max(),
            scale: self.scale.value(),
            pending_scale: self.pending_scale(),
            tilt: self.scale.tilt(),
            animating: self.is_animating(),
            glide: self.animations.exists(AnimationKind::Glide),
            zoom: self.animations.exists(AnimationKind::Zoom),
            edge: self.animations.exists(AnimationKind::Edge),
            drag: self.animations.exists(AnimationKind::Drag),
        }
    }

    // =========================================================================
    // Frames
    // =========================================================================

    /// Step all animations and flush; returns whether another frame is needed
    pub fn tick(&mut self, now: f64) -> bool {
        if !self.animations.is_looping() {
            return false;
        }
        let report = self
            .animations
            .tick(now, &mut self.position, &mut self.scale);
        self.flush(false);
        report.continued
    }

    /// Hand the transform to the sink if it changed, or unconditionally
    /// when `force` is set; returns whether the sink was called
    pub fn flush(&mut self, force: bool) -> bool {
        let moved = self.position.take_changed();
        let scaled = self.scale.take_changed();
        if !(force || moved || scaled) {
            return false;
        }

        let values = TransformValues {
            scale: self.scale.value(),
            perspective: self.config.perspective(),
            rotate_x: self.scale.tilt(),
            translate: Coords::ZERO - self.position.coords(),
        };
        self.sink.apply(&values);

        if force || values.rotate_x != self.transform.rotate_x {
            let rounding = self.config.tilt_rounding;
            for (id, overlay) in &self.overlays {
                self.sink
                    .apply_overlay(id, &overlay.transform(values.rotate_x, rounding));
            }
        }

        self.transform = values;
        true
    }

    // =========================================================================
    // Position
    // =========================================================================

    /// Move immediately; returns whether the coordinates changed
    pub fn move_by(&mut self, vector: Coords) -> bool {
        let moved = self.position.move_by(vector, self.position.rounding());
        if moved {
            self.animations.initiate();
        }
        moved
    }

    pub fn move_to(&mut self, coords: Coords) -> bool {
        let moved = self.position.move_to(coords);
        if moved {
            self.animations.initiate();
        }
        moved
    }

    /// Glide by `vector` with the configured duration
    pub fn glide(&mut self, vector: Coords) -> bool {
        let duration = self.config.animation_glide_time;
        self.glide_with(vector, duration, Easing::EaseOutCirc)
    }

    pub fn glide_with(&mut self, vector: Coords, duration: f64, easing: Easing) -> bool {
        let now = self.now();
        self.position
            .glide(&mut self.animations, now, vector, duration, easing, None)
    }

    pub fn glide_to(&mut self, coords: Coords) -> bool {
        let now = self.now();
        let duration = self.config.animation_glide_time;
        self.position
            .glide_to(&mut self.animations, now, coords, duration, Easing::EaseOutCirc)
    }

    /// Pull the coordinates back inside the limits
    pub fn enforce_limits(&mut self) -> bool {
        let moved = self.position.enforce_limits();
        if moved {
            self.animations.initiate();
        }
        moved
    }

    /// Stop any glide where it is
    pub fn cancel_ongoing_moves(&mut self) -> bool {
        self.animations.destroy(AnimationKind::Glide)
    }

    // =========================================================================
    // Scale
    // =========================================================================

    /// Zoom by `shift`, snapped to the step table
    pub fn zoom(&mut self, shift: f64) -> bool {
        let now = self.now();
        let duration = self.config.animation_scale_time;
        self.scale
            .zoom(&mut self.animations, now, shift, duration, Easing::EaseOutCirc)
            .is_some()
    }

    /// Zoom to the step nearest to `value`
    pub fn zoom_to(&mut self, value: f64) -> bool {
        let now = self.now();
        let duration = self.config.animation_scale_time;
        self.scale
            .zoom_to(&mut self.animations, now, value, duration, Easing::EaseOutCirc)
            .is_some()
    }

    /// Zoom by `steps` table entries
    pub fn step(&mut self, steps: i32) -> bool {
        let shift = self.scale.step_shift(&self.animations, steps);
        self.zoom(shift)
    }

    /// Zoom by `steps` entries, gliding so the point under `pointer` stays put
    ///
    /// `pointer` is container-relative. Without one this is [`Surface::step`].
    pub fn step_and_glide(&mut self, steps: i32, pointer: Option<Coords>) -> bool {
        let now = self.now();
        let duration = self.config.animation_scale_time;
        let easing = Easing::EaseOutCirc;

        let requested = self.scale.step_shift(&self.animations, steps);
        let Some(change) = self
            .scale
            .zoom(&mut self.animations, now, requested, duration, easing)
        else {
            return false;
        };

        if let Some(pointer) = pointer {
            let vector = pointer_compensation(
                pointer - self.container.center(),
                self.config.scale_glide,
                change.from,
                requested,
                change.shift(),
            );
            let tie = ZoomTie::new(change.initial, change.target);
            self.position.glide(
                &mut self.animations,
                now,
                vector,
                duration,
                easing,
                Some(tie),
            );
        }
        true
    }

    // =========================================================================
    // Drag and edge
    // =========================================================================

    /// Start dragging at `pointer`; cancels any glide and edge pan
    pub fn drag_start(&mut self, pointer: Coords) {
        let now = self.now();
        let rounding = self.position.rounding();
        self.animations.drag(Drag::new(now, pointer, rounding));
    }

    /// Follow the pointer; returns whether the coordinates changed
    pub fn drag_move(&mut self, pointer: Coords) -> bool {
        let now = self.now();
        let scale = self.scale.value();
        let Some(drag) = self.animations.drag_mut() else {
            return false;
        };
        let moved = drag.step(now, pointer, &mut self.position, scale);
        if moved {
            self.animations.initiate();
        }
        moved
    }

    /// End the drag; returns whether it was tossed into a glide
    pub fn drag_end(&mut self) -> bool {
        let now = self.now();
        let scale = self.scale.value();
        let config = &self.config;
        let toss = match self.animations.drag_mut() {
            Some(drag) => drag.release(now, scale, config.toss_threshold, config.toss_factor),
            None => return false,
        };
        self.animations.destroy(AnimationKind::Drag);

        match toss {
            Some(vector) => self.position.glide(
                &mut self.animations,
                now,
                vector,
                self.config.animation_toss_time,
                Easing::EaseOutCirc,
                None,
            ),
            None => false,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.animations.exists(AnimationKind::Drag)
    }

    /// Start, retarget or stop the edge pan for a pointer at `pointer`
    ///
    /// Returns whether an edge pan is running afterwards. Ignored while
    /// dragging.
    pub fn edge_update(&mut self, pointer: Coords) -> bool {
        if self.is_dragging() {
            return false;
        }

        let vector = edge_vector(pointer, self.container, self.config.edge_move_area);
        let coords = self.position.coords();
        let (min, max) = (self.position.min(), self.position.max());
        let blocked = |component: f64, value: f64, min: f64, max: f64| {
            component == 0.0 || (component > 0.0 && value >= max) || (component < 0.0 && value <= min)
        };
        if blocked(vector.x, coords.x, min.x, max.x) && blocked(vector.y, coords.y, min.y, max.y) {
            self.animations.destroy(AnimationKind::Edge);
            return false;
        }

        if let Some(edge) = self.animations.edge_mut() {
            edge.update(vector);
        } else {
            let now = self.now();
            let edge = Edge::new(
                now,
                vector,
                self.config.edge_move_speed,
                self.position.rounding(),
            );
            self.animations.edge(edge);
        }
        true
    }

    pub fn edge_stop(&mut self) -> bool {
        self.animations.destroy(AnimationKind::Edge)
    }

    // =========================================================================
    // Geometry and overlays
    // =========================================================================

    /// Change container and content size and re-enforce the limits
    pub fn resize(&mut self, container: Size, content: Size) -> Result<()> {
        validate_size("container", container)?;
        validate_size("content", content)?;

        self.container = container;
        self.content = content;
        self.position.set_geometry(container, content);
        self.enforce_limits();

        tracing::debug!(
            "Surface resized: container {}x{}, content {}x{}, limit ({}, {})",
            container.width,
            container.height,
            content.width,
            content.height,
            self.position.limit().x,
            self.position.limit().y
        );
        Ok(())
    }

    /// Register an overlay; its counter-rotation is applied right away
    pub fn add_overlay(&mut self, kind: OverlayKind, factor: f64) -> OverlayId {
        let overlay = Overlay::new(kind, factor);
        let id = self.overlays.insert(overlay);
        let transform = overlay.transform(self.scale.tilt(), self.config.tilt_rounding);
        self.sink.apply_overlay(id, &transform);
        id
    }

    pub fn remove_overlay(&mut self, id: OverlayId) -> bool {
        self.overlays.remove(id).is_some()
    }

    pub fn overlay(&self, id: OverlayId) -> Option<&Overlay> {
        self.overlays.get(id)
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("container", &self.container)
            .field("content", &self.content)
            .field("position", &self.position)
            .field("scale", &self.scale.value())
            .field("animations", &self.animations)
            .field("overlays", &self.overlays.len())
            .finish_non_exhaustive()
    }
}
