//! Input scripts
//!
//! A script is a TOML document describing one surface and a timeline of
//! input events:
//!
//! ```toml
//! frame = 16
//!
//! [surface]
//! container = { width = 1600, height = 900 }
//! content = { width = 3200, height = 1800 }
//!
//! [config]
//! edge_move_enabled = 1
//!
//! [[overlay]]
//! kind = "figure"
//! factor = 0.5
//!
//! [[event]]
//! at = 0
//! action = "wheel"
//! delta_y = -120
//! pointer = { x = 1200, y = 225 }
//! ```
//!
//! Replaying drives the surface with a manual clock, ticking one frame every
//! `frame` ms while anything animates, and records every transform the
//! surface flushes.

use std::fs;
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tilted_core::{Config, Coords, Easing, Size};
use tilted_viewport::{
    ManualClock, OverlayKind, OverlayTransform, PointerButton, RecordingSink, Surface,
    SurfaceSnapshot, TransformValues, ZoomDirection,
};
use tracing::{debug, info, warn};

/// Frames ticked after the last event before giving up on settling
const SETTLE_LIMIT: usize = 10_000;

fn default_frame() -> f64 {
    16.0
}

fn default_factor() -> f64 {
    1.0
}

// =============================================================================
// Script
// =============================================================================

/// A parsed input script
#[derive(Debug, Deserialize)]
pub struct Script {
    /// Milliseconds between frames
    #[serde(default = "default_frame")]
    pub frame: f64,
    pub surface: SurfaceSpec,
    /// Flat config keys, parsed permissively
    #[serde(default)]
    pub config: toml::Table,
    #[serde(default, rename = "overlay")]
    pub overlays: Vec<OverlaySpec>,
    #[serde(default, rename = "event")]
    pub events: Vec<Event>,
}

#[derive(Debug, Deserialize)]
pub struct SurfaceSpec {
    pub container: Size,
    pub content: Size,
}

#[derive(Debug, Deserialize)]
pub struct OverlaySpec {
    #[serde(default)]
    pub kind: OverlayKind,
    #[serde(default = "default_factor")]
    pub factor: f64,
}

/// One timed input
#[derive(Debug, Deserialize)]
pub struct Event {
    /// Milliseconds since the start of the replay
    pub at: f64,
    #[serde(flatten)]
    pub action: Action,
}

/// What happens at an event
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    MoveBy {
        vector: Coords,
    },
    MoveTo {
        coords: Coords,
    },
    Glide {
        vector: Coords,
        #[serde(default)]
        duration: Option<f64>,
        #[serde(default)]
        easing: Option<Easing>,
    },
    GlideTo {
        coords: Coords,
    },
    Zoom {
        shift: f64,
    },
    ZoomTo {
        value: f64,
    },
    Step {
        steps: i32,
    },
    StepAndGlide {
        steps: i32,
        #[serde(default)]
        pointer: Option<Coords>,
    },
    PointerDown {
        pointer: Coords,
        #[serde(default)]
        button: PointerButton,
    },
    PointerMove {
        pointer: Coords,
    },
    PointerUp,
    PointerLeave,
    Wheel {
        delta_y: f64,
        pointer: Coords,
    },
    Key {
        key: String,
    },
    ZoomButton {
        direction: ZoomDirection,
    },
    Resize {
        container: Size,
        content: Size,
    },
    EnforceLimits,
    Cancel,
}

impl Script {
    pub fn parse(source: &str) -> Result<Self> {
        let script: Script = toml::from_str(source).context("Failed to parse script")?;
        if !(script.frame.is_finite() && script.frame > 0.0) {
            anyhow::bail!("frame must be a positive number of ms, got {}", script.frame);
        }
        if let Some(event) = script.events.iter().find(|e| !e.at.is_finite() || e.at < 0.0) {
            anyhow::bail!("event time must be a non-negative number, got {}", event.at);
        }
        Ok(script)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&source).with_context(|| format!("Invalid script {}", path.display()))
    }

    /// Config described by the `[config]` table
    pub fn config(&self) -> Config {
        Config::from_toml_table(&self.config)
    }
}

// =============================================================================
// Replay
// =============================================================================

/// A transform flushed at `time`
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Frame {
    pub time: f64,
    #[serde(flatten)]
    pub values: TransformValues,
}

/// Everything a replay produced
#[derive(Debug, Serialize)]
pub struct Replay {
    pub frames: Vec<Frame>,
    pub overlays: Vec<OverlayTransform>,
    pub snapshot: SurfaceSnapshot,
    /// Whether every animation finished before the replay stopped
    pub settled: bool,
}

struct Player {
    surface: Surface,
    sink: RecordingSink,
    clock: ManualClock,
    frame: f64,
    now: f64,
    frames: Vec<Frame>,
    recorded: usize,
}

impl Player {
    fn new(script: &Script) -> Result<Self> {
        let sink = RecordingSink::new();
        let clock = ManualClock::new(0.0);
        let surface = Surface::new(
            script.surface.container,
            script.surface.content,
            script.config(),
            sink.clone(),
            Rc::new(clock.clone()),
        )
        .context("Failed to create surface")?;

        let mut player = Self {
            surface,
            sink,
            clock,
            frame: script.frame,
            now: 0.0,
            frames: Vec::new(),
            recorded: 0,
        };
        player.capture();
        Ok(player)
    }

    /// Collect frames the sink received since the last capture
    fn capture(&mut self) {
        let frames = self.sink.frames();
        for values in &frames[self.recorded..] {
            self.frames.push(Frame {
                time: self.now,
                values: *values,
            });
        }
        self.recorded = frames.len();
    }

    fn tick(&mut self) {
        self.now += self.frame;
        self.clock.set(self.now);
        self.surface.tick(self.now);
        self.capture();
    }

    /// Tick frames up to `time`, then jump the clock there
    fn run_until(&mut self, time: f64) {
        while self.surface.is_animating() && self.now + self.frame <= time {
            self.tick();
        }
        if time > self.now {
            self.now = time;
            self.clock.set(time);
        }
    }

    fn settle(&mut self) -> bool {
        for _ in 0..SETTLE_LIMIT {
            if !self.surface.is_animating() {
                return true;
            }
            self.tick();
        }
        !self.surface.is_animating()
    }

    fn apply(&mut self, action: &Action) -> Result<bool> {
        let surface = &mut self.surface;
        let applied = match action {
            Action::MoveBy { vector } => surface.move_by(*vector),
            Action::MoveTo { coords } => surface.move_to(*coords),
            Action::Glide {
                vector,
                duration,
                easing,
            } => {
                let duration = duration.unwrap_or(surface.config().animation_glide_time);
                surface.glide_with(*vector, duration, easing.unwrap_or_default())
            }
            Action::GlideTo { coords } => surface.glide_to(*coords),
            Action::Zoom { shift } => surface.zoom(*shift),
            Action::ZoomTo { value } => surface.zoom_to(*value),
            Action::Step { steps } => surface.step(*steps),
            Action::StepAndGlide { steps, pointer } => surface.step_and_glide(*steps, *pointer),
            Action::PointerDown { pointer, button } => surface.pointer_down(*pointer, *button),
            Action::PointerMove { pointer } => surface.pointer_move(*pointer),
            Action::PointerUp => surface.pointer_up(),
            Action::PointerLeave => surface.pointer_leave(),
            Action::Wheel { delta_y, pointer } => surface.wheel(*delta_y, *pointer),
            Action::Key { key } => surface.key(key),
            Action::ZoomButton { direction } => surface.zoom_button(*direction),
            Action::Resize { container, content } => {
                surface
                    .resize(*container, *content)
                    .context("Failed to resize surface")?;
                true
            }
            Action::EnforceLimits => surface.enforce_limits(),
            Action::Cancel => surface.cancel_ongoing_moves(),
        };
        // Immediate moves flush on the next tick; keep them visible now
        self.surface.flush(false);
        self.capture();
        Ok(applied)
    }
}

/// Replay `script` on a fresh headless surface
pub fn replay(script: &Script) -> Result<Replay> {
    let mut player = Player::new(script)?;
    let overlay_ids: Vec<_> = script
        .overlays
        .iter()
        .map(|spec| player.surface.add_overlay(spec.kind, spec.factor))
        .collect();

    let mut order: Vec<&Event> = script.events.iter().collect();
    order.sort_by(|a, b| a.at.total_cmp(&b.at));

    for event in order {
        player.run_until(event.at);
        let applied = player.apply(&event.action)?;
        debug!("t={} {:?} -> {}", player.now, event.action, applied);
    }

    let settled = player.settle();
    if !settled {
        warn!(
            "Animations still running after {} frames; stopping",
            SETTLE_LIMIT
        );
    }
    info!(
        "Replayed {} events into {} frames over {} ms",
        script.events.len(),
        player.frames.len(),
        player.now
    );

    let overlays = overlay_ids
        .into_iter()
        .filter_map(|id| player.sink.overlay(id))
        .collect();

    Ok(Replay {
        frames: player.frames,
        overlays,
        snapshot: player.surface.snapshot(),
        settled,
    })
}
