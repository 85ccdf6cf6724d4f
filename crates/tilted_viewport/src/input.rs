//! Input translation
//!
//! Maps already-captured pointer, wheel and key input onto surface
//! operations. Pointer coordinates are relative to the container's top-left
//! corner; capturing them is the host's job.

use serde::{Deserialize, Serialize};
use tilted_animation::AnimationKind;
use tilted_core::{Coords, Size};

use crate::surface::Surface;

/// Pointer button
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    /// Left mouse button or a touch
    #[default]
    Primary,
    Middle,
    Secondary,
}

/// Zoom direction of a key or control button
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Table steps this direction moves by
    pub fn steps(self) -> i32 {
        match self {
            Self::In => 1,
            Self::Out => -1,
        }
    }

    /// Direction bound to a key name, if any
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "+" | "Add" => Some(Self::In),
            "-" | "Subtract" => Some(Self::Out),
            _ => None,
        }
    }
}

/// Edge pan direction for a pointer at `pointer`
///
/// Inside a band of `area` px along a side the component grows linearly
/// from `1 / (area + 1)` at the band's inner border to 1 at the side itself,
/// negative toward the top and left. Outside every band the vector is zero.
pub fn edge_vector(pointer: Coords, container: Size, area: f64) -> Coords {
    let depth = area + 1.0;
    let axis = |position: f64, extent: f64| {
        if position <= area {
            -(depth - position) / depth
        } else if position >= extent - area {
            (depth - (extent - position)) / depth
        } else {
            0.0
        }
    };
    Coords::new(
        axis(pointer.x, container.width),
        axis(pointer.y, container.height),
    )
}

impl Surface {
    /// Pointer pressed; the primary button starts a drag
    pub fn pointer_down(&mut self, pointer: Coords, button: PointerButton) -> bool {
        if button != PointerButton::Primary {
            return false;
        }
        self.drag_start(pointer);
        true
    }

    /// Pointer moved: follow a drag, otherwise drive the edge pan
    pub fn pointer_move(&mut self, pointer: Coords) -> bool {
        if self.is_dragging() {
            return self.drag_move(pointer);
        }
        if self.config().edge_move_enabled {
            return self.edge_update(pointer);
        }
        false
    }

    /// Pointer released; returns whether the drag was tossed
    pub fn pointer_up(&mut self) -> bool {
        self.drag_end()
    }

    /// Pointer left the container
    pub fn pointer_leave(&mut self) -> bool {
        self.edge_stop()
    }

    /// Wheel turned; scrolling up zooms in toward the pointer
    pub fn wheel(&mut self, delta_y: f64, pointer: Coords) -> bool {
        if delta_y == 0.0 || delta_y.is_nan() {
            return false;
        }
        let steps = if delta_y < 0.0 { 1 } else { -1 };
        self.step_and_glide(steps, Some(pointer))
    }

    /// Key pressed; `+` and `-` step the scale
    pub fn key(&mut self, key: &str) -> bool {
        match ZoomDirection::from_key(key) {
            Some(direction) => self.step(direction.steps()),
            None => false,
        }
    }

    /// Zoom control clicked; zooms around the container center
    pub fn zoom_button(&mut self, direction: ZoomDirection) -> bool {
        self.step_and_glide(direction.steps(), None)
    }

    /// Whether an edge pan is running
    pub fn is_edge_panning(&self) -> bool {
        self.animations().exists(AnimationKind::Edge)
    }
}
