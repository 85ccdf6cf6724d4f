//! Transform output
//!
//! A surface batches every position and scale change of a frame into one
//! [`TransformValues`] and hands it to its [`TransformSink`] at most once per
//! tick. Rendering is entirely up to the sink.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use serde::Serialize;
use tilted_core::Coords;

use crate::overlay::{OverlayId, OverlayTransform};

/// Named transform values of one surface
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct TransformValues {
    /// Uniform scale factor
    pub scale: f64,
    /// Perspective distance in px
    pub perspective: f64,
    /// Tilt around the x axis in degrees
    pub rotate_x: f64,
    /// Content translation in px, the negated surface coordinates
    pub translate: Coords,
}

impl TransformValues {
    /// CSS-style transform function list
    pub fn to_css(&self) -> String {
        format!(
            "scale({}) perspective({}px) rotateX({}deg) translate3d({}px, {}px, 0)",
            self.scale, self.perspective, self.rotate_x, self.translate.x, self.translate.y
        )
    }
}

/// Receiver of transform updates
pub trait TransformSink {
    /// Apply the surface transform
    fn apply(&mut self, values: &TransformValues);

    /// Apply an overlay counter-rotation
    fn apply_overlay(&mut self, _id: OverlayId, _transform: &OverlayTransform) {}
}

impl<F> TransformSink for F
where
    F: FnMut(&TransformValues),
{
    fn apply(&mut self, values: &TransformValues) {
        self(values)
    }
}

/// Sink that discards everything
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl TransformSink for NullSink {
    fn apply(&mut self, _values: &TransformValues) {}
}

#[derive(Debug, Default)]
struct Recorded {
    frames: Vec<TransformValues>,
    overlays: FxHashMap<OverlayId, OverlayTransform>,
}

/// Sink that keeps every frame
///
/// Clones share storage, so keep one and hand another to the surface.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    inner: Rc<RefCell<Recorded>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All frames applied so far
    pub fn frames(&self) -> Vec<TransformValues> {
        self.inner.borrow().frames.clone()
    }

    pub fn frame_count(&self) -> usize {
        self.inner.borrow().frames.len()
    }

    pub fn last(&self) -> Option<TransformValues> {
        self.inner.borrow().frames.last().copied()
    }

    /// Latest transform applied to `id`
    pub fn overlay(&self, id: OverlayId) -> Option<OverlayTransform> {
        self.inner.borrow().overlays.get(&id).copied()
    }

    /// Forget recorded frames, keeping overlay state
    pub fn clear(&self) {
        self.inner.borrow_mut().frames.clear();
    }
}

impl TransformSink for RecordingSink {
    fn apply(&mut self, values: &TransformValues) {
        self.inner.borrow_mut().frames.push(*values);
    }

    fn apply_overlay(&mut self, id: OverlayId, transform: &OverlayTransform) {
        self.inner.borrow_mut().overlays.insert(id, *transform);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values() -> TransformValues {
        TransformValues {
            scale: 0.5,
            perspective: 600.0,
            rotate_x: 11.67,
            translate: Coords::new(-10.0, 20.0),
        }
    }

    #[test]
    fn test_css() {
        assert_eq!(
            values().to_css(),
            "scale(0.5) perspective(600px) rotateX(11.67deg) translate3d(-10px, 20px, 0)"
        );
    }

    #[test]
    fn test_json_fields() {
        let json = serde_json::to_value(values()).unwrap();
        assert_eq!(json["scale"], 0.5);
        assert_eq!(json["rotate_x"], 11.67);
        assert_eq!(json["translate"]["x"], -10.0);
    }

    #[test]
    fn test_recording_sink_shares_frames() {
        let recorder = RecordingSink::new();
        let mut sink = recorder.clone();
        sink.apply(&values());
        sink.apply(&values());
        assert_eq!(recorder.frame_count(), 2);
        assert_eq!(recorder.last(), Some(values()));
        recorder.clear();
        assert_eq!(recorder.frame_count(), 0);
    }

    #[test]
    fn test_closure_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = |values: &TransformValues| seen.push(values.scale);
            sink.apply(&values());
        }
        assert_eq!(seen, vec![0.5]);
    }
}
