//! Tilted Viewport
//!
//! A pannable, zoomable, tilted view onto content larger than its container.
//!
//! # Features
//!
//! - **Position**: pan coordinates clamped to limits derived from the geometry
//! - **Scale**: discrete, geometrically spaced zoom steps with a derived tilt
//! - **Surface**: owns state, animations and overlays; batches one transform
//!   flush per frame
//! - **Arena**: [`Viewports`] holds surfaces; [`SurfaceHandle`] resolves them
//!   weakly so stale handles are harmless
//! - **Input**: pointer, wheel, key and control-button translation
//!
//! Rendering is left to a [`TransformSink`]; frames come from the host, which
//! calls [`Viewports::tick`] while it returns `true` and whenever the wake
//! callback fires.

pub mod clock;
pub mod error;
pub mod input;
pub mod overlay;
pub mod position;
pub mod registry;
pub mod scale;
pub mod surface;
pub mod transform;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Result, ViewportError};
pub use input::{edge_vector, PointerButton, ZoomDirection};
pub use overlay::{Overlay, OverlayId, OverlayKind, OverlayTransform};
pub use position::{pan_limit, Position};
pub use registry::{PositionHandle, ScaleHandle, SurfaceHandle, SurfaceId, Viewports, WakeCallback};
pub use scale::{pointer_compensation, Scale, Tilt, ZoomChange};
pub use surface::{Surface, SurfaceSnapshot};
pub use transform::{NullSink, RecordingSink, TransformSink, TransformValues};
