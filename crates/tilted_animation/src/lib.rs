//! Tilted Animation System
//!
//! Timed animations over one shared, clamped coordinate/scale space.
//!
//! # Features
//!
//! - **Glide**: eased positional animation toward a relative target, optionally
//!   tied to a concurrent zoom so the point under the pointer stays put
//! - **Zoom**: eased scale animation that always settles on a step-table value
//! - **Edge**: continuous pan while the pointer rests near the container edge
//! - **Drag**: pointer-tracked pan that can end in a toss
//! - **Storage**: at most one animation per kind, with merge rules on creation
//! - **Executor**: cooperative, frame-driven stepping in a fixed order
//!
//! Animations never own the state they animate. They drive it through
//! [`PositionTarget`] and [`ScaleTarget`], which the viewport implements.

pub mod animation;
pub mod engine;
pub mod executor;
pub mod storage;

pub use animation::{
    drag::Drag, edge::Edge, edge::EDGE_FRAME_MS, glide::Glide, glide::ZoomTie, zoom::Zoom,
    AnimationKind, AnimationState, PositionTarget, ScaleTarget,
};
pub use engine::{Animations, GlideRequest};
pub use executor::{Executor, TickReport};
pub use storage::AnimationStorage;
