//! Tilted Core
//!
//! Leaf building blocks shared by the animation engine and the viewport:
//!
//! - **Math**: rounding to a decimal precision, clamping, nearest-value lookup
//! - **Step Tables**: geometrically spaced discrete scale values
//! - **Easing**: pure time-ratio to progress-ratio curves
//! - **Geometry**: coordinates and sizes in surface space
//! - **Config**: typed, validated viewport configuration
//!
//! # Example
//!
//! ```rust
//! use tilted_core::{Config, StepTable};
//!
//! let table = StepTable::generate(0.25, 1.0, 15, 3).unwrap();
//! assert_eq!(table.first(), 0.25);
//! assert_eq!(table.last(), 1.0);
//!
//! let config = Config::default().validate().unwrap();
//! assert_eq!(config.steps().len(), 15);
//! ```

pub mod config;
pub mod easing;
pub mod geometry;
pub mod math;
pub mod steps;

pub use config::{Config, ConfigError, Rounding, ValidatedConfig};
pub use easing::Easing;
pub use geometry::{Coords, Size};
pub use steps::{StepDelta, StepTable, StepTableError};
