//! Viewport error types

use thiserror::Error;
use tilted_core::ConfigError;

/// Viewport-related errors
#[derive(Error, Debug)]
pub enum ViewportError {
    /// The configuration failed validation
    #[error("Invalid viewport config: {0}")]
    Config(#[from] ConfigError),

    /// A container or content size is not positive and finite
    #[error("Invalid {name} size: {width}x{height}")]
    InvalidSize {
        name: &'static str,
        width: f64,
        height: f64,
    },

    /// The surface was removed or its arena dropped
    #[error("Surface no longer exists")]
    SurfaceGone,
}

/// Result type for viewport operations
pub type Result<T> = std::result::Result<T, ViewportError>;
