//! Viewport configuration
//!
//! A flat set of named numbers with documented defaults. Sources are
//! permissive: unknown keys are ignored and malformed values keep their
//! default, so a partially broken config still produces a usable viewport.
//! Structural problems (a degenerate step table, zero durations) are caught
//! once by [`Config::validate`], which is the only way to obtain the
//! [`ValidatedConfig`] a surface is built from.
//!
//! ```rust
//! use tilted_core::Config;
//!
//! let config = Config::from_toml_str(r#"
//!     scale_steps = 9
//!     edge_move_enabled = true
//!     not_a_key = 1
//!     animation_glide_time = "fast"
//! "#).unwrap();
//!
//! assert_eq!(config.scale_steps, 9);
//! assert!(config.edge_move_enabled);
//! assert_eq!(config.animation_glide_time, 400.0);
//! ```

use std::ops::Deref;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::steps::{StepTable, StepTableError};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The scale bounds or step count cannot form a step table
    #[error("invalid scale steps: {0}")]
    Steps(#[from] StepTableError),

    /// Initial step index is outside the table
    #[error("default scale step {index} is out of range for {steps} steps")]
    DefaultStepOutOfRange { index: usize, steps: usize },

    /// Committed scale precision would round step values off the table
    #[error("scale_rounding_final ({committed}) must be at least scale_rounding ({table})")]
    ScaleRoundingTooCoarse { table: u32, committed: u32 },

    /// A value that must be strictly positive is not
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    /// A value that must be finite and non-negative is not
    #[error("{name} must be a finite non-negative number, got {value}")]
    Negative { name: &'static str, value: f64 },

    /// The TOML source itself could not be parsed
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Decimal precision applied to a value while animating and once committed
///
/// `None` disables rounding for that phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rounding {
    pub interim: Option<u32>,
    pub committed: Option<u32>,
}

impl Rounding {
    pub const NONE: Rounding = Rounding {
        interim: None,
        committed: None,
    };

    pub const fn new(interim: Option<u32>, committed: Option<u32>) -> Self {
        Self { interim, committed }
    }

    /// Use the interim precision for both phases
    pub const fn interim_only(self) -> Self {
        Self {
            interim: self.interim,
            committed: self.interim,
        }
    }
}

/// Viewport configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Smallest scale step
    pub scale_min: f64,
    /// Largest scale step
    pub scale_max: f64,
    /// Number of scale steps
    pub scale_steps: usize,
    /// Index of the initial scale step
    pub scale_default_step: usize,
    /// Decimal precision of step table values
    pub scale_rounding: u32,
    /// Factor applied to the zoom-toward-pointer compensation glide
    pub scale_glide: f64,

    /// Tilt angle in degrees at the smallest scale
    pub tilt_min: f64,
    /// Tilt angle in degrees at the largest scale
    pub tilt_max: f64,
    /// Decimal precision of the tilt angle
    pub tilt_rounding: u32,

    /// Perspective distance in px
    pub perspective_distance: f64,
    /// Multiplier on the perspective distance
    pub perspective_factor: f64,

    /// Pan when the pointer rests near the container edge
    pub edge_move_enabled: bool,
    /// Width in px of the band along each container edge
    pub edge_move_area: f64,
    /// Edge pan speed in px per 10ms at scale 1
    pub edge_move_speed: f64,

    /// Zoom animation duration in ms
    pub animation_scale_time: f64,
    /// Glide animation duration in ms
    pub animation_glide_time: f64,

    /// Drags released faster than this (ms) are tossed
    pub toss_threshold: f64,
    /// Multiplier from drag displacement to toss distance
    pub toss_factor: f64,
    /// Toss glide duration in ms
    pub animation_toss_time: f64,

    /// Coordinate precision while animating
    pub coord_rounding_interim: u32,
    /// Coordinate precision once committed
    pub coord_rounding_final: u32,

    /// Scale precision while animating
    pub scale_rounding_interim: u32,
    /// Scale precision once committed
    pub scale_rounding_final: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scale_min: 0.25,
            scale_max: 1.0,
            scale_steps: 15,
            scale_default_step: 7,
            scale_rounding: 3,
            scale_glide: 1.0,

            tilt_min: 0.0,
            tilt_max: 35.0,
            tilt_rounding: 2,

            perspective_distance: 600.0,
            perspective_factor: 1.0,

            edge_move_enabled: false,
            edge_move_area: 20.0,
            edge_move_speed: 10.0,

            animation_scale_time: 400.0,
            animation_glide_time: 400.0,

            toss_threshold: 150.0,
            toss_factor: 4.0,
            animation_toss_time: 1000.0,

            coord_rounding_interim: 1,
            coord_rounding_final: 0,

            scale_rounding_interim: 4,
            scale_rounding_final: 3,
        }
    }
}

/// Outcome of applying one named value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applied {
    /// The value was stored
    Set,
    /// The key is not a config key
    Unknown,
    /// The value did not fit the key and the previous value was kept
    Rejected,
}

impl Config {
    /// Build a config from `name -> number` pairs on top of the defaults
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut config = Self::default();
        for (key, value) in pairs {
            config.apply_logged(key.as_ref(), value);
        }
        config
    }

    /// Parse a flat TOML document on top of the defaults
    ///
    /// Only a syntax error fails; per-key problems fall back to defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(source)?;
        Ok(Self::from_toml_table(&table))
    }

    /// Apply every numeric or boolean entry of `table` on top of the defaults
    pub fn from_toml_table(table: &toml::Table) -> Self {
        let mut config = Self::default();
        for (key, value) in table {
            let number = match value {
                toml::Value::Integer(i) => *i as f64,
                toml::Value::Float(f) => *f,
                toml::Value::Boolean(b) => f64::from(u8::from(*b)),
                other => {
                    if Self::is_known_key(key) {
                        tracing::warn!(
                            "config: {} has non-numeric value {}, keeping default",
                            key,
                            other
                        );
                    } else {
                        tracing::debug!("config: ignoring unknown key {}", key);
                    }
                    continue;
                }
            };
            config.apply_logged(key, number);
        }
        config
    }

    fn apply_logged(&mut self, key: &str, value: f64) {
        match self.apply(key, value) {
            Applied::Set => {}
            Applied::Unknown => tracing::debug!("config: ignoring unknown key {}", key),
            Applied::Rejected => {
                tracing::warn!("config: {} = {} is malformed, keeping default", key, value)
            }
        }
    }

    fn is_known_key(key: &str) -> bool {
        Self::default().apply(key, 0.0) != Applied::Unknown
    }

    /// Set one value by name
    ///
    /// Non-finite numbers are rejected everywhere; counts, indices and
    /// precisions additionally require a non-negative integer.
    pub fn apply(&mut self, key: &str, value: f64) -> Applied {
        fn float(slot: &mut f64, value: f64) -> Applied {
            if value.is_finite() {
                *slot = value;
                Applied::Set
            } else {
                Applied::Rejected
            }
        }

        fn count(slot: &mut usize, value: f64) -> Applied {
            if value.is_finite() && value >= 0.0 && value.fract() == 0.0 {
                *slot = value as usize;
                Applied::Set
            } else {
                Applied::Rejected
            }
        }

        fn precision(slot: &mut u32, value: f64) -> Applied {
            if value.is_finite() && (0.0..=15.0).contains(&value) && value.fract() == 0.0 {
                *slot = value as u32;
                Applied::Set
            } else {
                Applied::Rejected
            }
        }

        match key {
            "scale_min" => float(&mut self.scale_min, value),
            "scale_max" => float(&mut self.scale_max, value),
            "scale_steps" => count(&mut self.scale_steps, value),
            "scale_default_step" => count(&mut self.scale_default_step, value),
            "scale_rounding" => precision(&mut self.scale_rounding, value),
            "scale_glide" => float(&mut self.scale_glide, value),
            "tilt_min" => float(&mut self.tilt_min, value),
            "tilt_max" => float(&mut self.tilt_max, value),
            "tilt_rounding" => precision(&mut self.tilt_rounding, value),
            "perspective_distance" => float(&mut self.perspective_distance, value),
            "perspective_factor" => float(&mut self.perspective_factor, value),
            "edge_move_enabled" => {
                if value.is_finite() {
                    self.edge_move_enabled = value != 0.0;
                    Applied::Set
                } else {
                    Applied::Rejected
                }
            }
            "edge_move_area" => float(&mut self.edge_move_area, value),
            "edge_move_speed" => float(&mut self.edge_move_speed, value),
            "animation_scale_time" => float(&mut self.animation_scale_time, value),
            "animation_glide_time" => float(&mut self.animation_glide_time, value),
            "toss_threshold" => float(&mut self.toss_threshold, value),
            "toss_factor" => float(&mut self.toss_factor, value),
            "animation_toss_time" => float(&mut self.animation_toss_time, value),
            "coord_rounding_interim" => precision(&mut self.coord_rounding_interim, value),
            "coord_rounding_final" => precision(&mut self.coord_rounding_final, value),
            "scale_rounding_interim" => precision(&mut self.scale_rounding_interim, value),
            "scale_rounding_final" => precision(&mut self.scale_rounding_final, value),
            _ => Applied::Unknown,
        }
    }

    /// Check structural invariants and build the step table
    pub fn validate(self) -> Result<ValidatedConfig> {
        let steps = StepTable::generate(
            self.scale_min,
            self.scale_max,
            self.scale_steps,
            self.scale_rounding,
        )?;

        if self.scale_rounding_final < self.scale_rounding {
            return Err(ConfigError::ScaleRoundingTooCoarse {
                table: self.scale_rounding,
                committed: self.scale_rounding_final,
            });
        }

        if self.scale_default_step >= steps.len() {
            return Err(ConfigError::DefaultStepOutOfRange {
                index: self.scale_default_step,
                steps: steps.len(),
            });
        }

        for (name, value) in [
            ("animation_scale_time", self.animation_scale_time),
            ("animation_glide_time", self.animation_glide_time),
            ("animation_toss_time", self.animation_toss_time),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { name, value });
            }
        }

        for (name, value) in [
            ("edge_move_area", self.edge_move_area),
            ("edge_move_speed", self.edge_move_speed),
            ("toss_threshold", self.toss_threshold),
            ("perspective_distance", self.perspective_distance),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Negative { name, value });
            }
        }

        Ok(ValidatedConfig {
            config: self,
            steps,
        })
    }

    /// Coordinate rounding for interactive moves
    pub fn coord_rounding(&self) -> Rounding {
        Rounding::new(
            Some(self.coord_rounding_interim),
            Some(self.coord_rounding_final),
        )
    }

    /// Scale rounding for in-flight zoom steps
    pub fn scale_rounding(&self) -> Rounding {
        Rounding::new(
            Some(self.scale_rounding_interim),
            Some(self.scale_rounding_final),
        )
    }

    /// Effective perspective distance in px
    pub fn perspective(&self) -> f64 {
        (self.perspective_distance * self.perspective_factor).round()
    }
}

/// A [`Config`] whose invariants hold, with its step table
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedConfig {
    config: Config,
    steps: StepTable,
}

impl ValidatedConfig {
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn steps(&self) -> &StepTable {
        &self.steps
    }

    /// Initial scale value
    pub fn default_scale(&self) -> f64 {
        self.steps.values()[self.config.scale_default_step]
    }
}

impl Deref for ValidatedConfig {
    type Target = Config;

    fn deref(&self) -> &Config {
        &self.config
    }
}
