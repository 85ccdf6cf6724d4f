//! Discrete scale steps
//!
//! Zoom never settles between steps. The table holds `n` values with a
//! constant ratio between neighbours, so every step looks like the same
//! amount of zoom regardless of where on the range it happens.

use crate::math::{nearest, round};
use thiserror::Error;

/// Largest step count a table may hold
pub const MAX_STEPS: usize = 1000;

/// Reasons a step table cannot be generated
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StepTableError {
    /// Fewer than two steps leaves no ratio to compute
    #[error("step table needs at least 2 steps, got {0}")]
    TooFewSteps(usize),

    #[error("step table holds at most {MAX_STEPS} steps, got {0}")]
    TooManySteps(usize),

    /// Bounds must be positive and ascending
    #[error("invalid scale bounds: min {min}, max {max}")]
    InvalidBounds { min: f64, max: f64 },
}

/// Distance from one step to its neighbours
///
/// At the table boundaries the missing neighbour distance is `0.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepDelta {
    /// Distance to the next (larger) step
    pub forward: f64,
    /// Distance to the previous (smaller) step
    pub backward: f64,
}

impl StepDelta {
    /// Pick the delta in the direction of travel
    pub fn towards(&self, positive: bool) -> f64 {
        if positive {
            self.forward
        } else {
            self.backward
        }
    }
}

/// Ascending table of geometrically spaced scale values
#[derive(Clone, Debug, PartialEq)]
pub struct StepTable {
    values: Vec<f64>,
    deltas: Vec<StepDelta>,
    rounding: u32,
}

impl StepTable {
    /// Generate `count` steps between `min` and `max`
    ///
    /// `value[i] = max * base^i` with `base = (min / max)^(1 / (count - 1))`,
    /// rounded to `rounding` decimals and reversed into ascending order.
    pub fn generate(min: f64, max: f64, count: usize, rounding: u32) -> Result<Self, StepTableError> {
        if count < 2 {
            return Err(StepTableError::TooFewSteps(count));
        }
        if count > MAX_STEPS {
            return Err(StepTableError::TooManySteps(count));
        }
        if !(min.is_finite() && max.is_finite()) || min <= 0.0 || min >= max {
            return Err(StepTableError::InvalidBounds { min, max });
        }

        let base = (min / max).powf(1.0 / (count - 1) as f64);
        let mut values: Vec<f64> = (0..count)
            .map(|i| round(max * base.powi(i as i32), rounding))
            .collect();
        values.reverse();

        // Bounds are exact, interior rounding never drifts them
        values[0] = min;
        values[count - 1] = max;

        let deltas = (0..count)
            .map(|i| StepDelta {
                forward: if i + 1 < count {
                    round(values[i + 1] - values[i], rounding)
                } else {
                    0.0
                },
                backward: if i > 0 {
                    round(values[i] - values[i - 1], rounding)
                } else {
                    0.0
                },
            })
            .collect();

        Ok(Self {
            values,
            deltas,
            rounding,
        })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Smallest step
    pub fn first(&self) -> f64 {
        self.values[0]
    }

    /// Largest step
    pub fn last(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Neighbour distances for `index`
    pub fn delta(&self, index: usize) -> StepDelta {
        self.deltas.get(index).copied().unwrap_or_default()
    }

    pub fn rounding(&self) -> u32 {
        self.rounding
    }

    /// Value `offset` entries away from `index`
    ///
    /// Past either end the geometric spacing continues, so an offset that
    /// overshoots a bound still reports its full size. Inside the table this
    /// is exactly a step value.
    pub fn offset(&self, index: usize, offset: i32) -> f64 {
        let last_index = self.values.len() - 1;
        let target = index as i64 + i64::from(offset);
        if target < 0 {
            self.first() / self.ratio().powf(-target as f64)
        } else if target as usize > last_index {
            self.last() * self.ratio().powf((target as usize - last_index) as f64)
        } else {
            self.values[target as usize]
        }
    }

    /// Ratio between neighbouring steps
    pub fn ratio(&self) -> f64 {
        (self.last() / self.first()).powf(1.0 / (self.values.len() - 1) as f64)
    }

    /// Index of the step closest to `value`
    pub fn nearest_index(&self, value: f64) -> usize {
        nearest(value, &self.values).map_or(0, |(index, _)| index)
    }

    /// Step closest to `value`
    pub fn nearest(&self, value: f64) -> f64 {
        self.values[self.nearest_index(value)]
    }

    /// Index of `value` if it is exactly a step
    pub fn index_of(&self, value: f64) -> Option<usize> {
        self.values.iter().position(|&v| v == value)
    }

    /// Whether `value` is exactly one of the steps
    pub fn contains(&self, value: f64) -> bool {
        self.index_of(value).is_some()
    }
}
