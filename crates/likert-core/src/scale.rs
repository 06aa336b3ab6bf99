use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// A closed numeric range, used both for ordinal answer scales (1–7) and
/// for the scaled output space (0–100).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScaleRange {
    pub min: f64,
    pub max: f64,
}

impl ScaleRange {
    /// Canonical seven-point Likert scale.
    pub const LIKERT_7: ScaleRange = ScaleRange { min: 1.0, max: 7.0 };

    /// Canonical scaled-score space.
    pub const PERCENT: ScaleRange = ScaleRange {
        min: 0.0,
        max: 100.0,
    };

    /// Unit interval, used for proportions.
    pub const UNIT: ScaleRange = ScaleRange { min: 0.0, max: 1.0 };

    pub fn new(min: f64, max: f64) -> Result<Self, CoreError> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(CoreError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Number of distinct integer values on an ordinal scale.
    pub fn cardinality(&self) -> usize {
        (self.max.floor() - self.min.ceil()).max(0.0) as usize + 1
    }

    /// Every legal integer value, ascending.
    pub fn ordinal_values(&self) -> std::ops::RangeInclusive<i32> {
        let lo = self.min.ceil() as i32;
        let hi = self.max.floor() as i32;
        lo..=hi
    }

    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }

    /// Reverse-score `value` within this range.
    pub fn reverse(&self, value: f64) -> f64 {
        reverse(value, *self)
    }
}

impl Default for ScaleRange {
    fn default() -> Self {
        Self::LIKERT_7
    }
}

/// Linear map from `source` onto `target`.
///
/// Endpoints land exactly on the target endpoints; interior values are not
/// rounded. Values outside `source` are extrapolated, not clamped; callers
/// filter them before this point.
pub fn to_unit_scale(value: f64, source: ScaleRange, target: ScaleRange) -> f64 {
    let span = source.span();
    if span == 0.0 {
        return target.min;
    }
    if value == source.min {
        return target.min;
    }
    if value == source.max {
        return target.max;
    }
    (value - source.min) / span * target.span() + target.min
}

/// Reverse-score an ordinal value: `(max + min) - value`. Applying it twice
/// returns the original value.
pub fn reverse(value: f64, source: ScaleRange) -> f64 {
    (source.max + source.min) - value
}
