use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::scale::ScaleRange;

/// An integer rating validated against its scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Ordinal(i32);

impl Ordinal {
    pub fn new(value: i32, range: ScaleRange) -> Result<Self, CoreError> {
        if !range.contains(value as f64) {
            return Err(CoreError::InvalidOrdinal {
                value,
                min: range.min,
                max: range.max,
            });
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> i32 {
        self.0
    }

    /// The reverse-scored ordinal on the same range.
    pub fn reversed(&self, range: ScaleRange) -> Self {
        Self(range.reverse(self.0 as f64).round() as i32)
    }
}

impl From<Ordinal> for f64 {
    fn from(o: Ordinal) -> f64 {
        o.0 as f64
    }
}

/// One answer event for one item. A revision replaces `value` and bumps
/// `revision_count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoredResponse {
    pub item_id: String,
    pub value: Ordinal,
    pub timestamp: jiff::Timestamp,
    #[serde(default)]
    pub response_time_ms: Option<f64>,
    #[serde(default)]
    pub revision_count: u32,
}
