use serde::{Deserialize, Serialize};
use ts_rs::TS;

fn default_weight() -> f64 {
    1.0
}

/// A questionnaire item as defined by configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentItem {
    pub id: String,
    /// The subscale this item belongs to.
    pub category: String,
    #[serde(default)]
    pub reverse_scored: bool,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl AssessmentItem {
    pub fn new(id: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            reverse_scored: false,
            weight: 1.0,
        }
    }

    pub fn reversed(mut self) -> Self {
        self.reverse_scored = true;
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}
