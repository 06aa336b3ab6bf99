use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Ordered severity / priority tag shared by item recommendations and
/// anomaly verdicts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Bucket a blended 0–1 score.
    pub fn classify(score: f64) -> Self {
        if score >= 0.95 {
            Severity::Critical
        } else if score >= 0.7 {
            Severity::High
        } else if score >= 0.4 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    pub fn from_factors(factors: &[SeverityFactor]) -> Self {
        Self::classify(blend(factors))
    }

    /// High and critical both demand attention from a reviewer.
    pub fn is_urgent(&self) -> bool {
        *self >= Severity::High
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One input to a severity blend: how far `value` has travelled towards
/// `threshold`, weighted by `weight`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeverityFactor {
    pub value: f64,
    pub threshold: f64,
    pub weight: f64,
}

impl SeverityFactor {
    pub fn new(value: f64, threshold: f64, weight: f64) -> Self {
        Self {
            value,
            threshold,
            weight,
        }
    }

    /// `value / threshold`, capped at 1.0 and floored at 0.0.
    pub fn normalized(&self) -> f64 {
        if !self.value.is_finite() || self.value <= 0.0 {
            return 0.0;
        }
        if self.threshold <= 0.0 {
            return 1.0;
        }
        (self.value / self.threshold).min(1.0)
    }
}

/// Weighted mean of normalized factors, in [0, 1]. Zero total weight
/// yields 0.
pub fn blend(factors: &[SeverityFactor]) -> f64 {
    let total_weight: f64 = factors.iter().map(|f| f.weight.abs()).sum();
    if total_weight == 0.0 {
        return 0.0;
    }
    let weighted: f64 = factors
        .iter()
        .map(|f| f.normalized() * f.weight.abs())
        .sum();
    (weighted / total_weight).clamp(0.0, 1.0)
}
