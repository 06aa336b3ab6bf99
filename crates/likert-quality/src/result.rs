use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use likert_core::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AnomalyType {
    /// Normal verdict.
    None,
    StraightLineResponding,
    TooFastCompletion,
    BotLikeBehavior,
    AlternatingPattern,
    SequentialPattern,
    MonotonicRun,
    ExtremeResponding,
    ExcessiveRevisions,
}

impl AnomalyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyType::None => "none",
            AnomalyType::StraightLineResponding => "straight_line_responding",
            AnomalyType::TooFastCompletion => "too_fast_completion",
            AnomalyType::BotLikeBehavior => "bot_like_behavior",
            AnomalyType::AlternatingPattern => "alternating_pattern",
            AnomalyType::SequentialPattern => "sequential_pattern",
            AnomalyType::MonotonicRun => "monotonic_run",
            AnomalyType::ExtremeResponding => "extreme_responding",
            AnomalyType::ExcessiveRevisions => "excessive_revisions",
        }
    }
}

impl std::fmt::Display for AnomalyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a consumer should do with the respondent's data. Ordered from
/// least to most drastic.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RecommendedAction {
    #[default]
    Ignore,
    Flag,
    ManualReview,
    Exclude,
}

impl RecommendedAction {
    /// Exclude when critical, review when high, otherwise flag.
    pub fn for_severity(severity: Severity) -> Self {
        match severity {
            Severity::Critical => RecommendedAction::Exclude,
            Severity::High => RecommendedAction::ManualReview,
            _ => RecommendedAction::Flag,
        }
    }
}

/// One detector's verdict. Computed on demand and never stored as the
/// canonical record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnomalyResult {
    pub detected: bool,
    pub anomaly_type: AnomalyType,
    pub severity: Severity,
    /// 0–1.
    pub confidence: f64,
    pub explanation: String,
    pub evidence: BTreeMap<String, f64>,
    pub recommended_action: RecommendedAction,
}

impl AnomalyResult {
    pub fn normal(explanation: impl Into<String>, evidence: BTreeMap<String, f64>) -> Self {
        Self {
            detected: false,
            anomaly_type: AnomalyType::None,
            severity: Severity::Low,
            confidence: 0.0,
            explanation: explanation.into(),
            evidence,
            recommended_action: RecommendedAction::Ignore,
        }
    }

    pub fn detected(
        anomaly_type: AnomalyType,
        severity: Severity,
        confidence: f64,
        explanation: impl Into<String>,
        evidence: BTreeMap<String, f64>,
        recommended_action: RecommendedAction,
    ) -> Self {
        Self {
            detected: true,
            anomaly_type,
            severity,
            confidence: confidence.clamp(0.0, 1.0),
            explanation: explanation.into(),
            evidence,
            recommended_action,
        }
    }
}

pub(crate) fn evidence<const N: usize>(entries: [(&str, f64); N]) -> BTreeMap<String, f64> {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}
