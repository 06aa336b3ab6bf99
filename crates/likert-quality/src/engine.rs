use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use likert_core::Severity;
use likert_core::config::{AnomalyThresholds, EngineConfig};
use likert_core::models::session::ResponseWindow;

use crate::detectors::{pattern, revision, straight_line, timing};
use crate::events::AnomalyEvent;
use crate::result::{AnomalyResult, RecommendedAction};

/// Runs every detector against a respondent's window. Holds only
/// thresholds, so one detector can be shared across threads and calls.
#[derive(Debug, Clone, Default)]
pub struct AnomalyDetector {
    thresholds: AnomalyThresholds,
}

impl AnomalyDetector {
    pub fn new(thresholds: AnomalyThresholds) -> Self {
        Self { thresholds }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.anomaly)
    }

    pub fn thresholds(&self) -> &AnomalyThresholds {
        &self.thresholds
    }

    pub fn straight_line(&self, window: &ResponseWindow) -> AnomalyResult {
        straight_line::detect(window, &self.thresholds)
    }

    pub fn timing(&self, window: &ResponseWindow) -> AnomalyResult {
        timing::detect(window, &self.thresholds)
    }

    pub fn pattern(&self, window: &ResponseWindow) -> AnomalyResult {
        pattern::detect(window, &self.thresholds)
    }

    pub fn revisions(&self, window: &ResponseWindow) -> AnomalyResult {
        revision::detect(window, &self.thresholds)
    }

    /// Every detector's verdict, detected or not, in a fixed order:
    /// straight-line, timing, pattern, revisions.
    pub fn analyze_all(&self, window: &ResponseWindow) -> Vec<AnomalyResult> {
        vec![
            self.straight_line(window),
            self.timing(window),
            self.pattern(window),
            self.revisions(window),
        ]
    }

    /// Only the verdicts that flagged something.
    pub fn analyze(&self, window: &ResponseWindow) -> Vec<AnomalyResult> {
        let detected: Vec<AnomalyResult> = self
            .analyze_all(window)
            .into_iter()
            .filter(|r| r.detected)
            .collect();
        tracing::debug!(
            responses = window.responses.len(),
            detected = detected.len(),
            "quality checks run"
        );
        detected
    }

    pub fn summary(&self, window: &ResponseWindow) -> QualitySummary {
        QualitySummary::from_results(&self.analyze_all(window))
    }

    /// Analyze and emit one structured event per detected anomaly.
    pub fn analyze_respondent(
        &self,
        respondent_id: Uuid,
        window: &ResponseWindow,
    ) -> Vec<AnomalyResult> {
        let detected = self.analyze(window);
        for result in &detected {
            AnomalyEvent::from_result(respondent_id, result).emit();
        }
        detected
    }
}

/// Roll-up of a set of verdicts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QualitySummary {
    pub total_detected: usize,
    pub by_severity: BTreeMap<Severity, usize>,
    pub highest_severity: Option<Severity>,
    /// Most drastic action across detected verdicts; `Ignore` when clean.
    pub strictest_action: RecommendedAction,
}

impl QualitySummary {
    pub fn from_results(results: &[AnomalyResult]) -> Self {
        let mut summary = Self::default();
        for result in results.iter().filter(|r| r.detected) {
            summary.total_detected += 1;
            *summary.by_severity.entry(result.severity).or_default() += 1;
            summary.highest_severity = summary.highest_severity.max(Some(result.severity));
            summary.strictest_action = summary.strictest_action.max(result.recommended_action);
        }
        summary
    }

    pub fn is_clean(&self) -> bool {
        self.total_detected == 0
    }
}
