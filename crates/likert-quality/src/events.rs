use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use likert_core::Severity;

use crate::result::{AnomalyResult, AnomalyType, RecommendedAction};

/// A structured log record for one detected anomaly.
///
/// Emitted via `tracing` so whichever subscriber the host installs (JSON
/// logs, telemetry shipper) receives it; the verdict itself is not persisted
/// here.
#[derive(Debug, Clone, Serialize)]
pub struct AnomalyEvent {
    pub respondent_id: Uuid,
    pub anomaly_type: AnomalyType,
    pub severity: Severity,
    pub confidence: f64,
    pub action: RecommendedAction,
    pub explanation: String,
    pub details: Option<serde_json::Value>,
}

impl AnomalyEvent {
    pub fn from_result(respondent_id: Uuid, result: &AnomalyResult) -> Self {
        Self {
            respondent_id,
            anomaly_type: result.anomaly_type,
            severity: result.severity,
            confidence: result.confidence,
            action: result.recommended_action,
            explanation: result.explanation.clone(),
            details: serde_json::to_value(&result.evidence).ok(),
        }
    }

    /// Emit this event via tracing. High and critical verdicts log at warn.
    pub fn emit(&self) {
        if self.severity.is_urgent() {
            warn!(
                anomaly.respondent_id = %self.respondent_id,
                anomaly.kind = %self.anomaly_type,
                anomaly.severity = %self.severity,
                anomaly.confidence = self.confidence,
                anomaly.action = ?self.action,
                "anomaly detected"
            );
        } else {
            info!(
                anomaly.respondent_id = %self.respondent_id,
                anomaly.kind = %self.anomaly_type,
                anomaly.severity = %self.severity,
                anomaly.confidence = self.confidence,
                anomaly.action = ?self.action,
                "anomaly detected"
            );
        }
    }
}
