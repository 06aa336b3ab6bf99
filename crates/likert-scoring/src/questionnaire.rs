use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use likert_core::ScaleRange;
use likert_core::config::ScaleConfig;
use likert_core::models::item::AssessmentItem;
use likert_core::models::response::ScoredResponse;
use likert_core::models::session::ResponseSession;

use crate::error::ScoringError;
use crate::subscale::{self, SubscaleScore};

/// A response that does not fit its questionnaire.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct ValidationError {
    pub item_id: String,
    pub value: i32,
    pub expected_range: Option<ScaleRange>,
    pub message: String,
}

/// A fixed set of items on one answer scale, grouped into categories.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Questionnaire {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub scale: ScaleRange,
    pub items: Vec<AssessmentItem>,
}

impl Questionnaire {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        scale: ScaleRange,
        items: Vec<AssessmentItem>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            scale,
            items,
        }
    }

    pub fn item(&self, id: &str) -> Option<&AssessmentItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Category names in first-appearance order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for item in &self.items {
            if !seen.contains(&item.category.as_str()) {
                seen.push(&item.category);
            }
        }
        seen
    }

    /// Report every response that names an unknown item or falls outside
    /// the questionnaire's scale.
    pub fn validate_responses(&self, responses: &[ScoredResponse]) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for response in responses {
            let value = response.value.value();
            if self.item(&response.item_id).is_none() {
                errors.push(ValidationError {
                    item_id: response.item_id.clone(),
                    value,
                    expected_range: None,
                    message: format!("{}: unknown item '{}'", self.name, response.item_id),
                });
            } else if !self.scale.contains(value as f64) {
                errors.push(ValidationError {
                    item_id: response.item_id.clone(),
                    value,
                    expected_range: Some(self.scale),
                    message: format!(
                        "{}: item {} response {} is outside range [{}, {}]",
                        self.name, response.item_id, value, self.scale.min, self.scale.max,
                    ),
                });
            }
        }
        errors
    }

    /// Score every category from the latest responses. Unanswered items
    /// count as missing; reverse flags and weights come from the item
    /// definitions. The first validation failure is returned as an error.
    pub fn score_subscales(
        &self,
        responses: &[ScoredResponse],
        target: ScaleRange,
    ) -> Result<Vec<SubscaleScore>, ScoringError> {
        if let Some(error) = self.validate_responses(responses).into_iter().next() {
            return Err(error.into());
        }

        let scale = ScaleConfig {
            source: self.scale,
            target,
        };

        let mut scores = Vec::new();
        for category in self.categories() {
            let items: Vec<&AssessmentItem> = self
                .items
                .iter()
                .filter(|i| i.category == category)
                .collect();
            let values: Vec<Option<i32>> = items
                .iter()
                .map(|item| {
                    responses
                        .iter()
                        .rev()
                        .find(|r| r.item_id == item.id)
                        .map(|r| r.value.value())
                })
                .collect();
            let flags: Vec<bool> = items.iter().map(|i| i.reverse_scored).collect();
            let weights: Vec<f64> = items.iter().map(|i| i.weight).collect();

            scores.push(subscale::aggregate(
                category,
                &values,
                Some(&flags),
                Some(&weights),
                &scale,
            )?);
        }

        tracing::debug!(
            questionnaire = %self.id,
            responses = responses.len(),
            subscales = scores.len(),
            "subscales scored"
        );
        Ok(scores)
    }

    pub fn score_session(
        &self,
        session: &ResponseSession,
        target: ScaleRange,
    ) -> Result<Vec<SubscaleScore>, ScoringError> {
        self.score_subscales(session.responses(), target)
    }

    /// Format subscale scores as structured text for a report.
    pub fn to_structured_summary(&self, scores: &[SubscaleScore]) -> String {
        let mut output = format!("## {}\n\n", self.name);
        for category in self.categories() {
            if let Some(score) = scores.iter().find(|s| s.category == category) {
                output.push_str(&format!(
                    "- {}: {} ({}, {} items answered",
                    score.category, score.scaled_score, score.interpretation.label, score.valid_count,
                ));
                if let Some(percentile) = score.percentile {
                    output.push_str(&format!(", percentile {percentile:.0}"));
                }
                output.push_str(")\n");
            }
        }
        output
    }
}
