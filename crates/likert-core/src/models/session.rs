use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::item::AssessmentItem;
use crate::models::response::{Ordinal, ScoredResponse};
use crate::scale::ScaleRange;

/// One respondent's answers, values, timings and revision counts in
/// first-answer order. This is the input of every anomaly detector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResponseWindow {
    pub responses: Vec<i32>,
    #[serde(default)]
    pub response_times_ms: Vec<f64>,
    #[serde(default)]
    pub revisions: Vec<u32>,
    /// The answer scale; endpoints drive extreme-response detection.
    #[serde(default)]
    pub scale: ScaleRange,
}

impl ResponseWindow {
    pub fn new(responses: Vec<i32>) -> Self {
        Self {
            responses,
            ..Self::default()
        }
    }

    pub fn with_times(mut self, response_times_ms: Vec<f64>) -> Self {
        self.response_times_ms = response_times_ms;
        self
    }

    pub fn with_revisions(mut self, revisions: Vec<u32>) -> Self {
        self.revisions = revisions;
        self
    }

    pub fn with_scale(mut self, scale: ScaleRange) -> Self {
        self.scale = scale;
        self
    }
}

/// Accumulates one respondent's answer events within a single session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseSession {
    pub id: Uuid,
    pub scale: ScaleRange,
    responses: Vec<ScoredResponse>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl ResponseSession {
    pub fn new(scale: ScaleRange) -> Self {
        Self {
            id: Uuid::new_v4(),
            scale,
            responses: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Record an answer. A repeat answer to the same item replaces its value
    /// and increments the item's revision counter.
    pub fn record(
        &mut self,
        item_id: &str,
        value: i32,
        timestamp: jiff::Timestamp,
        response_time_ms: Option<f64>,
    ) -> Result<&ScoredResponse, CoreError> {
        let value = Ordinal::new(value, self.scale)?;

        let position = match self.position_of(item_id) {
            Some(position) => {
                let existing = &mut self.responses[position];
                existing.value = value;
                existing.timestamp = timestamp;
                existing.revision_count += 1;
                if response_time_ms.is_some() {
                    existing.response_time_ms = response_time_ms;
                }
                tracing::debug!(
                    session_id = %self.id,
                    item_id,
                    revision = existing.revision_count,
                    "response revised"
                );
                position
            }
            None => {
                self.responses.push(ScoredResponse {
                    item_id: item_id.to_string(),
                    value,
                    timestamp,
                    response_time_ms,
                    revision_count: 0,
                });
                let position = self.responses.len() - 1;
                self.index.insert(item_id.to_string(), position);
                position
            }
        };

        Ok(&self.responses[position])
    }

    fn position_of(&mut self, item_id: &str) -> Option<usize> {
        if self.index.len() != self.responses.len() {
            // Index is skipped during serialization; rebuild after a reload.
            self.index = self
                .responses
                .iter()
                .enumerate()
                .map(|(i, r)| (r.item_id.clone(), i))
                .collect();
        }
        self.index.get(item_id).copied()
    }

    pub fn responses(&self) -> &[ScoredResponse] {
        &self.responses
    }

    pub fn get(&self, item_id: &str) -> Option<&ScoredResponse> {
        self.responses.iter().find(|r| r.item_id == item_id)
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    /// Latest values for `items`, in item order, `None` where unanswered.
    pub fn values_for(&self, items: &[AssessmentItem]) -> Vec<Option<i32>> {
        items
            .iter()
            .map(|item| self.get(&item.id).map(|r| r.value.value()))
            .collect()
    }

    /// The ordered anomaly-detection window for this session.
    pub fn window(&self) -> ResponseWindow {
        ResponseWindow {
            responses: self.responses.iter().map(|r| r.value.value()).collect(),
            response_times_ms: self
                .responses
                .iter()
                .filter_map(|r| r.response_time_ms)
                .collect(),
            revisions: self.responses.iter().map(|r| r.revision_count).collect(),
            scale: self.scale,
        }
    }
}
