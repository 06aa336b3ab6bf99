use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use likert_core::config::ScaleConfig;

use crate::CompositeIndex;
use crate::error::ScoringError;
use crate::interpretation::Interpretation;
use crate::subscale;

/// A higher-order index built from several subscale scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CompositeScore {
    pub index_id: String,
    pub value: f64,
    pub interpretation: Interpretation,
    /// Subscales present in both the scores and the weight table.
    pub contributing: Vec<String>,
}

/// Weighted mean over subscales present in both maps.
///
/// The denominator sums absolute weights, so negative weights reduce the
/// result without flipping the sign of the denominator. A zero denominator
/// yields 0. The result is clamped to [0, 100].
pub fn weighted_composite(
    scores: &BTreeMap<String, f64>,
    weights: &BTreeMap<String, f64>,
) -> (f64, Vec<String>) {
    let mut numerator = 0.0;
    let mut denominator = 0.0;
    let mut contributing = Vec::new();

    for (subscale, weight) in weights {
        if let Some(score) = scores.get(subscale) {
            numerator += score * weight;
            denominator += weight.abs();
            contributing.push(subscale.clone());
        }
    }

    if denominator == 0.0 {
        return (0.0, contributing);
    }
    let value = numerator / denominator;
    let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 100.0) };
    (value, contributing)
}

/// Evaluate `index` against a map of subscale scores.
pub fn calculate(index: &dyn CompositeIndex, scores: &BTreeMap<String, f64>) -> CompositeScore {
    let (value, contributing) = weighted_composite(scores, index.weights());
    tracing::debug!(
        index = index.id(),
        value,
        contributing = contributing.len(),
        "composite calculated"
    );
    CompositeScore {
        index_id: index.id().to_string(),
        value,
        interpretation: index.interpret(value),
        contributing,
    }
}

/// Evaluate every index in `indices`.
pub fn calculate_all(
    indices: &[Box<dyn CompositeIndex>],
    scores: &BTreeMap<String, f64>,
) -> Vec<CompositeScore> {
    indices.iter().map(|i| calculate(i.as_ref(), scores)).collect()
}

/// Evaluate the index named `id` from `indices`.
pub fn calculate_by_id(
    indices: &[Box<dyn CompositeIndex>],
    id: &str,
    scores: &BTreeMap<String, f64>,
) -> Result<CompositeScore, ScoringError> {
    let index = indices
        .iter()
        .find(|i| i.id() == id)
        .ok_or_else(|| ScoringError::UnknownIndex(id.to_string()))?;
    Ok(calculate(index.as_ref(), scores))
}

/// Build the subscale-score map from raw per-subscale responses, then
/// combine it. Each subscale is aggregated without reversal or weights.
pub fn composite_from_responses(
    index: &dyn CompositeIndex,
    responses: &BTreeMap<String, Vec<Option<i32>>>,
    scale: &ScaleConfig,
) -> Result<CompositeScore, ScoringError> {
    let mut scores = BTreeMap::new();
    for (name, values) in responses {
        let score = subscale::aggregate(name, values, None, None, scale)?;
        if score.valid_count > 0 {
            scores.insert(name.clone(), score.scaled_score as f64);
        }
    }
    Ok(calculate(index, &scores))
}

/// Convenience: the score map keyed by category.
pub fn score_map(scores: &[subscale::SubscaleScore]) -> BTreeMap<String, f64> {
    scores
        .iter()
        .map(|s| (s.category.clone(), s.scaled_score as f64))
        .collect()
}
