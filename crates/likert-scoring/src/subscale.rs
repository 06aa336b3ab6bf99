use serde::{Deserialize, Serialize};
use ts_rs::TS;

use likert_core::config::ScaleConfig;
use likert_core::scale::{reverse, to_unit_scale};

use crate::error::ScoringError;
use crate::interpretation::Interpretation;

/// One category's score for one respondent. Always recomputable from the
/// underlying responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubscaleScore {
    pub category: String,
    /// Sum of answered ordinal values after reverse scoring.
    pub raw_sum: f64,
    /// Sum of weighted 0–100 transformed values.
    pub weighted_sum: f64,
    /// Weighted mean on the target scale, rounded and clamped.
    pub scaled_score: u32,
    pub valid_count: usize,
    pub percentile: Option<f64>,
    pub interpretation: Interpretation,
}

impl SubscaleScore {
    pub fn empty(category: impl Into<String>) -> Self {
        let category = category.into();
        let interpretation = Interpretation::generic(0.0, &category);
        Self {
            category,
            raw_sum: 0.0,
            weighted_sum: 0.0,
            scaled_score: 0,
            valid_count: 0,
            percentile: None,
            interpretation,
        }
    }

    pub fn with_percentile(mut self, percentile: f64) -> Self {
        self.percentile = Some(percentile.clamp(0.0, 100.0));
        self
    }
}

/// Aggregate one category's responses into a scaled score.
///
/// `responses` may contain `None` for unanswered items. `reverse_flags` and
/// `weights`, when given, run parallel to `responses`. Only answered items
/// contribute to the weight denominator, which sums absolute weights so
/// negative weights cannot flip its sign.
pub fn aggregate(
    category: &str,
    responses: &[Option<i32>],
    reverse_flags: Option<&[bool]>,
    weights: Option<&[f64]>,
    scale: &ScaleConfig,
) -> Result<SubscaleScore, ScoringError> {
    if let Some(flags) = reverse_flags
        && flags.len() != responses.len()
    {
        return Err(ScoringError::LengthMismatch {
            field: "reverse_flags",
            expected: responses.len(),
            actual: flags.len(),
        });
    }
    if let Some(weights) = weights
        && weights.len() != responses.len()
    {
        return Err(ScoringError::LengthMismatch {
            field: "weights",
            expected: responses.len(),
            actual: weights.len(),
        });
    }

    let mut raw_sum = 0.0;
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    let mut valid_count = 0;

    for (i, response) in responses.iter().enumerate() {
        let Some(value) = response else { continue };
        let mut value = *value as f64;
        if reverse_flags.is_some_and(|flags| flags[i]) {
            value = reverse(value, scale.source);
        }
        let weight = weights.map_or(1.0, |w| w[i]);

        raw_sum += value;
        weighted_sum += to_unit_scale(value, scale.source, scale.target) * weight;
        weight_total += weight.abs();
        valid_count += 1;
    }

    if valid_count == 0 || weight_total == 0.0 {
        tracing::debug!(category, valid_count, "subscale has no scorable responses");
        return Ok(SubscaleScore {
            valid_count,
            ..SubscaleScore::empty(category)
        });
    }

    let mean = scale.target.clamp(weighted_sum / weight_total);
    let scaled_score = mean.round() as u32;

    Ok(SubscaleScore {
        category: category.to_string(),
        raw_sum,
        weighted_sum,
        scaled_score,
        valid_count,
        percentile: None,
        interpretation: Interpretation::generic(scaled_score as f64, category),
    })
}
