use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use likert_core::cache::MemoStore;
use likert_core::stats::{pearson, sample_variance};

use crate::error::NormsError;

/// One item's responses, one entry per respondent. Every item passed to
/// the analyzer must cover the same respondents in the same order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemResponses {
    pub item_id: String,
    pub responses: Vec<f64>,
}

impl ItemResponses {
    pub fn new(item_id: impl Into<String>, responses: Vec<f64>) -> Self {
        Self {
            item_id: item_id.into(),
            responses,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ReliabilityRating {
    Unacceptable,
    Poor,
    Questionable,
    Acceptable,
    Good,
    Excellent,
}

impl ReliabilityRating {
    pub fn from_alpha(alpha: f64) -> Self {
        if alpha >= 0.9 {
            ReliabilityRating::Excellent
        } else if alpha >= 0.8 {
            ReliabilityRating::Good
        } else if alpha >= 0.7 {
            ReliabilityRating::Acceptable
        } else if alpha >= 0.6 {
            ReliabilityRating::Questionable
        } else if alpha >= 0.5 {
            ReliabilityRating::Poor
        } else {
            ReliabilityRating::Unacceptable
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemReliability {
    pub item_id: String,
    /// Correlation of the item with the total of the remaining items.
    pub item_total_correlation: f64,
    /// Alpha of the scale without this item; `None` when fewer than two
    /// items would remain.
    pub alpha_if_deleted: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReliabilityReport {
    pub item_ids: Vec<String>,
    pub item_count: usize,
    pub respondent_count: usize,
    pub cronbach_alpha: f64,
    /// Pearson correlation between the two half-scale totals.
    pub split_half: f64,
    /// Split-half correlation after the Spearman-Brown correction.
    pub spearman_brown: f64,
    pub standard_error_of_measurement: f64,
    /// 95% interval around alpha.
    pub alpha_confidence_interval: ConfidenceInterval,
    pub rating: ReliabilityRating,
    pub items: Vec<ItemReliability>,
}

impl ReliabilityReport {
    pub fn item(&self, item_id: &str) -> Option<&ItemReliability> {
        self.items.iter().find(|i| i.item_id == item_id)
    }
}

/// Internal-consistency analysis with a per-item-set cache. The cache key
/// is the sorted set of item ids, so the same items in any order reuse one
/// computation.
#[derive(Debug, Default)]
pub struct ReliabilityAnalyzer {
    cache: MemoStore<String, ReliabilityReport>,
}

impl ReliabilityAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inputs are validated before the cache is consulted, so a malformed
    /// matrix never returns a report cached for the same item ids.
    pub fn analyze(&self, items: &[ItemResponses]) -> Result<ReliabilityReport, NormsError> {
        validate(items)?;
        let key = cache_key(items.iter().map(|i| i.item_id.as_str()));
        self.cache.get_or_try_insert_with(key, || analyze_items(items))
    }

    /// Drop the cached report for this item set.
    pub fn invalidate<'a>(&self, item_ids: impl IntoIterator<Item = &'a str>) {
        self.cache.remove(&cache_key(item_ids));
    }

    pub fn clear(&self) {
        self.cache.clear();
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

fn cache_key<'a>(item_ids: impl IntoIterator<Item = &'a str>) -> String {
    let ids: BTreeSet<&str> = item_ids.into_iter().collect();
    ids.into_iter().collect::<Vec<_>>().join("\u{1f}")
}

/// Uncached reliability analysis.
pub fn analyze_items(items: &[ItemResponses]) -> Result<ReliabilityReport, NormsError> {
    let (k, n) = validate(items)?;

    let all: Vec<&[f64]> = items.iter().map(|i| i.responses.as_slice()).collect();
    let total_variance = sample_variance(&totals_of(&all));
    if total_variance == 0.0 {
        tracing::warn!(items = k, respondents = n, "total scores have zero variance");
    }

    let cronbach_alpha = alpha(&all);

    let mid = k / 2;
    let first = totals_of(&all[..mid]);
    let second = totals_of(&all[mid..]);
    let split_half = pearson(&first, &second);
    let spearman_brown = spearman_brown(split_half);

    let standard_error_of_measurement = (total_variance * (1.0 - cronbach_alpha)).max(0.0).sqrt();

    let df = (n - 1) as f64;
    let se = (2.0 * k as f64 / (k as f64 - 1.0)).sqrt() * (1.0 - cronbach_alpha) / df.sqrt();
    let alpha_confidence_interval = ConfidenceInterval {
        lower: (cronbach_alpha - 1.96 * se).clamp(0.0, 1.0),
        upper: (cronbach_alpha + 1.96 * se).clamp(0.0, 1.0),
    };

    let per_item = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let rest: Vec<&[f64]> = all
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, r)| *r)
                .collect();
            let rest_totals = totals_of(&rest);
            ItemReliability {
                item_id: item.item_id.clone(),
                item_total_correlation: pearson(&item.responses, &rest_totals),
                alpha_if_deleted: (rest.len() >= 2).then(|| alpha(&rest)),
            }
        })
        .collect();

    tracing::debug!(
        items = k,
        respondents = n,
        alpha = cronbach_alpha,
        spearman_brown,
        "reliability analysed"
    );

    Ok(ReliabilityReport {
        item_ids: items.iter().map(|i| i.item_id.clone()).collect(),
        item_count: k,
        respondent_count: n,
        cronbach_alpha,
        split_half,
        spearman_brown,
        standard_error_of_measurement,
        alpha_confidence_interval,
        rating: ReliabilityRating::from_alpha(cronbach_alpha),
        items: per_item,
    })
}

/// Check the response matrix and return its (items, respondents) shape.
/// Needs at least two distinctly named items answered by the same two or
/// more respondents.
fn validate(items: &[ItemResponses]) -> Result<(usize, usize), NormsError> {
    let k = items.len();
    if k < 2 {
        return Err(NormsError::TooFewItems {
            required: 2,
            actual: k,
        });
    }
    let mut seen = BTreeSet::new();
    for item in items {
        if !seen.insert(item.item_id.as_str()) {
            return Err(NormsError::DuplicateItem(item.item_id.clone()));
        }
    }
    let n = items[0].responses.len();
    for item in items {
        if item.responses.len() != n {
            return Err(NormsError::LengthMismatch {
                field: item.item_id.clone(),
                expected: n,
                actual: item.responses.len(),
            });
        }
    }
    if n < 2 {
        return Err(NormsError::TooFewRespondents {
            required: 2,
            actual: n,
        });
    }
    Ok((k, n))
}

/// Cronbach's alpha, clamped to [0, 1]. Zero total variance yields 0.
pub fn alpha(items: &[&[f64]]) -> f64 {
    let k = items.len();
    if k < 2 {
        return 0.0;
    }
    let item_variance_sum: f64 = items.iter().map(|r| sample_variance(r)).sum();
    let total_variance = sample_variance(&totals_of(items));
    if total_variance == 0.0 {
        return 0.0;
    }
    let k = k as f64;
    (k / (k - 1.0) * (1.0 - item_variance_sum / total_variance)).clamp(0.0, 1.0)
}

/// `2r / (1 + r)`, bounded to [0, 1].
pub fn spearman_brown(r: f64) -> f64 {
    if r <= -1.0 {
        return 0.0;
    }
    (2.0 * r / (1.0 + r)).clamp(0.0, 1.0)
}

fn totals_of(items: &[&[f64]]) -> Vec<f64> {
    let n = items.first().map_or(0, |r| r.len());
    (0..n)
        .map(|respondent| items.iter().map(|r| r[respondent]).sum())
        .collect()
}
