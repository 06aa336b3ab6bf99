use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use likert_core::config::ItemAnalysisConfig;
use likert_core::models::response::Ordinal;
use likert_core::stats::{pearson, sample_std_dev};
use likert_core::{ScaleRange, Severity};

use crate::error::NormsError;
use crate::reliability::ReliabilityReport;

/// Raw responses to one item, optionally with each respondent's total scale
/// score and the session that produced each response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemSample {
    pub item_id: String,
    pub responses: Vec<i32>,
    #[serde(default)]
    pub total_scores: Option<Vec<f64>>,
    #[serde(default)]
    pub session_ids: Option<Vec<Uuid>>,
}

impl ItemSample {
    pub fn new(item_id: impl Into<String>, responses: Vec<i32>) -> Self {
        Self {
            item_id: item_id.into(),
            responses,
            ..Self::default()
        }
    }

    pub fn with_totals(mut self, total_scores: Vec<f64>) -> Self {
        self.total_scores = Some(total_scores);
        self
    }

    pub fn with_sessions(mut self, session_ids: Vec<Uuid>) -> Self {
        self.session_ids = Some(session_ids);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DiscriminationMethod {
    /// Pearson correlation between the item and total scores.
    ItemTotal,
    /// Variance proxy over the latest response of each session.
    SessionVariance,
    /// Variance proxy over all responses.
    Variance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RecommendationKind {
    Reword,
    Remove,
    ManualReview,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub priority: Severity,
    pub rationale: String,
    pub evidence: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OptionStatistics {
    pub value: i32,
    pub count: usize,
    pub proportion: f64,
    /// How often the option is chosen; equal to `proportion`.
    pub attractiveness: f64,
    /// Placeholder until option-level totals are available; equal to
    /// `proportion`.
    pub discrimination: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemAnalysis {
    pub item_id: String,
    pub sample_size: usize,
    /// Mean over scale maximum, 0–1.
    pub difficulty: f64,
    pub discrimination: f64,
    pub discrimination_method: DiscriminationMethod,
    pub options: Vec<OptionStatistics>,
    pub item_total_correlation: Option<f64>,
    pub alpha_if_deleted: Option<f64>,
    pub flagged: bool,
    pub flag_reasons: Vec<String>,
    /// Highest priority first.
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ItemAnalyzer {
    config: ItemAnalysisConfig,
    scale: ScaleRange,
}

impl ItemAnalyzer {
    pub fn new(config: ItemAnalysisConfig, scale: ScaleRange) -> Self {
        Self { config, scale }
    }

    pub fn analyze(&self, sample: &ItemSample) -> Result<ItemAnalysis, NormsError> {
        let n = sample.responses.len();
        if n == 0 {
            return Err(NormsError::InsufficientSample {
                required: 1,
                actual: 0,
            });
        }
        if let Some(totals) = &sample.total_scores
            && totals.len() != n
        {
            return Err(NormsError::LengthMismatch {
                field: "total_scores".to_string(),
                expected: n,
                actual: totals.len(),
            });
        }
        if let Some(sessions) = &sample.session_ids
            && sessions.len() != n
        {
            return Err(NormsError::LengthMismatch {
                field: "session_ids".to_string(),
                expected: n,
                actual: sessions.len(),
            });
        }
        for value in &sample.responses {
            Ordinal::new(*value, self.scale)?;
        }

        let values: Vec<f64> = sample.responses.iter().map(|v| *v as f64).collect();
        let mean = values.iter().sum::<f64>() / n as f64;
        let difficulty = if self.scale.max > 0.0 {
            (mean / self.scale.max).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let (discrimination, discrimination_method, item_total_correlation) =
            match &sample.total_scores {
                Some(totals) => {
                    let r = pearson(&values, totals);
                    (r, DiscriminationMethod::ItemTotal, Some(r))
                }
                None => match &sample.session_ids {
                    Some(sessions) => (
                        self.variance_proxy(&latest_per_session(sessions, &values)),
                        DiscriminationMethod::SessionVariance,
                        None,
                    ),
                    None => (
                        self.variance_proxy(&values),
                        DiscriminationMethod::Variance,
                        None,
                    ),
                },
            };

        let options = self.option_statistics(&sample.responses);
        let recommendations = self.recommend(difficulty, discrimination, n);
        let flag_reasons: Vec<String> = recommendations
            .iter()
            .filter(|r| r.priority.is_urgent())
            .map(|r| r.rationale.clone())
            .collect();

        tracing::debug!(
            item_id = %sample.item_id,
            n,
            difficulty,
            discrimination,
            recommendations = recommendations.len(),
            "item analysed"
        );

        Ok(ItemAnalysis {
            item_id: sample.item_id.clone(),
            sample_size: n,
            difficulty,
            discrimination,
            discrimination_method,
            options,
            item_total_correlation,
            alpha_if_deleted: None,
            flagged: !flag_reasons.is_empty(),
            flag_reasons,
            recommendations,
        })
    }

    /// Analyze `sample` and fill the reliability sub-metrics from a report
    /// covering the same item.
    pub fn analyze_with_reliability(
        &self,
        sample: &ItemSample,
        report: &ReliabilityReport,
    ) -> Result<ItemAnalysis, NormsError> {
        let mut analysis = self.analyze(sample)?;
        if let Some(item) = report.item(&sample.item_id) {
            analysis.alpha_if_deleted = item.alpha_if_deleted;
            if analysis.item_total_correlation.is_none() {
                analysis.item_total_correlation = Some(item.item_total_correlation);
            }
        }
        Ok(analysis)
    }

    pub fn analyze_batch(&self, samples: &[ItemSample]) -> Result<Vec<ItemAnalysis>, NormsError> {
        samples.iter().map(|s| self.analyze(s)).collect()
    }

    /// Analyze several items against one shared set of respondent totals.
    /// Any totals already on a sample are replaced.
    pub fn analyze_batch_with_totals(
        &self,
        samples: &[ItemSample],
        total_scores: &[f64],
    ) -> Result<Vec<ItemAnalysis>, NormsError> {
        samples
            .iter()
            .map(|s| self.analyze(&s.clone().with_totals(total_scores.to_vec())))
            .collect()
    }

    fn variance_proxy(&self, values: &[f64]) -> f64 {
        let max_std_dev = self.scale.span() / 2.0;
        if max_std_dev <= 0.0 {
            return 0.0;
        }
        (sample_std_dev(values) / max_std_dev).clamp(0.0, 1.0)
    }

    fn option_statistics(&self, responses: &[i32]) -> Vec<OptionStatistics> {
        let n = responses.len() as f64;
        self.scale
            .ordinal_values()
            .map(|value| {
                let count = responses.iter().filter(|r| **r == value).count();
                let proportion = count as f64 / n;
                OptionStatistics {
                    value,
                    count,
                    proportion,
                    attractiveness: proportion,
                    discrimination: proportion,
                }
            })
            .collect()
    }

    fn recommend(&self, difficulty: f64, discrimination: f64, n: usize) -> Vec<Recommendation> {
        let c = &self.config;
        let mut out = Vec::new();

        if difficulty < c.min_difficulty {
            out.push(recommendation(
                RecommendationKind::Reword,
                Severity::Medium,
                format!("Item is too hard or rarely endorsed (difficulty {difficulty:.2})"),
                [("difficulty", difficulty), ("threshold", c.min_difficulty)],
            ));
        }
        if difficulty > c.max_difficulty {
            out.push(recommendation(
                RecommendationKind::Reword,
                Severity::Medium,
                format!("Item is too easy and shows little variance (difficulty {difficulty:.2})"),
                [("difficulty", difficulty), ("threshold", c.max_difficulty)],
            ));
        }
        if discrimination < c.remove_discrimination {
            out.push(recommendation(
                RecommendationKind::Remove,
                Severity::High,
                format!("Item does not discriminate (discrimination {discrimination:.2})"),
                [
                    ("discrimination", discrimination),
                    ("threshold", c.remove_discrimination),
                ],
            ));
        } else if discrimination < c.reword_discrimination {
            out.push(recommendation(
                RecommendationKind::Reword,
                Severity::Medium,
                format!("Item discriminates weakly (discrimination {discrimination:.2})"),
                [
                    ("discrimination", discrimination),
                    ("threshold", c.reword_discrimination),
                ],
            ));
        }
        if n < c.min_reliable_sample {
            out.push(recommendation(
                RecommendationKind::ManualReview,
                Severity::Low,
                format!("Sample of {n} is too small for reliable item statistics"),
                [
                    ("sample_size", n as f64),
                    ("threshold", c.min_reliable_sample as f64),
                ],
            ));
        }

        out.sort_by(|a, b| b.priority.cmp(&a.priority));
        out
    }
}

fn recommendation<const N: usize>(
    kind: RecommendationKind,
    priority: Severity,
    rationale: String,
    evidence: [(&str, f64); N],
) -> Recommendation {
    Recommendation {
        kind,
        priority,
        rationale,
        evidence: evidence
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
    }
}

/// One value per session: the last response that session gave.
fn latest_per_session(sessions: &[Uuid], values: &[f64]) -> Vec<f64> {
    let mut order: Vec<Uuid> = Vec::new();
    let mut latest: HashMap<Uuid, f64> = HashMap::new();
    for (session, value) in sessions.iter().zip(values) {
        if latest.insert(*session, *value).is_none() {
            order.push(*session);
        }
    }
    order.iter().filter_map(|s| latest.get(s).copied()).collect()
}
