use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use likert_core::ScaleRange;
use likert_core::cache::MemoStore;
use likert_core::config::{AnomalyThresholds, EngineConfig, NormingConfig};
use likert_core::models::response::Ordinal;
use likert_core::stats::{self, Descriptives};

use crate::error::NormsError;
use crate::percentile::{self, NormConversion};

/// A complete sample of raw responses to one item or category. The timing,
/// revision and demographic arrays are optional; when present they run
/// parallel to `responses`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NormingSample {
    pub responses: Vec<i32>,
    #[serde(default)]
    pub response_times_ms: Vec<f64>,
    #[serde(default)]
    pub revision_counts: Vec<u32>,
    #[serde(default)]
    pub demographics: Option<Vec<String>>,
}

impl NormingSample {
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

    pub fn with_revisions(mut self, revision_counts: Vec<u32>) -> Self {
        self.revision_counts = revision_counts;
        self
    }

    pub fn with_demographics(mut self, demographics: Vec<String>) -> Self {
        self.demographics = Some(demographics);
        self
    }

    fn check_lengths(&self) -> Result<(), NormsError> {
        let expected = self.responses.len();
        let optional = [
            ("response_times_ms", self.response_times_ms.len()),
            ("revision_counts", self.revision_counts.len()),
            (
                "demographics",
                self.demographics.as_ref().map_or(0, Vec::len),
            ),
        ];
        for (field, actual) in optional {
            if actual != 0 && actual != expected {
                return Err(NormsError::LengthMismatch {
                    field: field.to_string(),
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QualityMetrics {
    /// Mean response time; 0 when no timings were supplied.
    pub avg_response_time_ms: f64,
    pub avg_revisions: f64,
    /// Shannon entropy of the distribution over `log2(cardinality)`.
    pub response_diversity: f64,
    pub consistency_score: f64,
    /// Fraction of responses with a speed red flag or a revision count
    /// above the cap. Per-response revisions stand in for pattern flags,
    /// which need a respondent's whole sequence.
    pub anomaly_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DemographicStratum {
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    /// Stratum mean as a z-score against the whole sample.
    pub z_offset: f64,
}

/// Normative conversions for one legal response value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NormEntry {
    pub value: i32,
    pub count: usize,
    /// Cumulative proportion at or below `value`, 0–100.
    pub percentile_rank: f64,
    pub z_score: f64,
    pub standardized_score: f64,
    pub stanine: u8,
}

/// Norms for one item or category, derived from its full current sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NormingStatistics {
    pub item_id: String,
    pub scale: ScaleRange,
    pub sample_size: usize,
    pub descriptive: BTreeMap<String, f64>,
    pub distribution: BTreeMap<i32, usize>,
    pub demographic_strata: BTreeMap<String, DemographicStratum>,
    pub quality: QualityMetrics,
    /// Mean response rescaled to 0–1.
    pub difficulty: f64,
    /// Variance-based proxy, 0–1.
    pub discrimination: f64,
    pub norms: Vec<NormEntry>,
    /// Half-width of the 95% confidence interval of the mean.
    pub confidence_interval: f64,
    pub last_updated: jiff::Timestamp,
    #[serde(skip)]
    #[ts(skip)]
    sample: Vec<f64>,
}

impl NormingStatistics {
    pub fn mean(&self) -> f64 {
        self.descriptive.get("mean").copied().unwrap_or(0.0)
    }

    pub fn std_dev(&self) -> f64 {
        self.descriptive.get("std_dev").copied().unwrap_or(0.0)
    }

    pub fn norm_for(&self, value: i32) -> Option<&NormEntry> {
        self.norms.iter().find(|n| n.value == value)
    }

    /// Express an arbitrary raw score against this sample.
    pub fn convert(&self, raw: f64) -> NormConversion {
        let sample: Vec<f64> = if self.sample.is_empty() {
            // Deserialized statistics carry only the distribution.
            self.distribution
                .iter()
                .flat_map(|(value, count)| std::iter::repeat_n(*value as f64, *count))
                .collect()
        } else {
            self.sample.clone()
        };
        percentile::convert(&sample, self.mean(), self.std_dev(), raw)
    }
}

/// Computes and holds norming statistics per item. Each engine instance
/// owns its table.
#[derive(Debug, Default)]
pub struct NormingEngine {
    scale: ScaleRange,
    norming: NormingConfig,
    thresholds: AnomalyThresholds,
    table: MemoStore<String, NormingStatistics>,
}

impl NormingEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            scale: config.scale.source,
            norming: config.norming,
            thresholds: config.anomaly,
            table: MemoStore::new(),
        }
    }

    /// Recompute the statistics for `item_id` from its full current sample,
    /// replacing any previous entry.
    pub fn compute(
        &self,
        item_id: &str,
        sample: &NormingSample,
    ) -> Result<NormingStatistics, NormsError> {
        let stats = compute_statistics(item_id, sample, self.scale, &self.norming, &self.thresholds)?;
        self.table.insert(item_id.to_string(), stats.clone());
        tracing::info!(
            item_id,
            sample_size = stats.sample_size,
            mean = stats.mean(),
            anomaly_rate = stats.quality.anomaly_rate,
            "norming statistics updated"
        );
        Ok(stats)
    }

    pub fn get(&self, item_id: &str) -> Option<NormingStatistics> {
        self.table.get(&item_id.to_string())
    }

    /// Convert a raw score for `item_id` using its stored statistics.
    pub fn convert(&self, item_id: &str, raw: f64) -> Result<NormConversion, NormsError> {
        let stats = self
            .get(item_id)
            .ok_or_else(|| NormsError::UnknownItem(item_id.to_string()))?;
        Ok(stats.convert(raw))
    }

    pub fn reset(&self, item_id: &str) -> Option<NormingStatistics> {
        self.table.remove(&item_id.to_string())
    }

    pub fn clear(&self) {
        self.table.clear();
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Derive norming statistics for one sample. Stateless counterpart of
/// [`NormingEngine::compute`].
pub fn compute_statistics(
    item_id: &str,
    sample: &NormingSample,
    scale: ScaleRange,
    norming: &NormingConfig,
    thresholds: &AnomalyThresholds,
) -> Result<NormingStatistics, NormsError> {
    let n = sample.responses.len();
    if n < norming.min_sample_size {
        return Err(NormsError::InsufficientSample {
            required: norming.min_sample_size,
            actual: n,
        });
    }
    sample.check_lengths()?;
    for value in &sample.responses {
        Ordinal::new(*value, scale)?;
    }

    let values: Vec<f64> = sample.responses.iter().map(|v| *v as f64).collect();
    let descriptives = Descriptives::from_values(&values);
    if descriptives.std_dev == 0.0 {
        tracing::warn!(item_id, n, "norming sample has zero variance");
    }

    let mut distribution: BTreeMap<i32, usize> = BTreeMap::new();
    for value in &sample.responses {
        *distribution.entry(*value).or_default() += 1;
    }

    let demographic_strata = sample
        .demographics
        .as_ref()
        .map(|tags| stratify(tags, &values, &descriptives))
        .unwrap_or_default();

    let quality = quality_metrics(sample, &distribution, scale, thresholds);
    let norms = norm_entries(&distribution, &descriptives, scale, n);

    let difficulty = if scale.span() > 0.0 {
        ((descriptives.mean - scale.min) / scale.span()).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let max_std_dev = scale.span() / 2.0;
    let discrimination = if max_std_dev > 0.0 {
        (descriptives.std_dev / max_std_dev).clamp(0.0, 1.0)
    } else {
        0.0
    };

    tracing::debug!(item_id, n, difficulty, discrimination, "norming sample analysed");

    Ok(NormingStatistics {
        item_id: item_id.to_string(),
        scale,
        sample_size: n,
        descriptive: descriptives.to_map(),
        distribution,
        demographic_strata,
        quality,
        difficulty,
        discrimination,
        norms,
        confidence_interval: norming.confidence_z * descriptives.standard_error(),
        last_updated: jiff::Timestamp::now(),
        sample: values,
    })
}

fn stratify(
    tags: &[String],
    values: &[f64],
    overall: &Descriptives,
) -> BTreeMap<String, DemographicStratum> {
    let mut sums: BTreeMap<String, (usize, f64)> = BTreeMap::new();
    for (tag, value) in tags.iter().zip(values) {
        let entry = sums.entry(tag.clone()).or_default();
        entry.0 += 1;
        entry.1 += value;
    }
    sums.into_iter()
        .map(|(tag, (count, sum))| {
            let mean = sum / count as f64;
            let stratum = DemographicStratum {
                count,
                sum,
                mean,
                z_offset: percentile::z_score(mean, overall.mean, overall.std_dev),
            };
            (tag, stratum)
        })
        .collect()
}

fn quality_metrics(
    sample: &NormingSample,
    distribution: &BTreeMap<i32, usize>,
    scale: ScaleRange,
    thresholds: &AnomalyThresholds,
) -> QualityMetrics {
    let times: Vec<f64> = sample
        .response_times_ms
        .iter()
        .copied()
        .filter(|t| t.is_finite() && *t >= 0.0)
        .collect();
    let revisions: Vec<f64> = sample.revision_counts.iter().map(|r| *r as f64).collect();

    let avg_response_time_ms = stats::mean(&times);
    let avg_revisions = stats::mean(&revisions);
    let response_diversity = stats::normalized_entropy(distribution.values(), scale.cardinality());

    let revision_penalty = if thresholds.max_average_revisions > 0.0 {
        (avg_revisions / thresholds.max_average_revisions).min(1.0)
    } else {
        0.0
    };
    let consistency_score =
        (0.5 * (1.0 - revision_penalty) + 0.5 * response_diversity).clamp(0.0, 1.0);

    let flagged = (0..sample.responses.len())
        .filter(|&i| {
            let too_fast = sample
                .response_times_ms
                .get(i)
                .is_some_and(|t| *t < thresholds.absolute_min_response_ms);
            let over_revised = sample
                .revision_counts
                .get(i)
                .is_some_and(|r| *r > thresholds.max_reasonable_revisions);
            too_fast || over_revised
        })
        .count();
    let anomaly_rate = if sample.responses.is_empty() {
        0.0
    } else {
        flagged as f64 / sample.responses.len() as f64
    };

    QualityMetrics {
        avg_response_time_ms,
        avg_revisions,
        response_diversity,
        consistency_score,
        anomaly_rate,
    }
}

fn norm_entries(
    distribution: &BTreeMap<i32, usize>,
    descriptives: &Descriptives,
    scale: ScaleRange,
    n: usize,
) -> Vec<NormEntry> {
    let mut cumulative = 0;
    scale
        .ordinal_values()
        .map(|value| {
            let count = distribution.get(&value).copied().unwrap_or(0);
            cumulative += count;
            let z = percentile::z_score(value as f64, descriptives.mean, descriptives.std_dev);
            NormEntry {
                value,
                count,
                percentile_rank: (cumulative as f64 / n as f64 * 100.0).clamp(0.0, 100.0),
                z_score: z,
                standardized_score: percentile::t_score(z),
                stanine: percentile::stanine(z),
            }
        })
        .collect()
}
