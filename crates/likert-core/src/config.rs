use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::scale::ScaleRange;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

/// Engine-wide configuration. Every section and field falls back to its
/// default, so a document only needs to name what it overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    pub config_version: u32,
    pub scale: ScaleConfig,
    pub norming: NormingConfig,
    pub item_analysis: ItemAnalysisConfig,
    pub anomaly: AnomalyThresholds,
    /// Composite index id → (subscale → signed weight).
    pub composite_indices: BTreeMap<String, BTreeMap<String, f64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    pub source: ScaleRange,
    pub target: ScaleRange,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            source: ScaleRange::LIKERT_7,
            target: ScaleRange::PERCENT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormingConfig {
    /// Samples below this size are rejected.
    pub min_sample_size: usize,
    /// Critical value for the confidence interval of the mean.
    pub confidence_z: f64,
}

impl Default for NormingConfig {
    fn default() -> Self {
        Self {
            min_sample_size: 10,
            confidence_z: 1.96,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemAnalysisConfig {
    pub min_difficulty: f64,
    pub max_difficulty: f64,
    /// Below this the item is recommended for removal.
    pub remove_discrimination: f64,
    /// Below this (and above the removal bound) the item should be reworded.
    pub reword_discrimination: f64,
    /// Below this sample size statistics are marked for manual review.
    pub min_reliable_sample: usize,
}

impl Default for ItemAnalysisConfig {
    fn default() -> Self {
        Self {
            min_difficulty: 0.2,
            max_difficulty: 0.8,
            remove_discrimination: 0.2,
            reword_discrimination: 0.3,
            min_reliable_sample: 50,
        }
    }
}

/// Thresholds used by the anomaly detectors and by the norming engine's
/// anomaly-rate estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnomalyThresholds {
    // Straight-lining
    pub straight_line_min_responses: usize,
    pub most_frequent_proportion: f64,
    pub consecutive_run_proportion: f64,
    pub low_variance: f64,
    pub straight_line_severity_most_frequent: f64,
    pub straight_line_severity_consecutive: f64,
    pub straight_line_severity_variance: f64,

    // Timing
    pub min_timed_responses: usize,
    pub fast_response_ms: f64,
    pub absolute_min_response_ms: f64,
    pub too_fast_proportion: f64,
    pub bot_like_proportion: f64,
    pub uniform_timing_cv: f64,
    pub uniform_timing_mean_ms: f64,

    // Patterns
    pub pattern_min_responses: usize,
    pub run_min_responses: usize,
    pub run_length: usize,
    pub pattern_score: f64,

    // Revisions
    pub max_reasonable_revisions: u32,
    pub excessive_revision_proportion: f64,
    pub max_average_revisions: f64,
}

impl Default for AnomalyThresholds {
    fn default() -> Self {
        Self {
            straight_line_min_responses: 5,
            most_frequent_proportion: 0.8,
            consecutive_run_proportion: 0.6,
            low_variance: 0.5,
            straight_line_severity_most_frequent: 0.9,
            straight_line_severity_consecutive: 0.7,
            straight_line_severity_variance: 0.8,

            min_timed_responses: 3,
            fast_response_ms: 800.0,
            absolute_min_response_ms: 500.0,
            too_fast_proportion: 0.8,
            bot_like_proportion: 0.3,
            uniform_timing_cv: 0.2,
            uniform_timing_mean_ms: 1500.0,

            pattern_min_responses: 8,
            run_min_responses: 6,
            run_length: 6,
            pattern_score: 0.3,

            max_reasonable_revisions: 10,
            excessive_revision_proportion: 0.2,
            max_average_revisions: 3.0,
        }
    }
}

impl EngineConfig {
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CoreError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&contents)?;
        tracing::info!(path = %path.display(), "engine config loaded");
        Ok(config)
    }

    pub fn from_json(contents: &str) -> Result<Self, CoreError> {
        // Parse as raw JSON so we can run migrations before deserializing.
        let json: serde_json::Value = serde_json::from_str(contents)?;
        let on_disk_version = json
            .get("config_version")
            .and_then(|v| v.as_u64())
            .unwrap_or(0) as u32;

        let migrated = migrate(json, on_disk_version)?;
        let mut config: EngineConfig = serde_json::from_value(migrated)?;
        config.config_version = CURRENT_VERSION;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        let mut stamped = self.clone();
        stamped.config_version = CURRENT_VERSION;
        Ok(serde_json::to_string_pretty(&stamped)?)
    }

    fn validate(&self) -> Result<(), CoreError> {
        for range in [self.scale.source, self.scale.target] {
            ScaleRange::new(range.min, range.max)?;
        }
        if self.norming.min_sample_size < 2 {
            return Err(CoreError::MalformedConfig(format!(
                "norming.min_sample_size must be at least 2, got {}",
                self.norming.min_sample_size
            )));
        }
        Ok(())
    }
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> Result<serde_json::Value, CoreError> {
    if from_version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedConfigVersion {
            found: from_version,
            supported: CURRENT_VERSION,
        });
    }

    // v0 → v1: the answer scale moved from a top-level `scale_range` into
    // `scale.source`.
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| CoreError::MalformedConfig("config is not a JSON object".into()))?;
        if let Some(legacy) = obj.remove("scale_range") {
            let scale = obj
                .entry("scale")
                .or_insert_with(|| serde_json::Value::Object(Default::default()));
            if let Some(scale) = scale.as_object_mut() {
                scale.entry("source").or_insert(legacy);
            }
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated engine config v0 → v1 (moved scale_range)");
    }

    Ok(json)
}
