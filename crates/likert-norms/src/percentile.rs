use serde::{Deserialize, Serialize};
use ts_rs::TS;

use likert_scoring::subscale::SubscaleScore;

/// A raw score expressed against a reference sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NormConversion {
    pub raw: f64,
    pub percentile_rank: f64,
    pub z_score: f64,
    /// `50 + 10z`.
    pub t_score: f64,
    pub stanine: u8,
}

/// Percentile rank of `score` within `sample`, 0–100.
///
/// Two conventions apply. When `score` equals a sample value the rank is the
/// proportion of the sample at or below it. Otherwise it interpolates as
/// `(below + 1) / (n + 1) * 100`. An empty sample ranks everything at 50.
pub fn percentile_rank(sample: &[f64], score: f64) -> f64 {
    if sample.is_empty() {
        return 50.0;
    }
    let n = sample.len() as f64;
    let below = sample.iter().filter(|v| **v < score).count() as f64;
    let equal = sample.iter().filter(|v| **v == score).count() as f64;

    let rank = if equal > 0.0 {
        (below + equal) / n * 100.0
    } else {
        (below + 1.0) / (n + 1.0) * 100.0
    };
    rank.clamp(0.0, 100.0)
}

/// Standard score. A zero standard deviation yields 0.
pub fn z_score(value: f64, mean: f64, std_dev: f64) -> f64 {
    if std_dev == 0.0 || !std_dev.is_finite() {
        return 0.0;
    }
    (value - mean) / std_dev
}

pub fn t_score(z: f64) -> f64 {
    50.0 + 10.0 * z
}

/// Standard nine: `round(2z + 5)` bounded to 1–9.
pub fn stanine(z: f64) -> u8 {
    (2.0 * z + 5.0).round().clamp(1.0, 9.0) as u8
}

/// Express `raw` against the reference sample.
pub fn convert(sample: &[f64], mean: f64, std_dev: f64, raw: f64) -> NormConversion {
    let z = z_score(raw, mean, std_dev);
    NormConversion {
        raw,
        percentile_rank: percentile_rank(sample, raw),
        z_score: z,
        t_score: t_score(z),
        stanine: stanine(z),
    }
}

/// Attach a percentile to a subscale score using a sample of previously
/// observed scaled scores for the same category.
pub fn apply_norms(score: SubscaleScore, norm_sample: &[f64]) -> SubscaleScore {
    if score.valid_count == 0 {
        return score;
    }
    let rank = percentile_rank(norm_sample, score.scaled_score as f64);
    score.with_percentile(rank)
}
