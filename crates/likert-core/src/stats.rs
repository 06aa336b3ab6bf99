//! Descriptive statistics over plain `f64` slices.
//!
//! Every function tolerates empty and constant input: empty slices yield 0,
//! zero-variance samples yield 0 for any standardized moment, never NaN.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Summary of one numeric sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Descriptives {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample variance (n − 1 denominator).
    pub variance: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// Third standardized moment.
    pub skewness: f64,
    /// Fourth standardized moment minus 3.
    pub kurtosis: f64,
}

impl Descriptives {
    pub fn from_values(values: &[f64]) -> Self {
        let count = values.len();
        if count == 0 {
            return Self::empty();
        }

        let mean = mean(values);
        let variance = sample_variance(values);
        let std_dev = variance.sqrt();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            count,
            mean,
            median: median(values),
            variance,
            std_dev,
            min,
            max,
            skewness: standardized_moment(values, mean, std_dev, 3),
            kurtosis: if std_dev > 0.0 {
                standardized_moment(values, mean, std_dev, 4) - 3.0
            } else {
                0.0
            },
        }
    }

    pub fn empty() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            median: 0.0,
            variance: 0.0,
            std_dev: 0.0,
            min: 0.0,
            max: 0.0,
            skewness: 0.0,
            kurtosis: 0.0,
        }
    }

    /// Standard error of the mean.
    pub fn standard_error(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.std_dev / (self.count as f64).sqrt()
    }

    /// Flatten into the named-statistic map carried by norming output.
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        BTreeMap::from([
            ("mean".to_string(), self.mean),
            ("median".to_string(), self.median),
            ("std_dev".to_string(), self.std_dev),
            ("variance".to_string(), self.variance),
            ("skewness".to_string(), self.skewness),
            ("kurtosis".to_string(), self.kurtosis),
            ("min".to_string(), self.min),
            ("max".to_string(), self.max),
        ])
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Variance with the n − 1 denominator. Fewer than two values yield 0.
pub fn sample_variance(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (n - 1) as f64
}

/// Variance with the n denominator.
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / values.len() as f64
}

pub fn sample_std_dev(values: &[f64]) -> f64 {
    sample_variance(values).sqrt()
}

/// Standard deviation over mean. A zero mean yields 0.
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    let m = mean(values);
    if m == 0.0 {
        return 0.0;
    }
    population_variance(values).sqrt() / m.abs()
}

fn standardized_moment(values: &[f64], mean: f64, std_dev: f64, order: i32) -> f64 {
    if values.is_empty() || std_dev == 0.0 {
        return 0.0;
    }
    values
        .iter()
        .map(|x| ((x - mean) / std_dev).powi(order))
        .sum::<f64>()
        / values.len() as f64
}

/// Pearson product-moment correlation. Mismatched lengths use the shorter
/// prefix; fewer than two pairs or a constant side yields 0.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return 0.0;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);
    let mx = mean(xs);
    let my = mean(ys);

    let mut cov = 0.0;
    let mut vx = 0.0;
    let mut vy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        cov += dx * dy;
        vx += dx * dx;
        vy += dy * dy;
    }

    if vx == 0.0 || vy == 0.0 {
        return 0.0;
    }
    (cov / (vx.sqrt() * vy.sqrt())).clamp(-1.0, 1.0)
}

/// Shannon entropy (bits) of a frequency table.
pub fn shannon_entropy<'a>(counts: impl IntoIterator<Item = &'a usize>) -> f64 {
    let counts: Vec<usize> = counts.into_iter().copied().filter(|c| *c > 0).collect();
    let total: usize = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }
    counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total as f64;
            -p * p.log2()
        })
        .sum()
}

/// Entropy divided by `log2(cardinality)`, in [0, 1].
pub fn normalized_entropy<'a>(
    counts: impl IntoIterator<Item = &'a usize>,
    cardinality: usize,
) -> f64 {
    if cardinality < 2 {
        return 0.0;
    }
    (shannon_entropy(counts) / (cardinality as f64).log2()).clamp(0.0, 1.0)
}
