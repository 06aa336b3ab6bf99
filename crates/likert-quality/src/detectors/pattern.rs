use likert_core::config::AnomalyThresholds;
use likert_core::models::session::ResponseWindow;
use likert_core::{Severity, SeverityFactor};

use crate::result::{AnomalyResult, AnomalyType, RecommendedAction, evidence};

pub fn detect(window: &ResponseWindow, t: &AnomalyThresholds) -> AnomalyResult {
    let responses = &window.responses;
    let n = responses.len();
    let needed = t.pattern_min_responses.min(t.run_min_responses);
    if n < needed {
        return AnomalyResult::normal(
            format!("{n} responses; pattern checks need at least {needed}"),
            evidence([("response_count", n as f64)]),
        );
    }

    let mut scores: Vec<(AnomalyType, f64)> = Vec::new();
    if n >= t.pattern_min_responses {
        scores.push((AnomalyType::AlternatingPattern, alternating_score(responses)));
        scores.push((AnomalyType::SequentialPattern, sequential_score(responses)));
        scores.push((
            AnomalyType::ExtremeResponding,
            extreme_score(responses, window.scale.min, window.scale.max),
        ));
    }
    if n >= t.run_min_responses {
        scores.push((AnomalyType::MonotonicRun, run_score(responses, t.run_length)));
    }

    let mut evidence = evidence([("response_count", n as f64)]);
    for (kind, score) in &scores {
        evidence.insert(format!("{kind}_score"), *score);
    }

    let best = scores
        .into_iter()
        .filter(|(_, score)| *score > t.pattern_score)
        .reduce(|best, c| if c.1 > best.1 { c } else { best });
    let Some((anomaly_type, score)) = best else {
        return AnomalyResult::normal("no structured response pattern", evidence);
    };

    // Longer windows make a pattern more conclusive.
    let factors = [
        SeverityFactor::new(score, 1.0, 0.7),
        SeverityFactor::new(n as f64, (t.pattern_min_responses * 2) as f64, 0.3),
    ];
    let severity = Severity::from_factors(&factors);

    AnomalyResult::detected(
        anomaly_type,
        severity,
        score,
        explain(anomaly_type, score),
        evidence,
        RecommendedAction::for_severity(severity),
    )
}

fn explain(anomaly_type: AnomalyType, score: f64) -> String {
    let pct = score * 100.0;
    match anomaly_type {
        AnomalyType::AlternatingPattern => {
            format!("{pct:.0}% of answers alternate between two values")
        }
        AnomalyType::SequentialPattern => {
            format!("{pct:.0}% of steps continue a one-point staircase")
        }
        AnomalyType::MonotonicRun => {
            format!("{pct:.0}% of answer windows climb or fall strictly")
        }
        AnomalyType::ExtremeResponding => {
            format!("{pct:.0}% of answers sit on a scale endpoint")
        }
        other => format!("{other} pattern scored {score:.2}"),
    }
}

/// Share of positions that repeat the value two back while differing from
/// the value just before (A, B, A, B).
pub fn alternating_score(responses: &[i32]) -> f64 {
    if responses.len() < 3 {
        return 0.0;
    }
    let hits = responses
        .windows(3)
        .filter(|w| w[2] == w[0] && w[2] != w[1])
        .count();
    hits as f64 / (responses.len() - 2) as f64
}

/// Share of steps that continue a ±1 step in the same direction.
pub fn sequential_score(responses: &[i32]) -> f64 {
    let steps: Vec<i32> = responses.windows(2).map(|w| w[1] - w[0]).collect();
    if steps.len() < 2 {
        return 0.0;
    }
    let hits = steps
        .windows(2)
        .filter(|s| s[1].abs() == 1 && s[1] == s[0])
        .count();
    hits as f64 / (steps.len() - 1) as f64
}

/// Share of sliding windows of `length` that strictly ascend or descend.
pub fn run_score(responses: &[i32], length: usize) -> f64 {
    if length < 2 || responses.len() < length {
        return 0.0;
    }
    let windows = responses.len() - length + 1;
    let monotone = responses
        .windows(length)
        .filter(|w| {
            w.windows(2).all(|p| p[1] > p[0]) || w.windows(2).all(|p| p[1] < p[0])
        })
        .count();
    monotone as f64 / windows as f64
}

/// Share of answers on either scale endpoint.
pub fn extreme_score(responses: &[i32], min: f64, max: f64) -> f64 {
    if responses.is_empty() {
        return 0.0;
    }
    let hits = responses
        .iter()
        .filter(|r| **r as f64 == min || **r as f64 == max)
        .count();
    hits as f64 / responses.len() as f64
}
