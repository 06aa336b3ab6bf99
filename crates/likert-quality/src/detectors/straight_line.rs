use std::collections::HashMap;

use likert_core::config::AnomalyThresholds;
use likert_core::models::session::ResponseWindow;
use likert_core::stats::sample_variance;
use likert_core::{Severity, SeverityFactor};

use crate::result::{AnomalyResult, AnomalyType, RecommendedAction, evidence};

pub fn detect(window: &ResponseWindow, t: &AnomalyThresholds) -> AnomalyResult {
    let responses = &window.responses;
    let n = responses.len();
    if n < t.straight_line_min_responses {
        return AnomalyResult::normal(
            format!(
                "{n} responses; straight-lining needs at least {}",
                t.straight_line_min_responses
            ),
            evidence([("response_count", n as f64)]),
        );
    }

    let mut counts: HashMap<i32, usize> = HashMap::new();
    for r in responses {
        *counts.entry(*r).or_default() += 1;
    }
    let most_frequent = counts.values().copied().max().unwrap_or(0);
    let most_frequent_proportion = most_frequent as f64 / n as f64;
    let run_proportion = longest_run(responses) as f64 / n as f64;
    let values: Vec<f64> = responses.iter().map(|r| *r as f64).collect();
    let variance = sample_variance(&values);

    let evidence = evidence([
        ("response_count", n as f64),
        ("most_frequent_proportion", most_frequent_proportion),
        ("consecutive_run_proportion", run_proportion),
        ("variance", variance),
    ]);

    let triggered = most_frequent_proportion >= t.most_frequent_proportion
        || run_proportion >= t.consecutive_run_proportion
        || variance < t.low_variance;
    if !triggered {
        return AnomalyResult::normal("responses vary normally", evidence);
    }

    // Lower variance pushes this signal towards 1.
    let variance_signal = 1.0 / (1.0 + variance);
    let factors = [
        SeverityFactor::new(most_frequent_proportion, t.straight_line_severity_most_frequent, 0.4),
        SeverityFactor::new(run_proportion, t.straight_line_severity_consecutive, 0.3),
        SeverityFactor::new(variance_signal, t.straight_line_severity_variance, 0.3),
    ];
    let score = likert_core::severity::blend(&factors);
    let severity = Severity::classify(score);
    let action = if severity == Severity::Critical {
        RecommendedAction::Exclude
    } else {
        RecommendedAction::Flag
    };

    AnomalyResult::detected(
        AnomalyType::StraightLineResponding,
        severity,
        score,
        format!(
            "{:.0}% of answers share one value; longest identical run covers {:.0}% of the sequence",
            most_frequent_proportion * 100.0,
            run_proportion * 100.0
        ),
        evidence,
        action,
    )
}

fn longest_run(responses: &[i32]) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut previous = None;
    for r in responses {
        if previous == Some(r) {
            current += 1;
        } else {
            current = 1;
        }
        longest = longest.max(current);
        previous = Some(r);
    }
    longest
}
