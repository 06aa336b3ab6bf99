use likert_core::config::AnomalyThresholds;
use likert_core::models::session::ResponseWindow;
use likert_core::stats::{coefficient_of_variation, mean};
use likert_core::{Severity, SeverityFactor};

use crate::result::{AnomalyResult, AnomalyType, RecommendedAction, evidence};

struct Candidate {
    anomaly_type: AnomalyType,
    score: f64,
    factors: Vec<SeverityFactor>,
    explanation: String,
}

pub fn detect(window: &ResponseWindow, t: &AnomalyThresholds) -> AnomalyResult {
    let times: Vec<f64> = window
        .response_times_ms
        .iter()
        .copied()
        .filter(|ms| ms.is_finite() && *ms >= 0.0)
        .collect();
    let n = times.len();
    if n < t.min_timed_responses {
        return AnomalyResult::normal(
            format!(
                "{n} timed responses; timing checks need at least {}",
                t.min_timed_responses
            ),
            evidence([("timed_responses", n as f64)]),
        );
    }

    let fast_proportion =
        times.iter().filter(|ms| **ms < t.fast_response_ms).count() as f64 / n as f64;
    let bot_proportion =
        times.iter().filter(|ms| **ms < t.absolute_min_response_ms).count() as f64 / n as f64;
    let cv = coefficient_of_variation(&times);
    let mean_ms = mean(&times);

    let evidence = evidence([
        ("timed_responses", n as f64),
        ("fast_proportion", fast_proportion),
        ("bot_proportion", bot_proportion),
        ("coefficient_of_variation", cv),
        ("mean_response_ms", mean_ms),
    ]);

    let mut candidates = Vec::new();
    if fast_proportion >= t.too_fast_proportion {
        candidates.push(Candidate {
            anomaly_type: AnomalyType::TooFastCompletion,
            score: fast_proportion,
            factors: vec![
                SeverityFactor::new(fast_proportion, 1.0, 0.6),
                SeverityFactor::new(bot_proportion, 0.5, 0.4),
            ],
            explanation: format!(
                "{:.0}% of answers took under {:.0} ms",
                fast_proportion * 100.0,
                t.fast_response_ms
            ),
        });
    }
    if bot_proportion >= t.bot_like_proportion {
        candidates.push(Candidate {
            anomaly_type: AnomalyType::BotLikeBehavior,
            score: bot_proportion,
            factors: vec![
                SeverityFactor::new(bot_proportion, 0.6, 0.7),
                SeverityFactor::new(fast_proportion, 1.0, 0.3),
            ],
            explanation: format!(
                "{:.0}% of answers took under {:.0} ms, faster than a person can read",
                bot_proportion * 100.0,
                t.absolute_min_response_ms
            ),
        });
    }
    if cv < t.uniform_timing_cv && mean_ms < t.uniform_timing_mean_ms {
        let uniformity = 1.0 - cv;
        let speed = if mean_ms > 0.0 {
            t.uniform_timing_mean_ms / mean_ms
        } else {
            f64::MAX
        };
        candidates.push(Candidate {
            anomaly_type: AnomalyType::BotLikeBehavior,
            score: uniformity,
            factors: vec![
                SeverityFactor::new(uniformity, 1.0, 0.6),
                SeverityFactor::new(speed, 2.0, 0.4),
            ],
            explanation: format!(
                "answer times are machine-regular (CV {cv:.2}) at a mean of {mean_ms:.0} ms"
            ),
        });
    }

    let Some(best) = candidates
        .into_iter()
        .reduce(|best, c| if c.score > best.score { c } else { best })
    else {
        return AnomalyResult::normal("response timing is plausible", evidence);
    };

    let severity = Severity::from_factors(&best.factors);
    AnomalyResult::detected(
        best.anomaly_type,
        severity,
        best.score,
        best.explanation,
        evidence,
        RecommendedAction::for_severity(severity),
    )
}
