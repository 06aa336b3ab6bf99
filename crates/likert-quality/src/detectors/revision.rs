use likert_core::config::AnomalyThresholds;
use likert_core::models::session::ResponseWindow;
use likert_core::{Severity, SeverityFactor};

use crate::result::{AnomalyResult, AnomalyType, RecommendedAction, evidence};

pub fn detect(window: &ResponseWindow, t: &AnomalyThresholds) -> AnomalyResult {
    let revisions = &window.revisions;
    let questions = revisions.len();
    if questions == 0 {
        return AnomalyResult::normal("no revision data", evidence([("question_count", 0.0)]));
    }

    let total: u64 = revisions.iter().map(|r| u64::from(*r)).sum();
    let average = total as f64 / questions as f64;
    let max = revisions.iter().copied().max().unwrap_or(0);
    let exceeding = revisions
        .iter()
        .filter(|r| **r > t.max_reasonable_revisions)
        .count();
    let exceeding_proportion = exceeding as f64 / questions as f64;

    let evidence = evidence([
        ("question_count", questions as f64),
        ("total_revisions", total as f64),
        ("average_revisions", average),
        ("max_revisions", max as f64),
        ("exceeding_proportion", exceeding_proportion),
    ]);

    let triggered = exceeding_proportion > t.excessive_revision_proportion
        || average > t.max_average_revisions
        || exceeding > 0;
    if !triggered {
        return AnomalyResult::normal("revision behaviour is ordinary", evidence);
    }

    let factors = [
        SeverityFactor::new(exceeding_proportion, t.excessive_revision_proportion * 2.5, 0.4),
        SeverityFactor::new(average, t.max_average_revisions * 2.0, 0.4),
        SeverityFactor::new(max as f64, f64::from(t.max_reasonable_revisions) * 2.0, 0.2),
    ];
    let score = likert_core::severity::blend(&factors);
    let severity = Severity::classify(score);
    let action = if severity.is_urgent() {
        RecommendedAction::ManualReview
    } else {
        RecommendedAction::Flag
    };

    AnomalyResult::detected(
        AnomalyType::ExcessiveRevisions,
        severity,
        score,
        format!(
            "{average:.1} revisions per question on average; {exceeding} of {questions} questions revised more than {} times",
            t.max_reasonable_revisions
        ),
        evidence,
        action,
    )
}
