use likert_core::config::AnomalyThresholds;
use likert_core::models::session::ResponseWindow;
use likert_core::{ScaleRange, Severity};
use likert_quality::detectors::pattern::{alternating_score, extreme_score, run_score, sequential_score};
use likert_quality::{AnomalyDetector, AnomalyType, RecommendedAction};

fn detector() -> AnomalyDetector {
    AnomalyDetector::new(AnomalyThresholds::default())
}

#[test]
fn identical_answers_are_straight_lining() {
    let result = detector().straight_line(&ResponseWindow::new(vec![4, 4, 4, 4, 4]));
    assert!(result.detected);
    assert_eq!(result.anomaly_type, AnomalyType::StraightLineResponding);
    assert!(result.severity >= Severity::High);
    assert_eq!(result.severity, Severity::Critical);
    assert_eq!(result.recommended_action, RecommendedAction::Exclude);
    assert_eq!(result.evidence["most_frequent_proportion"], 1.0);
    assert_eq!(result.evidence["variance"], 0.0);
}

#[test]
fn too_few_answers_are_never_straight_lining() {
    let result = detector().straight_line(&ResponseWindow::new(vec![4, 4, 4, 4]));
    assert!(!result.detected);
    assert_eq!(result.anomaly_type, AnomalyType::None);
    assert_eq!(result.severity, Severity::Low);
    assert_eq!(result.confidence, 0.0);
    assert_eq!(result.recommended_action, RecommendedAction::Ignore);
}

#[test]
fn varied_answers_pass_straight_line_check() {
    let result = detector().straight_line(&ResponseWindow::new(vec![3, 5, 2, 6, 4, 3, 5, 2, 4, 6]));
    assert!(!result.detected);
}

#[test]
fn sub_human_times_are_flagged() {
    let window = ResponseWindow::new(vec![1, 2, 3, 4, 5]).with_times(vec![300.0; 5]);
    let result = detector().timing(&window);
    assert!(result.detected);
    assert!(matches!(
        result.anomaly_type,
        AnomalyType::TooFastCompletion | AnomalyType::BotLikeBehavior
    ));
    // Every candidate scores 1.0; the first one wins the tie.
    assert_eq!(result.anomaly_type, AnomalyType::TooFastCompletion);
    assert_eq!(result.severity, Severity::Critical);
    assert_eq!(result.recommended_action, RecommendedAction::Exclude);
}

#[test]
fn many_sub_reading_times_are_bot_like() {
    // 30% under 500 ms, well short of the too-fast share.
    let window = ResponseWindow::new(vec![]).with_times(vec![
        300.0, 300.0, 300.0, 2000.0, 2500.0, 3000.0, 2200.0, 2800.0, 2600.0, 2400.0,
    ]);
    let result = detector().timing(&window);
    assert!(result.detected);
    assert_eq!(result.anomaly_type, AnomalyType::BotLikeBehavior);
    assert!((result.confidence - 0.3).abs() < 1e-9);
    assert_eq!(result.severity, Severity::Medium);
    assert_eq!(result.recommended_action, RecommendedAction::Flag);
}

#[test]
fn machine_regular_times_are_bot_like() {
    let window = ResponseWindow::new(vec![]).with_times(vec![1000.0; 6]);
    let result = detector().timing(&window);
    assert!(result.detected);
    assert_eq!(result.anomaly_type, AnomalyType::BotLikeBehavior);
    assert_eq!(result.evidence["fast_proportion"], 0.0);
    assert_eq!(result.evidence["coefficient_of_variation"], 0.0);
    assert_eq!(result.severity, Severity::High);
    assert_eq!(result.recommended_action, RecommendedAction::ManualReview);
}

#[test]
fn regular_but_slow_times_are_plausible() {
    let window = ResponseWindow::new(vec![])
        .with_times(vec![2000.0, 3500.0, 2800.0, 4100.0, 3000.0]);
    assert!(!detector().timing(&window).detected);
}

#[test]
fn timing_ignores_unusable_entries() {
    let window = ResponseWindow::new(vec![]).with_times(vec![f64::NAN, -5.0, 300.0, 300.0]);
    let result = detector().timing(&window);
    assert!(!result.detected);
    assert_eq!(result.evidence["timed_responses"], 2.0);
}

#[test]
fn steady_high_revision_average_is_excessive() {
    let window = ResponseWindow::new(vec![]).with_revisions(vec![4; 10]);
    let result = detector().revisions(&window);
    assert!(result.detected);
    assert_eq!(result.anomaly_type, AnomalyType::ExcessiveRevisions);
    assert_eq!(result.evidence["average_revisions"], 4.0);
    assert_eq!(result.severity, Severity::Low);
    assert_eq!(result.recommended_action, RecommendedAction::Flag);
}

#[test]
fn heavy_revision_everywhere_needs_review() {
    let window = ResponseWindow::new(vec![]).with_revisions(vec![25; 10]);
    let result = detector().revisions(&window);
    assert!(result.detected);
    assert_eq!(result.severity, Severity::Critical);
    assert_eq!(result.recommended_action, RecommendedAction::ManualReview);
    assert_eq!(result.evidence["exceeding_proportion"], 1.0);
}

#[test]
fn one_runaway_question_triggers_revision_check() {
    let mut revisions = vec![0; 10];
    revisions[3] = 12;
    let result = detector().revisions(&ResponseWindow::new(vec![]).with_revisions(revisions));
    assert!(result.detected);
    assert_eq!(result.evidence["max_revisions"], 12.0);
}

#[test]
fn occasional_revisions_are_ordinary() {
    let window = ResponseWindow::new(vec![]).with_revisions(vec![0, 1, 0, 0, 0, 0, 1, 0, 0, 0]);
    assert!(!detector().revisions(&window).detected);
    assert!(!detector().revisions(&ResponseWindow::default()).detected);
}

#[test]
fn alternating_answers_are_a_pattern() {
    let window = ResponseWindow::new(vec![2, 5, 2, 5, 2, 5, 2, 5, 2, 5]);
    let result = detector().pattern(&window);
    assert!(result.detected);
    assert_eq!(result.anomaly_type, AnomalyType::AlternatingPattern);
    assert_eq!(result.confidence, 1.0);
    assert_eq!(result.severity, Severity::High);
    assert_eq!(result.recommended_action, RecommendedAction::ManualReview);
}

#[test]
fn staircase_answers_are_sequential() {
    let window = ResponseWindow::new(vec![1, 2, 3, 4, 5, 6, 7, 6, 5, 4]);
    let result = detector().pattern(&window);
    assert!(result.detected);
    assert_eq!(result.anomaly_type, AnomalyType::SequentialPattern);
    assert!((result.confidence - 0.875).abs() < 1e-9);
}

#[test]
fn short_climb_is_a_monotonic_run() {
    // Seven answers: too short for the other pattern checks.
    let window = ResponseWindow::new(vec![1, 2, 3, 4, 5, 6, 7]);
    let result = detector().pattern(&window);
    assert!(result.detected);
    assert_eq!(result.anomaly_type, AnomalyType::MonotonicRun);
    assert!(!result.evidence.contains_key("alternating_pattern_score"));
}

#[test]
fn endpoint_answers_are_extreme_responding() {
    let window = ResponseWindow::new(vec![1, 1, 7, 7, 7, 1, 1, 7])
        .with_scale(ScaleRange::LIKERT_7);
    let result = detector().pattern(&window);
    assert!(result.detected);
    assert_eq!(result.anomaly_type, AnomalyType::ExtremeResponding);
}

#[test]
fn extreme_responding_follows_the_window_scale() {
    let window = ResponseWindow::new(vec![1, 1, 5, 5, 5, 1, 1, 5])
        .with_scale(ScaleRange::new(1.0, 5.0).unwrap());
    let result = detector().pattern(&window);
    assert_eq!(result.anomaly_type, AnomalyType::ExtremeResponding);

    assert_eq!(result.evidence["extreme_responding_score"], 1.0);

    // On the default seven-point scale only the 1s sit on an endpoint.
    let on_seven_point = detector().pattern(&ResponseWindow::new(vec![1, 1, 5, 5, 5, 1, 1, 5]));
    assert_eq!(on_seven_point.evidence["extreme_responding_score"], 0.5);
}

#[test]
fn short_window_has_no_pattern() {
    let result = detector().pattern(&ResponseWindow::new(vec![3, 5, 3]));
    assert!(!result.detected);
    assert_eq!(result.anomaly_type, AnomalyType::None);
}

#[test]
fn pattern_scores() {
    assert_eq!(alternating_score(&[1, 2, 1, 2]), 1.0);
    assert_eq!(alternating_score(&[1, 1, 1, 1]), 0.0);
    assert_eq!(alternating_score(&[1, 2]), 0.0);
    assert_eq!(sequential_score(&[1, 2, 3, 4]), 1.0);
    assert_eq!(sequential_score(&[1, 3, 5, 7]), 0.0);
    assert_eq!(run_score(&[1, 2, 3, 2, 1], 3), 2.0 / 3.0);
    assert_eq!(run_score(&[1, 2], 3), 0.0);
    assert_eq!(extreme_score(&[1, 4, 7, 4], 1.0, 7.0), 0.5);
    assert_eq!(extreme_score(&[], 1.0, 7.0), 0.0);
}
