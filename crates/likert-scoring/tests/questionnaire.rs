use jiff::Timestamp;
use likert_core::ScaleRange;
use likert_core::models::item::AssessmentItem;
use likert_core::models::response::{Ordinal, ScoredResponse};
use likert_core::models::session::ResponseSession;
use likert_scoring::error::ScoringError;
use likert_scoring::questionnaire::Questionnaire;

fn questionnaire() -> Questionnaire {
    Questionnaire::new(
        "wb-short",
        "Wellbeing Short Form",
        ScaleRange::LIKERT_7,
        vec![
            AssessmentItem::new("pa1", "positive_affect"),
            AssessmentItem::new("pa2", "positive_affect").reversed(),
            AssessmentItem::new("st1", "stress"),
            AssessmentItem::new("st2", "stress").with_weight(2.0),
        ],
    )
}

fn response(item: &str, value: i32) -> ScoredResponse {
    ScoredResponse {
        item_id: item.to_string(),
        value: Ordinal::new(value, ScaleRange::new(0.0, 10.0).unwrap()).unwrap(),
        timestamp: Timestamp::now(),
        response_time_ms: None,
        revision_count: 0,
    }
}

#[test]
fn scores_every_category_in_order() {
    let q = questionnaire();
    let scores = q
        .score_subscales(
            &[response("pa1", 7), response("pa2", 1), response("st1", 4)],
            ScaleRange::PERCENT,
        )
        .unwrap();
    assert_eq!(scores.len(), 2);
    assert_eq!(scores[0].category, "positive_affect");
    assert_eq!(scores[0].scaled_score, 100);
    assert_eq!(scores[1].category, "stress");
    assert_eq!(scores[1].scaled_score, 50);
    assert_eq!(scores[1].valid_count, 1);
}

#[test]
fn unknown_items_and_out_of_range_values_are_reported() {
    let q = questionnaire();
    let errors = q.validate_responses(&[response("zz", 3), response("pa1", 9)]);
    assert_eq!(errors.len(), 2);
    assert!(errors[0].expected_range.is_none());
    assert_eq!(errors[1].expected_range, Some(ScaleRange::LIKERT_7));

    let err = q.score_subscales(&[response("pa1", 0)], ScaleRange::PERCENT).unwrap_err();
    assert!(matches!(err, ScoringError::Validation(_)));
}

#[test]
fn session_scoring_uses_latest_revision() {
    let q = questionnaire();
    let mut session = ResponseSession::new(ScaleRange::LIKERT_7);
    session.record("st1", 1, Timestamp::now(), None).unwrap();
    session.record("st1", 7, Timestamp::now(), None).unwrap();
    let scores = q.score_session(&session, ScaleRange::PERCENT).unwrap();
    assert_eq!(scores[1].scaled_score, 100);
    assert_eq!(scores[0].valid_count, 0);
}

#[test]
fn summary_lists_scored_categories() {
    let q = questionnaire();
    let scores = q
        .score_subscales(&[response("pa1", 4)], ScaleRange::PERCENT)
        .unwrap();
    let scores = vec![scores[0].clone().with_percentile(62.0), scores[1].clone()];
    let text = q.to_structured_summary(&scores);
    assert!(text.starts_with("## Wellbeing Short Form"));
    assert!(text.contains("- positive_affect: 50 (Moderate, 1 items answered, percentile 62)"));
    assert!(text.contains("- stress: 0 (Very low, 0 items answered)"));
}
