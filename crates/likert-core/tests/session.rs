use jiff::Timestamp;
use likert_core::ScaleRange;
use likert_core::models::item::AssessmentItem;
use likert_core::models::response::Ordinal;
use likert_core::models::session::ResponseSession;

#[test]
fn ordinal_rejects_out_of_range() {
    assert!(Ordinal::new(0, ScaleRange::LIKERT_7).is_err());
    assert!(Ordinal::new(8, ScaleRange::LIKERT_7).is_err());
    assert_eq!(Ordinal::new(7, ScaleRange::LIKERT_7).unwrap().value(), 7);
}

#[test]
fn ordinal_reversal_round_trips() {
    let o = Ordinal::new(2, ScaleRange::LIKERT_7).unwrap();
    assert_eq!(o.reversed(ScaleRange::LIKERT_7).value(), 6);
    assert_eq!(o.reversed(ScaleRange::LIKERT_7).reversed(ScaleRange::LIKERT_7), o);
}

#[test]
fn revisions_replace_value_and_count_up() {
    let mut session = ResponseSession::new(ScaleRange::LIKERT_7);
    let now = Timestamp::now();
    session.record("q1", 3, now, Some(1200.0)).unwrap();
    session.record("q2", 5, now, Some(900.0)).unwrap();
    session.record("q1", 6, now, Some(700.0)).unwrap();
    session.record("q1", 4, now, None).unwrap();

    let q1 = session.get("q1").unwrap();
    assert_eq!(q1.value.value(), 4);
    assert_eq!(q1.revision_count, 2);
    assert_eq!(q1.response_time_ms, Some(700.0));
    assert_eq!(session.len(), 2);

    let window = session.window();
    assert_eq!(window.responses, vec![4, 5]);
    assert_eq!(window.revisions, vec![2, 0]);
    assert_eq!(window.response_times_ms, vec![700.0, 900.0]);
}

#[test]
fn invalid_answer_leaves_session_untouched() {
    let mut session = ResponseSession::new(ScaleRange::LIKERT_7);
    assert!(session.record("q1", 9, Timestamp::now(), None).is_err());
    assert!(session.is_empty());
}

#[test]
fn values_follow_item_order_with_gaps() {
    let items = vec![
        AssessmentItem::new("a", "mood"),
        AssessmentItem::new("b", "mood"),
        AssessmentItem::new("c", "mood"),
    ];
    let mut session = ResponseSession::new(ScaleRange::LIKERT_7);
    session.record("c", 2, Timestamp::now(), None).unwrap();
    session.record("a", 7, Timestamp::now(), None).unwrap();
    assert_eq!(session.values_for(&items), vec![Some(7), None, Some(2)]);
}

#[test]
fn session_survives_serialization() {
    let mut session = ResponseSession::new(ScaleRange::LIKERT_7);
    session.record("q1", 3, Timestamp::now(), None).unwrap();
    let json = serde_json::to_string(&session).unwrap();
    let mut restored: ResponseSession = serde_json::from_str(&json).unwrap();
    restored.record("q1", 5, Timestamp::now(), None).unwrap();
    assert_eq!(restored.len(), 1);
    assert_eq!(restored.get("q1").unwrap().revision_count, 1);
}
