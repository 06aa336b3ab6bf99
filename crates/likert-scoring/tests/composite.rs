use std::collections::BTreeMap;

use likert_core::config::{EngineConfig, ScaleConfig};
use likert_scoring::composite::{
    calculate, calculate_all, calculate_by_id, composite_from_responses, weighted_composite,
};
use likert_scoring::error::ScoringError;
use likert_scoring::indices::configured::ConfiguredIndex;
use likert_scoring::interpretation::Band;
use likert_scoring::{builtin_indices, get_index, indices_from_config};
use proptest::prelude::*;

fn map(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[test]
fn zero_weights_give_zero() {
    let scores = map(&[("a", 90.0), ("b", 70.0)]);
    let weights = map(&[("a", 0.0), ("b", 0.0)]);
    assert_eq!(weighted_composite(&scores, &weights).0, 0.0);
}

#[test]
fn only_shared_subscales_contribute() {
    let scores = map(&[("a", 80.0), ("c", 10.0)]);
    let weights = map(&[("a", 1.0), ("b", 1.0)]);
    let (value, contributing) = weighted_composite(&scores, &weights);
    assert_eq!(value, 80.0);
    assert_eq!(contributing, vec!["a".to_string()]);
}

#[test]
fn negative_weight_reduces_without_flipping() {
    let scores = map(&[("good", 80.0), ("bad", 40.0)]);
    let weights = map(&[("good", 1.0), ("bad", -1.0)]);
    assert_eq!(weighted_composite(&scores, &weights).0, 20.0);
}

#[test]
fn builtin_index_interprets_with_own_text() {
    let index = get_index("wellbeing").unwrap();
    let scores = map(&[("positive_affect", 90.0), ("life_satisfaction", 95.0)]);
    let result = calculate(index.as_ref(), &scores);
    assert_eq!(result.interpretation.band, Band::VeryHigh);
    assert!(result.interpretation.description.contains("Flourishing"));

    let resilience = get_index("resilience").unwrap();
    let other = calculate(resilience.as_ref(), &map(&[("coping", 90.0)]));
    assert_eq!(other.interpretation.band, Band::VeryHigh);
    assert_ne!(other.interpretation.description, result.interpretation.description);
}

#[test]
fn registry_lists_builtins() {
    let ids: Vec<String> = builtin_indices().iter().map(|i| i.id().to_string()).collect();
    assert_eq!(ids, vec!["wellbeing", "resilience", "social_engagement"]);
    assert!(get_index("missing").is_none());
}

#[test]
fn config_tables_add_and_replace_indices() {
    let mut config = EngineConfig::default();
    config.composite_indices.insert("focus".into(), map(&[("attention", 1.0)]));
    config.composite_indices.insert("wellbeing".into(), map(&[("mood", 1.0)]));
    let indices = indices_from_config(&config);
    let ids: Vec<&str> = indices.iter().map(|i| i.id()).collect();
    assert_eq!(ids, vec!["resilience", "social_engagement", "focus", "wellbeing"]);
    let wellbeing = indices.iter().find(|i| i.id() == "wellbeing").unwrap();
    assert_eq!(wellbeing.weights().len(), 1);
}

#[test]
fn lookup_by_id_reports_unknown_index() {
    let indices = builtin_indices();
    let scores = map(&[("coping", 70.0), ("optimism", 70.0)]);
    let result = calculate_by_id(&indices, "resilience", &scores).unwrap();
    assert!((result.value - 70.0).abs() < 1e-9);
    assert_eq!(calculate_all(&indices, &scores).len(), 3);

    let err = calculate_by_id(&indices, "grit", &scores).unwrap_err();
    assert!(matches!(err, ScoringError::UnknownIndex(id) if id == "grit"));
}

#[test]
fn composite_from_raw_responses() {
    let index = ConfiguredIndex::new("focus", map(&[("attention", 1.0), ("memory", 1.0)]));
    let responses = BTreeMap::from([
        ("attention".to_string(), vec![Some(7), Some(7)]),
        ("memory".to_string(), vec![Some(1), None]),
        ("ignored".to_string(), vec![None]),
    ]);
    let result = composite_from_responses(&index, &responses, &ScaleConfig::default()).unwrap();
    assert_eq!(result.value, 50.0);
    assert_eq!(result.interpretation.band, Band::Moderate);
    assert_eq!(result.contributing.len(), 2);
}

proptest! {
    #[test]
    fn composite_stays_in_bounds(
        a in 0.0f64..=100.0, b in 0.0f64..=100.0,
        wa in -5.0f64..5.0, wb in -5.0f64..5.0,
    ) {
        let (value, _) = weighted_composite(&map(&[("a", a), ("b", b)]), &map(&[("a", wa), ("b", wb)]));
        prop_assert!((0.0..=100.0).contains(&value));
    }
}
