use likert_core::config::EngineConfig;
use likert_norms::NormsError;
use likert_norms::norming::{NormingEngine, NormingSample};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-3
}

fn sample() -> NormingSample {
    NormingSample::new(vec![1, 2, 2, 3, 3, 3, 4, 4, 4, 4])
}

#[test]
fn rejects_sample_of_nine_accepts_ten() {
    let engine = NormingEngine::new(&EngineConfig::default());
    let err = engine
        .compute("q1", &NormingSample::new(vec![4; 9]))
        .unwrap_err();
    assert!(matches!(
        err,
        NormsError::InsufficientSample {
            required: 10,
            actual: 9
        }
    ));
    assert!(engine.compute("q1", &NormingSample::new(vec![4; 10])).is_ok());
}

#[test]
fn descriptive_statistics() {
    let engine = NormingEngine::new(&EngineConfig::default());
    let stats = engine.compute("q1", &sample()).unwrap();
    assert_eq!(stats.sample_size, 10);
    assert!(close(stats.mean(), 3.0));
    assert!(close(stats.descriptive["median"], 3.0));
    assert!(close(stats.descriptive["variance"], 10.0 / 9.0));
    assert!(close(stats.std_dev(), (10.0f64 / 9.0).sqrt()));
    assert!(stats.descriptive["skewness"] < 0.0);
    assert!(close(stats.confidence_interval, 1.96 * stats.std_dev() / 10f64.sqrt()));
    assert!(close(stats.difficulty, 2.0 / 6.0));
    assert!(close(stats.discrimination, stats.std_dev() / 3.0));
}

#[test]
fn distribution_and_norm_table() {
    let engine = NormingEngine::new(&EngineConfig::default());
    let stats = engine.compute("q1", &sample()).unwrap();
    assert_eq!(stats.distribution.get(&3), Some(&3));
    assert_eq!(stats.distribution.get(&7), None);

    assert_eq!(stats.norms.len(), 7);
    let ranks: Vec<f64> = stats.norms.iter().map(|n| n.percentile_rank).collect();
    assert_eq!(ranks, vec![10.0, 30.0, 60.0, 100.0, 100.0, 100.0, 100.0]);

    let four = stats.norm_for(4).unwrap();
    assert!(close(four.z_score, 1.0 / stats.std_dev()));
    assert!(close(four.standardized_score, 50.0 + 10.0 * four.z_score));
    assert_eq!(four.stanine, 7);
    assert_eq!(stats.norm_for(3).unwrap().z_score, 0.0);
}

#[test]
fn quality_metrics_from_parallel_arrays() {
    let engine = NormingEngine::new(&EngineConfig::default());
    let mut times = vec![1000.0; 10];
    times[0] = 400.0;
    let mut revisions = vec![0; 10];
    revisions[9] = 12;
    let stats = engine
        .compute("q1", &sample().with_times(times).with_revisions(revisions))
        .unwrap();

    assert!(close(stats.quality.avg_response_time_ms, 940.0));
    assert!(close(stats.quality.anomaly_rate, 0.2));
    assert!(close(stats.quality.avg_revisions, 1.2));
    assert!(stats.quality.response_diversity > 0.0 && stats.quality.response_diversity < 1.0);
    assert!((0.0..=1.0).contains(&stats.quality.consistency_score));
}

#[test]
fn straight_lined_sample_has_no_diversity() {
    let engine = NormingEngine::new(&EngineConfig::default());
    let stats = engine.compute("flat", &NormingSample::new(vec![4; 12])).unwrap();
    assert_eq!(stats.quality.response_diversity, 0.0);
    assert_eq!(stats.std_dev(), 0.0);
    assert!(stats.norms.iter().all(|n| n.z_score == 0.0 && !n.standardized_score.is_nan()));
    assert_eq!(stats.confidence_interval, 0.0);
}

#[test]
fn demographic_strata() {
    let engine = NormingEngine::new(&EngineConfig::default());
    let tags: Vec<String> = ["a", "a", "a", "a", "a", "b", "b", "b", "b", "b"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let stats = engine.compute("q1", &sample().with_demographics(tags)).unwrap();
    let a = &stats.demographic_strata["a"];
    let b = &stats.demographic_strata["b"];
    assert_eq!(a.count, 5);
    assert!(close(a.mean, 2.2));
    assert!(close(b.sum, 19.0));
    assert!(a.z_offset < 0.0 && b.z_offset > 0.0);
}

#[test]
fn precondition_errors() {
    let engine = NormingEngine::new(&EngineConfig::default());
    let err = engine
        .compute("q1", &sample().with_times(vec![900.0; 3]))
        .unwrap_err();
    assert!(matches!(err, NormsError::LengthMismatch { ref field, .. } if field == "response_times_ms"));

    let mut bad = sample();
    bad.responses[0] = 8;
    assert!(matches!(engine.compute("q1", &bad), Err(NormsError::Core(_))));
}

#[test]
fn engine_table_lifecycle() {
    let engine = NormingEngine::new(&EngineConfig::default());
    assert!(matches!(engine.convert("q1", 3.0), Err(NormsError::UnknownItem(_))));

    engine.compute("q1", &sample()).unwrap();
    engine.compute("q2", &NormingSample::new(vec![5; 10])).unwrap();
    assert_eq!(engine.len(), 2);

    let c = engine.convert("q1", 4.0).unwrap();
    assert_eq!(c.percentile_rank, 100.0);
    assert!(c.z_score > 0.0);

    let mut larger = sample().responses;
    larger.extend([1, 1]);
    let updated = engine.compute("q1", &NormingSample::new(larger)).unwrap();
    assert_eq!(updated.sample_size, 12);
    assert_eq!(engine.get("q1").unwrap().sample_size, 12);

    assert!(engine.reset("q1").is_some());
    assert!(engine.get("q1").is_none());
    engine.clear();
    assert!(engine.is_empty());
}

#[test]
fn deserialized_statistics_still_convert() {
    let engine = NormingEngine::new(&EngineConfig::default());
    let stats = engine.compute("q1", &sample()).unwrap();
    let json = serde_json::to_string(&stats).unwrap();
    let restored: likert_norms::norming::NormingStatistics = serde_json::from_str(&json).unwrap();
    let (a, b) = (restored.convert(2.0), stats.convert(2.0));
    assert_eq!(a.percentile_rank, b.percentile_rank);
    assert!(close(a.z_score, b.z_score));
    assert_eq!(a.stanine, b.stanine);
    assert_eq!(restored.distribution, stats.distribution);
}

#[test]
fn separate_engines_do_not_share_tables() {
    let a = NormingEngine::new(&EngineConfig::default());
    let b = NormingEngine::new(&EngineConfig::default());
    a.compute("q1", &sample()).unwrap();
    assert!(b.get("q1").is_none());
}
