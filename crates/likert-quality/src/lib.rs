//! likert-quality
//!
//! Data-quality checks over one respondent's answer sequence:
//! straight-lining, abnormal timing, structured response patterns, and
//! excessive revision. Every detector is a pure function of its window and
//! never fails; each verdict carries its own severity, confidence,
//! evidence, and recommended action.

pub mod detectors;
pub mod engine;
pub mod events;
pub mod result;

pub use engine::{AnomalyDetector, QualitySummary};
pub use result::{AnomalyResult, AnomalyType, RecommendedAction};
