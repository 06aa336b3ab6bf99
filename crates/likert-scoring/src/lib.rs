//! likert-scoring
//!
//! Individual scoring: turns one respondent's answers into subscale scores
//! and composite indices. Pure functions over in-memory responses; no
//! population statistics live here.

pub mod composite;
pub mod error;
pub mod indices;
pub mod interpretation;
pub mod questionnaire;
pub mod subscale;

use std::collections::BTreeMap;

use likert_core::config::EngineConfig;

use interpretation::{Band, Interpretation};

/// Trait implemented by each composite index.
pub trait CompositeIndex: Send + Sync {
    /// Unique identifier (e.g., "wellbeing").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "Wellbeing Index").
    fn name(&self) -> &str;

    /// Subscale → signed weight.
    fn weights(&self) -> &BTreeMap<String, f64>;

    /// What a score in `band` means for this index.
    fn describe(&self, band: Band) -> String;

    fn interpret(&self, value: f64) -> Interpretation {
        let band = Band::from_score(value);
        Interpretation::new(band, self.describe(band))
    }
}

/// Return all built-in indices.
pub fn builtin_indices() -> Vec<Box<dyn CompositeIndex>> {
    vec![
        Box::new(indices::wellbeing::Wellbeing),
        Box::new(indices::resilience::Resilience),
        Box::new(indices::social_engagement::SocialEngagement),
    ]
}

/// Built-in indices followed by every weight table in `config`. A
/// configured table with a built-in id replaces the built-in.
pub fn indices_from_config(config: &EngineConfig) -> Vec<Box<dyn CompositeIndex>> {
    let mut indices: Vec<Box<dyn CompositeIndex>> = builtin_indices()
        .into_iter()
        .filter(|i| !config.composite_indices.contains_key(i.id()))
        .collect();
    for (id, weights) in &config.composite_indices {
        indices.push(Box::new(indices::configured::ConfiguredIndex::new(
            id.clone(),
            weights.clone(),
        )));
    }
    indices
}

/// Look up a built-in index by ID.
pub fn get_index(id: &str) -> Option<Box<dyn CompositeIndex>> {
    builtin_indices().into_iter().find(|i| i.id() == id)
}
