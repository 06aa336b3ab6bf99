pub mod configured;
pub mod resilience;
pub mod social_engagement;
pub mod wellbeing;

use std::collections::BTreeMap;

fn weight_table(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries
        .iter()
        .map(|(name, weight)| (name.to_string(), *weight))
        .collect()
}
