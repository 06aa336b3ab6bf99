use std::collections::BTreeMap;

use crate::CompositeIndex;
use crate::interpretation::Band;

use super::weight_table;

/// Wellbeing Index: positive affect and life satisfaction, offset by
/// negative affect and perceived stress.
pub struct Wellbeing;

impl CompositeIndex for Wellbeing {
    fn id(&self) -> &str {
        "wellbeing"
    }

    fn name(&self) -> &str {
        "Wellbeing Index"
    }

    fn weights(&self) -> &BTreeMap<String, f64> {
        static WEIGHTS: std::sync::LazyLock<BTreeMap<String, f64>> =
            std::sync::LazyLock::new(|| {
                weight_table(&[
                    ("positive_affect", 1.0),
                    ("life_satisfaction", 1.0),
                    ("negative_affect", -0.8),
                    ("stress", -0.5),
                ])
            });
        &WEIGHTS
    }

    fn describe(&self, band: Band) -> String {
        let text = match band {
            Band::VeryLow => "Marked distress; low satisfaction and frequent negative mood",
            Band::Low => "Wellbeing below typical levels; strain outweighs positive experience",
            Band::Moderate => "Balanced wellbeing with ordinary ups and downs",
            Band::High => "Good wellbeing; positive mood and satisfaction predominate",
            Band::VeryHigh => "Flourishing; consistently positive mood and high satisfaction",
        };
        text.to_string()
    }
}
