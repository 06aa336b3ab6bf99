use std::collections::BTreeMap;

use crate::CompositeIndex;
use crate::interpretation::Band;

use super::weight_table;

/// Resilience Index: coping and optimism against stress load.
pub struct Resilience;

impl CompositeIndex for Resilience {
    fn id(&self) -> &str {
        "resilience"
    }

    fn name(&self) -> &str {
        "Resilience Index"
    }

    fn weights(&self) -> &BTreeMap<String, f64> {
        static WEIGHTS: std::sync::LazyLock<BTreeMap<String, f64>> =
            std::sync::LazyLock::new(|| {
                weight_table(&[
                    ("coping", 1.0),
                    ("optimism", 0.8),
                    ("stress", -0.6),
                    ("negative_affect", -0.4),
                ])
            });
        &WEIGHTS
    }

    fn describe(&self, band: Band) -> String {
        let text = match band {
            Band::VeryLow => "Setbacks are likely to be overwhelming; few coping resources",
            Band::Low => "Limited recovery from setbacks; coping is easily strained",
            Band::Moderate => "Recovers from ordinary setbacks with some effort",
            Band::High => "Adapts well under pressure and recovers quickly",
            Band::VeryHigh => "Highly adaptive; setbacks are treated as manageable challenges",
        };
        text.to_string()
    }
}
