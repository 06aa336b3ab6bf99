use std::collections::BTreeMap;

use crate::CompositeIndex;
use crate::interpretation::Band;

use super::weight_table;

/// Social Engagement Index. Loneliness counts against the index.
pub struct SocialEngagement;

impl CompositeIndex for SocialEngagement {
    fn id(&self) -> &str {
        "social_engagement"
    }

    fn name(&self) -> &str {
        "Social Engagement Index"
    }

    fn weights(&self) -> &BTreeMap<String, f64> {
        static WEIGHTS: std::sync::LazyLock<BTreeMap<String, f64>> =
            std::sync::LazyLock::new(|| {
                weight_table(&[
                    ("social_connection", 1.0),
                    ("extraversion", 0.7),
                    ("agreeableness", 0.5),
                    ("loneliness", -0.8),
                ])
            });
        &WEIGHTS
    }

    fn describe(&self, band: Band) -> String {
        let text = match band {
            Band::VeryLow => "Largely withdrawn from social contact",
            Band::Low => "Limited social involvement; contact tends to be avoided",
            Band::Moderate => "Typical social involvement",
            Band::High => "Socially active and well connected",
            Band::VeryHigh => "Highly engaged; seeks out and sustains many relationships",
        };
        text.to_string()
    }
}
