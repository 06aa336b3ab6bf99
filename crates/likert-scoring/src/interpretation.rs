use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Five ordered bands, one every 20 points of the 0–100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Band {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl Band {
    pub const ALL: [Band; 5] = [
        Band::VeryLow,
        Band::Low,
        Band::Moderate,
        Band::High,
        Band::VeryHigh,
    ];

    pub fn from_score(score: f64) -> Self {
        if score < 20.0 {
            Band::VeryLow
        } else if score < 40.0 {
            Band::Low
        } else if score < 60.0 {
            Band::Moderate
        } else if score < 80.0 {
            Band::High
        } else {
            Band::VeryHigh
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Band::VeryLow => "Very low",
            Band::Low => "Low",
            Band::Moderate => "Moderate",
            Band::High => "High",
            Band::VeryHigh => "Very high",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// A band plus the text describing what the band means for one construct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Interpretation {
    pub band: Band,
    pub label: String,
    pub description: String,
}

impl Interpretation {
    pub fn new(band: Band, description: impl Into<String>) -> Self {
        Self {
            band,
            label: band.label().to_string(),
            description: description.into(),
        }
    }

    /// Construct-neutral wording, used for subscales and configured indices.
    pub fn generic(score: f64, construct: &str) -> Self {
        let band = Band::from_score(score);
        let description = match band {
            Band::VeryLow => format!("{construct} is well below the typical range"),
            Band::Low => format!("{construct} is below the typical range"),
            Band::Moderate => format!("{construct} is within the typical range"),
            Band::High => format!("{construct} is above the typical range"),
            Band::VeryHigh => format!("{construct} is well above the typical range"),
        };
        Self::new(band, description)
    }
}
