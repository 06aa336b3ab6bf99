//! likert-norms
//!
//! Population statistics over response samples: norming (descriptives,
//! distributions, percentile / z / T / stanine conversions), internal
//! consistency reliability, and item analysis with improvement
//! recommendations. Independent of individual scoring except for attaching
//! percentiles to subscale scores.

pub mod error;
pub mod item_analysis;
pub mod norming;
pub mod percentile;
pub mod reliability;

pub use error::NormsError;
