//! likert-core
//!
//! Shared vocabulary of the Likert scoring engine: scale ranges and the
//! linear rescaling that every other crate builds on, the ordered severity
//! tag, a descriptive-statistics kernel, response data types, and engine
//! configuration. Pure data and arithmetic with no I/O outside config loading.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod scale;
pub mod severity;
pub mod stats;

pub use error::CoreError;
pub use scale::ScaleRange;
pub use severity::{Severity, SeverityFactor};
