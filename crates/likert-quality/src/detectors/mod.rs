//! One module per detector. Each exposes `detect(window, thresholds)`,
//! which always returns a verdict. It is normal when the window is too short or
//! nothing crosses a threshold.

pub mod pattern;
pub mod revision;
pub mod straight_line;
pub mod timing;
