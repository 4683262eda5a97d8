//! Acoustic event onset detection.

pub mod detect;
pub mod strength;

pub use detect::{OnsetDetector, OnsetMethod};
pub use strength::onset_strength;
