//! Features Module - Feature Extraction Engine
//!
//! Deterministic extraction from raw biosignals into fixed-length
//! numeric vectors. Extraction never fails: missing or malformed input
//! degrades to zero-filled blocks.

pub mod cardiac;
pub mod eeg;
pub mod layout;
pub mod spectral;
pub mod stats;
pub mod wavelet;

#[cfg(test)]
mod tests;

// Re-export common types
pub use cardiac::extract_cardiac;
pub use eeg::extract_eeg;
pub use layout::{CARDIAC_FEATURE_DIM, EEG_FEATURE_DIM, FUSION_FEATURE_DIM};
