//! Explain Module - Contribution Breakdown
//!
//! Heuristic per-modality attribution, independent of which inference
//! strategy ran. No model call is involved.

pub mod engine;
pub mod types;

// Re-export common types
pub use engine::contributions;
pub use types::{ContributionBreakdown, Modality};
