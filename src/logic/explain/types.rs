use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A biosignal input class
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Hrv,
    Rr,
    Hr,
    Eeg,
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modality::Hrv => f.write_str("hrv"),
            Modality::Rr => f.write_str("rr"),
            Modality::Hr => f.write_str("hr"),
            Modality::Eeg => f.write_str("eeg"),
        }
    }
}

/// Heuristic per-modality attribution of a prediction.
///
/// `weights` are percentages summing to 100 when any modality had
/// usable data, empty otherwise. This is a variance-based estimate,
/// not a model-derived attribution (no Shapley values involved).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContributionBreakdown {
    pub weights: BTreeMap<Modality, f32>,
    pub descriptions: BTreeMap<Modality, String>,
}
