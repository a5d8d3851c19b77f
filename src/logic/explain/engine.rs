//! Contribution estimator
//!
//! Weights each usable modality by its signal variance (EEG by a fixed
//! prior, reflecting its structurally larger share in the fusion
//! model), normalizes to percentages, and attaches threshold-rule
//! descriptions.

use crate::logic::features::stats;
use crate::logic::predict::SensorReadings;

use super::types::{ContributionBreakdown, Modality};

// Base weights before the variance term
const HRV_BASE: f64 = 1.0;
const RR_BASE: f64 = 0.8;
const HR_BASE: f64 = 0.5;
const EEG_WEIGHT: f64 = 1.5;

/// Estimate per-modality contributions for a request.
///
/// Cardiac series need at least 2 points (a variance exists), EEG a
/// non-empty channel map. With no usable modality both maps are empty.
pub fn contributions(input: &SensorReadings) -> ContributionBreakdown {
    let mut breakdown = ContributionBreakdown::default();

    let hrv = series_with_variance(input.hrv_slice());
    let rr = series_with_variance(input.rr_slice());
    let hr = series_with_variance(input.hr_slice());
    let has_eeg = input.has_eeg();

    let mut weights: Vec<(Modality, f64)> = Vec::with_capacity(4);
    if let Some(xs) = hrv {
        weights.push((Modality::Hrv, HRV_BASE + f64::from(stats::variance(xs)) / 100.0));
    }
    if let Some(xs) = rr {
        weights.push((Modality::Rr, RR_BASE + f64::from(stats::variance(xs)) / 10.0));
    }
    if let Some(xs) = hr {
        weights.push((Modality::Hr, HR_BASE + f64::from(stats::variance(xs)) / 50.0));
    }
    if has_eeg {
        weights.push((Modality::Eeg, EEG_WEIGHT));
    }

    let total: f64 = weights.iter().map(|(_, w)| w).sum();
    if total > 0.0 {
        for (modality, weight) in &weights {
            let percent = (weight / total * 1000.0).round() / 10.0;
            breakdown.weights.insert(*modality, percent as f32);
        }
    }

    if let Some(xs) = hrv {
        breakdown
            .descriptions
            .insert(Modality::Hrv, describe_hrv(stats::mean(xs)).to_string());
    }
    if let Some(xs) = rr {
        breakdown
            .descriptions
            .insert(Modality::Rr, describe_rr(stats::mean(xs)).to_string());
    }
    if has_eeg {
        breakdown.descriptions.insert(
            Modality::Eeg,
            "EEG patterns analyzed for stress markers.".to_string(),
        );
    }

    breakdown
}

fn series_with_variance(series: Option<&[f32]>) -> Option<&[f32]> {
    series.filter(|xs| xs.len() > 1)
}

fn describe_hrv(mean_hrv: f32) -> &'static str {
    if mean_hrv < 30.0 {
        "Low variability detected, suggesting sympathetic nervous system activation."
    } else if mean_hrv > 60.0 {
        "Good variability indicating parasympathetic dominance."
    } else {
        "Moderate heart rate variability observed."
    }
}

fn describe_rr(mean_rr: f32) -> &'static str {
    if mean_rr > 18.0 {
        "Elevated breathing rate observed."
    } else if mean_rr < 12.0 {
        "Slow, relaxed breathing pattern."
    } else {
        "Normal respiratory rate."
    }
}

// ============================================================================
// TESTS
// ============================================================================
