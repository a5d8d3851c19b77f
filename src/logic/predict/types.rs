//! Typed records at the prediction boundary
//!
//! Inputs deserialize from the service layer's request payloads;
//! results serialize back to it. Every field's presence is statically
//! known - no keyed-lookup-with-default shapes.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::DEFAULT_SAMPLING_RATE;
use crate::logic::model::{InferenceError, ModelPath};

// ============================================================================
// INPUTS
// ============================================================================

/// Raw EEG recording from the headset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EegRecording {
    /// Channel name -> raw signal samples
    pub channels: HashMap<String, Vec<f32>>,
    /// Sampling rate in Hz
    #[serde(default = "default_sampling_rate")]
    pub sampling_rate: u32,
}

fn default_sampling_rate() -> u32 {
    DEFAULT_SAMPLING_RATE
}

impl EegRecording {
    pub fn new(channels: HashMap<String, Vec<f32>>) -> Self {
        Self {
            channels,
            sampling_rate: DEFAULT_SAMPLING_RATE,
        }
    }
}

impl Default for EegRecording {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

/// Performance metrics reported by the headset SDK.
///
/// Only `stress` and `relaxation` participate in the heuristic path;
/// the other fields are carried through for the service layer.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HeadsetMetrics {
    pub engagement: Option<f64>,
    pub excitement: Option<f64>,
    pub stress: Option<f64>,
    pub relaxation: Option<f64>,
    pub interest: Option<f64>,
    pub focus: Option<f64>,
}

/// One prediction request's worth of raw sensor data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SensorReadings {
    /// Raw EEG recording
    #[serde(default)]
    pub eeg: Option<EegRecording>,
    /// HRV (SDNN) values in milliseconds
    #[serde(default)]
    pub hrv: Option<Vec<f32>>,
    /// Respiratory rate values in breaths/min
    #[serde(default)]
    pub rr: Option<Vec<f32>>,
    /// Heart rate values in BPM
    #[serde(default)]
    pub hr: Option<Vec<f32>>,
    /// Headset summary metrics (heuristic fallback)
    #[serde(default)]
    pub metrics: Option<HeadsetMetrics>,
}

impl SensorReadings {
    /// EEG is usable when at least one channel is present
    pub fn has_eeg(&self) -> bool {
        self.eeg.as_ref().is_some_and(|r| !r.channels.is_empty())
    }

    /// Cardiac data is usable when HRV or RR is non-empty. A heart-rate
    /// series alone is a secondary signal and never triggers the
    /// cardiac model paths, though it still feeds the feature block and
    /// `data_sources`.
    pub fn has_cardiac(&self) -> bool {
        series_present(&self.hrv) || series_present(&self.rr)
    }

    pub fn hrv_slice(&self) -> Option<&[f32]> {
        self.hrv.as_deref()
    }

    pub fn rr_slice(&self) -> Option<&[f32]> {
        self.rr.as_deref()
    }

    pub fn hr_slice(&self) -> Option<&[f32]> {
        self.hr.as_deref()
    }
}

pub(crate) fn series_present(series: &Option<Vec<f32>>) -> bool {
    series.as_ref().is_some_and(|v| !v.is_empty())
}

// ============================================================================
// RESULTS
// ============================================================================

/// Binary stress classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StressClass {
    Normal,
    Stress,
}

impl std::fmt::Display for StressClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StressClass::Normal => f.write_str("normal"),
            StressClass::Stress => f.write_str("stress"),
        }
    }
}

/// Which strategy actually produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Fusion,
    EegOnly,
    EcgOnly,
    Heuristic,
}

impl From<ModelPath> for ModelKind {
    fn from(path: ModelPath) -> Self {
        match path {
            ModelPath::Fusion => ModelKind::Fusion,
            ModelPath::EegOnly => ModelKind::EegOnly,
            ModelPath::EcgOnly => ModelKind::EcgOnly,
        }
    }
}

/// Which raw inputs fed the prediction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSources {
    pub eeg: bool,
    pub hrv: bool,
    pub rr: bool,
    pub hr: bool,
}

/// A completed stress prediction.
///
/// `stress_level` is the published stress intensity: the probability of
/// the stress class, scaled to 0-100 and truncated. `confidence` is the
/// classifier's certainty in whichever class won: probability of the
/// argmax class, scaled to 0-100, one decimal. The two deliberately
/// diverge when the predicted class is `normal`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    pub stress_level: u8,
    pub stress_class: StressClass,
    pub confidence: f32,
    pub model_used: ModelKind,
    pub data_sources: DataSources,
    pub timestamp: DateTime<Utc>,
}

impl PredictionResult {
    /// Human-readable band for the stress level
    pub fn stress_label(&self) -> &'static str {
        match self.stress_level {
            0..=40 => "Low Stress",
            41..=70 => "Medium Stress",
            _ => "High Stress",
        }
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Request-level prediction failure. Not a fault: the service layer
/// maps these to its 4xx/5xx responses.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("no valid sensor data provided")]
    NoUsableData,

    #[error("prediction failed: {0}")]
    Classifier(#[from] InferenceError),
}

impl PredictionError {
    /// The wire shape the service layer returns for a failed request
    pub fn to_error_body(&self) -> serde_json::Value {
        serde_json::json!({
            "error": self.to_string(),
            "stress_level": null,
            "confidence": null,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
