//! Stress Inference Core
//!
//! Multi-modal stress inference pipeline: deterministic feature
//! extraction from raw biosignals (EEG, HRV, respiration, heart rate),
//! a model registry over trained ONNX classifiers, a strategy
//! orchestrator with graceful fallback, and a heuristic explainability
//! estimator.
//!
//! The surrounding service (HTTP routing, persistence, auth,
//! notifications) consumes this crate; the core itself performs no
//! per-request I/O.

pub mod constants;
pub mod logic;

// Re-export the boundary API
pub use logic::explain::{contributions, ContributionBreakdown, Modality};
pub use logic::features::{extract_cardiac, extract_eeg};
pub use logic::model::{ClassifierBackend, InferenceError, ModelPath, ModelRegistry, RegistryStatus};
pub use logic::predict::{
    DataSources, EegRecording, HeadsetMetrics, ModelKind, PredictionError, PredictionResult,
    SensorReadings, StressClass, StressPredictor,
};
