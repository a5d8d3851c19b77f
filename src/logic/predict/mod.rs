//! Predict Module - Inference Orchestration
//!
//! Strategy selection over available modalities and loaded models,
//! shared scale-classify-derive path, heuristic fallback.

pub mod orchestrator;
pub mod types;


// Re-export common types
pub use orchestrator::StressPredictor;
pub use types::{
    DataSources, EegRecording, HeadsetMetrics, ModelKind, PredictionError, PredictionResult,
    SensorReadings, StressClass,
};
