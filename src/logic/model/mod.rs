//! Model Module - Registry over Trained Classifiers
//!
//! Loads classifier/scaler pairs once at startup, reports per-path
//! availability, and exposes the scale-and-classify capability behind
//! the `ClassifierBackend` trait so the orchestrator stays testable
//! without ONNX artifacts.

pub mod inference;
pub mod registry;
pub mod scaler;

// Re-export common types
pub use inference::{InferenceError, OnnxClassifier};
pub use registry::{ClassifierBackend, ModelPath, ModelRegistry, RegistryStatus};
pub use scaler::FeatureScaler;
