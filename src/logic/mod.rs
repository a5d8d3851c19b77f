//! Logic Module - Inference Engines
//!
//! - `features/` - Feature extraction (EEG, cardiac)
//! - `model/` - Model registry and ONNX inference
//! - `predict/` - Strategy orchestration
//! - `explain/` - Contribution breakdown

pub mod explain;
pub mod features;
pub mod model;
pub mod predict;
