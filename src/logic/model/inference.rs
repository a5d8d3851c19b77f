//! ONNX classifier wrapper
//!
//! One loaded session per model path. `Session::run` needs exclusive
//! access, so each classifier serializes its own calls behind a mutex;
//! unrelated model paths never contend with each other.

use std::path::Path;

use ndarray::Array3;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;
use thiserror::Error;

use super::registry::ModelPath;
use super::scaler::{FeatureScaler, ScalerError};

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("model path not available: {0}")]
    Unavailable(ModelPath),

    #[error("failed to load model: {0}")]
    Load(String),

    #[error("{0}")]
    Scaler(#[from] ScalerError),

    #[error("classification failed: {0}")]
    Classify(String),
}

/// A trained classifier and its matching standardization transform.
pub struct OnnxClassifier {
    session: Mutex<Session>,
    scaler: FeatureScaler,
    input_dim: usize,
}

impl OnnxClassifier {
    /// Load a model/scaler pair from disk.
    ///
    /// Fails if either artifact is missing or corrupt, or if the scaler
    /// does not match the model's input dimension.
    pub fn load(
        model_file: &Path,
        scaler_file: &Path,
        input_dim: usize,
    ) -> Result<Self, InferenceError> {
        if !model_file.exists() {
            return Err(InferenceError::Load(format!(
                "model not found: {}",
                model_file.display()
            )));
        }

        let session = Session::builder()
            .map_err(|e| InferenceError::Load(format!("session builder: {e}")))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError::Load(format!("optimization level: {e}")))?
            .commit_from_file(model_file)
            .map_err(|e| InferenceError::Load(format!("model load: {e}")))?;

        let scaler = FeatureScaler::load(scaler_file)?;
        scaler.expect_dim(input_dim)?;

        Ok(Self {
            session: Mutex::new(session),
            scaler,
            input_dim,
        })
    }

    /// Scale a feature vector and run it through the model.
    ///
    /// Returns the 2-class probability distribution
    /// `[p_normal, p_stress]`.
    pub fn classify(&self, features: &[f32]) -> Result<[f32; 2], InferenceError> {
        if features.len() != self.input_dim {
            return Err(InferenceError::Classify(format!(
                "expected {} features, got {}",
                self.input_dim,
                features.len()
            )));
        }

        let scaled = self.scaler.transform(features);

        // Shape for the sequence classifier: (batch, timesteps, features)
        let input_array = Array3::<f32>::from_shape_vec((1, self.input_dim, 1), scaled)
            .map_err(|e| InferenceError::Classify(format!("array error: {e}")))?;

        let mut session = self.session.lock();

        let output_name = session
            .outputs()
            .first()
            .map(|o| o.name().to_string())
            .ok_or_else(|| InferenceError::Classify("no output defined".to_string()))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| InferenceError::Classify(format!("tensor error: {e}")))?;

        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError::Classify(format!("inference failed: {e}")))?;

        let output = outputs
            .get(&output_name)
            .ok_or_else(|| InferenceError::Classify("no output produced".to_string()))?;

        let tensor = output
            .try_extract_tensor::<f32>()
            .map_err(|e| InferenceError::Classify(format!("extract error: {e}")))?;

        let data = tensor.1;
        if data.len() < 2 {
            return Err(InferenceError::Classify(format!(
                "expected 2 class probabilities, got {}",
                data.len()
            )));
        }

        Ok([data[0], data[1]])
    }
}
