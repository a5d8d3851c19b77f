//! Feature standardization transform
//!
//! Per-feature `z = (x - mean) / scale` parameters, exported by the
//! training pipeline as JSON next to each model file. Parameters are
//! immutable after load and shared read-only across requests.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScalerError {
    #[error("cannot read scaler file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed scaler file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("scaler mean/scale lengths differ: {mean} vs {scale}")]
    Inconsistent { mean: usize, scale: usize },

    #[error("scaler dimension mismatch: expected {expected}, got {actual}")]
    Dimension { expected: usize, actual: usize },
}

/// Standardization parameters from training
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureScaler {
    pub mean: Vec<f32>,
    pub scale: Vec<f32>,
}

impl FeatureScaler {
    /// Load parameters from a JSON file
    pub fn load(path: &Path) -> Result<Self, ScalerError> {
        let reader = BufReader::new(File::open(path)?);
        let scaler: FeatureScaler = serde_json::from_reader(reader)?;

        if scaler.mean.len() != scaler.scale.len() {
            return Err(ScalerError::Inconsistent {
                mean: scaler.mean.len(),
                scale: scaler.scale.len(),
            });
        }
        Ok(scaler)
    }

    /// No-op scaler (tests and diagnostics)
    pub fn identity(dim: usize) -> Self {
        Self {
            mean: vec![0.0; dim],
            scale: vec![1.0; dim],
        }
    }

    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// Validate that the parameters match a model's input dimension
    pub fn expect_dim(&self, expected: usize) -> Result<(), ScalerError> {
        if self.len() != expected {
            return Err(ScalerError::Dimension {
                expected,
                actual: self.len(),
            });
        }
        Ok(())
    }

    /// Standardize a feature vector. Zero scale entries are guarded so
    /// a degenerate training column cannot produce infinities.
    pub fn transform(&self, features: &[f32]) -> Vec<f32> {
        features
            .iter()
            .enumerate()
            .map(|(i, &x)| {
                let mean = self.mean.get(i).copied().unwrap_or(0.0);
                let scale = self.scale.get(i).copied().unwrap_or(1.0);
                (x - mean) / scale.max(1e-8)
            })
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
