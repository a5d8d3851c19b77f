//! Model Registry
//!
//! Explicitly constructed at process start and handed to the
//! orchestrator by reference; no global state. A missing or corrupt
//! artifact disables only its own path, reported once at load time.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::logic::features::layout::{CARDIAC_FEATURE_DIM, EEG_FEATURE_DIM, FUSION_FEATURE_DIM};

use super::inference::{InferenceError, OnnxClassifier};

// ============================================================================
// MODEL PATHS
// ============================================================================

/// The three trained classifier paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelPath {
    Fusion,
    EegOnly,
    EcgOnly,
}

impl ModelPath {
    pub const ALL: [ModelPath; 3] = [ModelPath::Fusion, ModelPath::EegOnly, ModelPath::EcgOnly];

    /// Artifact file stem: `{stem}_model.onnx` + `{stem}_scaler.json`
    fn file_stem(self) -> &'static str {
        match self {
            ModelPath::Fusion => "fusion",
            ModelPath::EegOnly => "eeg",
            ModelPath::EcgOnly => "ecg",
        }
    }

    /// Input dimension the path's classifier was trained on
    pub fn input_dim(self) -> usize {
        match self {
            ModelPath::Fusion => FUSION_FEATURE_DIM,
            ModelPath::EegOnly => EEG_FEATURE_DIM,
            ModelPath::EcgOnly => CARDIAC_FEATURE_DIM,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ModelPath::Fusion => "fusion",
            ModelPath::EegOnly => "eeg_only",
            ModelPath::EcgOnly => "ecg_only",
        }
    }
}

impl fmt::Display for ModelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// CLASSIFIER BACKEND TRAIT
// ============================================================================

/// The scale-and-classify capability the orchestrator consumes.
///
/// Production uses `ModelRegistry`; tests substitute deterministic
/// fakes.
pub trait ClassifierBackend: Send + Sync {
    fn is_available(&self, path: ModelPath) -> bool;

    /// Scale `features` with the path's transform and classify.
    /// Returns `[p_normal, p_stress]`.
    fn classify(&self, path: ModelPath, features: &[f32]) -> Result<[f32; 2], InferenceError>;
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Loaded model/scaler pairs, one slot per path.
///
/// Built once at startup; immutable afterwards and safe to share
/// across in-flight requests (each classifier serializes its own
/// session internally).
#[derive(Default)]
pub struct ModelRegistry {
    fusion: Option<OnnxClassifier>,
    eeg: Option<OnnxClassifier>,
    ecg: Option<OnnxClassifier>,
}

/// Status report for the service layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryStatus {
    pub models_loaded: bool,
    pub available_models: Vec<ModelPath>,
}

impl ModelRegistry {
    /// Load every path found under `models_dir`.
    ///
    /// Never fails: a path whose artifacts are missing or corrupt is
    /// disabled and logged, and startup continues.
    pub fn load(models_dir: &Path) -> Self {
        log::info!("Loading stress models from {}", models_dir.display());

        let mut registry = Self::default();
        for path in ModelPath::ALL {
            let model_file = models_dir.join(format!("{}_model.onnx", path.file_stem()));
            let scaler_file = models_dir.join(format!("{}_scaler.json", path.file_stem()));

            match OnnxClassifier::load(&model_file, &scaler_file, path.input_dim()) {
                Ok(classifier) => {
                    log::info!("{} model loaded: {}", path, model_file.display());
                    *registry.slot_mut(path) = Some(classifier);
                }
                Err(e) => {
                    log::warn!("{} path disabled: {}", path, e);
                }
            }
        }

        if !registry.is_loaded() {
            log::warn!("fusion model unavailable - registry reports not loaded");
        }
        registry
    }

    /// Load from the configured default models directory
    pub fn load_default() -> Self {
        Self::load(&crate::constants::get_models_dir())
    }

    fn slot(&self, path: ModelPath) -> &Option<OnnxClassifier> {
        match path {
            ModelPath::Fusion => &self.fusion,
            ModelPath::EegOnly => &self.eeg,
            ModelPath::EcgOnly => &self.ecg,
        }
    }

    fn slot_mut(&mut self, path: ModelPath) -> &mut Option<OnnxClassifier> {
        match path {
            ModelPath::Fusion => &mut self.fusion,
            ModelPath::EegOnly => &mut self.eeg,
            ModelPath::EcgOnly => &mut self.ecg,
        }
    }

    /// Whether the registry counts as loaded.
    /// The fusion model is the primary artifact and defines this flag.
    pub fn is_loaded(&self) -> bool {
        self.fusion.is_some()
    }

    /// Every path with a usable classifier, in priority order
    pub fn available_paths(&self) -> Vec<ModelPath> {
        ModelPath::ALL
            .into_iter()
            .filter(|&p| self.is_available(p))
            .collect()
    }

    pub fn status(&self) -> RegistryStatus {
        RegistryStatus {
            models_loaded: self.is_loaded(),
            available_models: self.available_paths(),
        }
    }
}

impl ClassifierBackend for ModelRegistry {
    fn is_available(&self, path: ModelPath) -> bool {
        self.slot(path).is_some()
    }

    fn classify(&self, path: ModelPath, features: &[f32]) -> Result<[f32; 2], InferenceError> {
        self.slot(path)
            .as_ref()
            .ok_or(InferenceError::Unavailable(path))?
            .classify(features)
    }
}

// ============================================================================
// TESTS
// ============================================================================
