//! Inference Orchestrator
//!
//! Picks a strategy from available modalities and loaded models, in
//! strict priority order: fusion > eeg_only > ecg_only > heuristic.
//! Every call is stateless; classifier failures surface as error
//! values, never as panics or propagated faults.

use chrono::Utc;

use crate::logic::features::layout::FUSION_FEATURE_DIM;
use crate::logic::features::{extract_cardiac, extract_eeg};
use crate::logic::model::{ClassifierBackend, ModelPath};

use super::types::{
    series_present, DataSources, EegRecording, HeadsetMetrics, ModelKind, PredictionError,
    PredictionResult, SensorReadings, StressClass,
};

/// Fixed confidence for the heuristic path - lower than model-derived
/// confidence, reflecting the weaker signal.
const HEURISTIC_CONFIDENCE: f32 = 70.0;

/// The stress inference pipeline over an injected classifier backend.
pub struct StressPredictor<B> {
    backend: B,
}

impl<B: ClassifierBackend> StressPredictor<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Predict stress from whatever sensor data is available.
    ///
    /// Strategy selection, first match wins:
    /// 1. fusion     - usable EEG + usable cardiac + fusion model
    /// 2. eeg_only   - usable EEG + EEG model
    /// 3. ecg_only   - usable cardiac + ECG model
    /// 4. heuristic  - headset summary metrics supplied
    /// 5. otherwise  - `NoUsableData`
    pub fn predict_stress(
        &self,
        input: &SensorReadings,
    ) -> Result<PredictionResult, PredictionError> {
        let eeg_recording = input.eeg.as_ref().filter(|r| !r.channels.is_empty());
        let has_cardiac = input.has_cardiac();

        if let Some(recording) = eeg_recording {
            if has_cardiac && self.backend.is_available(ModelPath::Fusion) {
                return self.predict_fusion(recording, input);
            }
            if self.backend.is_available(ModelPath::EegOnly) {
                return self.predict_eeg_only(recording);
            }
        }
        if has_cardiac && self.backend.is_available(ModelPath::EcgOnly) {
            return self.predict_ecg_only(input);
        }
        if let Some(metrics) = &input.metrics {
            return Ok(heuristic_prediction(metrics));
        }

        Err(PredictionError::NoUsableData)
    }

    /// Fusion model over the concatenated EEG + cardiac vector
    fn predict_fusion(
        &self,
        recording: &EegRecording,
        input: &SensorReadings,
    ) -> Result<PredictionResult, PredictionError> {
        let eeg = extract_eeg(&recording.channels, recording.sampling_rate);
        let cardiac = extract_cardiac(input.hrv_slice(), input.rr_slice(), input.hr_slice());

        let mut fusion = Vec::with_capacity(FUSION_FEATURE_DIM);
        fusion.extend_from_slice(&eeg);
        fusion.extend_from_slice(&cardiac);

        let probs = self.backend.classify(ModelPath::Fusion, &fusion)?;
        Ok(build_result(
            probs,
            ModelKind::Fusion,
            DataSources {
                eeg: true,
                hrv: true,
                rr: true,
                hr: input.hr.is_some(),
            },
        ))
    }

    fn predict_eeg_only(
        &self,
        recording: &EegRecording,
    ) -> Result<PredictionResult, PredictionError> {
        let eeg = extract_eeg(&recording.channels, recording.sampling_rate);

        let probs = self.backend.classify(ModelPath::EegOnly, &eeg)?;
        Ok(build_result(
            probs,
            ModelKind::EegOnly,
            DataSources {
                eeg: true,
                ..DataSources::default()
            },
        ))
    }

    fn predict_ecg_only(
        &self,
        input: &SensorReadings,
    ) -> Result<PredictionResult, PredictionError> {
        let cardiac = extract_cardiac(input.hrv_slice(), input.rr_slice(), input.hr_slice());

        let probs = self.backend.classify(ModelPath::EcgOnly, &cardiac)?;
        Ok(build_result(
            probs,
            ModelKind::EcgOnly,
            DataSources {
                eeg: false,
                hrv: series_present(&input.hrv),
                rr: series_present(&input.rr),
                hr: series_present(&input.hr),
            },
        ))
    }
}

/// Derive the result record from a 2-class probability distribution.
///
/// `stress_level` tracks p(stress) regardless of which class won the
/// argmax; `confidence` tracks the winning class. See
/// `PredictionResult` for why the two diverge.
fn build_result(probs: [f32; 2], model_used: ModelKind, data_sources: DataSources) -> PredictionResult {
    let [p_normal, p_stress] = probs;
    let (stress_class, p_top) = if p_stress > p_normal {
        (StressClass::Stress, p_stress)
    } else {
        (StressClass::Normal, p_normal)
    };

    PredictionResult {
        stress_level: (p_stress * 100.0).clamp(0.0, 100.0) as u8,
        stress_class,
        confidence: round1((p_top * 100.0).clamp(0.0, 100.0)),
        model_used,
        data_sources,
        timestamp: Utc::now(),
    }
}

/// Heuristic fallback from headset summary metrics. Bypasses trained
/// models entirely; a missing metric defaults to the 0.5 midpoint.
fn heuristic_prediction(metrics: &HeadsetMetrics) -> PredictionResult {
    let stress = metrics.stress.unwrap_or(0.5);
    let relaxation = metrics.relaxation.unwrap_or(0.5);

    let level = (stress * 0.7 + (1.0 - relaxation) * 0.3) * 100.0;
    let stress_class = if level > 50.0 {
        StressClass::Stress
    } else {
        StressClass::Normal
    };

    PredictionResult {
        stress_level: level.clamp(0.0, 100.0) as u8,
        stress_class,
        confidence: HEURISTIC_CONFIDENCE,
        model_used: ModelKind::Heuristic,
        data_sources: DataSources::default(),
        timestamp: Utc::now(),
    }
}

fn round1(x: f32) -> f32 {
    (x * 10.0).round() / 10.0
}
