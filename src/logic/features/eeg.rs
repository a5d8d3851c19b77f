//! EEG Feature Extraction
//!
//! Raw per-channel signals -> fixed 513-dimension feature vector.
//!
//! Each canonical channel contributes one 37-value block: 5 time-domain
//! statistics, 2 higher-order moments, 5 band powers, 15 wavelet energy
//! statistics, reserved zero padding. Channels missing from the input
//! emit an all-zero block; the function cannot fail.

use std::collections::HashMap;

use super::layout::{
    BAND_FEATURES, CHANNEL_BLOCK, EEG_BANDS, EEG_CHANNELS, EEG_FEATURE_DIM,
};
use super::{spectral, stats, wavelet};

/// Extract the EEG feature vector from a channel map.
///
/// `channels` maps channel names (e.g. "AF3") to raw sample sequences;
/// unknown keys are ignored, known keys are consumed in the canonical
/// montage order regardless of map order.
pub fn extract_eeg(
    channels: &HashMap<String, Vec<f32>>,
    sampling_rate: u32,
) -> [f32; EEG_FEATURE_DIM] {
    let mut features: Vec<f32> = Vec::with_capacity(EEG_CHANNELS.len() * CHANNEL_BLOCK);

    for name in EEG_CHANNELS {
        match channels.get(name) {
            Some(samples) if !samples.is_empty() => {
                features.extend_from_slice(&channel_block(samples, sampling_rate));
            }
            _ => features.extend(std::iter::repeat(0.0).take(CHANNEL_BLOCK)),
        }
    }

    // 14 blocks overshoot the trained dimension; truncate (or zero-pad,
    // should the montage ever shrink) to exactly 513.
    let mut vector = [0.0f32; EEG_FEATURE_DIM];
    for (slot, &value) in vector.iter_mut().zip(features.iter()) {
        *slot = value;
    }
    vector
}

/// One channel's fixed-size feature block.
fn channel_block(samples: &[f32], sampling_rate: u32) -> [f32; CHANNEL_BLOCK] {
    let mut features: Vec<f32> = Vec::with_capacity(CHANNEL_BLOCK);

    // Time-domain statistics
    features.push(stats::mean(samples));
    features.push(stats::std_dev(samples));
    features.push(stats::min(samples));
    features.push(stats::max(samples));
    features.push(stats::median(samples));

    // Higher-order moments (0 when too few samples)
    features.push(stats::skewness(samples));
    features.push(stats::kurtosis(samples));

    // Band powers need at least one sampling period of data
    if sampling_rate > 0 && samples.len() >= sampling_rate as usize {
        let (freqs, psd) = spectral::welch_psd(samples, sampling_rate as f32);
        for (_, low, high) in EEG_BANDS {
            features.push(spectral::band_power(&freqs, &psd, low, high));
        }
    } else {
        features.extend(std::iter::repeat(0.0).take(BAND_FEATURES));
    }

    // Wavelet energy statistics (fixed length, zero-filled on failure)
    features.extend(wavelet::energy_features(samples));

    let mut block = [0.0f32; CHANNEL_BLOCK];
    for (slot, &value) in block.iter_mut().zip(features.iter()) {
        *slot = value;
    }
    block
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn channel_map(pairs: &[(&str, Vec<f32>)]) -> HashMap<String, Vec<f32>> {
        pairs
            .iter()
            .map(|(name, data)| (name.to_string(), data.clone()))
            .collect()
    }

    #[test]
    fn test_empty_map_is_all_zeros() {
        let vector = extract_eeg(&HashMap::new(), 128);
        assert_eq!(vector.len(), EEG_FEATURE_DIM);
        assert!(vector.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_single_channel_populates_first_block() {
        let channels = channel_map(&[("AF3", vec![1.0, 2.0, 3.0, 4.0])]);
        let vector = extract_eeg(&channels, 128);

        // Time-domain slots of the AF3 block
        assert!((vector[0] - 2.5).abs() < 1e-5, "mean");
        assert!((vector[2] - 1.0).abs() < 1e-5, "min");
        assert!((vector[3] - 4.0).abs() < 1e-5, "max");
        assert!((vector[4] - 2.5).abs() < 1e-5, "median");

        // Too short for band powers (< 128 samples)
        for i in 7..12 {
            assert_eq!(vector[i], 0.0, "band power slot {}", i);
        }

        // Second block (F7) untouched
        assert!(vector[CHANNEL_BLOCK..2 * CHANNEL_BLOCK]
            .iter()
            .all(|&v| v == 0.0));
    }

    #[test]
    fn test_channel_order_is_canonical_not_map_order() {
        // F7 is the second canonical channel regardless of insertion
        let channels = channel_map(&[("F7", vec![5.0, 5.0, 5.0])]);
        let vector = extract_eeg(&channels, 128);

        assert!(vector[..CHANNEL_BLOCK].iter().all(|&v| v == 0.0));
        assert!((vector[CHANNEL_BLOCK] - 5.0).abs() < 1e-5, "F7 mean");
    }

    #[test]
    fn test_unknown_channels_ignored() {
        let channels = channel_map(&[("XY9", vec![1.0, 2.0])]);
        let vector = extract_eeg(&channels, 128);
        assert!(vector.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_long_signal_fills_band_powers() {
        let samples: Vec<f32> = (0..256)
            .map(|i| (2.0 * std::f32::consts::PI * 10.0 * i as f32 / 128.0).sin())
            .collect();
        let channels = channel_map(&[("AF3", samples)]);
        let vector = extract_eeg(&channels, 128);

        // Alpha (slot 9: delta, theta, alpha) dominates for a 10 Hz sine
        let alpha = vector[9];
        assert!(alpha > 0.0);
        assert!(alpha > vector[7], "alpha > delta");
        assert!(alpha > vector[11], "alpha > gamma");
    }

    #[test]
    fn test_full_montage_truncates_to_dim() {
        let pairs: Vec<(&str, Vec<f32>)> = EEG_CHANNELS
            .iter()
            .map(|&name| (name, (0..64).map(|i| i as f32).collect()))
            .collect();
        let vector = extract_eeg(&channel_map(&pairs), 128);
        assert_eq!(vector.len(), EEG_FEATURE_DIM);
        // Last channel's block is cut at the 513 boundary, so the tail
        // still carries data from AF4's leading statistics.
        assert!(vector[13 * CHANNEL_BLOCK] != 0.0);
    }

    #[test]
    fn test_determinism() {
        let channels = channel_map(&[
            ("AF3", (0..200).map(|i| (i as f32 * 0.05).sin()).collect()),
            ("O1", (0..150).map(|i| (i as f32 * 0.2).cos()).collect()),
        ]);
        assert_eq!(extract_eeg(&channels, 128), extract_eeg(&channels, 128));
    }
}
