//! Feature Layout - Centralized Vector Geometry
//!
//! **CRITICAL: This file controls the feature schema**
//!
//! Trained classifiers and persisted vectors depend on this exact
//! layout. Any change to channel order, band edges or block sizes
//! must increment `FEATURE_VERSION`.

use crc32fast::Hasher;

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when the layout changes
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// EEG GEOMETRY (Authoritative source)
// ============================================================================

/// Canonical EEG channel names, in the exact order their blocks appear
/// in the feature vector (14-channel consumer headset montage).
pub const EEG_CHANNELS: [&str; 14] = [
    "AF3", "F7", "F3", "FC5", "T7", "P7", "O1", "O2", "P8", "T8", "FC6", "F4", "F8", "AF4",
];

/// Canonical EEG frequency bands in Hz: (name, low, high)
pub const EEG_BANDS: [(&str, f32, f32); 5] = [
    ("delta", 0.5, 4.0),
    ("theta", 4.0, 8.0),
    ("alpha", 8.0, 13.0),
    ("beta", 13.0, 30.0),
    ("gamma", 30.0, 45.0),
];

/// Time-domain statistics per channel (mean, std, min, max, median)
pub const TIME_DOMAIN_FEATURES: usize = 5;

/// Higher-order moments per channel (skewness, kurtosis)
pub const MOMENT_FEATURES: usize = 2;

/// Band-power features per channel
pub const BAND_FEATURES: usize = EEG_BANDS.len();

/// Wavelet decomposition depth
pub const WAVELET_LEVELS: usize = 4;

/// Coefficient arrays produced by the decomposition (approximation + details)
pub const WAVELET_ARRAYS: usize = WAVELET_LEVELS + 1;

/// Wavelet statistics per channel (3 per coefficient array)
pub const WAVELET_FEATURES: usize = WAVELET_ARRAYS * 3;

/// Values per channel block. The 27 computed features are followed by
/// reserved zero padding so the block size stays fixed if a statistic
/// is added.
pub const CHANNEL_BLOCK: usize = 37;

/// EEG feature vector length. 14 channel blocks (518 values) truncated
/// to the dimension the classifiers were trained on.
pub const EEG_FEATURE_DIM: usize = 513;

// ============================================================================
// CARDIAC GEOMETRY
// ============================================================================

/// Values per cardiac series block (HRV, RR, HR each)
pub const CARDIAC_SERIES_BLOCK: usize = 24;

/// Descriptive statistics per cardiac series
pub const CARDIAC_DESCRIPTIVE_FEATURES: usize = 8;

/// First-difference variability statistics per cardiac series
pub const CARDIAC_VARIABILITY_FEATURES: usize = 4;

/// Cardiac feature vector length (HRV + RR + HR blocks)
pub const CARDIAC_FEATURE_DIM: usize = 3 * CARDIAC_SERIES_BLOCK;

// ============================================================================
// FUSION GEOMETRY
// ============================================================================

/// Fusion vector length: EEG features followed by cardiac features
pub const FUSION_FEATURE_DIM: usize = EEG_FEATURE_DIM + CARDIAC_FEATURE_DIM;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute the CRC32 hash of the layout.
/// Used to detect layout drift between persisted vectors, trained
/// models and the running code.
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);

    for name in EEG_CHANNELS {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }
    for (name, low, high) in EEG_BANDS {
        hasher.update(name.as_bytes());
        hasher.update(&low.to_le_bytes());
        hasher.update(&high.to_le_bytes());
    }
    for dim in [
        CHANNEL_BLOCK,
        EEG_FEATURE_DIM,
        CARDIAC_SERIES_BLOCK,
        CARDIAC_FEATURE_DIM,
    ] {
        hasher.update(&(dim as u32).to_le_bytes());
    }

    hasher.finalize()
}

/// Get the layout hash
pub fn layout_hash() -> u32 {
    compute_layout_hash()
}

/// Check if a persisted layout is compatible (same version, same hash)
pub fn is_layout_compatible(version: u8, hash: u32) -> bool {
    version == FEATURE_VERSION && hash == layout_hash()
}

// ============================================================================
// TESTS
// ============================================================================
