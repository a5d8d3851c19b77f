//! Cardiac Feature Extraction
//!
//! Wearable HRV / respiration-rate / heart-rate series -> fixed
//! 72-dimension feature vector (three 24-value blocks). Missing or
//! empty series emit zero blocks; the function cannot fail.

use super::layout::{CARDIAC_FEATURE_DIM, CARDIAC_SERIES_BLOCK};
use super::stats;

/// Successive-difference threshold for the pNN50 statistic, in ms
const PNN50_THRESHOLD_MS: f32 = 50.0;

/// Fourth variability statistic, chosen per series.
///
/// HRV gets pNN50 (the classic beat-to-beat irregularity fraction);
/// RR and HR get the variance of the difference series.
#[derive(Clone, Copy)]
enum VariabilityStat {
    Pnn50,
    DiffVariance,
}

/// Extract the cardiac feature vector from up to three series.
///
/// Block order: HRV (SDNN values in ms), respiration rate
/// (breaths/min), heart rate (BPM).
pub fn extract_cardiac(
    hrv: Option<&[f32]>,
    rr: Option<&[f32]>,
    hr: Option<&[f32]>,
) -> [f32; CARDIAC_FEATURE_DIM] {
    let mut vector = [0.0f32; CARDIAC_FEATURE_DIM];

    let blocks = [
        series_block(hrv, VariabilityStat::Pnn50),
        series_block(rr, VariabilityStat::DiffVariance),
        series_block(hr, VariabilityStat::DiffVariance),
    ];

    for (i, block) in blocks.iter().enumerate() {
        let start = i * CARDIAC_SERIES_BLOCK;
        vector[start..start + CARDIAC_SERIES_BLOCK].copy_from_slice(block);
    }
    vector
}

/// One series' fixed-size block: 8 descriptive statistics, 4
/// first-difference statistics (zeros below 2 samples), zero padding.
fn series_block(series: Option<&[f32]>, variability: VariabilityStat) -> [f32; CARDIAC_SERIES_BLOCK] {
    let mut block = [0.0f32; CARDIAC_SERIES_BLOCK];
    let Some(xs) = series.filter(|xs| !xs.is_empty()) else {
        return block;
    };

    block[0] = stats::mean(xs);
    block[1] = stats::std_dev(xs);
    block[2] = stats::min(xs);
    block[3] = stats::max(xs);
    block[4] = stats::median(xs);
    block[5] = stats::percentile(xs, 25.0);
    block[6] = stats::percentile(xs, 75.0);
    block[7] = stats::peak_to_peak(xs);

    if xs.len() >= 2 {
        let d = stats::diff(xs);
        block[8] = stats::rms(&d);
        block[9] = stats::mean_abs(&d);
        block[10] = stats::std_dev(&d);
        block[11] = match variability {
            VariabilityStat::Pnn50 => {
                let above = d.iter().filter(|v| v.abs() > PNN50_THRESHOLD_MS).count();
                above as f32 / d.len() as f32
            }
            VariabilityStat::DiffVariance => stats::variance(&d),
        };
    }

    block
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_absent_is_zero_vector() {
        let vector = extract_cardiac(None, None, None);
        assert_eq!(vector.len(), CARDIAC_FEATURE_DIM);
        assert!(vector.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_empty_series_equals_absent() {
        let empty: &[f32] = &[];
        assert_eq!(
            extract_cardiac(Some(empty), Some(empty), Some(empty)),
            extract_cardiac(None, None, None)
        );
    }

    #[test]
    fn test_hrv_block_statistics() {
        let hrv = [45.2, 48.1, 42.3, 50.5, 47.8];
        let vector = extract_cardiac(Some(&hrv), None, None);

        assert!((vector[0] - 46.78).abs() < 0.01, "mean");
        assert!((vector[2] - 42.3).abs() < 1e-4, "min");
        assert!((vector[3] - 50.5).abs() < 1e-4, "max");
        assert!((vector[4] - 47.8).abs() < 1e-4, "median");
        assert!((vector[7] - 8.2).abs() < 1e-4, "peak-to-peak");

        // Differences all under 50 ms -> pNN50 is 0
        assert_eq!(vector[11], 0.0, "pNN50");
        // Variability features present
        assert!(vector[8] > 0.0, "rms of diffs");

        // RR and HR blocks untouched
        assert!(vector[CARDIAC_SERIES_BLOCK..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_pnn50_counts_large_jumps() {
        // diffs: 60, -80, 10 -> 2 of 3 above threshold
        let hrv = [10.0, 70.0, -10.0, 0.0];
        let vector = extract_cardiac(Some(&hrv), None, None);
        assert!((vector[11] - 2.0 / 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_rr_uses_diff_variance() {
        let rr = [14.0, 16.0, 12.0];
        let vector = extract_cardiac(None, Some(&rr), None);
        // diffs: 2, -4 -> population variance 9
        let rr_block = &vector[CARDIAC_SERIES_BLOCK..2 * CARDIAC_SERIES_BLOCK];
        assert!((rr_block[11] - 9.0).abs() < 1e-4);
    }

    #[test]
    fn test_single_sample_has_zero_variability() {
        let hr = [72.0];
        let vector = extract_cardiac(None, None, Some(&hr));
        let hr_block = &vector[2 * CARDIAC_SERIES_BLOCK..];

        assert!((hr_block[0] - 72.0).abs() < 1e-4, "mean");
        assert_eq!(hr_block[7], 0.0, "peak-to-peak");
        for i in 8..12 {
            assert_eq!(hr_block[i], 0.0, "variability slot {}", i);
        }
    }

    #[test]
    fn test_block_padding_is_zero() {
        let hrv = [45.0, 50.0, 40.0];
        let vector = extract_cardiac(Some(&hrv), None, None);
        assert!(vector[12..CARDIAC_SERIES_BLOCK].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_determinism() {
        let hrv = [45.2, 48.1, 42.3];
        let rr = [14.5, 15.2];
        let hr = [72.0, 75.0, 71.0];
        assert_eq!(
            extract_cardiac(Some(&hrv), Some(&rr), Some(&hr)),
            extract_cardiac(Some(&hrv), Some(&rr), Some(&hr))
        );
    }
}
