//! Multi-level Daubechies-4 wavelet decomposition
//!
//! Pyramidal DWT with symmetric signal extension. The EEG extractor
//! consumes the per-array energy statistics, not the coefficients
//! themselves, so no reconstruction is implemented.

use super::layout::WAVELET_LEVELS;
use super::stats;

/// db4 scaling (low-pass) filter taps
const DB4_LO: [f32; 8] = [
    0.230_377_81,
    0.714_846_57,
    0.630_880_77,
    -0.027_983_77,
    -0.187_034_81,
    0.030_841_38,
    0.032_883_01,
    -0.010_597_40,
];

/// Multi-level decomposition.
///
/// Returns `levels + 1` coefficient arrays ordered
/// `[approximation, detail_N, ..., detail_1]` (coarsest detail first).
/// An empty signal yields no arrays.
pub fn wavedec_db4(signal: &[f32], levels: usize) -> Vec<Vec<f32>> {
    if signal.is_empty() {
        return Vec::new();
    }

    let hi = qmf(&DB4_LO);
    let mut details: Vec<Vec<f32>> = Vec::with_capacity(levels);
    let mut approx = signal.to_vec();

    for _ in 0..levels {
        if approx.is_empty() {
            break;
        }
        let (a, d) = dwt_step(&approx, &DB4_LO, &hi);
        details.push(d);
        approx = a;
    }

    let mut coeffs = Vec::with_capacity(details.len() + 1);
    coeffs.push(approx);
    while let Some(d) = details.pop() {
        coeffs.push(d);
    }
    coeffs
}

/// Energy statistics for the EEG feature block: for each coefficient
/// array, mean absolute value, standard deviation, and sum of squares.
/// Always exactly `(WAVELET_LEVELS + 1) * 3` values; missing arrays
/// (failed or truncated decomposition) contribute zeros.
pub fn energy_features(signal: &[f32]) -> Vec<f32> {
    let coeffs = wavedec_db4(signal, WAVELET_LEVELS);
    let mut features = Vec::with_capacity((WAVELET_LEVELS + 1) * 3);

    for coeff in &coeffs {
        features.push(stats::mean_abs(coeff));
        features.push(stats::std_dev(coeff));
        features.push(stats::energy(coeff));
    }
    features.resize((WAVELET_LEVELS + 1) * 3, 0.0);
    features
}

/// One analysis step: symmetric extension, filter, downsample by 2.
fn dwt_step(signal: &[f32], lo: &[f32; 8], hi: &[f32; 8]) -> (Vec<f32>, Vec<f32>) {
    let n = signal.len();
    let taps = lo.len();
    let out_len = (n + taps - 1) / 2;

    let mut approx = Vec::with_capacity(out_len);
    let mut detail = Vec::with_capacity(out_len);

    for k in 0..out_len {
        let mut a = 0.0f32;
        let mut d = 0.0f32;
        for (j, (&l, &h)) in lo.iter().zip(hi.iter()).enumerate() {
            let idx = 2 * k as isize + j as isize - (taps as isize - 1);
            let x = signal[sym_index(idx, n)];
            a += l * x;
            d += h * x;
        }
        approx.push(a);
        detail.push(d);
    }

    (approx, detail)
}

/// Quadrature mirror of the scaling filter
fn qmf(lo: &[f32; 8]) -> [f32; 8] {
    let mut hi = [0.0f32; 8];
    for (k, slot) in hi.iter_mut().enumerate() {
        let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
        *slot = sign * lo[lo.len() - 1 - k];
    }
    hi
}

/// Half-sample symmetric reflection of an out-of-range index
/// (`... x1 x0 | x0 x1 ... xn-1 | xn-1 xn-2 ...`).
fn sym_index(mut i: isize, n: usize) -> usize {
    let n = n as isize;
    loop {
        if i < 0 {
            i = -i - 1;
        } else if i >= n {
            i = 2 * n - i - 1;
        } else {
            return i as usize;
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
