//! Welch spectral estimation
//!
//! Power-spectral-density estimate used for the EEG band powers:
//! Hann-windowed segments of `min(256, n)` samples, 50% overlap,
//! per-segment mean removal, one-sided density scaling.

use rustfft::{num_complex::Complex, FftPlanner};

/// Maximum Welch segment length
const MAX_SEGMENT: usize = 256;

/// Compute the one-sided Welch PSD of a signal.
///
/// Returns `(frequencies_hz, psd)`, both of length `nperseg / 2 + 1`
/// where `nperseg = min(256, samples.len())`. Empty input yields empty
/// vectors.
pub fn welch_psd(samples: &[f32], sample_rate: f32) -> (Vec<f32>, Vec<f32>) {
    let n = samples.len();
    if n == 0 || sample_rate <= 0.0 {
        return (Vec::new(), Vec::new());
    }

    let nperseg = n.min(MAX_SEGMENT);
    let step = (nperseg - nperseg / 2).max(1);
    let n_freqs = nperseg / 2 + 1;

    let window = hann_window(nperseg);
    let win_power: f32 = window.iter().map(|w| w * w).sum();
    if win_power <= 0.0 {
        return (Vec::new(), Vec::new());
    }

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(nperseg);
    let mut buffer = vec![Complex::new(0.0f32, 0.0f32); nperseg];
    let mut scratch = vec![Complex::new(0.0f32, 0.0f32); fft.get_inplace_scratch_len()];

    let mut acc = vec![0.0f32; n_freqs];
    let mut segments = 0usize;

    let mut start = 0usize;
    while start + nperseg <= n {
        let seg = &samples[start..start + nperseg];
        let seg_mean: f32 = seg.iter().sum::<f32>() / nperseg as f32;

        for (i, (&s, &w)) in seg.iter().zip(window.iter()).enumerate() {
            buffer[i] = Complex::new((s - seg_mean) * w, 0.0);
        }
        fft.process_with_scratch(&mut buffer, &mut scratch);

        for (k, slot) in acc.iter_mut().enumerate() {
            let c = buffer[k];
            *slot += c.re * c.re + c.im * c.im;
        }

        segments += 1;
        start += step;
    }

    if segments == 0 {
        return (Vec::new(), Vec::new());
    }

    let scale = 1.0 / (sample_rate * win_power * segments as f32);
    let nyquist_bin = if nperseg % 2 == 0 { n_freqs - 1 } else { n_freqs };

    let psd: Vec<f32> = acc
        .iter()
        .enumerate()
        .map(|(k, &p)| {
            let one_sided = if k == 0 || k == nyquist_bin { 1.0 } else { 2.0 };
            p * scale * one_sided
        })
        .collect();

    let freqs: Vec<f32> = (0..n_freqs)
        .map(|k| k as f32 * sample_rate / nperseg as f32)
        .collect();

    (freqs, psd)
}

/// Integrate the PSD over `[low, high]` Hz (band edges inclusive) with
/// the trapezoid rule. Fewer than two bins in the band yields 0.
pub fn band_power(freqs: &[f32], psd: &[f32], low: f32, high: f32) -> f32 {
    let band: Vec<usize> = freqs
        .iter()
        .enumerate()
        .filter(|(_, &f)| f >= low && f <= high)
        .map(|(i, _)| i)
        .collect();

    if band.len() < 2 {
        return 0.0;
    }

    let mut power = 0.0f32;
    for pair in band.windows(2) {
        let (i, j) = (pair[0], pair[1]);
        power += (psd[i] + psd[j]) * 0.5 * (freqs[j] - freqs[i]);
    }
    power
}

/// Generate Hann window coefficients
fn hann_window(size: usize) -> Vec<f32> {
    if size == 1 {
        return vec![1.0];
    }
    (0..size)
        .map(|i| {
            0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / (size - 1) as f32).cos())
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f32, fs: f32, n: usize) -> Vec<f32> {
        (0..n)
            .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / fs).sin())
            .collect()
    }

    #[test]
    fn test_empty_signal() {
        let (freqs, psd) = welch_psd(&[], 128.0);
        assert!(freqs.is_empty());
        assert!(psd.is_empty());
    }

    #[test]
    fn test_psd_length() {
        let signal = sine(10.0, 128.0, 128);
        let (freqs, psd) = welch_psd(&signal, 128.0);
        assert_eq!(freqs.len(), 128 / 2 + 1);
        assert_eq!(psd.len(), freqs.len());
    }

    #[test]
    fn test_alpha_peak_detected() {
        // 10 Hz sine at 128 Hz should put most power in alpha (8-13 Hz)
        let signal = sine(10.0, 128.0, 512);
        let (freqs, psd) = welch_psd(&signal, 128.0);

        let alpha = band_power(&freqs, &psd, 8.0, 13.0);
        let beta = band_power(&freqs, &psd, 13.0, 30.0);
        let delta = band_power(&freqs, &psd, 0.5, 4.0);

        assert!(alpha > 0.0);
        assert!(alpha > beta * 10.0, "alpha {} vs beta {}", alpha, beta);
        assert!(alpha > delta * 10.0, "alpha {} vs delta {}", alpha, delta);
    }

    #[test]
    fn test_band_power_out_of_range_is_zero() {
        let signal = sine(10.0, 128.0, 256);
        let (freqs, psd) = welch_psd(&signal, 128.0);
        // Beyond Nyquist: no bins selected
        assert_eq!(band_power(&freqs, &psd, 70.0, 90.0), 0.0);
    }

    #[test]
    fn test_short_signal_still_estimates() {
        let signal = sine(5.0, 32.0, 32);
        let (freqs, psd) = welch_psd(&signal, 32.0);
        assert_eq!(freqs.len(), 17);
        assert!(psd.iter().all(|p| p.is_finite()));
    }
}
