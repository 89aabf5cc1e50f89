// Spectral module - Frequency-domain feature extraction
//
// Pure functions over a magnitude spectrogram. Per-frame values are averaged
// across frames; frames with no magnitude contribute zero instead of NaN.
//
// References:
// - Peeters, G. (2004). A large set of audio features for sound description
// - Lerch, A. (2012). An Introduction to Audio Content Analysis

use super::fft::Spectrogram;

/// Spectral rolloff threshold (85% of spectral energy)
pub const ROLLOFF_THRESHOLD: f32 = 0.85;

const EPSILON: f32 = 1e-10;

fn mean(values: impl ExactSizeIterator<Item = f32>) -> f32 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    values.sum::<f32>() / n as f32
}

/// Centroid of one magnitude spectrum in Hz, 0.0 for a silent frame
///
/// Formula: centroid = Σ(f_i × |X[i]|) / Σ|X[i]|
pub fn frame_centroid(frame: &[f32], frequencies: &[f32]) -> f32 {
    let magnitude_sum: f32 = frame.iter().sum();
    if magnitude_sum <= EPSILON {
        return 0.0;
    }
    let weighted_sum: f32 = frame
        .iter()
        .zip(frequencies)
        .map(|(&mag, &freq)| freq * mag)
        .sum();
    weighted_sum / magnitude_sum
}

/// Compute spectral centroid (weighted mean frequency)
///
/// The spectral centroid represents the "center of mass" of the spectrum,
/// and is a measure of the brightness of a sound.
///
/// # Returns
/// Mean per-frame centroid in Hz
pub fn spectral_centroid(spec: &Spectrogram) -> f32 {
    let frequencies = spec.frequencies();
    mean(
        spec.frames()
            .iter()
            .map(|frame| frame_centroid(frame, &frequencies)),
    )
}

/// Compute spectral rolloff (85% energy threshold frequency)
///
/// Finds, per frame, the lowest bin whose cumulative energy reaches
/// `threshold` of the frame total. Silent frames report the top bin.
///
/// # Returns
/// Mean per-frame rolloff frequency in Hz
pub fn spectral_rolloff(spec: &Spectrogram, threshold: f32) -> f32 {
    let top_bin = spec.n_bins().saturating_sub(1);
    mean(spec.frames().iter().map(|frame| {
        let total_energy: f32 = frame.iter().map(|&mag| mag * mag).sum();
        if total_energy <= EPSILON * EPSILON {
            return spec.bin_frequency(top_bin);
        }

        let target = threshold * total_energy;
        let mut cumulative_energy = 0.0;
        for (i, &mag) in frame.iter().enumerate() {
            cumulative_energy += mag * mag;
            if cumulative_energy >= target {
                return spec.bin_frequency(i);
            }
        }
        spec.bin_frequency(top_bin)
    }))
}

/// Compute spectral bandwidth around a given centroid
///
/// Per frame: variance = Σ|X[i]|(f_i - centroid)² / Σ|X[i]|.
/// Frames are combined by averaging the variances before the square root.
///
/// # Returns
/// Bandwidth in Hz
pub fn spectral_bandwidth(spec: &Spectrogram, centroid: f32) -> f32 {
    let frequencies = spec.frequencies();
    let mean_variance = mean(spec.frames().iter().map(|frame| {
        let magnitude_sum: f32 = frame.iter().sum();
        if magnitude_sum <= EPSILON {
            return 0.0;
        }
        let weighted_deviation: f32 = frame
            .iter()
            .zip(&frequencies)
            .map(|(&mag, &freq)| mag * (freq - centroid).powi(2))
            .sum();
        weighted_deviation / magnitude_sum
    }));
    mean_variance.max(0.0).sqrt()
}

/// Mean squared magnitude over every bin of every frame
pub fn spectral_energy(spec: &Spectrogram) -> f32 {
    let count = spec.n_frames() * spec.n_bins();
    if count == 0 {
        return 0.0;
    }
    let total: f32 = spec
        .frames()
        .iter()
        .flat_map(|frame| frame.iter())
        .map(|&mag| mag * mag)
        .sum();
    total / count as f32
}
