// Temporal module - Time-domain and rhythm features
//
// Zero-crossing rate works on the raw samples. Rhythm descriptors come from
// the onset-strength curve: frame-to-frame spectral flux of the spectrogram.
//
// References:
// - Peeters, G. (2004). A large set of audio features for sound description
// - Bello, J. P. et al. (2005). A tutorial on onset detection in music signals

use super::fft::Spectrogram;
use super::types::TempoFeatures;

/// Fewest onset values needed before periodicity is meaningful
pub const MIN_ONSETS_FOR_PERIODICITY: usize = 4;

/// Compute zero-crossing rate (ZCR)
///
/// ZCR measures how often the signal changes sign (crosses zero).
/// High ZCR indicates high-frequency or noise-like content.
/// Low ZCR indicates low-frequency or tonal content.
///
/// # Returns
/// Fraction of adjacent sample pairs that change sign (0.0 to 1.0)
pub fn zero_crossing_rate(audio: &[f32]) -> f32 {
    if audio.len() < 2 {
        return 0.0;
    }

    let crossings = audio
        .windows(2)
        .filter(|pair| (pair[0] < 0.0) != (pair[1] < 0.0))
        .count();

    (crossings as f32 / (audio.len() - 1) as f32).clamp(0.0, 1.0)
}

/// Spectral flux between consecutive frames
///
/// SF(t) = Σ max(0, |X_t[k]| - |X_(t-1)[k]|)
///
/// # Returns
/// One value per frame transition (`n_frames - 1` values)
pub fn onset_strength(spec: &Spectrogram) -> Vec<f32> {
    spec.frames()
        .windows(2)
        .map(|pair| {
            pair[1]
                .iter()
                .zip(pair[0].iter())
                .map(|(curr, prev)| (curr - prev).max(0.0))
                .sum()
        })
        .collect()
}

/// Normalized height of the strongest non-zero-lag autocorrelation peak
///
/// Returns 0.0 for fewer than four onset values or a zero-energy curve.
pub fn periodicity(onsets: &[f32]) -> f32 {
    if onsets.len() < MIN_ONSETS_FOR_PERIODICITY {
        return 0.0;
    }

    let autocorr = |lag: usize| -> f32 {
        onsets
            .iter()
            .zip(onsets[lag..].iter())
            .map(|(a, b)| a * b)
            .sum()
    };

    let zero_lag = autocorr(0);
    if zero_lag <= 0.0 {
        return 0.0;
    }

    let peak = (1..onsets.len()).map(autocorr).fold(0.0f32, f32::max);
    (peak / zero_lag).clamp(0.0, 1.0)
}

/// Summarize an onset-strength curve into the four tempo descriptors
pub fn tempo_features(onsets: &[f32]) -> TempoFeatures {
    if onsets.is_empty() {
        return TempoFeatures::default();
    }

    let n = onsets.len() as f32;
    let onset_mean = onsets.iter().sum::<f32>() / n;
    let variance = onsets
        .iter()
        .map(|&x| (x - onset_mean).powi(2))
        .sum::<f32>()
        / n;
    let onset_max = onsets.iter().copied().fold(0.0f32, f32::max);

    TempoFeatures {
        onset_mean,
        onset_std: variance.sqrt(),
        onset_max,
        periodicity: periodicity(onsets),
    }
}
