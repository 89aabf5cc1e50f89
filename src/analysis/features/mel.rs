// Mel module - Triangular mel-scale filter bank
//
// The filter bank is built once per sample rate. Filter edges are spaced
// evenly on the mel scale between 0 Hz and Nyquist, mapped back to Hz and then
// to the nearest FFT bin.

/// Default number of mel filters
pub const N_MELS: usize = 26;

/// Hz to mel scale conversion
#[inline]
pub fn hz_to_mel(hz: f32) -> f32 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

/// Mel to Hz conversion
#[inline]
pub fn mel_to_hz(mel: f32) -> f32 {
    700.0 * (10.0_f32.powf(mel / 2595.0) - 1.0)
}

/// Mel filter bank: one weight vector over the FFT bins per filter
#[derive(Debug, Clone)]
pub struct MelFilterBank {
    filters: Vec<Vec<f32>>,
}

impl MelFilterBank {
    /// Build the filter bank
    ///
    /// # Arguments
    /// * `sample_rate` - Audio sample rate in Hz
    /// * `fft_size` - FFT window size
    /// * `n_mels` - Number of triangular filters
    pub fn new(sample_rate: u32, fft_size: usize, n_mels: usize) -> Self {
        let n_bins = fft_size / 2 + 1;
        let nyquist = sample_rate as f32 / 2.0;
        let mel_low = hz_to_mel(0.0);
        let mel_high = hz_to_mel(nyquist);

        // n_mels filters need n_mels + 2 edge points
        let edges: Vec<usize> = (0..n_mels + 2)
            .map(|i| {
                let mel = mel_low + (mel_high - mel_low) * i as f32 / (n_mels + 1) as f32;
                let bin = (mel_to_hz(mel) * fft_size as f32 / sample_rate as f32).round() as usize;
                bin.min(n_bins - 1)
            })
            .collect();

        let filters = edges
            .windows(3)
            .map(|w| triangle(w[0], w[1], w[2], n_bins))
            .collect();

        Self { filters }
    }

    pub fn n_mels(&self) -> usize {
        self.filters.len()
    }

    pub fn filters(&self) -> &[Vec<f32>] {
        &self.filters
    }

    /// Project one magnitude spectrum onto the mel bands
    pub fn apply(&self, spectrum: &[f32]) -> Vec<f32> {
        self.filters
            .iter()
            .map(|filter| filter.iter().zip(spectrum).map(|(w, m)| w * m).sum())
            .collect()
    }
}

/// Linear ramp from `left` up to 1.0 at `center`, back down to `right`
fn triangle(left: usize, center: usize, right: usize, n_bins: usize) -> Vec<f32> {
    let mut weights = vec![0.0; n_bins];
    if center > left {
        for (j, w) in weights.iter_mut().enumerate().take(center).skip(left) {
            *w = (j - left) as f32 / (center - left) as f32;
        }
    }
    if right > center {
        for (j, w) in weights.iter_mut().enumerate().take(right).skip(center) {
            *w = (right - j) as f32 / (right - center) as f32;
        }
    }
    weights
}
