// FFT module - Short-time Fourier transform
//
// This module frames the input clip, applies a Hann window to reduce spectral
// leakage and computes one magnitude spectrum per frame. Frames are centred:
// the clip is zero-padded by half a frame on both ends and the tail is padded
// to a whole hop, so every sample lands in at least one full frame.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

use crate::config::{validate_sample_rate, MIN_FFT_SIZE};
use crate::error::ConfigError;

/// Default FFT window size for feature extraction
pub const FFT_SIZE: usize = 1024;

/// Default hop between consecutive frames
pub const HOP_LENGTH: usize = 512;

/// Magnitude spectrogram, stored frame by frame
///
/// `magnitude(bin, frame)` gives the [frequency bin, time frame] view.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrogram {
    frames: Vec<Vec<f32>>,
    n_bins: usize,
    bin_width_hz: f32,
}

impl Spectrogram {
    pub fn new(frames: Vec<Vec<f32>>, n_bins: usize, bin_width_hz: f32) -> Self {
        Self {
            frames,
            n_bins,
            bin_width_hz,
        }
    }

    pub fn n_bins(&self) -> usize {
        self.n_bins
    }

    pub fn n_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[Vec<f32>] {
        &self.frames
    }

    pub fn magnitude(&self, bin: usize, frame: usize) -> f32 {
        self.frames[frame][bin]
    }

    /// Centre frequency of a bin in Hz
    pub fn bin_frequency(&self, bin: usize) -> f32 {
        bin as f32 * self.bin_width_hz
    }

    /// Centre frequencies of all bins in Hz
    pub fn frequencies(&self) -> Vec<f32> {
        (0..self.n_bins).map(|bin| self.bin_frequency(bin)).collect()
    }
}

/// STFT processor with a pre-planned forward FFT and pre-computed window
pub struct StftProcessor {
    fft: Arc<dyn Fft<f32>>,
    fft_size: usize,
    hop_length: usize,
    sample_rate: u32,
    /// Hann window for FFT (pre-computed)
    window: Vec<f32>,
    /// 1 / Σwindow, so a full-scale sine peaks near 0.5
    scale: f32,
}

impl StftProcessor {
    /// Create a new STFT processor
    ///
    /// # Arguments
    /// * `sample_rate` - Audio sample rate in Hz
    /// * `fft_size` - FFT window size (power of two, at least 64)
    /// * `hop_length` - Samples between frame starts (1..=fft_size)
    pub fn new(sample_rate: u32, fft_size: usize, hop_length: usize) -> Result<Self, ConfigError> {
        validate_sample_rate(sample_rate)?;
        if !fft_size.is_power_of_two() || fft_size < MIN_FFT_SIZE {
            return Err(ConfigError::FftSizeNotPowerOfTwo { fft_size });
        }
        if hop_length == 0 || hop_length > fft_size {
            return Err(ConfigError::InvalidHopLength {
                hop_length,
                fft_size,
            });
        }

        let window: Vec<f32> = (0..fft_size)
            .map(|i| {
                0.5 * (1.0 - ((2.0 * std::f32::consts::PI * i as f32) / fft_size as f32).cos())
            })
            .collect();
        let window_sum: f32 = window.iter().sum();
        let scale = if window_sum > 0.0 { 1.0 / window_sum } else { 0.0 };

        let fft = FftPlanner::new().plan_fft_forward(fft_size);

        Ok(Self {
            fft,
            fft_size,
            hop_length,
            sample_rate,
            window,
            scale,
        })
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    pub fn hop_length(&self) -> usize {
        self.hop_length
    }

    /// Number of non-negative frequency bins per frame
    pub fn n_bins(&self) -> usize {
        self.fft_size / 2 + 1
    }

    pub fn bin_width_hz(&self) -> f32 {
        self.sample_rate as f32 / self.fft_size as f32
    }

    /// Zero-pad a clip into centred, hop-aligned analysis layout
    fn pad_for_framing(&self, audio: &[f32]) -> Vec<f32> {
        let half = self.fft_size / 2;
        let body = audio.len().max(self.fft_size);
        let mut padded = Vec::with_capacity(body + self.fft_size + self.hop_length);
        padded.resize(half, 0.0);
        padded.extend_from_slice(audio);
        padded.resize(half + body + half, 0.0);

        let remainder = (padded.len() - self.fft_size) % self.hop_length;
        if remainder != 0 {
            let target = padded.len() + self.hop_length - remainder;
            padded.resize(target, 0.0);
        }
        padded
    }

    /// Compute the magnitude spectrum of one windowed frame
    ///
    /// # Arguments
    /// * `frame` - Exactly `fft_size` samples
    ///
    /// # Returns
    /// Magnitude spectrum (size = fft_size / 2 + 1)
    fn frame_magnitudes(&self, frame: &[f32], buffer: &mut Vec<Complex<f32>>) -> Vec<f32> {
        buffer.clear();
        buffer.extend(
            frame
                .iter()
                .zip(self.window.iter())
                .map(|(sample, w)| Complex::new(sample * w, 0.0)),
        );
        self.fft.process(buffer);

        buffer[..self.n_bins()]
            .iter()
            .map(|c| c.norm() * self.scale)
            .collect()
    }

    /// Compute the magnitude spectrogram of a clip
    ///
    /// Clips shorter than one frame are zero-padded, so the result always has
    /// at least one frame.
    pub fn compute(&self, audio: &[f32]) -> Spectrogram {
        let padded = self.pad_for_framing(audio);
        let n_frames = 1 + (padded.len() - self.fft_size) / self.hop_length;

        let mut buffer = Vec::with_capacity(self.fft_size);
        let frames = (0..n_frames)
            .map(|f| {
                let start = f * self.hop_length;
                self.frame_magnitudes(&padded[start..start + self.fft_size], &mut buffer)
            })
            .collect();

        Spectrogram::new(frames, self.n_bins(), self.bin_width_hz())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(sample_rate: u32, frequency: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| (2.0 * std::f32::consts::PI * frequency * i as f32 / sample_rate as f32).sin())
            .collect()
    }

    #[test]
    fn test_rejects_invalid_geometry() {
        assert!(matches!(
            StftProcessor::new(16_000, FFT_SIZE, 0),
            Err(ConfigError::InvalidHopLength { hop_length: 0, .. })
        ));
        assert!(matches!(
            StftProcessor::new(16_000, FFT_SIZE, FFT_SIZE + 1),
            Err(ConfigError::InvalidHopLength { .. })
        ));
        assert!(matches!(
            StftProcessor::new(16_000, 1000, HOP_LENGTH),
            Err(ConfigError::FftSizeNotPowerOfTwo { fft_size: 1000 })
        ));
        assert!(matches!(
            StftProcessor::new(0, FFT_SIZE, HOP_LENGTH),
            Err(ConfigError::InvalidSampleRate { sample_rate: 0 })
        ));
    }

    #[test]
    fn test_short_input_yields_full_frames() {
        let stft = StftProcessor::new(16_000, FFT_SIZE, HOP_LENGTH).unwrap();
        let spec = stft.compute(&[0.5; 100]);
        assert_eq!(spec.n_bins(), FFT_SIZE / 2 + 1);
        assert_eq!(spec.n_frames(), 3);
        assert!(spec.frames().iter().all(|f| f.len() == spec.n_bins()));
    }

    #[test]
    fn test_empty_input_is_silent() {
        let stft = StftProcessor::new(16_000, FFT_SIZE, HOP_LENGTH).unwrap();
        let spec = stft.compute(&[]);
        assert!(spec.n_frames() >= 1);
        assert!(spec.frames().iter().flatten().all(|&m| m == 0.0));
    }

    #[test]
    fn test_frame_count_for_one_second() {
        let stft = StftProcessor::new(16_000, FFT_SIZE, HOP_LENGTH).unwrap();
        let spec = stft.compute(&vec![0.0; 16_000]);
        assert_eq!(spec.n_frames(), 33);
    }

    #[test]
    fn test_sine_peak_bin_and_scale() {
        let sample_rate = 16_000;
        let stft = StftProcessor::new(sample_rate, FFT_SIZE, HOP_LENGTH).unwrap();
        // 1000 Hz falls exactly on bin 64 at 15.625 Hz per bin
        let spec = stft.compute(&sine(sample_rate, 1000.0, 8_000));
        let mid = spec.n_frames() / 2;
        let (peak_bin, peak) = (0..spec.n_bins())
            .map(|b| (b, spec.magnitude(b, mid)))
            .fold((0, 0.0f32), |acc, x| if x.1 > acc.1 { x } else { acc });

        assert_eq!(peak_bin, 64);
        assert!((peak - 0.5).abs() < 0.02, "peak magnitude {}", peak);
        assert!((spec.bin_frequency(peak_bin) - 1000.0).abs() < 1e-3);
    }
}
