// FeatureExtractor - DSP feature extraction for beatbox pattern recognition
//
// This module extracts the compact feature vector used to match a clip against
// the percussive pattern templates (kick, snare, hi-hat, bass, vocal).
//
// Module organization:
// - types: Data structures (AudioBuffer, FeatureVector, TempoFeatures)
// - fft: Short-time Fourier transform with Hann windowing
// - mel: Mel filter bank, built once per sample rate
// - spectral: Frequency-domain features (centroid, rolloff, bandwidth, energy)
// - temporal: Time-domain and rhythm features (ZCR, onset strength, tempo)
// - cepstral: MFCC via log mel energies and DCT-II
// - mod.rs: Coordinator (FeatureExtractor)
//
// Every feature function is a pure function of the spectrogram, the filter
// bank or the raw samples, so each can be tested on its own.

mod cepstral;
mod fft;
mod mel;
mod spectral;
mod temporal;
mod types;

pub use cepstral::{dct_ii_ortho, mfcc, LOG_FLOOR};
pub use fft::{Spectrogram, StftProcessor, FFT_SIZE, HOP_LENGTH};
pub use mel::{hz_to_mel, mel_to_hz, MelFilterBank, N_MELS};
pub use spectral::{
    spectral_bandwidth, spectral_centroid, spectral_energy, spectral_rolloff, ROLLOFF_THRESHOLD,
};
pub use temporal::{onset_strength, periodicity, tempo_features, zero_crossing_rate};
pub use types::{AudioBuffer, FeatureVector, TempoFeatures, N_MFCC, N_TEMPO};

use crate::config::{validate_sample_rate, AnalysisConfig};
use crate::error::ConfigError;

/// FeatureExtractor coordinates the feature extraction pipeline
///
/// Holds the read-only STFT plan and mel filter bank for one sample rate.
/// `extract` takes `&self`, so one extractor can serve many clips.
pub struct FeatureExtractor {
    stft: StftProcessor,
    mel_filters: MelFilterBank,
    sample_rate: u32,
}

impl FeatureExtractor {
    /// Create a FeatureExtractor with the default frame geometry
    ///
    /// # Arguments
    /// * `sample_rate` - Audio sample rate in Hz (e.g., 16000)
    pub fn new(sample_rate: u32) -> Result<Self, ConfigError> {
        Self::with_config(sample_rate, &AnalysisConfig::default())
    }

    /// Create a FeatureExtractor with explicit frame geometry
    pub fn with_config(sample_rate: u32, config: &AnalysisConfig) -> Result<Self, ConfigError> {
        validate_sample_rate(sample_rate)?;
        config.validate()?;

        Ok(Self {
            stft: StftProcessor::new(sample_rate, config.fft_size, config.hop_length)?,
            mel_filters: MelFilterBank::new(sample_rate, config.fft_size, config.n_mels),
            sample_rate,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn mel_filters(&self) -> &MelFilterBank {
        &self.mel_filters
    }

    /// Magnitude spectrogram of a clip
    pub fn spectrogram(&self, audio: &[f32]) -> Spectrogram {
        self.stft.compute(audio)
    }

    /// Extract all features from a clip
    ///
    /// 1. Compute the magnitude spectrogram (short clips are zero-padded)
    /// 2. Extract spectral features from the spectrogram
    /// 3. Extract MFCCs through the mel filter bank
    /// 4. Extract ZCR from the raw samples and tempo features from spectral flux
    ///
    /// # Arguments
    /// * `audio` - Mono samples at the extractor's sample rate
    pub fn extract(&self, audio: &[f32]) -> FeatureVector {
        let spec = self.stft.compute(audio);

        let spectral_centroid = spectral_centroid(&spec);
        let spectral_rolloff = spectral_rolloff(&spec, ROLLOFF_THRESHOLD);
        let spectral_bandwidth = spectral_bandwidth(&spec, spectral_centroid);
        let energy = spectral_energy(&spec);
        let mfcc = mfcc(&spec, &self.mel_filters);

        let zero_crossing_rate = zero_crossing_rate(audio);
        let tempo = tempo_features(&onset_strength(&spec));

        FeatureVector {
            spectral_centroid,
            spectral_rolloff,
            spectral_bandwidth,
            zero_crossing_rate,
            mfcc,
            energy,
            tempo,
        }
    }
}
