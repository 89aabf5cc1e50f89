// Types module - Data structures for audio input and extracted features
//
// This module defines the core data structures used throughout the feature
// extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::config::validate_sample_rate;
use crate::error::ConfigError;

/// Number of cepstral coefficients kept per feature vector
pub const N_MFCC: usize = 13;

/// Number of tempo descriptors per feature vector
pub const N_TEMPO: usize = 4;

/// Borrowed mono PCM clip handed to the recognizer
///
/// Samples are expected to be normalized to roughly [-1, 1]. The caller owns
/// the sample storage; the pipeline only reads it.
#[derive(Debug, Clone, Copy)]
pub struct AudioBuffer<'a> {
    samples: &'a [f32],
    sample_rate: u32,
}

impl<'a> AudioBuffer<'a> {
    /// Wrap caller-owned samples, rejecting unusable sample rates
    pub fn new(samples: &'a [f32], sample_rate: u32) -> Result<Self, ConfigError> {
        validate_sample_rate(sample_rate)?;
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    pub fn samples(&self) -> &'a [f32] {
        self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Clip length in seconds
    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// Onset-strength statistics describing the rhythmic content of a clip
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TempoFeatures {
    /// Mean spectral flux between consecutive frames
    pub onset_mean: f32,
    /// Population standard deviation of the spectral flux
    pub onset_std: f32,
    /// Largest spectral flux value
    pub onset_max: f32,
    /// Normalized first autocorrelation peak of the flux (0.0 to 1.0)
    pub periodicity: f32,
}

impl TempoFeatures {
    /// Descriptors in fixed order: mean, std, max, periodicity
    pub fn as_array(&self) -> [f32; N_TEMPO] {
        [
            self.onset_mean,
            self.onset_std,
            self.onset_max,
            self.periodicity,
        ]
    }
}

/// Features extracted from one clip
///
/// These features drive template matching for the percussive pattern classes
/// (kick, snare, hi-hat, bass, vocal). The cepstral and tempo parts always have
/// their full length, even for silent or too-short input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Spectral centroid in Hz (weighted mean frequency)
    ///
    /// Measures the "brightness" of the sound. Higher values indicate
    /// more high-frequency content.
    pub spectral_centroid: f32,

    /// Spectral rolloff in Hz (85% energy threshold)
    pub spectral_rolloff: f32,

    /// Spectral bandwidth in Hz (magnitude-weighted spread around the centroid)
    pub spectral_bandwidth: f32,

    /// Zero-crossing rate (0.0 to 1.0, normalized)
    ///
    /// Measures how often the signal crosses zero. Higher values indicate
    /// more noise-like or high-frequency content.
    pub zero_crossing_rate: f32,

    /// Mel-frequency cepstral coefficients averaged over time
    pub mfcc: [f32; N_MFCC],

    /// Mean squared magnitude over the whole spectrogram
    pub energy: f32,

    /// Rhythm descriptors derived from spectral flux
    pub tempo: TempoFeatures,
}
