//! Configuration management for the recognition pipeline
//!
//! This module provides runtime configuration loading from JSON files so the
//! analysis frame geometry and engine defaults can be adjusted without
//! recompilation. Values are validated before any DSP state is built.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::analysis::features::N_MFCC;
use crate::error::{log_config_error, ConfigError};

/// Highest sample rate the extractor accepts
pub const MAX_SAMPLE_RATE: u32 = 192_000;

/// Smallest FFT size the extractor accepts
pub const MIN_FFT_SIZE: usize = 64;

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

/// STFT and filter bank geometry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    /// FFT frame length in samples (power of two)
    pub fft_size: usize,
    /// Hop between consecutive frames in samples
    pub hop_length: usize,
    /// Number of triangular mel filters
    pub n_mels: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            fft_size: 1024,
            hop_length: 512,
            n_mels: 26,
        }
    }
}

impl AnalysisConfig {
    /// Check frame geometry and filter bank size
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fft_size.is_power_of_two() || self.fft_size < MIN_FFT_SIZE {
            return Err(ConfigError::FftSizeNotPowerOfTwo {
                fft_size: self.fft_size,
            });
        }
        if self.hop_length == 0 || self.hop_length > self.fft_size {
            return Err(ConfigError::InvalidHopLength {
                hop_length: self.hop_length,
                fft_size: self.fft_size,
            });
        }
        if self.n_mels < N_MFCC {
            return Err(ConfigError::TooFewMelBands {
                n_mels: self.n_mels,
                required: N_MFCC,
            });
        }
        Ok(())
    }
}

/// Recognition engine defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Sample rate the engine is built for (voice-assistant hardware default)
    pub sample_rate: u32,
    /// Style preference applied by `start` when the caller passes none
    pub default_style: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 16_000,
            default_style: "freestyle".to_string(),
        }
    }
}

/// Check that a sample rate is usable for analysis
pub fn validate_sample_rate(sample_rate: u32) -> Result<(), ConfigError> {
    if sample_rate == 0 || sample_rate > MAX_SAMPLE_RATE {
        return Err(ConfigError::InvalidSampleRate { sample_rate });
    }
    Ok(())
}

impl AppConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_sample_rate(self.engine.sample_rate)?;
        self.analysis.validate()
    }

    /// Load and validate configuration from a JSON file, surfacing failures
    pub fn try_load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(&path)?;
        let config: AppConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
        Ok(config)
    }

    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// Loaded configuration, or the defaults if the file is missing, malformed,
    /// or fails validation
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match Self::try_load_from_file(&path) {
            Ok(config) => config,
            Err(err) => {
                log_config_error(&err, "AppConfig::load_from_file");
                log::warn!(
                    "[Config] Failed to load config from {:?}. Using defaults.",
                    path.as_ref()
                );
                Self::default()
            }
        }
    }
}
