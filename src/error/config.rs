// Configuration error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Configuration error code constants
///
/// Error code range: 3001-3007
pub struct ConfigErrorCodes;

impl ConfigErrorCodes {
    /// Sample rate is zero or above the supported maximum
    pub const INVALID_SAMPLE_RATE: i32 = 3001;

    /// FFT size is not a power of two (or too small)
    pub const FFT_SIZE_NOT_POWER_OF_TWO: i32 = 3002;

    /// Hop length is zero or larger than the FFT size
    pub const INVALID_HOP_LENGTH: i32 = 3003;

    /// Not enough mel bands to produce the cepstral coefficients
    pub const TOO_FEW_MEL_BANDS: i32 = 3004;

    /// Style name does not match any known style
    pub const UNKNOWN_STYLE: i32 = 3005;

    /// Config file could not be read
    pub const IO: i32 = 3006;

    /// Config file could not be parsed
    pub const PARSE: i32 = 3007;
}

/// Log a configuration error with structured context
///
/// The logging is non-blocking and will not panic on failure.
pub fn log_config_error(err: &ConfigError, context: &str) {
    error!(
        "Config error in {}: code={}, component=AppConfig, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Configuration-related errors
///
/// Raised at construction time only. Analysis itself never fails.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Sample rate must be in 1..=192000 Hz
    InvalidSampleRate { sample_rate: u32 },

    /// FFT size must be a power of two and at least 64
    FftSizeNotPowerOfTwo { fft_size: usize },

    /// Hop length must be in 1..=fft_size
    InvalidHopLength { hop_length: usize, fft_size: usize },

    /// Mel filter bank needs at least as many bands as cepstral coefficients
    TooFewMelBands { n_mels: usize, required: usize },

    /// Style name is not recognized
    UnknownStyle { name: String },

    /// Reading the config file failed
    Io { reason: String },

    /// Parsing the config file failed
    Parse { reason: String },
}

impl ErrorCode for ConfigError {
    fn code(&self) -> i32 {
        match self {
            ConfigError::InvalidSampleRate { .. } => ConfigErrorCodes::INVALID_SAMPLE_RATE,
            ConfigError::FftSizeNotPowerOfTwo { .. } => {
                ConfigErrorCodes::FFT_SIZE_NOT_POWER_OF_TWO
            }
            ConfigError::InvalidHopLength { .. } => ConfigErrorCodes::INVALID_HOP_LENGTH,
            ConfigError::TooFewMelBands { .. } => ConfigErrorCodes::TOO_FEW_MEL_BANDS,
            ConfigError::UnknownStyle { .. } => ConfigErrorCodes::UNKNOWN_STYLE,
            ConfigError::Io { .. } => ConfigErrorCodes::IO,
            ConfigError::Parse { .. } => ConfigErrorCodes::PARSE,
        }
    }

    fn message(&self) -> String {
        match self {
            ConfigError::InvalidSampleRate { sample_rate } => {
                format!("Sample rate must be between 1 and 192000 Hz (got {})", sample_rate)
            }
            ConfigError::FftSizeNotPowerOfTwo { fft_size } => {
                format!("FFT size must be a power of two >= 64 (got {})", fft_size)
            }
            ConfigError::InvalidHopLength {
                hop_length,
                fft_size,
            } => {
                format!(
                    "Hop length must be between 1 and the FFT size {} (got {})",
                    fft_size, hop_length
                )
            }
            ConfigError::TooFewMelBands { n_mels, required } => {
                format!(
                    "Mel filter bank needs at least {} bands (got {})",
                    required, n_mels
                )
            }
            ConfigError::UnknownStyle { name } => format!("Unknown beatbox style: {}", name),
            ConfigError::Io { reason } => format!("Failed to read config: {}", reason),
            ConfigError::Parse { reason } => format!("Failed to parse config: {}", reason),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ConfigError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io {
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_codes() {
        assert_eq!(
            ConfigError::InvalidSampleRate { sample_rate: 0 }.code(),
            ConfigErrorCodes::INVALID_SAMPLE_RATE
        );
        assert_eq!(
            ConfigError::FftSizeNotPowerOfTwo { fft_size: 1000 }.code(),
            ConfigErrorCodes::FFT_SIZE_NOT_POWER_OF_TWO
        );
        assert_eq!(
            ConfigError::InvalidHopLength {
                hop_length: 0,
                fft_size: 1024
            }
            .code(),
            ConfigErrorCodes::INVALID_HOP_LENGTH
        );
        assert_eq!(
            ConfigError::UnknownStyle {
                name: "polka".to_string()
            }
            .code(),
            ConfigErrorCodes::UNKNOWN_STYLE
        );
    }

    #[test]
    fn test_config_error_display_includes_code() {
        let err = ConfigError::FftSizeNotPowerOfTwo { fft_size: 1000 };
        let rendered = err.to_string();
        assert!(rendered.contains("3002"), "got {}", rendered);
        assert!(rendered.contains("1000"), "got {}", rendered);
    }

    #[test]
    fn test_parse_error_conversion() {
        let parse_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: ConfigError = parse_err.into();
        assert_eq!(err.code(), ConfigErrorCodes::PARSE);
    }
}
