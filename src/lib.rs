// Beatbox Recognizer - lightweight beatbox pattern recognition
// STFT features, template matching and rolling performance statistics

// Module declarations
pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod synth;

// Re-exports for convenience
pub use analysis::{
    AudioBuffer, BeatboxPattern, BeatboxStyle, FeatureExtractor, FeatureVector, PatternClass,
    TinyClassifier,
};
pub use config::AppConfig;
pub use engine::{EngineHandle, PerformanceReport, RecognitionEngine, RecognitionResult};
pub use error::{ConfigError, EngineError, ErrorCode};
