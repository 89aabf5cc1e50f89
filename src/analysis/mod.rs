// Analysis module - feature extraction and template classification
//
// Pipeline: FeatureExtractor (STFT + mel bank) → FeatureVector → TinyClassifier
// → ranked BeatboxPatterns with style labels. Everything here is stateless
// after construction; the engine module owns all mutable bookkeeping.

pub mod classifier;
pub mod features;
pub mod templates;

pub use classifier::{BeatboxPattern, TinyClassifier};
pub use features::{AudioBuffer, FeatureExtractor, FeatureVector, TempoFeatures};
pub use templates::{BeatboxStyle, PatternClass, PatternTemplate, StyleProfile};
