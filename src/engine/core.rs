//! RecognitionEngine: single-owner recognizer state machine.
//!
//! The engine sequences feature extraction, template classification, quality
//! scoring and suggestion generation for each clip, then folds the result
//! into its rolling history and cumulative statistics. It is not internally
//! synchronized; share it through [`crate::engine::EngineHandle`].

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::analysis::classifier::{estimate_tempo, BeatboxPattern, TinyClassifier};
use crate::analysis::features::{AudioBuffer, FeatureExtractor};
use crate::analysis::templates::BeatboxStyle;
use crate::config::AppConfig;
use crate::engine::stats::{PerformanceReport, PerformanceStats, RecognitionHistory, SystemStatus};
use crate::engine::suggestions::{enhancement_suggestions, quality_score};
use crate::error::ConfigError;

/// Observable engine state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineState {
    Idle,
    Listening,
}

/// Output of one `recognize` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionResult {
    /// Up to three matches, highest confidence first
    pub patterns: Vec<BeatboxPattern>,
    /// Mean pattern confidence, 0 when nothing matched
    pub overall_confidence: f32,
    pub processing_time_ms: f64,
    /// Coarse tempo estimate, see [`estimate_tempo`]
    pub bpm_detected: f32,
    pub primary_style: BeatboxStyle,
    pub quality_score: f32,
    pub enhancement_suggestions: Vec<String>,
}

/// Beatbox recognizer with rolling performance bookkeeping
pub struct RecognitionEngine {
    config: AppConfig,
    extractor: FeatureExtractor,
    classifier: TinyClassifier,
    state: EngineState,
    style_preference: Option<BeatboxStyle>,
    history: RecognitionHistory,
    stats: PerformanceStats,
    processed_secs: f64,
}

impl RecognitionEngine {
    /// Build an engine from a validated configuration
    pub fn new(config: AppConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let extractor = FeatureExtractor::with_config(config.engine.sample_rate, &config.analysis)?;

        info!(
            sample_rate = config.engine.sample_rate,
            fft_size = config.analysis.fft_size,
            hop_length = config.analysis.hop_length,
            "recognition engine created"
        );

        Ok(Self {
            config,
            extractor,
            classifier: TinyClassifier::new(),
            state: EngineState::Idle,
            style_preference: None,
            history: RecognitionHistory::default(),
            stats: PerformanceStats::default(),
            processed_secs: 0.0,
        })
    }

    /// Default configuration at the given sample rate
    pub fn with_sample_rate(sample_rate: u32) -> Result<Self, ConfigError> {
        let mut config = AppConfig::default();
        config.engine.sample_rate = sample_rate;
        Self::new(config)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }

    pub fn classifier(&self) -> &TinyClassifier {
        &self.classifier
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_listening(&self) -> bool {
        self.state == EngineState::Listening
    }

    pub fn style_preference(&self) -> Option<BeatboxStyle> {
        self.style_preference
    }

    pub fn history(&self) -> &RecognitionHistory {
        &self.history
    }

    pub fn stats(&self) -> &PerformanceStats {
        &self.stats
    }

    /// Start listening with a style preference; always succeeds
    ///
    /// An empty string selects the configured default style. Unknown names
    /// are logged and treated as freestyle, which clears the preference.
    pub fn start(&mut self, style: &str) -> bool {
        let requested = if style.trim().is_empty() {
            self.config.engine.default_style.as_str()
        } else {
            style
        };

        let parsed = match requested.parse::<BeatboxStyle>() {
            Ok(style) => style,
            Err(err) => {
                warn!(error = %err, "unknown style preference, using freestyle");
                BeatboxStyle::Freestyle
            }
        };

        self.style_preference = match parsed {
            BeatboxStyle::Freestyle => None,
            other => Some(other),
        };
        self.state = EngineState::Listening;

        info!(style = %parsed, "recognition started");
        true
    }

    /// Stop listening; the style preference is kept until the next start
    pub fn stop(&mut self) {
        if self.state == EngineState::Listening {
            info!(
                total_recognitions = self.stats.total_recognitions,
                "recognition stopped"
            );
        }
        self.state = EngineState::Idle;
    }

    /// Validate raw samples and recognize them
    pub fn recognize_samples(
        &mut self,
        samples: &[f32],
        sample_rate: u32,
    ) -> Result<RecognitionResult, ConfigError> {
        let buffer = AudioBuffer::new(samples, sample_rate)?;
        Ok(self.recognize(&buffer))
    }

    /// Recognize beatbox patterns in one clip
    ///
    /// Never fails: degenerate input yields an empty pattern list. A clip at
    /// a different sample rate rebuilds the extractor for that rate. When
    /// idle, the engine first starts with the configured default style.
    pub fn recognize(&mut self, buffer: &AudioBuffer<'_>) -> RecognitionResult {
        if self.state == EngineState::Idle {
            debug!("recognize called while idle, starting with the default style");
            self.start("");
        }

        if buffer.sample_rate() != self.extractor.sample_rate() {
            self.rebuild_extractor(buffer.sample_rate());
        }

        let started = Instant::now();

        let features = self.extractor.extract(buffer.samples());
        let mut patterns = self.classifier.classify(&features);

        let duration_secs = buffer.duration_secs();
        let timestamp_secs = self.processed_secs as f32;
        for pattern in &mut patterns {
            pattern.timestamp_secs = timestamp_secs;
            pattern.duration_secs = duration_secs;
        }

        let overall_confidence = if patterns.is_empty() {
            0.0
        } else {
            (patterns.iter().map(|p| p.confidence).sum::<f32>() / patterns.len() as f32)
                .clamp(0.0, 1.0)
        };

        let primary_style = patterns
            .first()
            .map(|p| p.style)
            .or(self.style_preference)
            .unwrap_or(BeatboxStyle::Freestyle);

        let quality_score = quality_score(&features, &patterns);
        let enhancement_suggestions = enhancement_suggestions(&features, &patterns);
        let bpm_detected = estimate_tempo(&features.tempo);

        let processing_time_ms = started.elapsed().as_secs_f64() * 1000.0;

        let result = RecognitionResult {
            patterns,
            overall_confidence,
            processing_time_ms,
            bpm_detected,
            primary_style,
            quality_score,
            enhancement_suggestions,
        };

        debug!(
            patterns = result.patterns.len(),
            confidence = result.overall_confidence,
            style = %result.primary_style,
            latency_ms = result.processing_time_ms,
            "clip recognized"
        );

        self.processed_secs += f64::from(duration_secs);
        self.stats.record(&result);
        self.history.push(result.clone());

        result
    }

    fn rebuild_extractor(&mut self, sample_rate: u32) {
        match FeatureExtractor::with_config(sample_rate, &self.config.analysis) {
            Ok(extractor) => {
                info!(
                    from = self.extractor.sample_rate(),
                    to = sample_rate,
                    "sample rate changed, rebuilding feature extractor"
                );
                self.extractor = extractor;
                self.config.engine.sample_rate = sample_rate;
            }
            Err(err) => {
                warn!(error = %err, "keeping current feature extractor");
            }
        }
    }

    /// Snapshot of statistics, the last five results and current status
    pub fn performance_report(&self) -> PerformanceReport {
        PerformanceReport::build(
            &self.stats,
            &self.history,
            SystemStatus {
                is_listening: self.is_listening(),
                sample_rate: self.extractor.sample_rate(),
                buffer_size: self.history.len(),
            },
        )
    }
}
