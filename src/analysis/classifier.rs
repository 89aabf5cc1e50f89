// Classifier - template-matching beatbox pattern classification
//
// This module scores a feature vector against every pattern template, keeps
// the confident matches and labels each with an overall style.
//
// Template confidence is a weighted sum of four components in [0, 1]:
// 1. Centroid match (0.30): 1.0 inside the range, linear falloff from its midpoint
// 2. Energy match (0.25): energy / threshold, capped at 1.0
// 3. ZCR match (0.20): 1.0 inside the range, linear falloff from its midpoint
// 4. Cepstral similarity (0.25): exp(-Σ(mfcc - signature)²)
//
// Style assignment adds the profile weight of the dominant class, a tempo
// bonus and a complexity bonus; the first profile with the maximum score wins.

use serde::{Deserialize, Serialize};

use crate::analysis::features::{FeatureVector, TempoFeatures};
use crate::analysis::templates::{
    BeatboxStyle, PatternClass, PatternTemplate, StyleProfile, PATTERN_TEMPLATES, STYLE_PROFILES,
};

/// Templates at or below this confidence are dropped
pub const CONFIDENCE_THRESHOLD: f32 = 0.3;

/// Most patterns reported per clip
pub const MAX_PATTERNS: usize = 3;

pub const CENTROID_WEIGHT: f32 = 0.30;
pub const ENERGY_WEIGHT: f32 = 0.25;
pub const ZCR_WEIGHT: f32 = 0.20;
pub const CEPSTRAL_WEIGHT: f32 = 0.25;

/// Style bonus for an estimated tempo inside the profile range
pub const TEMPO_BONUS: f32 = 0.3;

/// Style bonus for complexity at or above the profile threshold
pub const COMPLEXITY_BONUS: f32 = 0.2;

/// Base tempo of the coarse BPM heuristic
pub const BASE_TEMPO_BPM: f32 = 120.0;

/// One scored template match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeatboxPattern {
    /// Matched pattern class
    pub class: PatternClass,
    /// Template confidence (0.0-1.0)
    pub confidence: f32,
    /// Clip start in seconds of audio processed by the engine
    pub timestamp_secs: f32,
    /// Clip duration in seconds
    pub duration_secs: f32,
    /// Template centroid range in Hz
    pub frequency_range: (f32, f32),
    /// Clip energy
    pub intensity: f32,
    /// Style assigned with this class as the dominant pattern
    pub style: BeatboxStyle,
}

/// Score in [0, 1]: 1.0 inside `range`, else linear decay with distance
/// from the range midpoint relative to the midpoint
pub fn range_match(value: f32, range: (f32, f32)) -> f32 {
    let (low, high) = range;
    if (low..=high).contains(&value) {
        return 1.0;
    }
    let center = (low + high) / 2.0;
    if center <= 0.0 {
        return 0.0;
    }
    (1.0 - (value - center).abs() / center).max(0.0)
}

/// Energy / threshold, capped at 1.0
pub fn energy_match(energy: f32, threshold: f32) -> f32 {
    if threshold <= 0.0 {
        return 0.0;
    }
    (energy / threshold).clamp(0.0, 1.0)
}

/// Gaussian-kernel similarity between two cepstral vectors
pub fn cepstral_similarity(a: &[f32], b: &[f32]) -> f32 {
    let distance: f32 = a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum();
    (-distance).exp()
}

/// Weighted template confidence (0.0-1.0)
pub fn template_confidence(features: &FeatureVector, template: &PatternTemplate) -> f32 {
    let centroid_score = range_match(features.spectral_centroid, template.centroid_range);
    let energy_score = energy_match(features.energy, template.energy_threshold);
    let zcr_score = range_match(features.zero_crossing_rate, template.zcr_range);
    let cepstral_score = cepstral_similarity(&features.mfcc, &template.mfcc_signature);

    (centroid_score * CENTROID_WEIGHT
        + energy_score * ENERGY_WEIGHT
        + zcr_score * ZCR_WEIGHT
        + cepstral_score * CEPSTRAL_WEIGHT)
        .clamp(0.0, 1.0)
}

/// Standard deviation of the MFCC vector plus bandwidth in kHz
pub fn complexity(features: &FeatureVector) -> f32 {
    let n = features.mfcc.len() as f32;
    let mean = features.mfcc.iter().sum::<f32>() / n;
    let variance = features
        .mfcc
        .iter()
        .map(|c| (c - mean).powi(2))
        .sum::<f32>()
        / n;
    variance.sqrt() + features.spectral_bandwidth / 1000.0
}

/// Coarse BPM estimate from the periodicity descriptor
///
/// This is an approximation, not a beat tracker: 120 BPM, scaled ×1.2 for
/// strongly periodic onsets (> 0.5) and ×0.8 for weakly periodic ones (< 0.2).
pub fn estimate_tempo(tempo: &TempoFeatures) -> f32 {
    if tempo.periodicity > 0.5 {
        BASE_TEMPO_BPM * 1.2
    } else if tempo.periodicity < 0.2 {
        BASE_TEMPO_BPM * 0.8
    } else {
        BASE_TEMPO_BPM
    }
}

/// TinyClassifier matches feature vectors against static templates
///
/// Holds references to the fixed template and style tables; it has no
/// mutable state and can be shared freely.
pub struct TinyClassifier {
    templates: &'static [PatternTemplate],
    profiles: &'static [StyleProfile],
}

impl Default for TinyClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl TinyClassifier {
    /// Create a classifier over the built-in tables
    pub fn new() -> Self {
        Self {
            templates: &PATTERN_TEMPLATES,
            profiles: &STYLE_PROFILES,
        }
    }

    pub fn templates(&self) -> &[PatternTemplate] {
        self.templates
    }

    /// Confidence of every template, in table order, without thresholding
    pub fn score_templates(&self, features: &FeatureVector) -> Vec<(PatternClass, f32)> {
        self.templates
            .iter()
            .map(|t| (t.class, template_confidence(features, t)))
            .collect()
    }

    /// Classify a feature vector into ranked patterns
    ///
    /// Keeps templates scoring above [`CONFIDENCE_THRESHOLD`], sorted by
    /// descending confidence (table order on ties), at most [`MAX_PATTERNS`].
    /// Timing fields are zero; the engine stamps them.
    pub fn classify(&self, features: &FeatureVector) -> Vec<BeatboxPattern> {
        let mut patterns: Vec<BeatboxPattern> = self
            .templates
            .iter()
            .filter_map(|template| {
                let confidence = template_confidence(features, template);
                (confidence > CONFIDENCE_THRESHOLD).then(|| BeatboxPattern {
                    class: template.class,
                    confidence,
                    timestamp_secs: 0.0,
                    duration_secs: 0.0,
                    frequency_range: template.centroid_range,
                    intensity: features.energy,
                    style: self.classify_style(features, Some(template.class)),
                })
            })
            .collect();

        patterns.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        patterns.truncate(MAX_PATTERNS);
        patterns
    }

    /// Score one style profile for a dominant pattern class
    pub fn style_score(
        &self,
        profile: &StyleProfile,
        features: &FeatureVector,
        dominant: Option<PatternClass>,
    ) -> f32 {
        let mut score = dominant
            .and_then(|class| profile.weight_for(class))
            .unwrap_or(0.0);

        let bpm = estimate_tempo(&features.tempo);
        let (tempo_min, tempo_max) = profile.tempo_range;
        if (tempo_min..=tempo_max).contains(&bpm) {
            score += TEMPO_BONUS;
        }

        if complexity(features) >= profile.complexity_threshold {
            score += COMPLEXITY_BONUS;
        }

        score
    }

    /// Pick the best-scoring style; the earliest profile wins ties
    pub fn classify_style(
        &self,
        features: &FeatureVector,
        dominant: Option<PatternClass>,
    ) -> BeatboxStyle {
        let mut best: Option<(BeatboxStyle, f32)> = None;
        for profile in self.profiles {
            let score = self.style_score(profile, features, dominant);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((profile.style, score)),
            }
        }
        best.map(|(style, _)| style)
            .unwrap_or(BeatboxStyle::Freestyle)
    }
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
