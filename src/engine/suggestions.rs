//! Quality scoring and coaching feedback derived from one recognition.

use crate::analysis::classifier::BeatboxPattern;
use crate::analysis::features::FeatureVector;
use crate::analysis::templates::PatternClass;

/// Bandwidth (Hz) at which spectral richness saturates
pub const RICHNESS_BANDWIDTH_HZ: f32 = 2000.0;

const LOW_CONFIDENCE: f32 = 0.6;
const LOW_ENERGY: f32 = 0.3;
const LOW_ROLLOFF_HZ: f32 = 2000.0;
const LOW_BANDWIDTH_HZ: f32 = 500.0;
const LOW_PERIODICITY: f32 = 0.2;

pub const SUGGEST_DISTINCT: &str = "Try to make your beats more distinct and pronounced";
pub const SUGGEST_VOLUME: &str = "Increase the volume and intensity of your beatbox";
pub const SUGGEST_HIGH_FREQUENCY: &str = "Add more high-frequency elements like hi-hats or snares";
pub const SUGGEST_VARIETY: &str = "Try varying your sounds to add more complexity";
pub const SUGGEST_RHYTHM: &str = "Focus on creating stronger rhythmic patterns";
pub const SUGGEST_ADD_SNARE_OR_HIHAT: &str = "Add snare or hi-hat sounds to complete the rhythm";
pub const SUGGEST_ADD_KICK: &str = "Add bass/kick sounds for a fuller beat";

fn max_confidence(patterns: &[BeatboxPattern]) -> Option<f32> {
    patterns.iter().map(|p| p.confidence).reduce(f32::max)
}

/// Overall performance quality (0.0-1.0)
///
/// 0.4 × clarity (best pattern confidence) + 0.3 × spectral richness
/// + 0.2 × energy + 0.1 × periodicity, each component capped at 1.0.
pub fn quality_score(features: &FeatureVector, patterns: &[BeatboxPattern]) -> f32 {
    let clarity = max_confidence(patterns).unwrap_or(0.0);
    let richness = (features.spectral_bandwidth / RICHNESS_BANDWIDTH_HZ).clamp(0.0, 1.0);
    let energy = features.energy.clamp(0.0, 1.0);
    let rhythm = features.tempo.periodicity.clamp(0.0, 1.0);

    (clarity * 0.4 + richness * 0.3 + energy * 0.2 + rhythm * 0.1).clamp(0.0, 1.0)
}

/// Rule-based suggestions, in a fixed order
pub fn enhancement_suggestions(
    features: &FeatureVector,
    patterns: &[BeatboxPattern],
) -> Vec<String> {
    let mut suggestions = Vec::new();

    if max_confidence(patterns).is_some_and(|c| c < LOW_CONFIDENCE) {
        suggestions.push(SUGGEST_DISTINCT);
    }
    if features.energy < LOW_ENERGY {
        suggestions.push(SUGGEST_VOLUME);
    }
    if features.spectral_rolloff < LOW_ROLLOFF_HZ {
        suggestions.push(SUGGEST_HIGH_FREQUENCY);
    }
    if features.spectral_bandwidth < LOW_BANDWIDTH_HZ {
        suggestions.push(SUGGEST_VARIETY);
    }
    if features.tempo.periodicity < LOW_PERIODICITY {
        suggestions.push(SUGGEST_RHYTHM);
    }

    if let Some(top) = patterns.first() {
        let present = |classes: &[PatternClass]| patterns.iter().any(|p| classes.contains(&p.class));
        match top.class {
            PatternClass::Kick if !present(&[PatternClass::Snare, PatternClass::HiHat]) => {
                suggestions.push(SUGGEST_ADD_SNARE_OR_HIHAT)
            }
            PatternClass::Snare | PatternClass::HiHat if !present(&[PatternClass::Kick]) => {
                suggestions.push(SUGGEST_ADD_KICK)
            }
            _ => {}
        }
    }

    suggestions.into_iter().map(String::from).collect()
}
