// Templates - static pattern signatures and style profiles
//
// Hand-authored reference data for the tiny classifier. Pattern templates
// describe the expected feature ranges of each percussive sound class; style
// profiles weight those classes and gate on tempo and complexity.
//
// Both tables are fixed-order arrays. Style ties are broken by the order of
// STYLE_PROFILES, so classification never depends on hash iteration order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::analysis::features::N_MFCC;
use crate::error::ConfigError;

/// Percussive sound classes the classifier can match
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PatternClass {
    /// Kick drum (low centroid, low ZCR)
    Kick,
    /// Snare (mid centroid, noisy)
    Snare,
    /// Hi-hat (high centroid, high ZCR)
    HiHat,
    /// Sustained bass (lowest centroid, highest energy)
    Bass,
    /// Vocal/hum layer (mid-low centroid)
    Vocal,
}

impl PatternClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternClass::Kick => "kick",
            PatternClass::Snare => "snare",
            PatternClass::HiHat => "hihat",
            PatternClass::Bass => "bass",
            PatternClass::Vocal => "vocal",
        }
    }
}

impl fmt::Display for PatternClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall beatbox style labels
///
/// `Freestyle` has no profile; it is the fallback when nothing matched and no
/// preference was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BeatboxStyle {
    Classic,
    Modern,
    Bass,
    Snare,
    Vocal,
    Techno,
    Freestyle,
}

impl BeatboxStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BeatboxStyle::Classic => "classic",
            BeatboxStyle::Modern => "modern",
            BeatboxStyle::Bass => "bass",
            BeatboxStyle::Snare => "snare",
            BeatboxStyle::Vocal => "vocal",
            BeatboxStyle::Techno => "techno",
            BeatboxStyle::Freestyle => "freestyle",
        }
    }
}

impl fmt::Display for BeatboxStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BeatboxStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(BeatboxStyle::Classic),
            "modern" => Ok(BeatboxStyle::Modern),
            "bass" => Ok(BeatboxStyle::Bass),
            "snare" => Ok(BeatboxStyle::Snare),
            "vocal" => Ok(BeatboxStyle::Vocal),
            "techno" => Ok(BeatboxStyle::Techno),
            "freestyle" => Ok(BeatboxStyle::Freestyle),
            _ => Err(ConfigError::UnknownStyle {
                name: s.to_string(),
            }),
        }
    }
}

/// Expected feature signature of one pattern class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternTemplate {
    pub class: PatternClass,
    /// Spectral centroid range in Hz (low, high)
    pub centroid_range: (f32, f32),
    /// Energy at which the energy component saturates
    pub energy_threshold: f32,
    /// Zero-crossing rate range (low, high)
    pub zcr_range: (f32, f32),
    /// Reference MFCC vector
    pub mfcc_signature: [f32; N_MFCC],
}

/// Weighting and gating rules for one style label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleProfile {
    pub style: BeatboxStyle,
    /// Weight added when the dominant pattern is one of these classes
    pub pattern_weights: &'static [(PatternClass, f32)],
    /// Tempo range in BPM (low, high), inclusive
    pub tempo_range: (f32, f32),
    /// Minimum complexity that earns the complexity bonus
    pub complexity_threshold: f32,
}

impl StyleProfile {
    pub fn weight_for(&self, class: PatternClass) -> Option<f32> {
        self.pattern_weights
            .iter()
            .find(|(c, _)| *c == class)
            .map(|&(_, w)| w)
    }
}

/// Reference templates, in scoring order
pub const PATTERN_TEMPLATES: [PatternTemplate; 5] = [
    PatternTemplate {
        class: PatternClass::Kick,
        centroid_range: (50.0, 200.0),
        energy_threshold: 0.7,
        zcr_range: (0.02, 0.15),
        mfcc_signature: [0.5, -0.2, 0.1, -0.1, 0.05, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    },
    PatternTemplate {
        class: PatternClass::Snare,
        centroid_range: (1000.0, 4000.0),
        energy_threshold: 0.6,
        zcr_range: (0.15, 0.4),
        mfcc_signature: [0.3, 0.2, -0.1, 0.15, -0.05, 0.1, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    },
    PatternTemplate {
        class: PatternClass::HiHat,
        centroid_range: (4000.0, 8000.0),
        energy_threshold: 0.3,
        zcr_range: (0.3, 0.7),
        mfcc_signature: [0.1, 0.1, 0.1, 0.05, 0.05, 0.05, 0.05, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    },
    PatternTemplate {
        class: PatternClass::Bass,
        centroid_range: (20.0, 150.0),
        energy_threshold: 0.8,
        zcr_range: (0.01, 0.1),
        mfcc_signature: [0.7, -0.3, 0.2, -0.15, 0.1, -0.05, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    },
    PatternTemplate {
        class: PatternClass::Vocal,
        centroid_range: (200.0, 2000.0),
        energy_threshold: 0.5,
        zcr_range: (0.05, 0.25),
        mfcc_signature: [0.4, 0.1, 0.1, 0.05, 0.05, 0.05, 0.02, 0.02, 0.0, 0.0, 0.0, 0.0, 0.0],
    },
];

/// Style profiles; earlier entries win ties
pub const STYLE_PROFILES: [StyleProfile; 5] = [
    StyleProfile {
        style: BeatboxStyle::Classic,
        pattern_weights: &[
            (PatternClass::Kick, 0.4),
            (PatternClass::Snare, 0.4),
            (PatternClass::HiHat, 0.2),
        ],
        tempo_range: (80.0, 120.0),
        complexity_threshold: 0.3,
    },
    StyleProfile {
        style: BeatboxStyle::Modern,
        pattern_weights: &[
            (PatternClass::Kick, 0.3),
            (PatternClass::Snare, 0.3),
            (PatternClass::HiHat, 0.2),
            (PatternClass::Vocal, 0.2),
        ],
        tempo_range: (100.0, 160.0),
        complexity_threshold: 0.6,
    },
    StyleProfile {
        style: BeatboxStyle::Bass,
        pattern_weights: &[
            (PatternClass::Bass, 0.6),
            (PatternClass::Kick, 0.3),
            (PatternClass::Vocal, 0.1),
        ],
        tempo_range: (60.0, 140.0),
        complexity_threshold: 0.4,
    },
    StyleProfile {
        style: BeatboxStyle::Techno,
        pattern_weights: &[
            (PatternClass::Kick, 0.35),
            (PatternClass::Snare, 0.25),
            (PatternClass::HiHat, 0.4),
        ],
        tempo_range: (120.0, 180.0),
        complexity_threshold: 0.7,
    },
    StyleProfile {
        style: BeatboxStyle::Vocal,
        pattern_weights: &[
            (PatternClass::Vocal, 0.7),
            (PatternClass::Snare, 0.2),
            (PatternClass::HiHat, 0.1),
        ],
        tempo_range: (70.0, 130.0),
        complexity_threshold: 0.5,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_parsing() {
        assert_eq!("Techno".parse::<BeatboxStyle>(), Ok(BeatboxStyle::Techno));
        assert_eq!(" bass ".parse::<BeatboxStyle>(), Ok(BeatboxStyle::Bass));
        assert!(matches!(
            "polka".parse::<BeatboxStyle>(),
            Err(ConfigError::UnknownStyle { .. })
        ));
    }

    #[test]
    fn test_templates_cover_every_class_once() {
        let classes: Vec<PatternClass> = PATTERN_TEMPLATES.iter().map(|t| t.class).collect();
        assert_eq!(
            classes,
            vec![
                PatternClass::Kick,
                PatternClass::Snare,
                PatternClass::HiHat,
                PatternClass::Bass,
                PatternClass::Vocal
            ]
        );
        for template in PATTERN_TEMPLATES.iter() {
            assert!(template.centroid_range.0 < template.centroid_range.1);
            assert!(template.zcr_range.0 < template.zcr_range.1);
            assert!(template.energy_threshold > 0.0);
        }
    }

    #[test]
    fn test_profile_weight_lookup() {
        let bass = &STYLE_PROFILES[2];
        assert_eq!(bass.style, BeatboxStyle::Bass);
        assert_eq!(bass.weight_for(PatternClass::Bass), Some(0.6));
        assert_eq!(bass.weight_for(PatternClass::HiHat), None);
    }

    #[test]
    fn test_class_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&PatternClass::HiHat).unwrap(),
            "\"hihat\""
        );
        assert_eq!(
            serde_json::to_string(&BeatboxStyle::Freestyle).unwrap(),
            "\"freestyle\""
        );
    }
}
