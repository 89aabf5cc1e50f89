use super::*;
use crate::analysis::features::N_MFCC;

/// Helper to create a FeatureVector for testing
fn create_features(centroid: f32, zcr: f32, energy: f32, mfcc: [f32; N_MFCC]) -> FeatureVector {
    FeatureVector {
        spectral_centroid: centroid,
        spectral_rolloff: 0.0,
        spectral_bandwidth: 0.0,
        zero_crossing_rate: zcr,
        mfcc,
        energy,
        tempo: TempoFeatures::default(),
    }
}

fn with_periodicity(mut features: FeatureVector, periodicity: f32) -> FeatureVector {
    features.tempo.periodicity = periodicity;
    features
}

fn template(class: PatternClass) -> &'static PatternTemplate {
    PATTERN_TEMPLATES
        .iter()
        .find(|t| t.class == class)
        .expect("template exists")
}

#[test]
fn test_exact_template_match_scores_sum_of_weights() {
    let classifier = TinyClassifier::new();
    for template in classifier.templates() {
        let (c_lo, c_hi) = template.centroid_range;
        let (z_lo, z_hi) = template.zcr_range;
        let features = create_features(
            (c_lo + c_hi) / 2.0,
            (z_lo + z_hi) / 2.0,
            template.energy_threshold,
            template.mfcc_signature,
        );

        let expected = CENTROID_WEIGHT + ENERGY_WEIGHT + ZCR_WEIGHT + CEPSTRAL_WEIGHT;
        let confidence = template_confidence(&features, template);
        assert!(
            (confidence - expected).abs() < 1e-6,
            "{} scored {} instead of {}",
            template.class,
            confidence,
            expected
        );
    }
}

#[test]
fn test_range_match_falloff() {
    let range = (50.0, 200.0);
    assert_eq!(range_match(120.0, range), 1.0);
    assert_eq!(range_match(50.0, range), 1.0);
    // midpoint 125: 225 is 100 away -> 1 - 100/125
    assert!((range_match(225.0, range) - 0.2).abs() < 1e-6);
    assert_eq!(range_match(0.0, range), 0.0);
    assert_eq!(range_match(10_000.0, range), 0.0);
}

#[test]
fn test_energy_match_is_capped() {
    assert_eq!(energy_match(0.35, 0.7), 0.5);
    assert_eq!(energy_match(5.0, 0.7), 1.0);
    assert_eq!(energy_match(0.0, 0.7), 0.0);
}

#[test]
fn test_cepstral_similarity() {
    let a = [0.5; N_MFCC];
    assert_eq!(cepstral_similarity(&a, &a), 1.0);
    let mut b = a;
    b[0] += 1.0;
    assert!((cepstral_similarity(&a, &b) - (-1.0f32).exp()).abs() < 1e-6);
}

#[test]
fn test_classify_ranks_low_frequency_templates() {
    let classifier = TinyClassifier::new();
    let features = create_features(100.0, 0.05, 1.0, [0.0; N_MFCC]);
    let patterns = classifier.classify(&features);

    let classes: Vec<PatternClass> = patterns.iter().map(|p| p.class).collect();
    assert_eq!(
        classes,
        vec![PatternClass::Kick, PatternClass::Bass, PatternClass::Vocal]
    );
    assert!(patterns
        .windows(2)
        .all(|pair| pair[0].confidence >= pair[1].confidence));
    for pattern in &patterns {
        assert!((0.0..=1.0).contains(&pattern.confidence));
        assert_eq!(pattern.intensity, 1.0);
        assert_eq!(
            pattern.frequency_range,
            template(pattern.class).centroid_range
        );
    }
}

#[test]
fn test_classify_caps_at_three_patterns() {
    let classifier = TinyClassifier::new();
    let features = create_features(100.0, 0.05, 1.0, [0.0; N_MFCC]);
    let all_scores = classifier.score_templates(&features);
    let above = all_scores
        .iter()
        .filter(|(_, c)| *c > CONFIDENCE_THRESHOLD)
        .count();
    assert_eq!(above, 5);
    assert_eq!(classifier.classify(&features).len(), MAX_PATTERNS);
}

#[test]
fn test_classify_silence_returns_nothing() {
    let classifier = TinyClassifier::new();
    let mut mfcc = [0.0; N_MFCC];
    mfcc[0] = -117.4;
    let features = create_features(0.0, 0.0, 0.0, mfcc);

    assert!(classifier.classify(&features).is_empty());
    assert!(classifier
        .score_templates(&features)
        .iter()
        .all(|(_, c)| *c < CONFIDENCE_THRESHOLD));
}

#[test]
fn test_estimate_tempo_buckets() {
    let tempo = |periodicity: f32| TempoFeatures {
        periodicity,
        ..TempoFeatures::default()
    };
    assert!((estimate_tempo(&tempo(0.6)) - 144.0).abs() < 1e-4);
    assert!((estimate_tempo(&tempo(0.1)) - 96.0).abs() < 1e-4);
    assert_eq!(estimate_tempo(&tempo(0.3)), 120.0);
    assert_eq!(estimate_tempo(&tempo(0.5)), 120.0);
    assert_eq!(estimate_tempo(&tempo(0.2)), 120.0);
}

#[test]
fn test_complexity_combines_mfcc_spread_and_bandwidth() {
    let mut features = create_features(0.0, 0.0, 0.0, [0.0; N_MFCC]);
    features.spectral_bandwidth = 500.0;
    assert!((complexity(&features) - 0.5).abs() < 1e-6);

    let mut spread = [0.0; N_MFCC];
    spread[0] = 13.0;
    features.mfcc = spread;
    // mean 1.0, variance (144 + 12) / 13 = 12
    assert!((complexity(&features) - (12.0f32.sqrt() + 0.5)).abs() < 1e-4);
}

#[test]
fn test_classify_style_dominant_bass() {
    let classifier = TinyClassifier::new();
    let features = with_periodicity(create_features(0.0, 0.0, 0.0, [0.0; N_MFCC]), 0.3);
    assert_eq!(
        classifier.classify_style(&features, Some(PatternClass::Bass)),
        BeatboxStyle::Bass
    );
}

#[test]
fn test_classify_style_tempo_gating() {
    let classifier = TinyClassifier::new();
    // 144 BPM: vocal keeps its 0.7 weight, modern gets 0.2 + 0.3
    let features = with_periodicity(create_features(0.0, 0.0, 0.0, [0.0; N_MFCC]), 0.6);
    assert_eq!(
        classifier.classify_style(&features, Some(PatternClass::Vocal)),
        BeatboxStyle::Vocal
    );
    let modern = &STYLE_PROFILES[1];
    assert!((classifier.style_score(modern, &features, Some(PatternClass::Vocal)) - 0.5).abs() < 1e-6);
}

#[test]
fn test_classify_style_ties_resolve_to_first_profile() {
    let classifier = TinyClassifier::new();
    // 120 BPM sits in every tempo range, no dominant class, no complexity
    let features = with_periodicity(create_features(0.0, 0.0, 0.0, [0.0; N_MFCC]), 0.3);
    for profile in STYLE_PROFILES.iter() {
        assert!((classifier.style_score(profile, &features, None) - TEMPO_BONUS).abs() < 1e-6);
    }
    assert_eq!(classifier.classify_style(&features, None), BeatboxStyle::Classic);
}

#[test]
fn test_pattern_style_uses_its_own_class() {
    let classifier = TinyClassifier::new();
    let features = with_periodicity(create_features(100.0, 0.05, 1.0, [0.0; N_MFCC]), 0.3);
    for pattern in classifier.classify(&features) {
        assert_eq!(
            pattern.style,
            classifier.classify_style(&features, Some(pattern.class))
        );
    }
}

#[test]
fn test_classification_is_deterministic() {
    let classifier = TinyClassifier::new();
    let features = create_features(3000.0, 0.3, 0.4, [0.1; N_MFCC]);
    assert_eq!(classifier.classify(&features), classifier.classify(&features));
}
