//! Deterministic synthetic clips for demos and tests.
//!
//! Every generator is seeded so repeated runs produce identical samples.

use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f32::consts::PI;

use crate::analysis::templates::BeatboxStyle;

/// Seed used when the caller does not pick one
pub const DEFAULT_SEED: u64 = 0x5A5A_FFF0;

/// Styles with a demo clip, in demo order
pub const DEMO_STYLES: [BeatboxStyle; 5] = [
    BeatboxStyle::Classic,
    BeatboxStyle::Modern,
    BeatboxStyle::Bass,
    BeatboxStyle::Techno,
    BeatboxStyle::Vocal,
];

fn sample_count(sample_rate: u32, duration_secs: f32) -> usize {
    (sample_rate as f32 * duration_secs).round() as usize
}

fn times(sample_rate: u32, duration_secs: f32) -> impl Iterator<Item = f32> {
    let sr = sample_rate as f32;
    (0..sample_count(sample_rate, duration_secs)).map(move |i| i as f32 / sr)
}

fn sine(freq_hz: f32, t: f32) -> f32 {
    (2.0 * PI * freq_hz * t).sin()
}

/// Seeded noise source with unit variance
pub struct NoiseSource {
    rng: StdRng,
}

impl NoiseSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform sample scaled to unit variance
    pub fn next_sample(&mut self) -> f32 {
        self.rng.gen_range(-1.0_f32..1.0) * 3.0_f32.sqrt()
    }
}

/// Exponentially decaying sine: `amplitude · sin(2πft) · e^(−decay·t)`
pub fn decaying_sine(
    freq_hz: f32,
    amplitude: f32,
    decay: f32,
    sample_rate: u32,
    duration_secs: f32,
) -> Vec<f32> {
    times(sample_rate, duration_secs)
        .map(|t| amplitude * sine(freq_hz, t) * (-decay * t).exp())
        .collect()
}

/// Seeded white noise at the given amplitude
pub fn white_noise(amplitude: f32, sample_rate: u32, duration_secs: f32, seed: u64) -> Vec<f32> {
    let mut noise = NoiseSource::new(seed);
    (0..sample_count(sample_rate, duration_secs))
        .map(|_| amplitude * noise.next_sample())
        .collect()
}

/// Demo clip imitating one beatbox style
///
/// Styles without a dedicated recipe fall back to the classic kick and noise
/// mix.
pub fn style_clip(style: BeatboxStyle, sample_rate: u32, duration_secs: f32, seed: u64) -> Vec<f32> {
    let mut noise = NoiseSource::new(seed);
    times(sample_rate, duration_secs)
        .map(|t| match style {
            BeatboxStyle::Bass => {
                let short_bass = if t < 0.5 { 0.4 * sine(120.0, t) } else { 0.0 };
                0.8 * sine(60.0, t) * (-t).exp() + short_bass + 0.1 * noise.next_sample()
            }
            BeatboxStyle::Techno => {
                let hat_gate = if sine(8.0, t) > 0.5 { 1.0 } else { 0.0 };
                0.6 * sine(440.0, t) * sine(4.0, t)
                    + 0.4 * sine(4000.0, t) * hat_gate
                    + 0.2 * noise.next_sample()
            }
            BeatboxStyle::Vocal => {
                0.5 * sine(200.0, t)
                    + 0.3 * sine(600.0, t)
                    + 0.2 * sine(1200.0, t)
                    + 0.1 * noise.next_sample()
            }
            _ => {
                let snare_gate = if sine(2.0, t) > 0.7 { 1.0 } else { 0.0 };
                let hat_gate = if sine(4.0, t) > 0.8 { 1.0 } else { 0.0 };
                let snare = noise.next_sample();
                let hat = noise.next_sample();
                0.7 * sine(80.0, t) * (-3.0 * t).exp()
                    + 0.5 * snare * snare_gate
                    + 0.3 * hat * hat_gate
            }
        })
        .collect()
}
