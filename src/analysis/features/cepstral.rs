// Cepstral module - Mel-frequency cepstral coefficients
//
// Mel band energies are log-compressed (with a small floor) and decorrelated
// with an orthonormal DCT-II; the first coefficients are averaged over time.

use super::fft::Spectrogram;
use super::mel::MelFilterBank;
use super::types::N_MFCC;

/// Floor added before the log so silent bands stay finite
pub const LOG_FLOOR: f32 = 1e-10;

/// Orthonormal DCT-II, keeping the first `n_out` coefficients
///
/// X_k = s_k Σ x_n cos(π k (2n + 1) / 2N), with s_0 = √(1/N) and s_k = √(2/N).
pub fn dct_ii_ortho(input: &[f32], n_out: usize) -> Vec<f32> {
    let n = input.len();
    if n == 0 {
        return vec![0.0; n_out];
    }
    let n_f = n as f32;

    (0..n_out)
        .map(|k| {
            if k >= n {
                return 0.0;
            }
            let scale = if k == 0 {
                (1.0 / n_f).sqrt()
            } else {
                (2.0 / n_f).sqrt()
            };
            let sum: f32 = input
                .iter()
                .enumerate()
                .map(|(i, &x)| {
                    x * (std::f32::consts::PI * k as f32 * (2 * i + 1) as f32 / (2.0 * n_f)).cos()
                })
                .sum();
            scale * sum
        })
        .collect()
}

/// Time-averaged MFCCs of a spectrogram
pub fn mfcc(spec: &Spectrogram, filter_bank: &MelFilterBank) -> [f32; N_MFCC] {
    let mut coefficients = [0.0f32; N_MFCC];
    if spec.n_frames() == 0 {
        return coefficients;
    }

    for frame in spec.frames() {
        let log_mel: Vec<f32> = filter_bank
            .apply(frame)
            .into_iter()
            .map(|energy| (energy + LOG_FLOOR).ln())
            .collect();
        for (acc, c) in coefficients
            .iter_mut()
            .zip(dct_ii_ortho(&log_mel, N_MFCC))
        {
            *acc += c;
        }
    }

    let n_frames = spec.n_frames() as f32;
    for c in coefficients.iter_mut() {
        *c /= n_frames;
    }
    coefficients
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dct_of_constant_is_dc_only() {
        let out = dct_ii_ortho(&[2.0; 16], 5);
        assert!((out[0] - 2.0 * 4.0).abs() < 1e-4, "dc {}", out[0]);
        assert!(out[1..].iter().all(|c| c.abs() < 1e-4));
    }

    #[test]
    fn test_dct_is_energy_preserving() {
        let input: Vec<f32> = (0..8).map(|i| (i as f32 * 0.7).sin()).collect();
        let out = dct_ii_ortho(&input, 8);
        let e_in: f32 = input.iter().map(|x| x * x).sum();
        let e_out: f32 = out.iter().map(|x| x * x).sum();
        assert!((e_in - e_out).abs() < 1e-4);
    }

    #[test]
    fn test_dct_pads_when_asking_for_more_than_input() {
        let out = dct_ii_ortho(&[1.0, 1.0], 4);
        assert_eq!(out.len(), 4);
        assert_eq!(&out[2..], &[0.0, 0.0]);
    }

    #[test]
    fn test_mfcc_of_silence_is_floor_constant() {
        let bank = MelFilterBank::new(16_000, 1024, 26);
        let spec = Spectrogram::new(vec![vec![0.0; 513]; 3], 513, 15.625);
        let coefficients = mfcc(&spec, &bank);
        let expected_dc = LOG_FLOOR.ln() * (26.0f32).sqrt();
        assert!((coefficients[0] - expected_dc).abs() < 1e-2);
        assert!(coefficients[1..].iter().all(|c| c.abs() < 1e-2));
    }
}
