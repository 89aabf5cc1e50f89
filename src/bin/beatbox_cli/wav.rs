use std::path::Path;

use anyhow::{bail, Context, Result};

/// Decoded mono clip
pub struct WavClip {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

/// Read a WAV file as normalized mono samples, averaging channels
pub fn read_mono(path: &Path) -> Result<WavClip> {
    let mut reader =
        hound::WavReader::open(path).with_context(|| format!("opening {}", path.display()))?;
    let spec = reader.spec();
    if spec.channels == 0 {
        bail!("{} has zero channels", path.display());
    }

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .with_context(|| format!("reading {}", path.display()))?,
        hound::SampleFormat::Int => match spec.bits_per_sample {
            8 => reader
                .samples::<i8>()
                .map(|s| s.map(|v| v as f32 / i8::MAX as f32))
                .collect::<Result<_, _>>()
                .with_context(|| format!("reading {}", path.display()))?,
            16 => reader
                .samples::<i16>()
                .map(|s| s.map(|v| v as f32 / i16::MAX as f32))
                .collect::<Result<_, _>>()
                .with_context(|| format!("reading {}", path.display()))?,
            bits @ (24 | 32) => {
                let scale = ((1_i64 << (bits - 1)) - 1) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / scale))
                    .collect::<Result<_, _>>()
                    .with_context(|| format!("reading {}", path.display()))?
            }
            bits => bail!(
                "unsupported bits_per_sample={} for {}",
                bits,
                path.display()
            ),
        },
    };

    let channels = spec.channels as usize;
    let samples = if channels == 1 {
        interleaved
    } else {
        interleaved
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    };

    Ok(WavClip {
        samples,
        sample_rate: spec.sample_rate,
    })
}
