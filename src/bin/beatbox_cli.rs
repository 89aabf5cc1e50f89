use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use beatbox_recognizer::analysis::BeatboxStyle;
use beatbox_recognizer::config::AppConfig;
use beatbox_recognizer::engine::{EngineHandle, PerformanceReport, RecognitionResult};
use beatbox_recognizer::synth::{style_clip, DEFAULT_SEED, DEMO_STYLES};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[path = "beatbox_cli/wav.rs"]
mod wav;

#[derive(Parser, Debug)]
#[command(
    name = "beatbox_cli",
    about = "Offline beatbox pattern recognition harness"
)]
struct Cli {
    /// JSON configuration file (defaults are used when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Recognize a WAV file, whole or in fixed-length chunks
    Recognize {
        input: PathBuf,
        /// Style preference used when nothing matches
        #[arg(long, default_value = "")]
        style: String,
        /// Split the clip into chunks of this many milliseconds
        #[arg(long)]
        chunk_ms: Option<u32>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Recognize synthetic clips for each demo style
    Demo {
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
        #[arg(long, default_value_t = 2.0)]
        duration_secs: f32,
    },
    /// Print the effective configuration as JSON
    Config,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::try_load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AppConfig::default(),
    };

    match cli.command {
        Commands::Recognize {
            input,
            style,
            chunk_ms,
            output,
        } => run_recognize(config, &input, &style, chunk_ms, output),
        Commands::Demo {
            seed,
            duration_secs,
        } => run_demo(config, seed, duration_secs),
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_recognize(
    config: AppConfig,
    input: &Path,
    style: &str,
    chunk_ms: Option<u32>,
    output_path: Option<PathBuf>,
) -> Result<ExitCode> {
    let clip = wav::read_mono(input)?;
    info!(
        path = %input.display(),
        samples = clip.samples.len(),
        sample_rate = clip.sample_rate,
        "loaded clip"
    );

    let engine = EngineHandle::new(config)?;
    engine.start(style)?;

    let chunk_len = match chunk_ms {
        Some(ms) if ms > 0 => {
            ((clip.sample_rate as u64 * ms as u64) / 1000).max(1) as usize
        }
        _ => clip.samples.len().max(1),
    };

    let mut results = Vec::new();
    if clip.samples.is_empty() {
        results.push(engine.recognize(&[], clip.sample_rate)?);
    }
    for chunk in clip.samples.chunks(chunk_len) {
        results.push(
            engine
                .recognize(chunk, clip.sample_rate)
                .with_context(|| format!("recognizing {}", input.display()))?,
        );
    }
    engine.stop()?;

    let payload = RecognizePayload {
        input: input.display().to_string(),
        sample_rate: clip.sample_rate,
        results: &results,
        report: engine.get_performance_report()?,
    };
    let json = serde_json::to_string_pretty(&payload)?;

    if let Some(path) = output_path {
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    } else {
        println!("{json}");
    }

    Ok(ExitCode::SUCCESS)
}

fn run_demo(config: AppConfig, seed: u64, duration_secs: f32) -> Result<ExitCode> {
    let sample_rate = config.engine.sample_rate;
    let engine = EngineHandle::new(config)?;

    let mut clips = Vec::with_capacity(DEMO_STYLES.len());
    for (i, style) in DEMO_STYLES.into_iter().enumerate() {
        engine.start(style.as_str())?;
        let samples = style_clip(style, sample_rate, duration_secs, seed.wrapping_add(i as u64));
        let result = engine.recognize(&samples, sample_rate)?;
        println!(
            "{:<8} -> style={} confidence={:.2} quality={:.2} patterns=[{}]",
            style.as_str(),
            result.primary_style,
            result.overall_confidence,
            result.quality_score,
            result
                .patterns
                .iter()
                .map(|p| format!("{}:{:.2}", p.class, p.confidence))
                .collect::<Vec<_>>()
                .join(", ")
        );
        clips.push(DemoClip {
            requested_style: style,
            result,
        });
    }
    engine.stop()?;

    let payload = DemoPayload {
        clips,
        report: engine.get_performance_report()?,
    };
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(ExitCode::SUCCESS)
}

#[derive(Serialize)]
struct RecognizePayload<'a> {
    input: String,
    sample_rate: u32,
    results: &'a [RecognitionResult],
    report: PerformanceReport,
}

#[derive(Serialize)]
struct DemoClip {
    requested_style: BeatboxStyle,
    result: RecognitionResult,
}

#[derive(Serialize)]
struct DemoPayload {
    clips: Vec<DemoClip>,
    report: PerformanceReport,
}
