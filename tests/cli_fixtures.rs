use std::path::PathBuf;
use std::process::Command;

use beatbox_recognizer::synth::decaying_sine;
use serde_json::Value;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_beatbox_cli"))
}

fn write_fixture(name: &str, samples: &[f32], sample_rate: u32) -> PathBuf {
    let path = std::env::temp_dir().join(name);
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec).expect("create wav");
    for &sample in samples {
        writer
            .write_sample((sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
            .expect("write sample");
    }
    writer.finalize().expect("finalize wav");
    path
}

#[test]
fn recognize_wav_reports_results() {
    let path = write_fixture(
        "beatbox_cli_recognize.wav",
        &decaying_sine(60.0, 0.8, 3.0, 16_000, 1.0),
        16_000,
    );

    let output = cli()
        .args(["recognize", path.to_str().unwrap(), "--style", "bass"])
        .output()
        .expect("failed to run beatbox_cli recognize");
    assert!(
        output.status.success(),
        "CLI exited with {:?}",
        output.status.code()
    );

    let stdout = String::from_utf8(output.stdout).expect("stdout UTF-8");
    let json: Value = serde_json::from_str(stdout.trim()).expect("recognition JSON payload");
    assert_eq!(json["sample_rate"], 16_000);
    assert_eq!(json["results"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["report"]["recognition_metrics"]["total_recognitions"], 1);
    assert_eq!(json["report"]["system_status"]["is_listening"], false);
}

#[test]
fn recognize_in_chunks() {
    let path = write_fixture(
        "beatbox_cli_chunks.wav",
        &decaying_sine(80.0, 0.7, 3.0, 16_000, 1.0),
        16_000,
    );

    let output = cli()
        .args(["recognize", path.to_str().unwrap(), "--chunk-ms", "250"])
        .output()
        .expect("failed to run chunked recognize");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("JSON payload");
    assert_eq!(json["results"].as_array().map(Vec::len), Some(4));
    assert_eq!(json["report"]["recent_results"].as_array().map(Vec::len), Some(4));
}

#[test]
fn recognize_missing_file_fails() {
    let output = cli()
        .args(["recognize", "/nonexistent/clip.wav"])
        .output()
        .expect("failed to run beatbox_cli");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn config_dumps_defaults() {
    let output = cli()
        .arg("config")
        .output()
        .expect("failed to run beatbox_cli config");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("config JSON");
    assert_eq!(json["analysis"]["fft_size"], 1024);
    assert_eq!(json["engine"]["sample_rate"], 16_000);
}

#[test]
fn demo_covers_every_style() {
    let output = cli()
        .args(["demo", "--duration-secs", "0.5"])
        .output()
        .expect("failed to run beatbox_cli demo");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("stdout UTF-8");
    for style in ["classic", "modern", "bass", "techno", "vocal"] {
        assert!(
            stdout.lines().any(|line| line.starts_with(style)),
            "missing demo line for {style}"
        );
    }
    assert!(stdout.contains("\"total_recognitions\": 5"));
}
