//! Tone command implementation
//!
//! Synthesizes a sine test tone and writes it as a WAV file.

use anyhow::{bail, Result};
use colored::Colorize;
use std::f64::consts::TAU;
use std::path::Path;
use std::process::ExitCode;

use wavpatch::pcm::{interleave, samples_to_pcm};
use wavpatch::{check_payload_len, WavFormat, WavResult};

use super::json_output::{error_codes, JsonError, Stage, Staged, WriteReport};
use super::write_wav_file;
use crate::config::FormatOverrides;

/// Sine tone parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneParams {
    /// Frequency in Hz
    pub frequency: f64,
    /// Duration in seconds
    pub duration: f64,
    /// Peak amplitude in [0, 1]
    pub amplitude: f64,
}

impl ToneParams {
    fn validate(&self) -> Result<()> {
        if !(self.frequency.is_finite() && self.frequency > 0.0) {
            bail!("Frequency must be positive, got {}", self.frequency);
        }
        if !(self.duration.is_finite() && self.duration > 0.0) {
            bail!("Duration must be positive, got {}", self.duration);
        }
        if !(0.0..=1.0).contains(&self.amplitude) {
            bail!("Amplitude must be between 0 and 1, got {}", self.amplitude);
        }
        Ok(())
    }
}

/// Number of frames the tone spans at `sample_rate`.
fn frame_count(params: &ToneParams, sample_rate: u32) -> u64 {
    // Float-to-int casts saturate, so absurd durations land on u64::MAX.
    (params.duration * f64::from(sample_rate)).round() as u64
}

/// PCM bytes the tone will occupy, or `PayloadTooLarge` if that cannot fit
/// in a WAV file.
fn payload_len(params: &ToneParams, format: &WavFormat) -> WavResult<u64> {
    let len = frame_count(params, format.sample_rate)
        .checked_mul(u64::from(format.channels))
        .and_then(|n| n.checked_mul(u64::from(format.bytes_per_sample())))
        .unwrap_or(u64::MAX);
    check_payload_len(len)?;
    Ok(len)
}

/// Renders one channel of the tone.
pub fn render_sine(params: &ToneParams, sample_rate: u32) -> Vec<f64> {
    let frames = frame_count(params, sample_rate) as usize;
    let step = TAU * params.frequency / f64::from(sample_rate);
    (0..frames)
        .map(|i| params.amplitude * (step * i as f64).sin())
        .collect()
}

/// Run the tone command
///
/// # Arguments
/// * `output` - Path of the WAV file to create
/// * `params` - Tone frequency, duration and amplitude
/// * `overrides` - Format flags and optional config path
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(
    output: &str,
    params: &ToneParams,
    overrides: &FormatOverrides,
    json_output: bool,
) -> Result<ExitCode> {
    match render(output, params, overrides) {
        Ok((report, summary_line)) => {
            if json_output {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "{} {:.1} Hz for {:.2}s",
                    "Tone:".cyan().bold(),
                    params.frequency,
                    params.duration
                );
                println!("  {}", summary_line);
                println!("{} Wrote {}", "SUCCESS".green().bold(), output);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err((e, code)) if json_output => {
            let mut error = JsonError::from_anyhow(&e, code);
            if code == error_codes::FILE_WRITE {
                error = error.with_file(output);
            }
            let report = WriteReport::failure(output, error);
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(ExitCode::from(1))
        }
        Err((e, _)) => Err(e),
    }
}

fn render(
    output: &str,
    params: &ToneParams,
    overrides: &FormatOverrides,
) -> Staged<(WriteReport, String)> {
    params.validate().stage(error_codes::INVALID_ARGUMENT)?;
    let config = overrides.resolve().stage(error_codes::CONFIG)?;
    let format = config.format();
    format.validate().stage(error_codes::INVALID_ARGUMENT)?;
    payload_len(params, &format).stage(error_codes::INVALID_ARGUMENT)?;

    let mono = render_sine(params, format.sample_rate);
    let channels: Vec<&[f64]> = vec![&mono[..]; usize::from(format.channels)];
    let pcm = samples_to_pcm(&interleave(&channels), format.bits_per_sample)
        .stage(error_codes::INVALID_ARGUMENT)?;
    tracing::debug!(frames = mono.len(), bytes = pcm.len(), "rendered tone");

    let summary = write_wav_file(Path::new(output), &config.emitter(), &pcm)
        .stage(error_codes::FILE_WRITE)?;
    let line = format!(
        "{} frames, {} Hz, {}-bit, {} channel(s), {} bytes",
        mono.len(),
        format.sample_rate,
        format.bits_per_sample,
        format.channels,
        summary.total_bytes()
    );
    Ok((WriteReport::success(output, format, summary, &pcm), line))
}
