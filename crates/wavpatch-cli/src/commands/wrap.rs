//! Wrap command implementation
//!
//! Wraps a raw interleaved PCM file in a canonical WAV header.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{error_codes, JsonError, WriteReport};
use super::write_wav_file;
use crate::config::FormatOverrides;

/// Run the wrap command
///
/// # Arguments
/// * `input` - Path to the raw PCM payload
/// * `output` - Path of the WAV file to create
/// * `overrides` - Format flags and optional config path
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(
    input: &str,
    output: &str,
    overrides: &FormatOverrides,
    json_output: bool,
) -> Result<ExitCode> {
    let config = match overrides.resolve() {
        Ok(config) => config,
        Err(e) if json_output => {
            return print_failure(output, JsonError::from_anyhow(&e, error_codes::CONFIG));
        }
        Err(e) => return Err(e),
    };

    let payload = match fs::read(input).with_context(|| format!("Failed to read input: {}", input)) {
        Ok(payload) => payload,
        Err(e) if json_output => {
            return print_failure(
                output,
                JsonError::from_anyhow(&e, error_codes::FILE_READ).with_file(input),
            );
        }
        Err(e) => return Err(e),
    };

    let format = config.format();
    let block_align = usize::from(format.block_align());
    if block_align > 0 && payload.len() % block_align != 0 {
        tracing::warn!(
            len = payload.len(),
            block_align,
            "payload is not a whole number of sample frames"
        );
    }

    let summary = match write_wav_file(Path::new(output), &config.emitter(), &payload) {
        Ok(summary) => summary,
        Err(e) if json_output => {
            return print_failure(
                output,
                JsonError::from_anyhow(&e, error_codes::FILE_WRITE).with_file(output),
            );
        }
        Err(e) => return Err(e),
    };

    if json_output {
        let report = WriteReport::success(output, format, summary, &payload);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{} {} -> {}", "Wrapping:".cyan().bold(), input, output);
        println!(
            "  {} Hz, {}-bit, {} channel(s)",
            format.sample_rate, format.bits_per_sample, format.channels
        );
        println!(
            "  {} bytes written (data {} bytes, riff {} bytes)",
            summary.total_bytes(),
            summary.data_length,
            summary.riff_length
        );
        println!(
            "  pcm hash: {}",
            blake3::hash(&payload).to_hex().to_string().dimmed()
        );
        println!("{} Wrote {}", "SUCCESS".green().bold(), output);
    }

    Ok(ExitCode::SUCCESS)
}

fn print_failure(output: &str, error: JsonError) -> Result<ExitCode> {
    let report = WriteReport::failure(output, error);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(ExitCode::from(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wrap_writes_header_and_payload() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.pcm");
        let output = dir.path().join("out.wav");
        fs::write(&input, [1u8, 2, 3, 4, 5, 6, 7, 8]).unwrap();

        let code = run(
            input.to_str().unwrap(),
            output.to_str().unwrap(),
            &FormatOverrides::default(),
            false,
        )
        .unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let bytes = fs::read(&output).unwrap();
        assert_eq!(bytes.len(), 52);
        assert_eq!(&bytes[44..], &[1u8, 2, 3, 4, 5, 6, 7, 8]);

        let reader = hound::WavReader::open(&output).unwrap();
        assert_eq!(reader.spec().channels, 2);
        assert_eq!(reader.duration(), 2);
    }

    #[test]
    fn test_wrap_truncates_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.pcm");
        let output = dir.path().join("out.wav");
        fs::write(&input, [0u8; 2]).unwrap();
        fs::write(&output, vec![0xEE; 500]).unwrap();

        let overrides = FormatOverrides {
            channels: Some(1),
            ..Default::default()
        };
        run(
            input.to_str().unwrap(),
            output.to_str().unwrap(),
            &overrides,
            false,
        )
        .unwrap();

        assert_eq!(fs::metadata(&output).unwrap().len(), 46);
    }

    #[test]
    fn test_wrap_missing_input_json_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.wav");
        let code = run(
            "/nonexistent/in.pcm",
            output.to_str().unwrap(),
            &FormatOverrides::default(),
            true,
        )
        .unwrap();
        assert_eq!(code, ExitCode::from(1));
        assert!(!output.exists());
    }

    #[test]
    fn test_wrap_rejects_bad_bit_depth() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.pcm");
        fs::write(&input, [0u8; 4]).unwrap();

        let overrides = FormatOverrides {
            bits_per_sample: Some(12),
            ..Default::default()
        };
        let err = run(
            input.to_str().unwrap(),
            dir.path().join("out.wav").to_str().unwrap(),
            &overrides,
            false,
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid bits per sample"));
        assert!(!dir.path().join("out.wav").exists());
    }
}
