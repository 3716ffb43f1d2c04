//! Header command implementation
//!
//! Prints the 44-byte placeholder header for a format, field by field.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::process::ExitCode;

use wavpatch::header::{
    DATA_TAG, FMT_TAG, PCM_FMT_LENGTH, RIFF_TAG, WAVE_FORMAT_PCM, WAVE_TAG,
};
use wavpatch::WaveHeader;

use super::json_output::{error_codes, JsonError, Stage, Staged};
use crate::config::FormatOverrides;

/// One row of the header layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderField {
    pub offset: usize,
    pub size: usize,
    pub name: &'static str,
    pub value: String,
}

/// JSON output of the `header` command.
#[derive(Debug, Serialize)]
struct HeaderReport {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    hex: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<HeaderField>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<JsonError>,
}

fn tag(bytes: &[u8; 4]) -> String {
    format!("{:?}", String::from_utf8_lossy(bytes))
}

fn field(offset: usize, size: usize, name: &'static str, value: impl ToString) -> HeaderField {
    HeaderField {
        offset,
        size,
        name,
        value: value.to_string(),
    }
}

/// Lays out every header field with the value the encoder writes there.
pub fn describe(header: &WaveHeader) -> Vec<HeaderField> {
    vec![
        field(0, 4, "riff_tag", tag(RIFF_TAG)),
        field(4, 4, "riff_length", header.riff_length()),
        field(8, 4, "wave_tag", tag(WAVE_TAG)),
        field(12, 4, "fmt_tag", tag(FMT_TAG)),
        field(16, 4, "fmt_length", PCM_FMT_LENGTH),
        field(20, 2, "audio_format", WAVE_FORMAT_PCM),
        field(22, 2, "num_channels", header.num_channels()),
        field(24, 4, "sample_rate", header.sample_rate()),
        field(28, 4, "byte_rate", header.byte_rate()),
        field(32, 2, "block_align", header.block_align()),
        field(34, 2, "bits_per_sample", header.bits_per_sample()),
        field(36, 4, "data_tag", tag(DATA_TAG)),
        field(40, 4, "data_length", header.data_length()),
    ]
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn build(overrides: &FormatOverrides) -> Staged<WaveHeader> {
    let config = overrides.resolve().stage(error_codes::CONFIG)?;
    config.format().header().stage(error_codes::INVALID_ARGUMENT)
}

/// Run the header command
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(overrides: &FormatOverrides, json_output: bool) -> Result<ExitCode> {
    let header = match build(overrides) {
        Ok(header) => header,
        Err((e, code)) if json_output => {
            let report = HeaderReport {
                success: false,
                hex: None,
                fields: Vec::new(),
                errors: vec![JsonError::from_anyhow(&e, code)],
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(ExitCode::from(1));
        }
        Err((e, _)) => return Err(e),
    };
    let bytes = header.encode();
    let fields = describe(&header);

    if json_output {
        let report = HeaderReport {
            success: true,
            hex: Some(hex(&bytes)),
            fields,
            errors: Vec::new(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Placeholder header".cyan().bold());
    println!("{}", "==================".cyan());
    for f in &fields {
        let raw = hex(&bytes[f.offset..f.offset + f.size]);
        println!(
            "  {:>2}  {:<16} {:<10} {}",
            f.offset,
            f.name,
            raw.dimmed(),
            f.value
        );
    }
    println!();
    println!(
        "{}",
        "Length fields stay 0 until the payload is written and patched.".dimmed()
    );

    Ok(ExitCode::SUCCESS)
}
