//! wavpatch CLI - writes canonical PCM WAV files
//!
//! The header is written first with placeholder lengths, the payload follows,
//! and the two length fields are patched in place afterwards.

mod cli_args;

use clap::Parser;
use std::process::ExitCode;

use cli_args::{Cli, Commands};
use wavpatch_cli::commands;
use wavpatch_cli::commands::tone::ToneParams;
use wavpatch_cli::logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Wrap {
            input,
            output,
            format,
            json,
        } => commands::wrap::run(&input, &output, &format.into(), json),
        Commands::Tone {
            output,
            frequency,
            duration,
            amplitude,
            format,
            json,
        } => {
            let params = ToneParams {
                frequency,
                duration,
                amplitude,
            };
            commands::tone::run(&output, &params, &format.into(), json)
        }
        Commands::Header { format, json } => commands::header::run(&format.into(), json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_wrap() {
        let cli = Cli::try_parse_from([
            "wavpatch", "wrap", "-i", "in.pcm", "-o", "out.wav", "-r", "48000", "--bits", "24",
            "-n", "6", "--strict",
        ])
        .unwrap();
        match cli.command {
            Commands::Wrap {
                input,
                output,
                format,
                json,
            } => {
                assert_eq!(input, "in.pcm");
                assert_eq!(output, "out.wav");
                assert_eq!(format.sample_rate, Some(48000));
                assert_eq!(format.bits_per_sample, Some(24));
                assert_eq!(format.channels, Some(6));
                assert!(format.strict);
                assert!(!json);
            }
            _ => panic!("expected wrap command"),
        }
    }

    #[test]
    fn test_cli_parses_tone_defaults() {
        let cli = Cli::try_parse_from(["wavpatch", "tone", "--output", "a.wav"]).unwrap();
        match cli.command {
            Commands::Tone {
                frequency,
                duration,
                amplitude,
                format,
                ..
            } => {
                assert_eq!(frequency, 440.0);
                assert_eq!(duration, 1.0);
                assert_eq!(amplitude, 0.5);
                assert!(format.config.is_none());
                assert!(format.sample_rate.is_none());
            }
            _ => panic!("expected tone command"),
        }
    }

    #[test]
    fn test_cli_parses_header_with_config() {
        let cli = Cli::try_parse_from([
            "wavpatch",
            "-v",
            "header",
            "--config",
            "wavpatch.json",
            "--json",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Header { format, json } => {
                assert_eq!(format.config.as_deref(), Some("wavpatch.json"));
                assert!(json);
            }
            _ => panic!("expected header command"),
        }
    }

    #[test]
    fn test_cli_rejects_non_numeric_rate() {
        assert!(Cli::try_parse_from(["wavpatch", "header", "-r", "fast"]).is_err());
    }
}
