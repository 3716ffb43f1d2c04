//! CLI argument definitions for the wavpatch command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Args, Parser, Subcommand};

use wavpatch_cli::config::FormatOverrides;

/// wavpatch - canonical PCM WAV writer
#[derive(Parser)]
#[command(name = "wavpatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Enable debug logging on stderr (overridden by WAVPATCH_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Wrap a raw interleaved PCM file in a WAV header
    Wrap {
        /// Path to the raw PCM input
        #[arg(short, long)]
        input: String,

        /// Path of the WAV file to create
        #[arg(short, long)]
        output: String,

        #[command(flatten)]
        format: FormatArgs,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Write a sine test tone
    Tone {
        /// Path of the WAV file to create
        #[arg(short, long)]
        output: String,

        /// Tone frequency in Hz
        #[arg(short, long, default_value_t = 440.0)]
        frequency: f64,

        /// Duration in seconds
        #[arg(short, long, default_value_t = 1.0)]
        duration: f64,

        /// Peak amplitude (0.0 - 1.0)
        #[arg(short, long, default_value_t = 0.5)]
        amplitude: f64,

        #[command(flatten)]
        format: FormatArgs,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print the placeholder header a format produces
    Header {
        #[command(flatten)]
        format: FormatArgs,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

/// Format flags shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct FormatArgs {
    /// JSON config file with default format values
    #[arg(short, long)]
    pub config: Option<String>,

    /// Sample rate in Hz
    #[arg(short = 'r', long)]
    pub sample_rate: Option<u32>,

    /// Bits per sample (8, 16, 24, 32)
    #[arg(short, long = "bits")]
    pub bits_per_sample: Option<u8>,

    /// Number of interleaved channels
    #[arg(short = 'n', long)]
    pub channels: Option<u16>,

    /// Fail if the sink accepts fewer bytes than requested
    #[arg(long)]
    pub strict: bool,
}

impl From<FormatArgs> for FormatOverrides {
    fn from(args: FormatArgs) -> Self {
        Self {
            config: args.config,
            sample_rate: args.sample_rate,
            bits_per_sample: args.bits_per_sample,
            channels: args.channels,
            strict: args.strict,
        }
    }
}
