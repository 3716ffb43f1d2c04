//! Writer configuration.
//!
//! Values resolve in order: explicit command-line flags, then the JSON config
//! file given with `--config`, then built-in defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use wavpatch::{ShortWritePolicy, WavEmitter, WavFormat};

/// Default format and write policy, loadable from a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WriterConfig {
    /// Sample rate in Hz (default: 44100)
    pub sample_rate: u32,
    /// Bits per sample (default: 16)
    pub bits_per_sample: u8,
    /// Channel count (default: 2)
    pub channels: u16,
    /// Treat short writes as errors (default: false)
    pub strict: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            bits_per_sample: 16,
            channels: 2,
            strict: false,
        }
    }
}

impl WriterConfig {
    /// Parse a config from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Loads `path` if given, otherwise returns defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(Path::new(path)),
            None => Ok(Self::default()),
        }
    }

    /// Applies command-line overrides on top of this config.
    pub fn with_overrides(mut self, overrides: &FormatOverrides) -> Self {
        if let Some(rate) = overrides.sample_rate {
            self.sample_rate = rate;
        }
        if let Some(bits) = overrides.bits_per_sample {
            self.bits_per_sample = bits;
        }
        if let Some(channels) = overrides.channels {
            self.channels = channels;
        }
        self.strict |= overrides.strict;
        self
    }

    pub fn format(&self) -> WavFormat {
        WavFormat::new(self.sample_rate, self.bits_per_sample, self.channels)
    }

    /// Builds an emitter carrying this config's format and policy.
    pub fn emitter(&self) -> WavEmitter {
        let policy = if self.strict {
            ShortWritePolicy::Reject
        } else {
            ShortWritePolicy::Tolerate
        };
        WavEmitter::new(self.format()).short_writes(policy)
    }
}

/// Format values given explicitly on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatOverrides {
    pub config: Option<String>,
    pub sample_rate: Option<u32>,
    pub bits_per_sample: Option<u8>,
    pub channels: Option<u16>,
    pub strict: bool,
}

impl FormatOverrides {
    /// Loads the referenced config file (or defaults) and applies the flags.
    pub fn resolve(&self) -> Result<WriterConfig> {
        let config = WriterConfig::load(self.config.as_deref())?.with_overrides(self);
        tracing::debug!(?config, "resolved writer config");
        Ok(config)
    }
}
