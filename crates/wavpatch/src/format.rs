//! WAV format parameters.

use serde::{Deserialize, Serialize};

use crate::error::{WavError, WavResult};
use crate::header::WaveHeader;

/// PCM format parameters supplied by the caller.
///
/// Byte rate and block alignment are never stored; they are always derived
/// from these three values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WavFormat {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample (8, 16, 24, 32, ...).
    pub bits_per_sample: u8,
    /// Number of interleaved channels (1 = mono, 2 = stereo).
    pub channels: u16,
}

impl WavFormat {
    /// Creates a format from raw parameters. Call [`WavFormat::validate`]
    /// before relying on the derived values.
    pub fn new(sample_rate: u32, bits_per_sample: u8, channels: u16) -> Self {
        Self {
            sample_rate,
            bits_per_sample,
            channels,
        }
    }

    /// 16-bit mono.
    pub fn mono(sample_rate: u32) -> Self {
        Self::new(sample_rate, 16, 1)
    }

    /// 16-bit stereo.
    pub fn stereo(sample_rate: u32) -> Self {
        Self::new(sample_rate, 16, 2)
    }

    /// Returns a copy with a different bit depth.
    pub fn with_bits(self, bits_per_sample: u8) -> Self {
        Self {
            bits_per_sample,
            ..self
        }
    }

    /// Rejects bit depths that are not whole bytes and zero channel counts.
    pub fn validate(&self) -> WavResult<()> {
        if self.bits_per_sample == 0 || self.bits_per_sample % 8 != 0 {
            return Err(WavError::InvalidBitsPerSample {
                bits: self.bits_per_sample,
            });
        }
        if self.channels == 0 {
            return Err(WavError::InvalidChannelCount);
        }
        Ok(())
    }

    /// Bytes per sample for a single channel.
    pub fn bytes_per_sample(&self) -> u16 {
        u16::from(self.bits_per_sample / 8)
    }

    /// Bytes per sample frame (all channels). Wraps like the 16-bit field.
    pub fn block_align(&self) -> u16 {
        self.channels.wrapping_mul(self.bytes_per_sample())
    }

    /// Bytes per second. Wraps like the 32-bit field.
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate
            .wrapping_mul(u32::from(self.channels))
            .wrapping_mul(u32::from(self.bytes_per_sample()))
    }

    /// Builds the placeholder header for this format.
    pub fn header(&self) -> WavResult<WaveHeader> {
        WaveHeader::new(self.sample_rate, self.bits_per_sample, self.channels)
    }
}

impl Default for WavFormat {
    fn default() -> Self {
        Self::stereo(44100)
    }
}
