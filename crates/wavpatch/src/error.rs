//! Error types for WAV writing.

use thiserror::Error;

/// Result type for WAV operations.
pub type WavResult<T> = Result<T, WavError>;

/// Errors that can occur while building or writing a WAV file.
#[derive(Debug, Error)]
pub enum WavError {
    /// Bit depth is zero or not a whole number of bytes.
    #[error("invalid bits per sample: {bits} (must be a positive multiple of 8)")]
    InvalidBitsPerSample {
        /// The rejected bit depth.
        bits: u8,
    },

    /// Zero channels requested.
    #[error("invalid channel count: 0 (at least one channel is required)")]
    InvalidChannelCount,

    /// Header plus payload does not fit the 32-bit RIFF length fields.
    #[error("payload of {len} bytes does not fit in a 32-bit RIFF container")]
    PayloadTooLarge {
        /// Payload length in bytes.
        len: u64,
    },

    /// The sink reported an error for a positioned write.
    #[error("sink write at offset {offset} failed: {source}")]
    SinkWrite {
        /// Offset of the failed write.
        offset: u64,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The sink accepted fewer bytes than requested (strict mode only).
    #[error("short write at offset {offset}: {written} of {expected} bytes")]
    ShortWrite {
        /// Offset of the short write.
        offset: u64,
        /// Bytes requested.
        expected: usize,
        /// Bytes the sink reported as written.
        written: usize,
    },
}

impl WavError {
    /// Wraps an I/O error from a write at `offset`.
    pub fn sink(offset: u64, source: std::io::Error) -> Self {
        Self::SinkWrite { offset, source }
    }

    /// Stable error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            WavError::InvalidBitsPerSample { .. } => "WAV_001",
            WavError::InvalidChannelCount => "WAV_002",
            WavError::PayloadTooLarge { .. } => "WAV_003",
            WavError::SinkWrite { .. } => "WAV_004",
            WavError::ShortWrite { .. } => "WAV_005",
        }
    }
}
