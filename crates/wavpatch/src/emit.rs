//! WAV write protocol.
//!
//! 1. Write the placeholder header at offset 0.
//! 2. Write the payload at offset 44.
//! 3. Patch the RIFF length (offset 4) and data length (offset 40) from the
//!    byte counts the sink actually reported.
//!
//! Any failed write aborts the sequence; nothing after it is attempted.

use serde::Serialize;

use crate::error::{WavError, WavResult};
use crate::format::WavFormat;
use crate::header::{DATA_LENGTH_OFFSET, HEADER_SIZE, RIFF_LENGTH_OFFSET, RIFF_PREAMBLE};
use crate::patch::{PatchList, ShortWritePolicy};
use crate::sink::WriteAt;

/// Largest payload whose total file size still fits the 32-bit RIFF fields.
pub const MAX_PAYLOAD: u64 = u32::MAX as u64 - HEADER_SIZE as u64;

/// Fails with [`WavError::PayloadTooLarge`] when `len` exceeds [`MAX_PAYLOAD`].
pub fn check_payload_len(len: u64) -> WavResult<()> {
    if len > MAX_PAYLOAD {
        return Err(WavError::PayloadTooLarge { len });
    }
    Ok(())
}

/// Byte counts reported by the sink for the two body writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrittenSizes {
    pub header: u64,
    pub payload: u64,
}

impl WrittenSizes {
    pub fn total(&self) -> u64 {
        self.header + self.payload
    }

    /// `total - 8`, wrapping like the 32-bit field.
    pub fn riff_length(&self) -> u32 {
        (self.total() as u32).wrapping_sub(RIFF_PREAMBLE as u32)
    }

    /// `total - 44`, wrapping like the 32-bit field.
    pub fn data_length(&self) -> u32 {
        (self.total() as u32).wrapping_sub(HEADER_SIZE as u32)
    }
}

/// Outcome of a completed emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmitSummary {
    /// Header bytes the sink accepted (44 unless a short write was tolerated).
    pub header_bytes: u64,
    /// Payload bytes the sink accepted.
    pub payload_bytes: u64,
    /// Value patched at offset 4.
    pub riff_length: u32,
    /// Value patched at offset 40.
    pub data_length: u32,
}

impl EmitSummary {
    pub fn total_bytes(&self) -> u64 {
        self.header_bytes + self.payload_bytes
    }
}

/// Patches for the two WAVE length fields.
pub fn length_patches() -> PatchList<WrittenSizes> {
    let mut patches = PatchList::new();
    patches
        .push_u32_le(RIFF_LENGTH_OFFSET, WrittenSizes::riff_length)
        .push_u32_le(DATA_LENGTH_OFFSET, WrittenSizes::data_length);
    patches
}

/// Writes canonical WAV files for one format.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavEmitter {
    format: WavFormat,
    short_writes: ShortWritePolicy,
}

impl WavEmitter {
    pub fn new(format: WavFormat) -> Self {
        Self {
            format,
            short_writes: ShortWritePolicy::default(),
        }
    }

    /// Sets how short writes are handled.
    pub fn short_writes(mut self, policy: ShortWritePolicy) -> Self {
        self.short_writes = policy;
        self
    }

    /// Shortcut for `short_writes(ShortWritePolicy::Reject)`.
    pub fn strict(self) -> Self {
        self.short_writes(ShortWritePolicy::Reject)
    }

    pub fn format(&self) -> &WavFormat {
        &self.format
    }

    /// Writes header, payload and length patches to `sink`.
    pub fn emit<S: WriteAt + ?Sized>(&self, sink: &mut S, payload: &[u8]) -> WavResult<EmitSummary> {
        let header = self.format.header()?;

        check_payload_len(payload.len() as u64)?;

        let policy = self.short_writes;

        let image = header.encode();
        let header_written = sink.write_at(&image, 0).map_err(|e| WavError::sink(0, e))?;
        policy.check(0, image.len(), header_written)?;
        tracing::debug!(bytes = header_written, "wrote placeholder header");

        let data_offset = HEADER_SIZE as u64;
        let payload_written = sink
            .write_at(payload, data_offset)
            .map_err(|e| WavError::sink(data_offset, e))?;
        policy.check(data_offset, payload.len(), payload_written)?;
        tracing::debug!(bytes = payload_written, "wrote payload");

        let sizes = WrittenSizes {
            header: header_written as u64,
            payload: payload_written as u64,
        };
        length_patches().apply(sink, &sizes, policy)?;

        let summary = EmitSummary {
            header_bytes: sizes.header,
            payload_bytes: sizes.payload,
            riff_length: sizes.riff_length(),
            data_length: sizes.data_length(),
        };
        tracing::debug!(
            riff_length = summary.riff_length,
            data_length = summary.data_length,
            "patched length fields"
        );
        Ok(summary)
    }
}

/// Writes a canonical PCM WAV file to `sink` with the default (tolerant)
/// short-write policy.
///
/// # Arguments
/// * `sink` - Positioned-write destination
/// * `sample_rate` - Sample rate in Hz
/// * `bits_per_sample` - Positive multiple of 8
/// * `channels` - At least 1
/// * `payload` - Raw interleaved PCM bytes
pub fn emit<S: WriteAt + ?Sized>(
    sink: &mut S,
    sample_rate: u32,
    bits_per_sample: u8,
    channels: u16,
    payload: &[u8],
) -> WavResult<EmitSummary> {
    WavEmitter::new(WavFormat::new(sample_rate, bits_per_sample, channels)).emit(sink, payload)
}
