//! Canonical 44-byte RIFF/WAVE PCM header.
//!
//! The header is encoded field by field in offset order. Nothing here depends
//! on in-memory struct layout.

use byteorder::{ByteOrder, LittleEndian};
use std::io::{self, Write};

use crate::error::WavResult;
use crate::format::WavFormat;

/// Size of the canonical PCM header in bytes.
pub const HEADER_SIZE: usize = 44;

/// Offset of the RIFF chunk length field.
pub const RIFF_LENGTH_OFFSET: u64 = 4;

/// Offset of the data chunk length field.
pub const DATA_LENGTH_OFFSET: u64 = 40;

/// Bytes not counted by the RIFF length ("RIFF" tag plus the length itself).
pub const RIFF_PREAMBLE: u64 = 8;

/// Length of the fmt chunk body for plain PCM.
pub const PCM_FMT_LENGTH: u32 = 16;

/// Format code for linear PCM.
pub const WAVE_FORMAT_PCM: u16 = 1;

/// RIFF container tag.
pub const RIFF_TAG: &[u8; 4] = b"RIFF";
/// WAVE form type.
pub const WAVE_TAG: &[u8; 4] = b"WAVE";
/// Format chunk tag (note the trailing space).
pub const FMT_TAG: &[u8; 4] = b"fmt ";
/// Data chunk tag.
pub const DATA_TAG: &[u8; 4] = b"data";

/// In-memory WAVE header.
///
/// Only the three format parameters come from the caller; everything else is
/// fixed or derived. The two length fields start at zero and are patched in the
/// sink once the payload has been written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveHeader {
    riff_length: u32,
    num_channels: u16,
    sample_rate: u32,
    byte_rate: u32,
    block_align: u16,
    bits_per_sample: u16,
    data_length: u32,
}

impl WaveHeader {
    /// Builds a placeholder header, failing on a bit depth that is not a whole
    /// number of bytes or on zero channels.
    pub fn new(sample_rate: u32, bits_per_sample: u8, channels: u16) -> WavResult<Self> {
        let format = WavFormat::new(sample_rate, bits_per_sample, channels);
        format.validate()?;

        Ok(Self {
            riff_length: 0,
            num_channels: channels,
            sample_rate,
            byte_rate: format.byte_rate(),
            block_align: format.block_align(),
            bits_per_sample: u16::from(bits_per_sample),
            data_length: 0,
        })
    }

    /// Format parameters this header was built from.
    pub fn format(&self) -> WavFormat {
        WavFormat::new(
            self.sample_rate,
            self.bits_per_sample as u8,
            self.num_channels,
        )
    }

    pub fn riff_length(&self) -> u32 {
        self.riff_length
    }

    pub fn num_channels(&self) -> u16 {
        self.num_channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn byte_rate(&self) -> u32 {
        self.byte_rate
    }

    pub fn block_align(&self) -> u16 {
        self.block_align
    }

    pub fn bits_per_sample(&self) -> u16 {
        self.bits_per_sample
    }

    pub fn data_length(&self) -> u32 {
        self.data_length
    }

    /// Serializes the header into its 44-byte little-endian image.
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];

        // RIFF chunk descriptor
        buf[0..4].copy_from_slice(RIFF_TAG);
        LittleEndian::write_u32(&mut buf[4..8], self.riff_length);
        buf[8..12].copy_from_slice(WAVE_TAG);

        // fmt sub-chunk
        buf[12..16].copy_from_slice(FMT_TAG);
        LittleEndian::write_u32(&mut buf[16..20], PCM_FMT_LENGTH);
        LittleEndian::write_u16(&mut buf[20..22], WAVE_FORMAT_PCM);
        LittleEndian::write_u16(&mut buf[22..24], self.num_channels);
        LittleEndian::write_u32(&mut buf[24..28], self.sample_rate);
        LittleEndian::write_u32(&mut buf[28..32], self.byte_rate);
        LittleEndian::write_u16(&mut buf[32..34], self.block_align);
        LittleEndian::write_u16(&mut buf[34..36], self.bits_per_sample);

        // data sub-chunk
        buf[36..40].copy_from_slice(DATA_TAG);
        LittleEndian::write_u32(&mut buf[40..44], self.data_length);

        buf
    }

    /// Writes the encoded header to a sequential writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WavError;
    use pretty_assertions::assert_eq;

    fn u16_at(buf: &[u8], offset: usize) -> u16 {
        LittleEndian::read_u16(&buf[offset..offset + 2])
    }

    fn u32_at(buf: &[u8], offset: usize) -> u32 {
        LittleEndian::read_u32(&buf[offset..offset + 4])
    }

    #[test]
    fn test_tags_at_fixed_offsets() {
        for &bits in &[8u8, 16, 24, 32] {
            for &channels in &[1u16, 2, 6] {
                let bytes = WaveHeader::new(44100, bits, channels).unwrap().encode();
                assert_eq!(bytes.len(), HEADER_SIZE);
                assert_eq!(&bytes[0..4], b"RIFF");
                assert_eq!(&bytes[8..12], b"WAVE");
                assert_eq!(&bytes[12..16], b"fmt ");
                assert_eq!(&bytes[36..40], b"data");
            }
        }
    }

    #[test]
    fn test_cd_quality_layout() {
        let header = WaveHeader::new(44100, 16, 2).unwrap();
        let bytes = header.encode();

        assert_eq!(u32_at(&bytes, 4), 0);
        assert_eq!(u32_at(&bytes, 16), 16);
        assert_eq!(u16_at(&bytes, 20), 1);
        assert_eq!(u16_at(&bytes, 22), 2);
        assert_eq!(u32_at(&bytes, 24), 44100);
        assert_eq!(u32_at(&bytes, 28), 176400);
        assert_eq!(u16_at(&bytes, 32), 4);
        assert_eq!(u16_at(&bytes, 34), 16);
        assert_eq!(u32_at(&bytes, 40), 0);
    }

    #[test]
    fn test_least_significant_byte_first() {
        let bytes = WaveHeader::new(44100, 16, 1).unwrap().encode();
        // 44100 = 0x0000AC44
        assert_eq!(&bytes[24..28], &[0x44u8, 0xAC, 0x00, 0x00]);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let header = WaveHeader::new(96000, 24, 6).unwrap();
        assert_eq!(header.encode(), header.encode());
    }

    #[test]
    fn test_write_to_matches_encode() {
        let header = WaveHeader::new(8000, 8, 1).unwrap();
        let mut out: Vec<u8> = Vec::new();
        header.write_to(&mut out).unwrap();
        assert_eq!(out, header.encode().to_vec());
    }

    #[test]
    fn test_fail_fast_on_bad_parameters() {
        assert!(matches!(
            WaveHeader::new(44100, 12, 2),
            Err(WavError::InvalidBitsPerSample { bits: 12 })
        ));
        assert!(matches!(
            WaveHeader::new(44100, 16, 0),
            Err(WavError::InvalidChannelCount)
        ));
    }

    #[test]
    fn test_format_round_trip() {
        let header = WaveHeader::new(22050, 24, 6).unwrap();
        assert_eq!(header.format(), WavFormat::new(22050, 24, 6));
        assert_eq!(header.block_align(), 18);
        assert_eq!(header.byte_rate(), 22050 * 18);
    }
}
