//! Packing floating-point samples into PCM payload bytes.

use crate::error::{WavError, WavResult};

/// Interleaves per-channel sample slices into frame order.
///
/// Output length is `channels.len() * shortest_channel_len`.
pub fn interleave(channels: &[&[f64]]) -> Vec<f64> {
    let frames = channels.iter().map(|c| c.len()).min().unwrap_or(0);
    let mut out = Vec::with_capacity(frames * channels.len());

    for i in 0..frames {
        for channel in channels {
            out.push(channel[i]);
        }
    }

    out
}

/// Converts samples in [-1.0, 1.0] to little-endian PCM.
///
/// Values outside that range are clipped. 8-bit output is unsigned with a
/// midpoint of 128; wider depths are signed two's complement.
pub fn samples_to_pcm(samples: &[f64], bits_per_sample: u8) -> WavResult<Vec<u8>> {
    let bytes = match bits_per_sample {
        8 => 1,
        16 => 2,
        24 => 3,
        32 => 4,
        bits => return Err(WavError::InvalidBitsPerSample { bits }),
    };
    let mut pcm = Vec::with_capacity(samples.len() * bytes);

    for &sample in samples {
        let clipped = sample.clamp(-1.0, 1.0);
        match bits_per_sample {
            8 => pcm.push((clipped * 127.0).round() as i16 as u8 ^ 0x80),
            16 => {
                let value = (clipped * f64::from(i16::MAX)).round() as i16;
                pcm.extend_from_slice(&value.to_le_bytes());
            }
            24 => {
                let value = (clipped * 8_388_607.0).round() as i32;
                pcm.extend_from_slice(&value.to_le_bytes()[..3]);
            }
            _ => {
                let value = (clipped * f64::from(i32::MAX)).round() as i32;
                pcm.extend_from_slice(&value.to_le_bytes());
            }
        }
    }

    Ok(pcm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_interleave_truncates_to_shortest() {
        let left = [0.1, 0.2, 0.3];
        let right = [-0.1, -0.2];
        assert_eq!(interleave(&[&left[..], &right[..]]), vec![0.1, -0.1, 0.2, -0.2]);
        assert!(interleave(&[]).is_empty());
    }

    #[test]
    fn test_pcm16_values() {
        let pcm = samples_to_pcm(&[0.0, 1.0, -1.0], 16).unwrap();
        assert_eq!(pcm.len(), 6);
        assert_eq!(i16::from_le_bytes([pcm[0], pcm[1]]), 0);
        assert_eq!(i16::from_le_bytes([pcm[2], pcm[3]]), 32767);
        assert_eq!(i16::from_le_bytes([pcm[4], pcm[5]]), -32767);
    }

    #[test]
    fn test_pcm8_is_offset_binary() {
        let pcm = samples_to_pcm(&[0.0, 1.0, -1.0], 8).unwrap();
        assert_eq!(pcm, vec![128, 255, 1]);
    }

    #[test]
    fn test_pcm24_packs_three_bytes() {
        let pcm = samples_to_pcm(&[1.0, -1.0], 24).unwrap();
        assert_eq!(pcm, vec![0xFF, 0xFF, 0x7F, 0x01, 0x00, 0x80]);
    }

    #[test]
    fn test_pcm32_width() {
        let pcm = samples_to_pcm(&[0.5; 3], 32).unwrap();
        assert_eq!(pcm.len(), 12);
    }

    #[test]
    fn test_clipping() {
        let pcm = samples_to_pcm(&[2.0, -2.0], 16).unwrap();
        assert_eq!(i16::from_le_bytes([pcm[0], pcm[1]]), 32767);
        assert_eq!(i16::from_le_bytes([pcm[2], pcm[3]]), -32767);
    }

    #[test]
    fn test_unsupported_depth() {
        assert!(matches!(
            samples_to_pcm(&[0.0], 40),
            Err(WavError::InvalidBitsPerSample { bits: 40 })
        ));
    }
}
