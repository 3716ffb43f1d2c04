#![no_main]

use libfuzzer_sys::fuzz_target;
use wavpatch::{emit, WavError};

fuzz_target!(|data: &[u8]| {
    if data.len() < 7 {
        return;
    }
    let sample_rate = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    let bits = data[4];
    let channels = u16::from_le_bytes([data[5], data[6]]);
    let payload = &data[7..];

    let mut out = Vec::new();
    match emit(&mut out, sample_rate, bits, channels, payload) {
        Ok(summary) => {
            assert_eq!(out.len(), 44 + payload.len());
            assert_eq!(&out[44..], payload);
            let riff = u32::from_le_bytes([out[4], out[5], out[6], out[7]]);
            let data_len = u32::from_le_bytes([out[40], out[41], out[42], out[43]]);
            assert_eq!(riff as usize, out.len() - 8);
            assert_eq!(data_len as usize, payload.len());
            assert_eq!(summary.data_length, data_len);
        }
        Err(WavError::InvalidBitsPerSample { .. }) => assert!(bits == 0 || bits % 8 != 0),
        Err(WavError::InvalidChannelCount) => assert_eq!(channels, 0),
        Err(e) => panic!("unexpected error from in-memory sink: {e}"),
    }
});
