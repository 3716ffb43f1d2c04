//! wavpatch - canonical RIFF/WAVE PCM writer.
//!
//! Writes a fixed 44-byte header followed by raw PCM data. The two length
//! fields are written as placeholders first and patched once the payload has
//! been written, so the payload length never has to be known up front. The
//! only requirement on the destination is that it accepts writes at explicit
//! offsets ([`WriteAt`]).
//!
//! # Example
//!
//! ```
//! use wavpatch::emit;
//!
//! let mut out: Vec<u8> = Vec::new();
//! let summary = emit(&mut out, 44100, 16, 2, &[0u8; 8]).unwrap();
//!
//! assert_eq!(out.len(), 52);
//! assert_eq!(summary.riff_length, 44);
//! assert_eq!(summary.data_length, 8);
//! ```
//!
//! # Module Structure
//!
//! - [`header`]: 44-byte header model and encoder
//! - [`format`]: caller-supplied format parameters and validation
//! - [`sink`]: positioned-write destinations (files, memory, seekable writers)
//! - [`patch`]: offset-addressed patch list applied after the body write
//! - [`emit`]: the write protocol
//! - [`pcm`]: float-to-PCM sample packing

pub mod emit;
pub mod error;
pub mod format;
pub mod header;
pub mod patch;
pub mod pcm;
pub mod sink;

pub use emit::{check_payload_len, emit, EmitSummary, WavEmitter, WrittenSizes, MAX_PAYLOAD};
pub use error::{WavError, WavResult};
pub use format::WavFormat;
pub use header::{WaveHeader, HEADER_SIZE};
pub use patch::{PatchList, ShortWritePolicy};
pub use sink::{SeekSink, WriteAt};
