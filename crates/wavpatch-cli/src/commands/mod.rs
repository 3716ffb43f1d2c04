//! Command implementations for the wavpatch CLI.

pub mod header;
pub mod json_output;
pub mod tone;
pub mod wrap;

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::path::Path;

use wavpatch::{EmitSummary, WavEmitter, WavResult};

/// Creates (or truncates) `path` and emits a WAV file into it.
pub(crate) fn write_wav_file(
    path: &Path,
    emitter: &WavEmitter,
    payload: &[u8],
) -> Result<EmitSummary> {
    // Reject bad formats and oversized payloads before touching the filesystem.
    emitter.format().validate()?;
    wavpatch::check_payload_len(payload.len() as u64)?;

    emit_to_path(path, |file| emitter.emit(file, payload))
}

/// Opens `path` for writing and runs `emit` against it. On failure the
/// partially written file is removed.
fn emit_to_path<F>(path: &Path, emit: F) -> Result<EmitSummary>
where
    F: FnOnce(&mut File) -> WavResult<EmitSummary>,
{
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;

    let result = emit(&mut file).map_err(anyhow::Error::from).and_then(|summary| {
        file.sync_all()
            .with_context(|| format!("Failed to sync output file: {}", path.display()))?;
        Ok(summary)
    });

    if result.is_err() {
        drop(file);
        if let Err(e) = fs::remove_file(path) {
            tracing::warn!(path = %path.display(), error = %e, "could not remove partial output");
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use wavpatch::{WavError, WriteAt};

    /// Accepts at most `limit` bytes per write.
    struct Capped<'a> {
        file: &'a mut File,
        limit: usize,
    }

    impl WriteAt for Capped<'_> {
        fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize> {
            let n = buf.len().min(self.limit);
            WriteAt::write_at(&mut *self.file, &buf[..n], offset)
        }
    }

    #[test]
    fn test_rejected_short_write_removes_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");
        fs::write(&path, b"previous contents").unwrap();

        let emitter = WavEmitter::default().strict();
        let err = emit_to_path(&path, |file| {
            emitter.emit(&mut Capped { file, limit: 44 }, &[0u8; 64])
        })
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<WavError>(),
            Some(WavError::ShortWrite {
                offset: 44,
                expected: 64,
                written: 44
            })
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_successful_emit_keeps_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");

        let summary = write_wav_file(&path, &WavEmitter::default(), &[0u8; 4]).unwrap();
        assert_eq!(summary.total_bytes(), 48);
        assert_eq!(fs::metadata(&path).unwrap().len(), 48);
    }
}
