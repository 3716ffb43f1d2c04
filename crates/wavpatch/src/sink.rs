//! Positioned-write sinks.
//!
//! The writer never appends sequentially. Every write names its byte offset,
//! which is what lets the length fields be patched after the payload lands.

use std::fs::File;
use std::io::{self, Seek, SeekFrom, Write};

/// A destination that accepts writes at explicit byte offsets.
///
/// Returns the number of bytes accepted, which may be fewer than `buf.len()`.
pub trait WriteAt {
    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize>;
}

impl<S: WriteAt + ?Sized> WriteAt for &mut S {
    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize> {
        (**self).write_at(buf, offset)
    }
}

impl WriteAt for File {
    #[cfg(unix)]
    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize> {
        std::os::unix::fs::FileExt::write_at(self, buf, offset)
    }

    #[cfg(windows)]
    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize> {
        std::os::windows::fs::FileExt::seek_write(self, buf, offset)
    }

    #[cfg(not(any(unix, windows)))]
    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize> {
        self.seek(SeekFrom::Start(offset))?;
        self.write(buf)
    }
}

/// In-memory sink. Writes past the end zero-fill the gap; writes inside the
/// buffer overwrite in place.
impl WriteAt for Vec<u8> {
    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize> {
        let start = usize::try_from(offset)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "offset exceeds address space"))?;
        let end = start
            .checked_add(buf.len())
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "write overflows buffer"))?;

        if self.len() < end {
            self.resize(end, 0);
        }
        self[start..end].copy_from_slice(buf);
        Ok(buf.len())
    }
}

/// Adapts any seekable writer (`Cursor`, `BufWriter<File>`, ...) into a
/// positioned-write sink.
#[derive(Debug)]
pub struct SeekSink<W> {
    inner: W,
}

impl<W: Write + Seek> SeekSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Flushes and returns the wrapped writer.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<W: Write + Seek> WriteAt for SeekSink<W> {
    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize> {
        self.inner.seek(SeekFrom::Start(offset))?;
        self.inner.write_all(buf)?;
        Ok(buf.len())
    }
}
