//! Two-phase patching.
//!
//! Phase one writes a template with placeholder fields at known offsets.
//! Phase two runs this list once the values those fields depend on are known,
//! overwriting each offset in place.

use std::fmt;

use crate::error::{WavError, WavResult};
use crate::sink::WriteAt;

/// What to do when a sink accepts fewer bytes than requested without
/// reporting an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShortWritePolicy {
    /// Keep going and derive sizes from the bytes actually written.
    #[default]
    Tolerate,
    /// Fail with [`WavError::ShortWrite`].
    Reject,
}

impl ShortWritePolicy {
    /// Applies the policy to one write result.
    pub fn check(self, offset: u64, expected: usize, written: usize) -> WavResult<()> {
        if written >= expected {
            return Ok(());
        }
        match self {
            ShortWritePolicy::Tolerate => {
                tracing::warn!(offset, expected, written, "short write tolerated");
                Ok(())
            }
            ShortWritePolicy::Reject => Err(WavError::ShortWrite {
                offset,
                expected,
                written,
            }),
        }
    }
}

type Encoder<C> = Box<dyn Fn(&C) -> Vec<u8>>;

/// Ordered list of `(offset, encoder)` pairs applied after the body write.
pub struct PatchList<C> {
    patches: Vec<(u64, Encoder<C>)>,
}

impl<C> PatchList<C> {
    pub fn new() -> Self {
        Self {
            patches: Vec::new(),
        }
    }

    /// Registers an encoder whose output overwrites the bytes at `offset`.
    pub fn push<F>(&mut self, offset: u64, encode: F) -> &mut Self
    where
        F: Fn(&C) -> Vec<u8> + 'static,
    {
        self.patches.push((offset, Box::new(encode)));
        self
    }

    /// Registers a 4-byte little-endian field.
    pub fn push_u32_le<F>(&mut self, offset: u64, value: F) -> &mut Self
    where
        F: Fn(&C) -> u32 + 'static,
    {
        self.push(offset, move |ctx| value(ctx).to_le_bytes().to_vec())
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Offsets in application order.
    pub fn offsets(&self) -> impl Iterator<Item = u64> + '_ {
        self.patches.iter().map(|(offset, _)| *offset)
    }

    /// Writes every patch in insertion order, stopping at the first failure.
    pub fn apply<S: WriteAt + ?Sized>(
        &self,
        sink: &mut S,
        ctx: &C,
        policy: ShortWritePolicy,
    ) -> WavResult<()> {
        for (offset, encode) in &self.patches {
            let bytes = encode(ctx);
            tracing::debug!(offset = *offset, len = bytes.len(), "applying patch");
            let written = sink
                .write_at(&bytes, *offset)
                .map_err(|e| WavError::sink(*offset, e))?;
            policy.check(*offset, bytes.len(), written)?;
        }
        Ok(())
    }
}

impl<C> Default for PatchList<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for PatchList<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatchList")
            .field("offsets", &self.offsets().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io;

    struct Broken;

    impl WriteAt for Broken {
        fn write_at(&mut self, _buf: &[u8], _offset: u64) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
        }
    }

    struct HalfSink(Vec<u8>);

    impl WriteAt for HalfSink {
        fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize> {
            let half = buf.len() / 2;
            self.0.write_at(&buf[..half], offset)
        }
    }

    #[test]
    fn test_apply_in_insertion_order() {
        let mut list = PatchList::<u32>::new();
        list.push_u32_le(4, |n| n + 1).push(0, |_| b"AB".to_vec());

        let mut buf = vec![0xFFu8; 8];
        list.apply(&mut buf, &9, ShortWritePolicy::Reject).unwrap();

        assert_eq!(buf, vec![b'A', b'B', 0xFF, 0xFF, 10, 0, 0, 0]);
        assert_eq!(list.offsets().collect::<Vec<_>>(), vec![4, 0]);
    }

    #[test]
    fn test_later_patch_overwrites_earlier() {
        let mut list = PatchList::<()>::new();
        list.push(0, |_| vec![1, 1]).push(1, |_| vec![2]);

        let mut buf: Vec<u8> = Vec::new();
        list.apply(&mut buf, &(), ShortWritePolicy::Tolerate).unwrap();
        assert_eq!(buf, vec![1, 2]);
    }

    #[test]
    fn test_sink_error_carries_offset() {
        let mut list = PatchList::<()>::new();
        list.push_u32_le(40, |_| 0);

        let err = list
            .apply(&mut Broken, &(), ShortWritePolicy::Tolerate)
            .unwrap_err();
        assert!(matches!(err, WavError::SinkWrite { offset: 40, .. }));
    }

    #[test]
    fn test_short_write_policy() {
        let mut list = PatchList::<()>::new();
        list.push_u32_le(4, |_| 7);

        let mut sink = HalfSink(Vec::new());
        list.apply(&mut sink, &(), ShortWritePolicy::Tolerate).unwrap();
        assert_eq!(sink.0, vec![0, 0, 0, 0, 7, 0]);

        let err = list
            .apply(&mut sink, &(), ShortWritePolicy::Reject)
            .unwrap_err();
        assert!(matches!(
            err,
            WavError::ShortWrite {
                offset: 4,
                expected: 4,
                written: 2
            }
        ));
    }

    #[test]
    fn test_empty_list_is_noop() {
        let list = PatchList::<()>::default();
        assert!(list.is_empty());
        let mut buf: Vec<u8> = Vec::new();
        list.apply(&mut buf, &(), ShortWritePolicy::Reject).unwrap();
        assert!(buf.is_empty());
    }
}
