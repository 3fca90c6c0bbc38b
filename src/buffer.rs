// src/buffer.rs
//! Fixed-capacity staging buffers for the copy loop.
//!
//! Two independent, ring-less buffers decouple source read granularity and
//! destination write granularity from split-boundary granularity:
//!
//! - [`ReadBuffer`] holds the most recent block read from the source and is
//!   drained through `filled`/`consumed` cursors before being refilled.
//! - [`WriteBuffer`] accumulates outbound bytes and is flushed when full,
//!   on segment rotation, and at end of stream.

use bytes::BytesMut;
use std::io::{Read, Write};

use crate::error::Result;

/// Default staging buffer capacity (4 MiB).
pub const DEFAULT_BUFFER_CAPACITY: usize = 4 * 1024 * 1024;

/// Source-side staging buffer.
///
/// Holds one block read from the source. `consumed` trails `filled`; the
/// buffer is refilled only once fully drained, replacing its contents.
pub struct ReadBuffer {
    buf: BytesMut,
    filled: usize,
    consumed: usize,
}

impl ReadBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        let mut buf = BytesMut::with_capacity(capacity);
        buf.resize(capacity, 0);
        ReadBuffer {
            buf,
            filled: 0,
            consumed: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Bytes read but not yet consumed.
    pub fn remaining(&self) -> usize {
        self.filled - self.consumed
    }

    /// True once every filled byte has been consumed.
    pub fn is_drained(&self) -> bool {
        self.consumed == self.filled
    }

    /// Replace the buffer contents with one read of up to
    /// `min(capacity, want)` bytes.
    ///
    /// Performs a single `read` call, so the result may be short; returns
    /// the number of bytes now filled. Zero means the reader is exhausted.
    pub fn refill(&mut self, reader: &mut impl Read, want: usize) -> Result<usize> {
        debug_assert!(self.is_drained(), "refill before buffer drained");
        let want = want.min(self.buf.len());
        let n = reader.read(&mut self.buf[..want])?;
        self.filled = n;
        self.consumed = 0;
        Ok(n)
    }

    /// The next `len` unconsumed bytes.
    ///
    /// # Panics
    ///
    /// Panics if `len > remaining()`.
    pub fn chunk(&self, len: usize) -> &[u8] {
        &self.buf[self.consumed..self.consumed + len]
    }

    /// Mark `len` bytes as consumed.
    pub fn advance(&mut self, len: usize) {
        debug_assert!(len <= self.remaining());
        self.consumed += len;
    }
}

/// Destination-side staging buffer.
///
/// Accumulates bytes until `filled == capacity` (or the caller forces a
/// flush), then writes the whole fill in one `write_all`.
pub struct WriteBuffer {
    buf: BytesMut,
    capacity: usize,
}

impl WriteBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        WriteBuffer {
            buf: BytesMut::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes accumulated and not yet flushed.
    pub fn filled(&self) -> usize {
        self.buf.len()
    }

    /// Space left before the buffer must be flushed.
    pub fn space(&self) -> usize {
        self.capacity - self.buf.len()
    }

    pub fn is_full(&self) -> bool {
        self.buf.len() == self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Append `bytes` to the buffer.
    ///
    /// The caller bounds its chunks by [`space`](Self::space); pushing past
    /// capacity is a logic error upstream.
    pub fn push(&mut self, bytes: &[u8]) {
        debug_assert!(bytes.len() <= self.space(), "push past capacity");
        self.buf.extend_from_slice(bytes);
    }

    /// Write the entire fill to `writer` and reset to empty.
    pub fn flush_to(&mut self, writer: &mut impl Write) -> Result<()> {
        if !self.buf.is_empty() {
            writer.write_all(&self.buf)?;
            self.buf.clear();
        }
        Ok(())
    }
}

// Omit the byte payloads from Debug output.
impl std::fmt::Debug for ReadBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadBuffer")
            .field("capacity", &self.capacity())
            .field("filled", &self.filled)
            .field("consumed", &self.consumed)
            .finish()
    }
}

impl std::fmt::Debug for WriteBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriteBuffer")
            .field("capacity", &self.capacity)
            .field("filled", &self.buf.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_buffer_refill_and_drain() {
        let mut source = Cursor::new(vec![1u8, 2, 3, 4, 5]);
        let mut buffer = ReadBuffer::with_capacity(4);

        assert!(buffer.is_drained());
        let n = buffer.refill(&mut source, 5).unwrap();
        assert_eq!(n, 4); // capped at capacity
        assert_eq!(buffer.remaining(), 4);

        assert_eq!(buffer.chunk(2), &[1, 2]);
        buffer.advance(2);
        assert_eq!(buffer.remaining(), 2);
        assert_eq!(buffer.chunk(2), &[3, 4]);
        buffer.advance(2);
        assert!(buffer.is_drained());

        let n = buffer.refill(&mut source, 4).unwrap();
        assert_eq!(n, 1);
        assert_eq!(buffer.chunk(1), &[5]);
    }

    #[test]
    fn test_read_buffer_want_caps_read() {
        let mut source = Cursor::new(vec![9u8; 100]);
        let mut buffer = ReadBuffer::with_capacity(64);

        let n = buffer.refill(&mut source, 3).unwrap();
        assert_eq!(n, 3);
        assert_eq!(buffer.remaining(), 3);
    }

    #[test]
    fn test_read_buffer_refill_at_eof() {
        let mut source = Cursor::new(Vec::<u8>::new());
        let mut buffer = ReadBuffer::with_capacity(8);

        let n = buffer.refill(&mut source, 8).unwrap();
        assert_eq!(n, 0);
        assert!(buffer.is_drained());
    }

    #[test]
    fn test_write_buffer_fill_and_flush() {
        let mut buffer = WriteBuffer::with_capacity(4);
        let mut sink = Vec::new();

        buffer.push(&[1, 2]);
        assert_eq!(buffer.filled(), 2);
        assert_eq!(buffer.space(), 2);
        assert!(!buffer.is_full());

        buffer.push(&[3, 4]);
        assert!(buffer.is_full());
        assert_eq!(buffer.space(), 0);

        buffer.flush_to(&mut sink).unwrap();
        assert_eq!(sink, vec![1, 2, 3, 4]);
        assert!(buffer.is_empty());
        assert_eq!(buffer.space(), 4);
    }

    #[test]
    fn test_write_buffer_flush_empty_is_noop() {
        let mut buffer = WriteBuffer::with_capacity(4);
        let mut sink = Vec::new();

        buffer.flush_to(&mut sink).unwrap();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_write_buffer_reuse_after_flush() {
        let mut buffer = WriteBuffer::with_capacity(2);
        let mut sink = Vec::new();

        buffer.push(&[1, 2]);
        buffer.flush_to(&mut sink).unwrap();
        buffer.push(&[3, 4]);
        buffer.flush_to(&mut sink).unwrap();

        assert_eq!(sink, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_debug_omits_payload() {
        let buffer = WriteBuffer::with_capacity(1024);
        let debug_str = format!("{:?}", buffer);
        assert!(debug_str.contains("capacity: 1024"));
        assert!(debug_str.contains("filled: 0"));
    }
}
