//! Fixed-capacity frame storage.

use thiserror::Error;

/// An error appending to a frame buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BufferError {
    /// No marker arrived before the buffer filled.
    #[error("Frame buffer overflow ({capacity} bytes).")]
    Overflow { capacity: usize },
}

/// Byte accumulator holding at most `N` bytes.
#[derive(Debug)]
pub struct FrameBuffer<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> Default for FrameBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> FrameBuffer<N> {
    pub const fn new() -> Self {
        Self { buf: [0; N], len: 0 }
    }

    /// Append a byte, failing without modification if the buffer is full.
    pub fn append(&mut self, byte: u8) -> Result<(), BufferError> {
        let slot = self
            .buf
            .get_mut(self.len)
            .ok_or(BufferError::Overflow { capacity: N })?;

        *slot = byte;
        self.len += 1;

        Ok(())
    }

    /// Discard the contents, leaving only `byte`.
    ///
    /// # Panics
    ///
    /// If the buffer has no capacity.
    pub fn restart(&mut self, byte: u8) {
        self.buf[0] = byte;
        self.len = 1;
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}
