//! Byte-level framing machinery.
//!
//! This module is intended for applications that need fine control over
//! framing, such as forwarding raw frames or layering their own dispatch. See
//! [`crate::avec`] for the decoder covering the common case.
//!
//! # Architecture
//!
//! Bytes pass through three stages, strictly forward:
//!
//! - A [`sync::Synchronizer`] scans for the two-byte marker pair that opens
//! every frame.
//!
//! - A [`buffer::FrameBuffer`] captures everything from one marker up to the
//! next, marker bytes included. It is fixed-capacity and never grows.
//!
//! - [`header::Frame::parse`] interprets a captured frame, locating the header
//! fields, the payload and the trailing checksum.
//!
//! The [`Framer`] joins the first two stages. A frame is only complete once
//! the *next* frame's marker arrives, so completion always lags the stream by
//! one frame, and the final frame of a stream is held until [`Framer::flush`]
//! is called.
//!
//! Checksums are carried on the wire but not verified here. A helper
//! implementing the UBX checksum is provided in the [`check`] module.

use tracing::warn;

pub mod buffer;
pub mod check;
pub mod header;
pub mod sync;

use buffer::{BufferError, FrameBuffer};
use sync::{SyncEvent, Synchronizer};

/// Default frame buffer capacity, in bytes.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Frames holding this many bytes or fewer are discarded rather than
/// completed, as they cannot extend past the marker pair.
const STUB_LEN: usize = 2;

/// Synchronizer and frame buffer, producing completed frames.
#[derive(Debug)]
pub struct Framer<const N: usize = DEFAULT_CAPACITY> {
    sync: Synchronizer,
    buffer: FrameBuffer<N>,
    buffering: bool,
    // Set while the buffer holds a completed frame lent out to the caller.
    release: Option<Release>,
}

/// What to do with the buffer once a completed frame is released.
#[derive(Debug, Clone, Copy)]
enum Release {
    /// The frame was completed by a marker, which opens the next frame.
    Restart,
    /// The frame was flushed.
    Discard,
}

impl<const N: usize> Default for Framer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Framer<N> {
    /// Create a framer waiting for its first marker.
    pub const fn new() -> Self {
        const { assert!(N > STUB_LEN, "frame capacity must exceed the marker pair") };

        Self {
            sync: Synchronizer::new(),
            buffer: FrameBuffer::new(),
            buffering: false,
            release: None,
        }
    }

    /// Feed a single byte.
    ///
    /// Returns the previous frame when this byte opens a new one. The frame
    /// borrows the framer's buffer and is released by the next call. On
    /// overflow the pending frame is dropped and the framer resynchronizes
    /// from scratch.
    pub fn feed(&mut self, byte: u8) -> Result<Option<&[u8]>, BufferError> {
        self.settle();

        if let SyncEvent::MarkerA = self.sync.advance(byte) {
            self.buffering = true;

            if self.buffer.len() > STUB_LEN {
                self.release = Some(Release::Restart);
                return Ok(Some(self.buffer.as_slice()));
            }
            self.buffer.clear();
        }

        if self.buffering {
            if let Err(err) = self.buffer.append(byte) {
                warn!(capacity = N, "frame buffer overflow, resynchronizing");
                self.reset();
                return Err(err);
            }
        }

        Ok(None)
    }

    /// Force completion of the pending frame.
    ///
    /// Returns the pending frame if it extends past the marker pair, and
    /// leaves the framer waiting for the next marker.
    pub fn flush(&mut self) -> Option<&[u8]> {
        self.settle();

        let pending = self.buffer.len() > STUB_LEN;

        self.sync.reset();
        self.buffering = false;

        if pending {
            // Released by the next call, like a frame completed by `feed`.
            self.release = Some(Release::Discard);
            Some(self.buffer.as_slice())
        } else {
            self.buffer.clear();
            None
        }
    }

    /// Discard the pending frame and wait for the next marker.
    pub fn reset(&mut self) {
        self.sync.reset();
        self.buffer.clear();
        self.buffering = false;
        self.release = None;
    }

    /// Number of bytes captured for the pending frame.
    pub fn pending_len(&self) -> usize {
        match self.release {
            Some(Release::Restart) => 1,
            Some(Release::Discard) => 0,
            None => self.buffer.len(),
        }
    }

    /// Current synchronizer state.
    pub fn state(&self) -> sync::SyncState {
        self.sync.state()
    }

    /// Release a frame completed by the previous call.
    fn settle(&mut self) {
        match self.release.take() {
            Some(Release::Restart) => self.buffer.restart(sync::MARKER_A),
            Some(Release::Discard) => self.buffer.clear(),
            None => {}
        }
    }
}
