//! Byte-at-a-time decoder dispatching to registered handlers.

use core::fmt;

use thiserror::Error;
use tracing::{debug, trace};

use crate::sans::{
    DEFAULT_CAPACITY, Framer,
    buffer::BufferError,
    header::{Frame, FrameError, FrameHeader},
};

use super::{Message, MessageKind, NavClock, NavPvt, NavStatus};

/// Errors discarding a frame.
///
/// None of these are fatal: the decoder has resynchronized by the time one is
/// returned, and continues with the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// No marker arrived before the frame buffer filled.
    #[error("Frame buffer overflow ({capacity} bytes).")]
    BufferOverflow { capacity: usize },
    /// Frame too short to hold a header and checksum.
    #[error("Frame too short ({len} bytes).")]
    Truncated { len: usize },
    /// Class and id of the frame are not recognized.
    #[error("Unrecognized message (class {class:#04x}, id {id:#04x}).")]
    UnrecognizedMessage { class: u8, id: u8 },
    /// Captured payload size does not match the record size of its kind.
    #[error("Payload of {kind:?} has {found} bytes, expected {expected}.")]
    PayloadSizeMismatch {
        kind: MessageKind,
        expected: usize,
        found: usize,
    },
    /// The checksum hook rejected the frame.
    #[error("Checksum mismatch (class {class:#04x}, id {id:#04x}, found {found:02x?}).")]
    Checksum { class: u8, id: u8, found: [u8; 2] },
}

impl From<BufferError> for Error {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::Overflow { capacity } => Self::BufferOverflow { capacity },
        }
    }
}

impl From<FrameError> for Error {
    fn from(err: FrameError) -> Self {
        match err {
            FrameError::TooShort { len } => Self::Truncated { len },
        }
    }
}

/// Hook checking the bytes covered by a frame's checksum against the checksum
/// found on the wire.
///
/// See [`crate::sans::check::verify`] for the standard implementation.
pub type ChecksumHook = fn(covered: &[u8], found: [u8; 2]) -> bool;

/// Counts of completed and discarded frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    /// Frames completed, whether dispatched or not.
    pub frames: u64,
    /// Records decoded and dispatched.
    pub dispatched: u64,
    pub overflows: u64,
    pub truncated: u64,
    pub unrecognized: u64,
    pub size_mismatches: u64,
    pub checksum_failures: u64,
}

impl Stats {
    fn add_error(&mut self, err: &Error) {
        let counter = match err {
            Error::BufferOverflow { .. } => &mut self.overflows,
            Error::Truncated { .. } => &mut self.truncated,
            Error::UnrecognizedMessage { .. } => &mut self.unrecognized,
            Error::PayloadSizeMismatch { .. } => &mut self.size_mismatches,
            Error::Checksum { .. } => &mut self.checksum_failures,
        };
        *counter += 1;
    }
}

/// Decoder for a single byte stream.
///
/// Handlers are invoked synchronously from within [`Decoder::feed`] (or
/// [`Decoder::flush`]) and must not block. Each decoded record is also kept
/// as the latest of its kind, whether or not a handler is registered.
///
/// A frame completes when the next frame's marker arrives, so the last frame
/// of a stream is only delivered by [`Decoder::flush`].
pub struct Decoder<'a, const N: usize = DEFAULT_CAPACITY> {
    framer: Framer<N>,
    dispatcher: Dispatcher<'a>,
}

impl<const N: usize> fmt::Debug for Decoder<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoder")
            .field("framer", &self.framer)
            .field("stats", &self.dispatcher.stats)
            .finish_non_exhaustive()
    }
}

impl<const N: usize> Default for Decoder<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, const N: usize> Decoder<'a, N> {
    /// Create a decoder with no handlers, waiting for its first marker.
    pub fn new() -> Self {
        Self {
            framer: Framer::new(),
            dispatcher: Dispatcher::default(),
        }
    }

    /// Feed a single byte, in arrival order.
    ///
    /// Returns the kind of message dispatched, if this byte completed a frame
    /// that decoded successfully.
    pub fn feed(&mut self, byte: u8) -> Result<Option<MessageKind>, Error> {
        match self.framer.feed(byte) {
            Ok(Some(frame)) => self.dispatcher.dispatch(frame).map(Some),
            Ok(None) => Ok(None),
            Err(err) => {
                let err = Error::from(err);
                self.dispatcher.stats.add_error(&err);
                Err(err)
            }
        }
    }

    /// Decode the pending frame without waiting for the next marker.
    ///
    /// Intended for the end of a stream. The decoder is left waiting for a
    /// marker.
    pub fn flush(&mut self) -> Result<Option<MessageKind>, Error> {
        match self.framer.flush() {
            Some(frame) => self.dispatcher.dispatch(frame).map(Some),
            None => Ok(None),
        }
    }

    /// Discard the pending frame and wait for the next marker.
    ///
    /// Handlers, latest records and statistics are kept.
    pub fn reset(&mut self) {
        self.framer.reset();
    }

    /// Register the `NAV-STATUS` handler, replacing any previous one.
    pub fn on_nav_status(&mut self, handler: &'a mut dyn FnMut(NavStatus)) {
        self.dispatcher.nav_status.handler = Some(handler);
    }

    /// Register the `NAV-PVT` handler, replacing any previous one.
    pub fn on_nav_pvt(&mut self, handler: &'a mut dyn FnMut(NavPvt)) {
        self.dispatcher.nav_pvt.handler = Some(handler);
    }

    /// Register the `NAV-CLOCK` handler, replacing any previous one.
    pub fn on_nav_clock(&mut self, handler: &'a mut dyn FnMut(NavClock)) {
        self.dispatcher.nav_clock.handler = Some(handler);
    }

    /// Set or remove the checksum hook. Without one, checksums are ignored.
    pub fn set_checksum_hook(&mut self, hook: Option<ChecksumHook>) {
        self.dispatcher.checksum = hook;
    }

    /// Latest `NAV-STATUS` record decoded.
    pub fn nav_status(&self) -> Option<NavStatus> {
        self.dispatcher.nav_status.latest
    }

    /// Latest `NAV-PVT` record decoded.
    pub fn nav_pvt(&self) -> Option<NavPvt> {
        self.dispatcher.nav_pvt.latest
    }

    /// Latest `NAV-CLOCK` record decoded.
    pub fn nav_clock(&self) -> Option<NavClock> {
        self.dispatcher.nav_clock.latest
    }

    pub fn stats(&self) -> Stats {
        self.dispatcher.stats
    }
}

/// Handler and latest record for a message kind.
struct Slot<'a, T> {
    handler: Option<&'a mut dyn FnMut(T)>,
    latest: Option<T>,
}

impl<T> Default for Slot<'_, T> {
    fn default() -> Self {
        Self {
            handler: None,
            latest: None,
        }
    }
}

impl<T: Message> Slot<'_, T> {
    fn deliver(&mut self, kind: MessageKind, payload: &[u8]) -> Result<(), Error> {
        let record = T::decode(payload).ok_or(Error::PayloadSizeMismatch {
            kind,
            expected: T::SIZE,
            found: payload.len(),
        })?;

        self.latest = Some(record);

        if let Some(handler) = self.handler.as_deref_mut() {
            handler(record);
        }

        Ok(())
    }
}

#[derive(Default)]
struct Dispatcher<'a> {
    nav_status: Slot<'a, NavStatus>,
    nav_pvt: Slot<'a, NavPvt>,
    nav_clock: Slot<'a, NavClock>,
    checksum: Option<ChecksumHook>,
    stats: Stats,
}

impl Dispatcher<'_> {
    fn dispatch(&mut self, r: &[u8]) -> Result<MessageKind, Error> {
        self.stats.frames += 1;

        let result = self.decode(r);

        match &result {
            Ok(_) => self.stats.dispatched += 1,
            Err(err) => self.stats.add_error(err),
        }

        result
    }

    fn decode(&mut self, r: &[u8]) -> Result<MessageKind, Error> {
        let frame = Frame::parse(r).inspect_err(|err| debug!(%err, "discarding frame"))?;

        let FrameHeader {
            class,
            id,
            declared_length,
        } = frame.header;

        if let Some(verify) = self.checksum {
            if !verify(frame.covered, frame.checksum) {
                let found = frame.checksum;
                debug!(class, id, ?found, "checksum mismatch");
                Err(Error::Checksum { class, id, found })?;
            }
        }

        let kind = MessageKind::from_class_id(class, id);
        let payload = frame.payload;

        let delivered = match kind {
            MessageKind::NavStatus => self.nav_status.deliver(kind, payload),
            MessageKind::NavPvt => self.nav_pvt.deliver(kind, payload),
            MessageKind::NavClock => self.nav_clock.deliver(kind, payload),
            MessageKind::None => {
                debug!(class, id, declared_length, "unrecognized message");
                Err(Error::UnrecognizedMessage { class, id })
            }
        };

        if let Err(Error::PayloadSizeMismatch { found, .. }) = delivered {
            debug!(?kind, found, declared_length, "payload size mismatch");
        } else if delivered.is_ok() {
            trace!(?kind, len = payload.len(), "dispatched");
        }

        delivered.map(|()| kind)
    }
}
