//! Frame header and layout.
//!
//! ```text
//! ┌────────────┬───────┬────┬──────────────┬─────────────┬──────────┐
//! │ Marker     │ Class │ Id │ Length       │ Payload     │ Checksum │
//! │ 0xB5 0x62  │ (1B)  │(1B)│ (2B LE)      │             │ (2B)     │
//! └────────────┴───────┴────┴──────────────┴─────────────┴──────────┘
//! ```

use thiserror::Error;
use zerocopy::{FromBytes, little_endian::U16};

/// Size of the marker pair and header fields preceding the payload.
pub const HEADER_SIZE: usize = 6;

/// Size of the trailing checksum.
pub const CHECKSUM_SIZE: usize = 2;

/// Overhead counted in the transmitted length field in excess of the payload.
///
/// The receiver includes the class, id and both checksum bytes in the length
/// it transmits, so a 16-byte payload arrives with a declared length of 20.
pub const DECLARED_LENGTH_OVERHEAD: u16 = 4;

/// An error interpreting a captured frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FrameError {
    /// Too few bytes to hold a header and checksum.
    #[error("Frame too short ({len} bytes).")]
    TooShort { len: usize },
}

#[repr(C)]
#[derive(FromBytes)]
struct RawHeader {
    _marker: [u8; 2],
    class: u8,
    id: u8,
    length: U16,
}

/// Header fields of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub class: u8,
    pub id: u8,
    /// Payload length as transmitted, corrected for overhead. Unreliable; see
    /// [`Frame::payload`].
    pub declared_length: u16,
}

impl FrameHeader {
    /// Decode header fields, applying the declared length correction.
    pub fn advance(r: [u8; HEADER_SIZE]) -> Self {
        let RawHeader {
            class, id, length, ..
        } = zerocopy::transmute!(r);

        Self {
            class,
            id,
            declared_length: length.get().wrapping_sub(DECLARED_LENGTH_OVERHEAD),
        }
    }
}

/// A captured frame, split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    pub header: FrameHeader,
    /// Payload bytes, sized from the bytes actually captured rather than the
    /// declared length.
    pub payload: &'a [u8],
    /// Checksum trailer as found on the wire.
    pub checksum: [u8; CHECKSUM_SIZE],
    /// Bytes covered by the checksum: header fields and payload, without the
    /// marker pair.
    pub covered: &'a [u8],
}

impl<'a> Frame<'a> {
    /// Split a captured frame, beginning with its marker pair.
    pub fn parse(r: &'a [u8]) -> Result<Self, FrameError> {
        let len = r.len();

        let (Some((head, _)), Some(end)) = (
            r.split_first_chunk::<HEADER_SIZE>(),
            len.checked_sub(CHECKSUM_SIZE),
        ) else {
            Err(FrameError::TooShort { len })?
        };

        if end < HEADER_SIZE {
            Err(FrameError::TooShort { len })?;
        }

        let header = FrameHeader::advance(*head);
        let checksum = [r[end], r[end + 1]];

        Ok(Self {
            header,
            payload: &r[HEADER_SIZE..end],
            checksum,
            covered: &r[2..end],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrects_declared_length() {
        let header = FrameHeader::advance([0xB5, 0x62, 0x01, 0x03, 20, 0]);

        assert_eq!(
            header,
            FrameHeader {
                class: 0x01,
                id: 0x03,
                declared_length: 16,
            }
        );
    }

    #[test]
    fn trusts_captured_length() {
        // Declared length claims 60 bytes; only 3 were captured.
        let r = [0xB5, 0x62, 0x01, 0x22, 64, 0, 1, 2, 3, 0xAA, 0xBB];
        let frame = Frame::parse(&r).unwrap();

        assert_eq!(frame.header.declared_length, 60);
        assert_eq!(frame.payload, &[1, 2, 3]);
        assert_eq!(frame.checksum, [0xAA, 0xBB]);
        assert_eq!(frame.covered, &r[2..9]);
    }

    #[test]
    fn empty_payload() {
        let r = [0xB5, 0x62, 0x0A, 0x04, 4, 0, 0x0E, 0x34];
        let frame = Frame::parse(&r).unwrap();

        assert!(frame.payload.is_empty());
    }

    #[test]
    fn rejects_short_frames() {
        let r = [0xB5, 0x62, 0x01, 0x03, 20, 0, 0xAA];

        assert_eq!(Frame::parse(&r), Err(FrameError::TooShort { len: 7 }));
        assert_eq!(Frame::parse(&r[..3]), Err(FrameError::TooShort { len: 3 }));
    }
}
