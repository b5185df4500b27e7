//! Decoding navigation messages into typed records.
//!
//! A [`Decoder`] is fed bytes as they arrive, and calls the handler registered
//! for each decoded message kind. The most recent record of each kind is also
//! retained, and may be polled instead of (or as well as) registering a
//! handler.
//!
//! ```
//! let mut on_pvt = |pvt: NavPvt| {
//!     println!("{:.7}, {:.7}", pvt.latitude_deg(), pvt.longitude_deg());
//! };
//!
//! let mut decoder = Decoder::<1024>::new();
//! decoder.on_nav_pvt(&mut on_pvt);
//!
//! for byte in bytes {
//!     if let Err(err) = decoder.feed(byte) {
//!         // Discarded frame; the decoder has already resynchronized.
//!     }
//! }
//! ```
//!
//! A frame is only complete once the next frame's marker arrives. When a
//! stream ends, the last frame is held until [`Decoder::flush`] is called.

#[cfg(feature = "std")]
pub mod reader;
pub mod decoder;
pub mod nav;
pub mod slice;

pub use decoder::{Decoder, Error, Stats};
pub use nav::{NavClock, NavPvt, NavStatus};
#[cfg(feature = "std")]
pub use reader::decode as decode_reader;
pub use slice::decode as decode_slice;

/// Derive [`Message`] for a record with a fixed little-endian layout.
///
/// The expansion refers to `zerocopy`, which must be a dependency of the
/// crate deriving the trait.
///
/// # Example
///
/// Fields are laid out on the wire in declaration order, without padding.
/// Supported field types are the fixed-width integers and `[u8; N]`. The
/// derived decoder requires a payload of exactly the record's size.
///
/// ```
/// #[derive(Debug, Clone, Copy, Message)]
/// #[message(class = 0x01, id = 0x22)]
/// struct NavClock {
///     itow: u32,
///     clk_b: i32,
///     clk_d: i32,
///     t_acc: u32,
///     f_acc: u32,
/// }
/// ```
pub use sextant_derive::Message;

/// A record decoded from the payload of a single message kind.
///
/// See the [`Message`](macro@Message) derive macro for an automatic
/// implementation of this trait.
pub trait Message: Sized + Copy {
    /// Message class.
    const CLASS: u8;
    /// Message id, within its class.
    const ID: u8;
    /// Payload size, in bytes.
    const SIZE: usize;

    /// Decode a payload, if it is exactly [`Self::SIZE`] bytes.
    fn decode(payload: &[u8]) -> Option<Self>;
}

/// A recognized message kind, keyed by class and id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// Any unrecognized class and id.
    None,
    NavStatus,
    NavPvt,
    NavClock,
}

impl MessageKind {
    /// Every recognized kind.
    pub const ALL: [Self; 3] = [Self::NavStatus, Self::NavPvt, Self::NavClock];

    /// Resolve the kind of a class and id.
    pub fn from_class_id(class: u8, id: u8) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| kind.class_id() == Some((class, id)))
            .unwrap_or(Self::None)
    }

    /// Class and id of a recognized kind.
    pub fn class_id(self) -> Option<(u8, u8)> {
        match self {
            Self::None => None,
            Self::NavStatus => Some((NavStatus::CLASS, NavStatus::ID)),
            Self::NavPvt => Some((NavPvt::CLASS, NavPvt::ID)),
            Self::NavClock => Some((NavClock::CLASS, NavClock::ID)),
        }
    }

    /// Payload size of a recognized kind.
    pub fn size(self) -> Option<usize> {
        match self {
            Self::None => None,
            Self::NavStatus => Some(NavStatus::SIZE),
            Self::NavPvt => Some(NavPvt::SIZE),
            Self::NavClock => Some(NavClock::SIZE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_kinds() {
        assert_eq!(MessageKind::from_class_id(0x01, 0x03), MessageKind::NavStatus);
        assert_eq!(MessageKind::from_class_id(0x01, 0x07), MessageKind::NavPvt);
        assert_eq!(MessageKind::from_class_id(0x01, 0x22), MessageKind::NavClock);
        assert_eq!(MessageKind::from_class_id(0x01, 0x04), MessageKind::None);
        assert_eq!(MessageKind::from_class_id(0x02, 0x03), MessageKind::None);
    }

    #[test]
    fn record_sizes() {
        assert_eq!(MessageKind::NavStatus.size(), Some(16));
        assert_eq!(MessageKind::NavPvt.size(), Some(92));
        assert_eq!(MessageKind::NavClock.size(), Some(20));
        assert_eq!(MessageKind::None.size(), None);
    }
}
