//! Slice-based convenience decoding.

use super::{Decoder, Error, MessageKind};

/// Decode a slice of a byte stream, passing every result to `on_result`.
///
/// Handlers registered with the decoder are invoked as usual. If `flush` is
/// set, the final frame is decoded without waiting for another marker;
/// otherwise it is held by the decoder for the next slice.
///
/// Returns the number of messages dispatched.
///
/// This method is also re-exported as `sextant::avec::decode_slice`.
pub fn decode<const N: usize>(
    r: &[u8],
    decoder: &mut Decoder<'_, N>,
    flush: bool,
    mut on_result: impl FnMut(Result<MessageKind, Error>),
) -> usize {
    let mut dispatched = 0;

    let mut report = |result: Result<Option<MessageKind>, Error>| match result {
        Ok(Some(kind)) => {
            dispatched += 1;
            on_result(Ok(kind));
        }
        Ok(None) => {}
        Err(err) => on_result(Err(err)),
    };

    for byte in r {
        report(decoder.feed(*byte));
    }

    if flush {
        report(decoder.flush());
    }

    dispatched
}
