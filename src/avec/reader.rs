//! Reader-based convenience decoding.
//!
//! _Requires Cargo feature `std`._

use std::io::{ErrorKind, Read};

use tracing::debug;

use super::Decoder;

extern crate std;

/// Pump bytes from a reader into a decoder until end of stream.
///
/// Discarded frames are counted in the decoder's statistics and otherwise
/// ignored. At end of stream the pending frame is flushed.
///
/// Returns the number of bytes read.
///
/// This method is also re-exported as `sextant::avec::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode<const N: usize>(
    r: &mut impl Read,
    decoder: &mut Decoder<'_, N>,
) -> std::io::Result<usize> {
    let mut buf = [0; 256];
    let mut total = 0;

    loop {
        let n = match r.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => Err(err)?,
        };

        for byte in &buf[..n] {
            if let Err(err) = decoder.feed(*byte) {
                debug!(%err, "discarded frame");
            }
        }

        total += n;
    }

    if let Err(err) = decoder.flush() {
        debug!(%err, "discarded final frame");
    }

    Ok(total)
}
