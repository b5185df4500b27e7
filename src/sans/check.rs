//! Helper for computing UBX checksums.

/// Accumulate a slice of bytes into a UBX checksum (8-bit Fletcher).
///
/// The checksum covers the class, id, length and payload of a frame, which
/// is [`Frame::covered`](super::header::Frame::covered).
pub fn compute_checksum(r: &[u8]) -> [u8; 2] {
    r.iter().fold([0, 0], |[a, b], x| {
        let a = a.wrapping_add(*x);
        [a, b.wrapping_add(a)]
    })
}

/// Check a frame's covered bytes against the checksum found on the wire.
///
/// Suitable for use as a decoder's checksum hook.
pub fn verify(covered: &[u8], found: [u8; 2]) -> bool {
    compute_checksum(covered) == found
}
