#![allow(dead_code)]

use sextant::sans::check::compute_checksum;

pub const MARKER: [u8; 2] = [0xB5, 0x62];

/// Build a frame as the receiver sends it, with the overhead-inflated length
/// field and a valid checksum.
pub fn frame(class: u8, id: u8, payload: &[u8]) -> Vec<u8> {
    let declared = (payload.len() + 4) as u16;

    let mut r = MARKER.to_vec();
    r.extend_from_slice(&[class, id]);
    r.extend_from_slice(&declared.to_le_bytes());
    r.extend_from_slice(payload);

    let checksum = compute_checksum(&r[2..]);
    r.extend_from_slice(&checksum);

    assert!(
        !r[2..].contains(&MARKER[0]),
        "frame body must not contain a marker byte"
    );

    r
}

pub fn nav_status_payload() -> [u8; 16] {
    [
        0x10, 0x27, 0x00, 0x00, // itow: 10000
        0x03, // gps_fix: 3D
        0x0D, // flags
        0x00, // fix_stat
        0x01, // flags2
        0xE8, 0x03, 0x00, 0x00, // ttff: 1000
        0x20, 0x4E, 0x00, 0x00, // msss: 20000
    ]
}

pub fn nav_clock_payload() -> [u8; 20] {
    let mut r = [0; 20];
    r[0..4].copy_from_slice(&20_000u32.to_le_bytes());
    r[4..8].copy_from_slice(&(-1_000i32).to_le_bytes());
    r[8..12].copy_from_slice(&(-7i32).to_le_bytes());
    r[12..16].copy_from_slice(&25u32.to_le_bytes());
    r[16..20].copy_from_slice(&300u32.to_le_bytes());
    r
}

pub fn nav_pvt_payload() -> [u8; 92] {
    let mut r = [0; 92];
    r[0..4].copy_from_slice(&30_000u32.to_le_bytes());
    r[4..6].copy_from_slice(&2024u16.to_le_bytes());
    r[6] = 6; // month
    r[7] = 30; // day
    r[11] = 0x07; // valid
    r[20] = 0x03; // fix_type
    r[23] = 11; // num_sv
    r[24..28].copy_from_slice(&85_432_100i32.to_le_bytes());
    r[28..32].copy_from_slice(&473_977_420i32.to_le_bytes());
    r[76..78].copy_from_slice(&120u16.to_le_bytes());
    r
}
