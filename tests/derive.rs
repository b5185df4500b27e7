mod support;

use sextant::avec::Message;
use sextant::sans::{Framer, header::Frame};
use support::{MARKER, frame};

/// GPS time solution (`NAV-TIMEGPS`), decoded outside the built-in set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Message)]
#[message(class = 0x01, id = 0x20)]
struct NavTimeGps {
    itow: u32,
    f_tow: i32,
    week: i16,
    leap_s: i8,
    valid: u8,
    t_acc: u32,
}

fn time_gps_payload() -> Vec<u8> {
    let mut r = Vec::new();
    r.extend(415_000u32.to_le_bytes());
    r.extend((-12_345i32).to_le_bytes());
    r.extend(2_321i16.to_le_bytes());
    r.push(18);
    r.push(0x07);
    r.extend(40u32.to_le_bytes());
    r
}

#[test]
fn derived_constants() {
    assert_eq!(NavTimeGps::CLASS, 0x01);
    assert_eq!(NavTimeGps::ID, 0x20);
    assert_eq!(NavTimeGps::SIZE, 16);
}

#[test]
fn derived_decode() {
    let time = NavTimeGps::decode(&time_gps_payload()).unwrap();

    assert_eq!(
        time,
        NavTimeGps {
            itow: 415_000,
            f_tow: -12_345,
            week: 2_321,
            leap_s: 18,
            valid: 0x07,
            t_acc: 40,
        }
    );

    assert_eq!(NavTimeGps::decode(&time_gps_payload()[1..]), None);
}

#[test]
fn custom_dispatch_over_framer() {
    let mut stream = frame(NavTimeGps::CLASS, NavTimeGps::ID, &time_gps_payload());
    stream.extend(MARKER);

    let mut framer = Framer::<256>::new();
    let mut decoded = Vec::new();

    for b in stream {
        if let Some(r) = framer.feed(b).unwrap() {
            let frame = Frame::parse(r).unwrap();

            if (frame.header.class, frame.header.id) == (NavTimeGps::CLASS, NavTimeGps::ID) {
                decoded.extend(NavTimeGps::decode(frame.payload));
            }
        }
    }

    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded[0].week, 2_321);
}
