mod support;

use std::cell::RefCell;

use proptest::prelude::*;
use sextant::avec::{Decoder, NavClock, NavStatus};
use support::MARKER;

/// Payload bytes that cannot be mistaken for a marker.
fn payload<const N: usize>() -> impl Strategy<Value = [u8; N]> {
    proptest::array::uniform(any::<u8>().prop_filter("marker byte", |b| *b != MARKER[0]))
}

/// Build a frame, if its header and checksum are free of marker bytes.
fn clean_frame(class: u8, id: u8, payload: &[u8]) -> Option<Vec<u8>> {
    let declared = (payload.len() as u16 + 4).to_le_bytes();

    let mut covered = vec![class, id, declared[0], declared[1]];
    covered.extend_from_slice(payload);

    let checksum = sextant::sans::check::compute_checksum(&covered);
    if checksum.contains(&MARKER[0]) {
        return None;
    }

    let mut r = MARKER.to_vec();
    r.extend(covered);
    r.extend(checksum);
    Some(r)
}

#[derive(Debug, Clone)]
enum Injected {
    Status([u8; 16]),
    Clock([u8; 20]),
}

fn injected() -> impl Strategy<Value = Injected> {
    prop_oneof![
        payload::<16>().prop_map(Injected::Status),
        payload::<20>().prop_map(Injected::Clock),
    ]
}

proptest! {
    #[test]
    fn n_frames_yield_n_callbacks(messages in prop::collection::vec(injected(), 0..16)) {
        let mut stream = Vec::new();
        let mut expected = Vec::new();

        for message in &messages {
            let frame = match message {
                Injected::Status(p) => clean_frame(0x01, 0x03, p),
                Injected::Clock(p) => clean_frame(0x01, 0x22, p),
            };

            if let Some(frame) = frame {
                stream.extend(frame);
                expected.push(message.clone());
            }
        }
        stream.extend(MARKER);

        let seen = RefCell::new(Vec::new());
        let mut on_status = |s: NavStatus| seen.borrow_mut().push((s.itow, s.msss));
        let mut on_clock = |c: NavClock| seen.borrow_mut().push((c.itow, c.f_acc));

        let mut decoder: Decoder = Decoder::new();
        decoder.on_nav_status(&mut on_status);
        decoder.on_nav_clock(&mut on_clock);

        for b in &stream {
            prop_assert!(decoder.feed(*b).is_ok());
        }

        let expected = expected
            .iter()
            .map(|m| {
                let word =
                    |p: &[u8], at: usize| u32::from_le_bytes(p[at..at + 4].try_into().unwrap());
                match m {
                    Injected::Status(p) => (word(p, 0), word(p, 12)),
                    Injected::Clock(p) => (word(p, 0), word(p, 16)),
                }
            })
            .collect::<Vec<_>>();

        prop_assert_eq!(seen.into_inner(), expected);
    }

    #[test]
    fn resynchronizes_after_noise(
        noise in prop::collection::vec(any::<u8>(), 0..2048),
        p in payload::<16>()
    ) {
        let Some(frame) = clean_frame(0x01, 0x03, &p) else {
            return Ok(());
        };

        let mut decoder: Decoder<'_, 256> = Decoder::new();

        // Any noise at all, then a clean frame opened by two markers: the
        // first completes whatever the noise left pending.
        for b in noise.iter().chain(&MARKER).chain(&frame).chain(&MARKER) {
            let _ = decoder.feed(*b);
        }

        prop_assert_eq!(
            decoder.nav_status().map(|s| s.ttff),
            Some(u32::from_le_bytes(p[8..12].try_into().unwrap()))
        );
    }
}
