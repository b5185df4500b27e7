//! Log navigation messages from a capture file, or standard input.
//!
//! ```text
//! cargo run --example print_nav -- capture.ubx
//! ```

use std::{cell::Cell, fs::File, io};

use sextant::avec::{Decoder, NavClock, NavPvt, NavStatus};
use sextant::sans::check;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::DEBUG)
        .with_writer(io::stderr)
        .init();

    let received = Cell::new(0u32);

    let mut on_status = |status: NavStatus| {
        received.set(received.get() + 1);
        info!(
            gps_fix = status.gps_fix,
            fix_ok = status.flags().gps_fix_ok(),
            "nav status received"
        );
    };
    let mut on_pvt = |pvt: NavPvt| {
        received.set(received.get() + 1);
        info!(
            lat = format_args!("{:.7}", pvt.latitude_deg()),
            lon = format_args!("{:.7}", pvt.longitude_deg()),
            num_sv = pvt.num_sv,
            "nav pvt received"
        );
    };
    let mut on_clock = |clock: NavClock| {
        received.set(received.get() + 1);
        info!(itow = clock.itow, clock_bias = clock.clk_b, "nav clock received");
    };

    let mut decoder: Decoder = Decoder::new();
    decoder.on_nav_status(&mut on_status);
    decoder.on_nav_pvt(&mut on_pvt);
    decoder.on_nav_clock(&mut on_clock);
    decoder.set_checksum_hook(Some(check::verify));

    let read = match std::env::args_os().nth(1) {
        Some(path) => sextant::avec::decode_reader(&mut File::open(path)?, &mut decoder)?,
        None => sextant::avec::decode_reader(&mut io::stdin().lock(), &mut decoder)?,
    };

    info!(bytes = read, messages = received.get(), stats = ?decoder.stats(), "done");

    Ok(())
}
