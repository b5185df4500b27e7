//! Navigation records.
//!
//! Field names and units follow the receiver's protocol description. Records
//! are decoded field by field from their little-endian wire layout, so host
//! endianness and alignment do not matter.

use tartan_bitfield::bitfield;
use zerocopy::TryFromBytes;

use super::Message;

/// Receiver navigation status (`NAV-STATUS`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Message)]
#[message(class = 0x01, id = 0x03)]
pub struct NavStatus {
    /// GPS time of week of the navigation epoch [ms].
    pub itow: u32,
    /// Fix type; see [`NavStatus::fix`].
    pub gps_fix: u8,
    /// Navigation status flags; see [`NavStatus::flags`].
    pub flags: u8,
    /// Fix status information; see [`NavStatus::fix_stat`].
    pub fix_stat: u8,
    /// Further status flags; see [`NavStatus::flags2`].
    pub flags2: u8,
    /// Time to first fix [ms].
    pub ttff: u32,
    /// Time since startup or reset [ms].
    pub msss: u32,
}

/// Position, velocity and time solution (`NAV-PVT`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Message)]
#[message(class = 0x01, id = 0x07)]
pub struct NavPvt {
    /// GPS time of week of the navigation epoch [ms].
    pub itow: u32,
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub min: u8,
    pub sec: u8,
    /// Validity flags; see [`NavPvt::validity`].
    pub valid: u8,
    /// Time accuracy estimate [ns].
    pub t_acc: u32,
    /// Fraction of second [ns].
    pub nano: i32,
    /// Fix type; see [`NavPvt::fix`].
    pub fix_type: u8,
    pub flags: u8,
    pub flags2: u8,
    /// Satellites used in the solution.
    pub num_sv: u8,
    /// Longitude [1e-7 deg].
    pub lon: i32,
    /// Latitude [1e-7 deg].
    pub lat: i32,
    /// Height above ellipsoid [mm].
    pub height: i32,
    /// Height above mean sea level [mm].
    pub h_msl: i32,
    /// Horizontal accuracy estimate [mm].
    pub h_acc: u32,
    /// Vertical accuracy estimate [mm].
    pub v_acc: u32,
    /// North velocity [mm/s].
    pub vel_n: i32,
    /// East velocity [mm/s].
    pub vel_e: i32,
    /// Down velocity [mm/s].
    pub vel_d: i32,
    /// Ground speed [mm/s].
    pub g_speed: i32,
    /// Heading of motion [1e-5 deg].
    pub head_mot: i32,
    /// Speed accuracy estimate [mm/s].
    pub s_acc: u32,
    /// Heading accuracy estimate [1e-5 deg].
    pub head_acc: u32,
    /// Position dilution of precision [0.01].
    pub p_dop: u16,
    pub reserved1: [u8; 6],
    /// Heading of vehicle [1e-5 deg].
    pub head_veh: u32,
    pub reserved2: [u8; 4],
}

/// Clock solution (`NAV-CLOCK`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Message)]
#[message(class = 0x01, id = 0x22)]
pub struct NavClock {
    /// GPS time of week of the navigation epoch [ms].
    pub itow: u32,
    /// Clock bias [ns].
    pub clk_b: i32,
    /// Clock drift [ns/s].
    pub clk_d: i32,
    /// Time accuracy estimate [ns].
    pub t_acc: u32,
    /// Frequency accuracy estimate [ps/s].
    pub f_acc: u32,
}

/// Fix type reported by `NAV-STATUS` and `NAV-PVT`.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromBytes)]
pub enum FixType {
    NoFix = 0x00,
    DeadReckoning = 0x01,
    Fix2D = 0x02,
    Fix3D = 0x03,
    GpsDeadReckoning = 0x04,
    TimeOnly = 0x05,
}

bitfield! {
    /// `NAV-STATUS` navigation status flags.
    ///
    /// `gps_fix_ok` marks position and velocity as valid and within the DOP
    /// and accuracy masks.
    pub struct StatusFlags(u8) {
        [0] pub gps_fix_ok,
        [1] pub diff_soln,
        [2] pub wkn_set,
        [3] pub tow_set,
    }
}

bitfield! {
    /// `NAV-STATUS` fix status information.
    ///
    /// `map_matching` is one of none (0), too old (1), used (2) or used for
    /// dead reckoning (3).
    pub struct FixStatus(u8) {
        [0] pub diff_corr,
        [1] pub carr_soln_valid,
        [6..8] pub map_matching: u8,
    }
}

bitfield! {
    /// `NAV-STATUS` further status flags.
    ///
    /// - `psm_state`: acquisition (0), tracking (1), power optimized tracking
    ///   (2) or inactive (3).
    /// - `spoof_det_state`: unknown (0), none indicated (1), indicated (2) or
    ///   multiple indications (3).
    /// - `carr_soln`: no carrier phase solution (0), floating (1) or fixed (2)
    ///   ambiguities.
    pub struct StatusFlags2(u8) {
        [0..2] pub psm_state: u8,
        [3..5] pub spoof_det_state: u8,
        [6..8] pub carr_soln: u8,
    }
}

bitfield! {
    /// `NAV-PVT` validity flags.
    pub struct PvtValidity(u8) {
        [0] pub valid_date,
        [1] pub valid_time,
        [2] pub fully_resolved,
        [3] pub valid_mag,
    }
}

impl NavStatus {
    /// Fix type, if not reserved.
    ///
    /// This does not qualify a fix as valid; see
    /// [`StatusFlags::gps_fix_ok`].
    pub fn fix(&self) -> Option<FixType> {
        zerocopy::try_transmute!(self.gps_fix).ok()
    }

    pub fn flags(&self) -> StatusFlags {
        StatusFlags(self.flags)
    }

    pub fn fix_stat(&self) -> FixStatus {
        FixStatus(self.fix_stat)
    }

    pub fn flags2(&self) -> StatusFlags2 {
        StatusFlags2(self.flags2)
    }
}

impl NavPvt {
    /// Fix type, if not reserved.
    pub fn fix(&self) -> Option<FixType> {
        zerocopy::try_transmute!(self.fix_type).ok()
    }

    pub fn validity(&self) -> PvtValidity {
        PvtValidity(self.valid)
    }

    /// Latitude in degrees.
    pub fn latitude_deg(&self) -> f64 {
        self.lat as f64 * 1e-7
    }

    /// Longitude in degrees.
    pub fn longitude_deg(&self) -> f64 {
        self.lon as f64 * 1e-7
    }
}
