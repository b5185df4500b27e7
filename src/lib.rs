#![no_std]

//! A streaming decoder for u-blox UBX navigation messages.
//!
//! Sextant consumes a receiver's raw byte stream one byte at a time,
//! resynchronizes on the `0xB5 0x62` start-of-frame marker, and hands decoded
//! navigation records to registered handlers. No allocation or I/O happens
//! while decoding; all storage is fixed-size and owned by the decoder, so it
//! suits interrupt- or poll-driven firmware as well as hosted applications.
//!
//! Most users should begin with [`avec::Decoder`]. If finer control is
//! needed, for example to route raw frames elsewhere, the framing machinery
//! is exposed in the [`sans`] module.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable the reader-based adapter (default).

pub mod avec;
pub mod sans;
