//! MAC layer of the OSNP sensor-network protocol.
//!
//! - [`address_table`] hands out and reclaims the 16-bit short addresses of
//!   paired nodes.
//! - [`command_queue`] keeps at most one MAC command in flight and reports
//!   when its response timed out.
//! - [`mac`] builds the frames a node sends: MAC commands, data packets and
//!   responses.
//!
//! Frames themselves are read and written by [`frame`], a re-export of the
//! `osnp-frame` crate.
#![no_std]

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

#[macro_use]
pub(crate) mod utils;

pub use osnp_frame as frame;

pub mod address_table;
pub mod command_queue;
pub mod config;
pub mod mac;
pub mod time;

/// An error that can occur in the OSNP MAC layer.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The address is reserved or does not fit in 16 bits.
    ReservedOrOutOfRangeAddress,
    /// A frame could not be built.
    Frame(frame::Error),
}

impl From<frame::Error> for Error {
    fn from(value: frame::Error) -> Self {
        Self::Frame(value)
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::ReservedOrOutOfRangeAddress => write!(f, "reserved or out of range address"),
            Error::Frame(err) => write!(f, "frame error: {err}"),
        }
    }
}

/// A type alias for `Result<T, osnp::Error>`.
pub type Result<T> = core::result::Result<T, Error>;
