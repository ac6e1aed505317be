//! Zero-copy read and write structures for handling OSNP MAC frames.
//!
//! OSNP frames follow the IEEE 802.15.4 MAC frame layout: a two-octet frame
//! control field, a sequence number, addressing fields whose presence and
//! length depend on the frame control field, an optional security trailer
//! and the payload. On the wire, the frame is followed by a two-octet check
//! sequence which this crate never interprets.
//!
//! ```text
//! ┌─────────┬─────┬─────────┬──────────┬─────────┬──────────┬──────────┬─────────┬─────┐
//! │ FC      │ Seq │ Dst PAN │ Dst addr │ Src PAN │ Src addr │ Security │ Payload │ FCS │
//! │ 2       │ 1   │ 0/2     │ 0/2/8    │ 0/2     │ 0/2/8    │ 0/5      │ n       │ 2   │
//! └─────────┴─────┴─────────┴──────────┴─────────┴──────────┴──────────┴─────────┴─────┘
//! ```
//!
//! The [`Frame`] reader gives access to the fields of an on-wire buffer:
//! - [`frame_control`]: returns a [`FrameControl`] reader.
//! - [`sequence_number`]: returns the sequence number.
//! - [`addressing`]: returns an [`AddressingFields`] reader.
//! - [`security_trailer`]: returns a [`SecurityTrailer`] reader, if present.
//! - [`payload`]: returns the payload, excluding the check sequence.
//!
//! The [`FrameRepr`] structure is the owned, high-level representation used
//! to build frames and to re-emit them.
//!
//! ## Reading a frame
//! ```
//! # use osnp_frame::{Address, Frame, FrameType, PanId};
//! let data = [
//!     0x61, 0x88, 0x01, 0xfe, 0xca, 0xef, 0xbe, 0xbe, 0xba, 0x74, 0x65, 0x73, 0x74, 0x00, 0x00,
//! ];
//! let frame = Frame::new(&data[..]).unwrap();
//!
//! assert_eq!(frame.frame_control().frame_type(), FrameType::Data);
//! assert_eq!(frame.addressing().dst_pan_id(), Some(PanId([0xfe, 0xca])));
//! assert_eq!(frame.addressing().src_pan_id(), Some(PanId([0xfe, 0xca])));
//! assert_eq!(frame.addressing().src_address(), Address::Short([0xbe, 0xba]));
//! assert_eq!(frame.payload(), b"test");
//! ```
//!
//! ## Writing a frame
//! ```
//! # use osnp_frame::FrameRepr;
//! let data = [
//!     0x61, 0x88, 0x01, 0xfe, 0xca, 0xef, 0xbe, 0xbe, 0xba, 0x74, 0x65, 0x73, 0x74, 0x00, 0x00,
//! ];
//! let repr = FrameRepr::decode(&data).unwrap();
//!
//! let mut buffer = [0u8; 13];
//! assert_eq!(repr.emit(&mut buffer).unwrap(), repr.buffer_len());
//! assert_eq!(buffer, data[..13]);
//! ```
//!
//! [`frame_control`]: Frame::frame_control
//! [`sequence_number`]: Frame::sequence_number
//! [`addressing`]: Frame::addressing
//! [`security_trailer`]: Frame::security_trailer
//! [`payload`]: Frame::payload
#![no_std]
#![deny(missing_docs)]
#![deny(unsafe_code)]

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

/// Reject a frame, or panic when the `panic` feature is enabled.
macro_rules! fail {
    ($err:expr) => {{
        #[cfg(feature = "panic")]
        panic!("{}", $err);
        #[cfg(not(feature = "panic"))]
        return Err($err);
    }};
}

#[cfg(test)]
mod tests;

mod frame;
pub use frame::Frame;

mod frame_control;
pub use frame_control::*;

mod addressing;
pub use addressing::*;

mod layout;
pub use layout::FieldLayout;

mod security;
pub use security::*;

mod repr;
pub use repr::*;

/// Length of the fixed header: frame control and sequence number.
pub const HEADER_LEN: usize = 3;

/// Length of the check sequence that follows every frame on the wire.
pub const FCS_LEN: usize = 2;

/// Maximum length of a frame on the wire, check sequence included.
pub const MAX_FRAME_LEN: usize = 127;

/// Maximum length of a frame payload.
pub const MAX_PAYLOAD_LEN: usize = MAX_FRAME_LEN - HEADER_LEN - FCS_LEN;

/// An error that can occur when reading or writing an OSNP frame.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A field would be read past the end of the buffer.
    TruncatedFrame,
    /// The frame is longer than [`MAX_FRAME_LEN`].
    FrameTooLong,
    /// The output buffer cannot hold the emitted frame.
    BufferTooSmall,
    /// The addressing fields disagree with the addressing modes.
    InconsistentAddressing,
    /// The security trailer disagrees with the security enabled flag.
    InconsistentSecurity,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::TruncatedFrame => write!(f, "truncated frame"),
            Error::FrameTooLong => write!(f, "frame too long"),
            Error::BufferTooSmall => write!(f, "buffer too small"),
            Error::InconsistentAddressing => write!(f, "inconsistent addressing fields"),
            Error::InconsistentSecurity => write!(f, "inconsistent security trailer"),
        }
    }
}

/// A type alias for `Result<T, frame::Error>`.
pub type Result<T> = core::result::Result<T, Error>;
