//! Placement of the conditional fields of a frame.
//!
//! Which fields follow the fixed header, and how long they are, depends only
//! on four values of the frame control field. Parsing, length computation and
//! emission all go through [`FieldLayout`], so they cannot disagree.

use super::{AddressingMode, HEADER_LEN};
use super::security::SECURITY_TRAILER_LEN;

/// The conditional fields carried by a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    /// The destination PAN identifier is on the wire.
    pub dst_pan_id: bool,
    /// The destination addressing mode.
    pub dst_addressing_mode: AddressingMode,
    /// The source PAN identifier is on the wire.
    pub src_pan_id: bool,
    /// The source PAN identifier is elided and equal to the destination one.
    pub src_pan_id_shared: bool,
    /// The source addressing mode.
    pub src_addressing_mode: AddressingMode,
    /// The security trailer is on the wire.
    pub security_trailer: bool,
}

impl FieldLayout {
    /// Compute the layout for the given frame control values.
    pub fn new(
        dst_addressing_mode: AddressingMode,
        src_addressing_mode: AddressingMode,
        pan_id_compression: bool,
        security_enabled: bool,
    ) -> Self {
        let dst_present = dst_addressing_mode.is_present();
        let src_present = src_addressing_mode.is_present();

        Self {
            dst_pan_id: dst_present,
            dst_addressing_mode,
            src_pan_id: src_present && !pan_id_compression,
            src_pan_id_shared: src_present && pan_id_compression,
            src_addressing_mode,
            security_trailer: security_enabled,
        }
    }

    /// Offset of the destination PAN identifier in the addressing fields.
    pub const fn dst_pan_id_offset(&self) -> usize {
        0
    }

    /// Offset of the destination address in the addressing fields.
    pub fn dst_address_offset(&self) -> usize {
        if self.dst_pan_id {
            2
        } else {
            0
        }
    }

    /// Offset of the source PAN identifier in the addressing fields.
    pub fn src_pan_id_offset(&self) -> usize {
        self.dst_address_offset() + self.dst_addressing_mode.size()
    }

    /// Offset of the source address in the addressing fields.
    pub fn src_address_offset(&self) -> usize {
        self.src_pan_id_offset() + if self.src_pan_id { 2 } else { 0 }
    }

    /// Length of the addressing fields in octets.
    pub fn addressing_len(&self) -> usize {
        self.src_address_offset() + self.src_addressing_mode.size()
    }

    /// Length of the security trailer in octets.
    pub fn security_trailer_len(&self) -> usize {
        if self.security_trailer {
            SECURITY_TRAILER_LEN
        } else {
            0
        }
    }

    /// Offset of the security trailer from the start of the frame.
    pub fn security_trailer_offset(&self) -> usize {
        HEADER_LEN + self.addressing_len()
    }

    /// Length of everything before the payload, fixed header included.
    pub fn header_len(&self) -> usize {
        self.security_trailer_offset() + self.security_trailer_len()
    }
}
