use crate::{make_frame_control_high, make_frame_control_low};
use crate::{AddressingMode, FieldLayout, FrameControl, FrameType, FrameVersion};

/// A high-level representation of the OSNP Frame Control field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct FrameControlRepr {
    /// Frame type field.
    pub frame_type: FrameType,
    /// Security enabled field.
    pub security_enabled: bool,
    /// Frame pending field.
    pub frame_pending: bool,
    /// Acknowledgement request field.
    pub ack_request: bool,
    /// PAN ID compression field.
    pub pan_id_compression: bool,
    /// Destination addressing mode field.
    pub dst_addressing_mode: AddressingMode,
    /// Frame version field.
    pub frame_version: FrameVersion,
    /// Source addressing mode field.
    pub src_addressing_mode: AddressingMode,
}

impl Default for FrameControlRepr {
    fn default() -> Self {
        Self {
            frame_type: FrameType::Data,
            security_enabled: false,
            frame_pending: false,
            ack_request: false,
            pan_id_compression: false,
            dst_addressing_mode: AddressingMode::Absent,
            frame_version: FrameVersion::Ieee802154_2003,
            src_addressing_mode: AddressingMode::Absent,
        }
    }
}

impl FrameControlRepr {
    /// Parse Frame Control field.
    ///
    /// A reserved addressing mode is read as not present.
    pub fn parse(fc: FrameControl<&'_ [u8]>) -> Self {
        Self {
            frame_type: fc.frame_type(),
            security_enabled: fc.security_enabled(),
            frame_pending: fc.frame_pending(),
            ack_request: fc.ack_request(),
            pan_id_compression: fc.pan_id_compression(),
            dst_addressing_mode: fc.dst_addressing_mode().normalized(),
            frame_version: fc.frame_version(),
            src_addressing_mode: fc.src_addressing_mode().normalized(),
        }
    }

    /// Return the two octets of the field, reserved bits cleared.
    pub fn to_bytes(&self) -> [u8; 2] {
        [
            make_frame_control_low(
                self.frame_type,
                self.security_enabled,
                self.frame_pending,
                self.ack_request,
                self.pan_id_compression,
            ),
            make_frame_control_high(
                self.dst_addressing_mode,
                self.frame_version,
                self.src_addressing_mode,
            ),
        ]
    }

    /// Return the layout of the fields that follow the fixed header.
    pub fn layout(&self) -> FieldLayout {
        FieldLayout::new(
            self.dst_addressing_mode,
            self.src_addressing_mode,
            self.pan_id_compression,
            self.security_enabled,
        )
    }
}
