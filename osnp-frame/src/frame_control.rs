//! OSNP Frame Control field readers and writers.

use super::AddressingMode;
use super::FieldLayout;
use super::{Error, Result};

/// OSNP frame type.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum FrameType {
    /// Beacon frame.
    Beacon,
    /// Data frame.
    Data,
    /// Acknowledgment frame.
    Ack,
    /// MAC command frame.
    MacCommand,
    /// A frame type this revision does not define, kept as its raw value.
    Reserved(u8),
}

impl From<u8> for FrameType {
    fn from(value: u8) -> Self {
        match value & 0b111 {
            0b000 => Self::Beacon,
            0b001 => Self::Data,
            0b010 => Self::Ack,
            0b011 => Self::MacCommand,
            other => Self::Reserved(other),
        }
    }
}

impl From<FrameType> for u8 {
    fn from(value: FrameType) -> Self {
        match value {
            FrameType::Beacon => 0b000,
            FrameType::Data => 0b001,
            FrameType::Ack => 0b010,
            FrameType::MacCommand => 0b011,
            FrameType::Reserved(raw) => raw & 0b111,
        }
    }
}

/// Frame version, carried in bits 4-5 of the high frame control octet.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum FrameVersion {
    /// IEEE 802.15.4-2003 frame.
    Ieee802154_2003 = 0b00,
    /// IEEE 802.15.4-2006 frame.
    Ieee802154_2006 = 0b01,
    /// IEEE 802.15.4-2015 frame.
    Ieee802154_2015 = 0b10,
    /// Reserved value.
    Reserved = 0b11,
}

impl From<u8> for FrameVersion {
    fn from(value: u8) -> Self {
        match value & 0b11 {
            0b00 => Self::Ieee802154_2003,
            0b01 => Self::Ieee802154_2006,
            0b10 => Self::Ieee802154_2015,
            _ => Self::Reserved,
        }
    }
}

bitflags::bitflags! {
    /// The single-bit flags of the low frame control octet.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FrameControlFlags: u8 {
        /// The frame carries a security trailer.
        const SECURITY_ENABLED = 1 << 3;
        /// The sender has more frames pending for the recipient.
        const FRAME_PENDING = 1 << 4;
        /// The recipient must acknowledge the frame.
        const ACK_REQUEST = 1 << 5;
        /// The source PAN identifier is elided and equal to the destination
        /// PAN identifier.
        const PAN_ID_COMPRESSION = 1 << 6;
    }
}

/// Pack the low frame control octet.
pub fn make_frame_control_low(
    frame_type: FrameType,
    security_enabled: bool,
    frame_pending: bool,
    ack_request: bool,
    pan_id_compression: bool,
) -> u8 {
    let mut flags = FrameControlFlags::empty();
    flags.set(FrameControlFlags::SECURITY_ENABLED, security_enabled);
    flags.set(FrameControlFlags::FRAME_PENDING, frame_pending);
    flags.set(FrameControlFlags::ACK_REQUEST, ack_request);
    flags.set(FrameControlFlags::PAN_ID_COMPRESSION, pan_id_compression);

    u8::from(frame_type) | flags.bits()
}

/// Pack the high frame control octet.
pub fn make_frame_control_high(
    dst_addressing_mode: AddressingMode,
    frame_version: FrameVersion,
    src_addressing_mode: AddressingMode,
) -> u8 {
    ((dst_addressing_mode as u8) << 2) | ((frame_version as u8) << 4) | ((src_addressing_mode as u8) << 6)
}

/// A reader/writer for the OSNP Frame Control field.
pub struct FrameControl<T: AsRef<[u8]>> {
    buffer: T,
}

impl<T: AsRef<[u8]>> FrameControl<T> {
    /// Create a new [`FrameControl`] reader/writer from a given buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer is too short.
    pub fn new(buffer: T) -> Result<Self> {
        let fc = Self::new_unchecked(buffer);

        if !fc.check_len() {
            return Err(Error::TruncatedFrame);
        }

        Ok(fc)
    }

    /// Returns `false` if the buffer is too short to contain the Frame Control field.
    fn check_len(&self) -> bool {
        self.buffer.as_ref().len() >= 2
    }

    /// Create a new [`FrameControl`] reader/writer from a given buffer without length checking.
    pub fn new_unchecked(buffer: T) -> Self {
        Self { buffer }
    }

    /// Return the low frame control octet.
    pub fn low(&self) -> u8 {
        self.buffer.as_ref()[0]
    }

    /// Return the high frame control octet.
    pub fn high(&self) -> u8 {
        self.buffer.as_ref()[1]
    }

    /// Return the [`FrameType`] field.
    pub fn frame_type(&self) -> FrameType {
        FrameType::from(self.low())
    }

    /// Return the single-bit flags of the low octet.
    pub fn flags(&self) -> FrameControlFlags {
        FrameControlFlags::from_bits_truncate(self.low())
    }

    /// Returns `true` when the security enabled field is set.
    pub fn security_enabled(&self) -> bool {
        self.flags().contains(FrameControlFlags::SECURITY_ENABLED)
    }

    /// Returns `true` when the frame pending field is set.
    pub fn frame_pending(&self) -> bool {
        self.flags().contains(FrameControlFlags::FRAME_PENDING)
    }

    /// Returns `true` when the acknowledgement request field is set.
    pub fn ack_request(&self) -> bool {
        self.flags().contains(FrameControlFlags::ACK_REQUEST)
    }

    /// Returns `true` when the PAN ID compression field is set.
    pub fn pan_id_compression(&self) -> bool {
        self.flags().contains(FrameControlFlags::PAN_ID_COMPRESSION)
    }

    /// Return the Destination [`AddressingMode`].
    pub fn dst_addressing_mode(&self) -> AddressingMode {
        AddressingMode::from((self.high() >> 2) & 0b11)
    }

    /// Return the [`FrameVersion`].
    pub fn frame_version(&self) -> FrameVersion {
        FrameVersion::from((self.high() >> 4) & 0b11)
    }

    /// Return the Source [`AddressingMode`].
    pub fn src_addressing_mode(&self) -> AddressingMode {
        AddressingMode::from((self.high() >> 6) & 0b11)
    }

    /// Return the layout of the fields that follow the fixed header.
    pub fn layout(&self) -> FieldLayout {
        FieldLayout::new(
            self.dst_addressing_mode(),
            self.src_addressing_mode(),
            self.pan_id_compression(),
            self.security_enabled(),
        )
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> FrameControl<T> {
    fn update_low(&mut self, mask: u8, value: u8) {
        let b = &mut self.buffer.as_mut()[0];
        *b = (*b & !mask) | (value & mask);
    }

    fn update_high(&mut self, mask: u8, value: u8) {
        let b = &mut self.buffer.as_mut()[1];
        *b = (*b & !mask) | (value & mask);
    }

    /// Set the frame type field.
    pub fn set_frame_type(&mut self, frame_type: FrameType) {
        self.update_low(0b111, u8::from(frame_type));
    }

    /// Set or clear the given flags.
    pub fn set_flags(&mut self, flags: FrameControlFlags, value: bool) {
        self.update_low(flags.bits(), if value { 0xff } else { 0x00 });
    }

    /// Set the security enabled field.
    pub fn set_security_enabled(&mut self, security_enabled: bool) {
        self.set_flags(FrameControlFlags::SECURITY_ENABLED, security_enabled);
    }

    /// Set the frame pending field.
    pub fn set_frame_pending(&mut self, frame_pending: bool) {
        self.set_flags(FrameControlFlags::FRAME_PENDING, frame_pending);
    }

    /// Set the acknowledgement request field.
    pub fn set_ack_request(&mut self, ack_request: bool) {
        self.set_flags(FrameControlFlags::ACK_REQUEST, ack_request);
    }

    /// Set the PAN ID compression field.
    pub fn set_pan_id_compression(&mut self, pan_id_compression: bool) {
        self.set_flags(FrameControlFlags::PAN_ID_COMPRESSION, pan_id_compression);
    }

    /// Set the destination addressing mode field.
    pub fn set_dst_addressing_mode(&mut self, addressing_mode: AddressingMode) {
        self.update_high(0b11 << 2, (addressing_mode as u8) << 2);
    }

    /// Set the frame version field.
    pub fn set_frame_version(&mut self, frame_version: FrameVersion) {
        self.update_high(0b11 << 4, (frame_version as u8) << 4);
    }

    /// Set the source addressing mode field.
    pub fn set_src_addressing_mode(&mut self, addressing_mode: AddressingMode) {
        self.update_high(0b11 << 6, (addressing_mode as u8) << 6);
    }
}
