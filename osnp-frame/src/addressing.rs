//! Addressing fields readers and writers.
//!
//! Addresses and PAN identifiers are kept in the order they are transmitted.

use super::repr::AddressingFieldsRepr;
use super::FieldLayout;
use super::{Error, Result};

/// An OSNP address.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Address {
    /// No address.
    Absent,
    /// A network-assigned short address.
    Short([u8; 2]),
    /// An extended address (EUI-64).
    Extended([u8; 8]),
}

impl Address {
    /// The broadcast address.
    pub const BROADCAST: Address = Address::Short([0xff; 2]);

    /// Create a short address from its numeric value.
    pub const fn from_short(address: u16) -> Self {
        Self::Short(address.to_be_bytes())
    }

    /// Query whether the address is an unicast address.
    pub fn is_unicast(&self) -> bool {
        !self.is_broadcast()
    }

    /// Query whether this address is the broadcast address.
    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }

    /// Create an address from its wire representation.
    ///
    /// Returns `None` when the length is not 0, 2 or 8.
    pub fn from_bytes(a: &[u8]) -> Option<Self> {
        match a.len() {
            0 => Some(Address::Absent),
            2 => {
                let mut b = [0u8; 2];
                b.copy_from_slice(a);
                Some(Address::Short(b))
            }
            8 => {
                let mut b = [0u8; 8];
                b.copy_from_slice(a);
                Some(Address::Extended(b))
            }
            _ => None,
        }
    }

    /// Return the wire representation of the address.
    pub const fn as_bytes(&self) -> &[u8] {
        match self {
            Address::Absent => &[],
            Address::Short(value) => value,
            Address::Extended(value) => value,
        }
    }

    /// Return the numeric value of a short address.
    pub fn as_short(&self) -> Option<u16> {
        match self {
            Address::Short(value) => Some(u16::from_be_bytes(*value)),
            _ => None,
        }
    }

    /// Return the [`AddressingMode`] that carries this address.
    pub fn mode(&self) -> AddressingMode {
        match self {
            Address::Absent => AddressingMode::Absent,
            Address::Short(_) => AddressingMode::Short,
            Address::Extended(_) => AddressingMode::Extended,
        }
    }

    /// Return the length of the address in octets.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Returns `true` when the address is absent.
    pub fn is_empty(&self) -> bool {
        matches!(self, Address::Absent)
    }
}

impl From<Address> for AddressingMode {
    fn from(value: Address) -> Self {
        value.mode()
    }
}

impl core::fmt::Display for Address {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Address::Absent => write!(f, "absent"),
            Address::Short(value) => write!(f, "{:02x}:{:02x}", value[0], value[1]),
            Address::Extended(value) => write!(
                f,
                "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
                value[0], value[1], value[2], value[3], value[4], value[5], value[6], value[7]
            ),
        }
    }
}

/// A PAN identifier, in wire order.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanId(pub [u8; 2]);

impl PanId {
    /// The PAN identifier used by nodes that have not joined a network.
    pub const UNSPECIFIED: PanId = PanId([0x00; 2]);

    /// Create a PAN identifier from its numeric value.
    pub const fn from_u16(id: u16) -> Self {
        Self(id.to_be_bytes())
    }

    /// Return the numeric value of the PAN identifier.
    pub const fn as_u16(&self) -> u16 {
        u16::from_be_bytes(self.0)
    }
}

impl core::fmt::Display for PanId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:02x}{:02x}", self.0[0], self.0[1])
    }
}

/// OSNP addressing mode.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressingMode {
    /// The address is not present.
    Absent = 0b00,
    /// Reserved encoding. Read as [`AddressingMode::Absent`], never written.
    Reserved = 0b01,
    /// A 2-octet short address.
    Short = 0b10,
    /// An 8-octet extended address.
    Extended = 0b11,
}

impl AddressingMode {
    /// Return the size of the address in octets.
    pub fn size(&self) -> usize {
        match self {
            Self::Absent | Self::Reserved => 0,
            Self::Short => 2,
            Self::Extended => 8,
        }
    }

    /// Returns `true` when an address is carried in this mode.
    pub fn is_present(&self) -> bool {
        self.size() != 0
    }

    /// Return the mode a frame is written with, [`AddressingMode::Reserved`]
    /// becoming [`AddressingMode::Absent`].
    pub fn normalized(self) -> Self {
        match self {
            Self::Reserved => Self::Absent,
            mode => mode,
        }
    }
}

impl From<u8> for AddressingMode {
    fn from(value: u8) -> Self {
        match value & 0b11 {
            0b00 => Self::Absent,
            0b01 => Self::Reserved,
            0b10 => Self::Short,
            _ => Self::Extended,
        }
    }
}

/// A reader/writer for the OSNP Addressing Fields.
///
/// The buffer starts right after the fixed frame header.
pub struct AddressingFields<T: AsRef<[u8]>> {
    buffer: T,
    layout: FieldLayout,
}

impl<T: AsRef<[u8]>> AddressingFields<T> {
    /// Create a new [`AddressingFields`] reader/writer from a given buffer.
    ///
    /// # Errors
    ///
    /// This function will check the length of the buffer to ensure it is large
    /// enough to contain the addressing fields. If the buffer is too small,
    /// an error will be returned.
    pub fn new(buffer: T, layout: FieldLayout) -> Result<Self> {
        let af = Self::new_unchecked(buffer, layout);

        if !af.check_len() {
            return Err(Error::TruncatedFrame);
        }

        Ok(af)
    }

    /// Check if the buffer is large enough to contain the addressing fields.
    fn check_len(&self) -> bool {
        self.buffer.as_ref().len() >= self.layout.addressing_len()
    }

    /// Create a new [`AddressingFields`] reader/writer from a given buffer
    /// without checking the length.
    pub fn new_unchecked(buffer: T, layout: FieldLayout) -> Self {
        Self { buffer, layout }
    }

    /// Return the layout the fields are read with.
    pub fn layout(&self) -> FieldLayout {
        self.layout
    }

    /// Return the length of the Addressing Fields in octets.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.layout.addressing_len()
    }

    fn pan_id_at(&self, offset: usize) -> PanId {
        let b = &self.buffer.as_ref()[offset..][..2];
        PanId([b[0], b[1]])
    }

    fn address_at(&self, offset: usize, len: usize) -> Address {
        Address::from_bytes(&self.buffer.as_ref()[offset..][..len]).unwrap_or(Address::Absent)
    }

    /// Return the destination PAN identifier if present.
    pub fn dst_pan_id(&self) -> Option<PanId> {
        self.layout
            .dst_pan_id
            .then(|| self.pan_id_at(self.layout.dst_pan_id_offset()))
    }

    /// Return the destination [`Address`].
    pub fn dst_address(&self) -> Address {
        self.address_at(
            self.layout.dst_address_offset(),
            self.layout.dst_addressing_mode.size(),
        )
    }

    /// Return the source PAN identifier.
    ///
    /// When the PAN identifier is compressed, this is the destination PAN
    /// identifier.
    pub fn src_pan_id(&self) -> Option<PanId> {
        if self.layout.src_pan_id_shared {
            self.dst_pan_id()
        } else if self.layout.src_pan_id {
            Some(self.pan_id_at(self.layout.src_pan_id_offset()))
        } else {
            None
        }
    }

    /// Return the source [`Address`].
    pub fn src_address(&self) -> Address {
        self.address_at(
            self.layout.src_address_offset(),
            self.layout.src_addressing_mode.size(),
        )
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> AddressingFields<T> {
    /// Write the addressing fields that the layout places on the wire.
    ///
    /// The caller must have validated `fields` against the layout.
    pub fn write_fields(&mut self, fields: &AddressingFieldsRepr) {
        let layout = self.layout;
        let buffer = self.buffer.as_mut();

        if let Some(id) = fields.dst_pan_id {
            buffer[layout.dst_pan_id_offset()..][..2].copy_from_slice(&id.0);
        }

        let dst = fields.dst_address.as_bytes();
        buffer[layout.dst_address_offset()..][..dst.len()].copy_from_slice(dst);

        if layout.src_pan_id {
            if let Some(id) = fields.src_pan_id {
                buffer[layout.src_pan_id_offset()..][..2].copy_from_slice(&id.0);
            }
        }

        let src = fields.src_address.as_bytes();
        buffer[layout.src_address_offset()..][..src.len()].copy_from_slice(src);
    }
}
