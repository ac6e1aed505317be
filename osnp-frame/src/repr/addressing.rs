use super::FrameControlRepr;

use crate::{Address, AddressingFields, PanId};
use crate::{Error, Result};

/// A high-level representation of the OSNP Addressing Fields.
///
/// The source PAN identifier is only stored when it is carried on the wire.
/// Under PAN ID compression it is derived from the destination PAN
/// identifier, see [`AddressingFieldsRepr::src_pan_id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct AddressingFieldsRepr {
    /// Destination PAN identifier.
    pub dst_pan_id: Option<PanId>,
    /// Destination address.
    pub dst_address: Address,
    /// Source PAN identifier, when not compressed.
    pub src_pan_id: Option<PanId>,
    /// Source address.
    pub src_address: Address,
}

impl Default for AddressingFieldsRepr {
    fn default() -> Self {
        Self {
            dst_pan_id: None,
            dst_address: Address::Absent,
            src_pan_id: None,
            src_address: Address::Absent,
        }
    }
}

impl AddressingFieldsRepr {
    /// Parse the Addressing Fields.
    pub fn parse(addressing: AddressingFields<&'_ [u8]>) -> Self {
        Self {
            dst_pan_id: addressing.dst_pan_id(),
            dst_address: addressing.dst_address(),
            src_pan_id: if addressing.layout().src_pan_id {
                addressing.src_pan_id()
            } else {
                None
            },
            src_address: addressing.src_address(),
        }
    }

    /// Return the source PAN identifier, derived from the destination PAN
    /// identifier when compressed.
    pub fn src_pan_id(&self, fc: &FrameControlRepr) -> Option<PanId> {
        let layout = fc.layout();

        if layout.src_pan_id_shared {
            self.dst_pan_id
        } else if layout.src_pan_id {
            self.src_pan_id
        } else {
            None
        }
    }

    /// Check the addressing fields against the addressing modes.
    pub fn validate(&self, fc: &FrameControlRepr) -> Result<()> {
        let layout = fc.layout();

        if self.dst_address.mode() != fc.dst_addressing_mode
            || self.src_address.mode() != fc.src_addressing_mode
        {
            return Err(Error::InconsistentAddressing);
        }

        if self.dst_pan_id.is_some() != layout.dst_pan_id
            || self.src_pan_id.is_some() != layout.src_pan_id
        {
            return Err(Error::InconsistentAddressing);
        }

        Ok(())
    }
}
