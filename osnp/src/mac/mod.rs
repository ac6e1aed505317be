//! Frame building for an OSNP node.
//!
//! [`MacLayer`] builds every frame a node sends from its [`NodeIdentity`]:
//! MAC commands (pairing, unpairing, discovery), data packets and responses.
//! Each frame gets the next number of the layer's [`SequenceNumber`].

mod command;
mod sequence;

pub use command::*;
pub use sequence::SequenceNumber;

use crate::config::KEY_COUNTER_UNSET;
use crate::frame::{
    Address, AddressingMode, FrameControlRepr, FrameRepr, FrameType, PanId, Payload,
    SecurityTrailerRepr,
};
use crate::Result;

/// The identity a node uses to address its frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NodeIdentity {
    /// The PAN the node belongs to.
    pub pan_id: PanId,
    /// The short address of the node, in wire order.
    pub short_address: [u8; 2],
    /// The extended address of the node.
    pub eui: [u8; 8],
}

impl NodeIdentity {
    /// Create an identity from numeric PAN identifier and short address.
    pub const fn new(pan_id: u16, short_address: u16, eui: [u8; 8]) -> Self {
        Self {
            pan_id: PanId::from_u16(pan_id),
            short_address: short_address.to_be_bytes(),
            eui,
        }
    }
}

/// Builds the frames of one node.
#[derive(Debug, Clone)]
pub struct MacLayer {
    identity: NodeIdentity,
    sequence: SequenceNumber,
}

impl MacLayer {
    /// Create a frame builder for `identity`, numbering frames from
    /// `sequence`.
    pub fn new(identity: NodeIdentity, sequence: SequenceNumber) -> Self {
        Self { identity, sequence }
    }

    /// Return the identity frames are built from.
    pub fn identity(&self) -> &NodeIdentity {
        &self.identity
    }

    /// Return the identity frames are built from.
    pub fn identity_mut(&mut self) -> &mut NodeIdentity {
        &mut self.identity
    }

    /// Create an empty frame for the given frame control field.
    ///
    /// The destination PAN identifier is the local one and the destination
    /// address is a zeroed placeholder of the right length. The source fields
    /// come from the node identity. A secured frame starts with frame counter
    /// `0` and key counter `KEY_COUNTER_UNSET`. A reserved addressing mode is
    /// built as not present.
    pub fn create_frame(&mut self, mut frame_control: FrameControlRepr) -> FrameRepr {
        frame_control.dst_addressing_mode = frame_control.dst_addressing_mode.normalized();
        frame_control.src_addressing_mode = frame_control.src_addressing_mode.normalized();

        let layout = frame_control.layout();
        let sequence_number = self.sequence.next();

        let mut frame = FrameRepr {
            frame_control,
            sequence_number,
            addressing_fields: Default::default(),
            security_trailer: None,
            payload: Payload::new(),
        };

        let fields = &mut frame.addressing_fields;

        if layout.dst_pan_id {
            fields.dst_pan_id = Some(self.identity.pan_id);
        }

        fields.dst_address = match frame_control.dst_addressing_mode {
            AddressingMode::Short => Address::Short([0; 2]),
            AddressingMode::Extended => Address::Extended([0; 8]),
            AddressingMode::Absent | AddressingMode::Reserved => Address::Absent,
        };

        if layout.src_pan_id {
            fields.src_pan_id = Some(self.identity.pan_id);
        }

        fields.src_address = match frame_control.src_addressing_mode {
            AddressingMode::Short => Address::Short(self.identity.short_address),
            AddressingMode::Extended => Address::Extended(self.identity.eui),
            AddressingMode::Absent | AddressingMode::Reserved => Address::Absent,
        };

        if frame_control.security_enabled {
            frame.security_trailer = Some(SecurityTrailerRepr {
                frame_counter: 0,
                key_counter: KEY_COUNTER_UNSET,
            });
        }

        trace!(
            "mac: created frame {} of type {}",
            sequence_number,
            u8::from(frame_control.frame_type)
        );

        frame
    }

    /// Create a pairing command, handing `short_address` and the keys to the
    /// node with extended address `peer_eui`.
    pub fn create_pairing_command(
        &mut self,
        peer_eui: [u8; 8],
        short_address: u16,
        tx_key: &[u8; KEY_LEN],
        rx_key: &[u8; KEY_LEN],
    ) -> Result<FrameRepr> {
        let mut frame = self.create_frame(FrameControlRepr {
            frame_type: FrameType::MacCommand,
            ack_request: true,
            pan_id_compression: true,
            dst_addressing_mode: AddressingMode::Extended,
            src_addressing_mode: AddressingMode::Short,
            ..Default::default()
        });
        frame.addressing_fields.dst_address = Address::Extended(peer_eui);

        let mut payload = [0u8; PAIRING_COMMAND_LEN];
        let mut command = PairingCommand::new(&mut payload[..]);
        command.set_command_id(MacCommandId::Pairing.into());
        command.set_tx_key(tx_key);
        command.set_rx_key(rx_key);
        command.set_short_address(&short_address.to_be_bytes());

        debug!("mac: pairing {:#x}", short_address);

        set_payload(frame, &payload)
    }

    /// Create an unpairing command for the node at `short_address`.
    pub fn create_unpairing_command(&mut self, short_address: u16) -> Result<FrameRepr> {
        let mut frame = self.create_frame(FrameControlRepr {
            frame_type: FrameType::MacCommand,
            ack_request: true,
            pan_id_compression: true,
            dst_addressing_mode: AddressingMode::Short,
            src_addressing_mode: AddressingMode::Short,
            ..Default::default()
        });
        frame.addressing_fields.dst_address = Address::from_short(short_address);

        debug!("mac: unpairing {:#x}", short_address);

        set_payload(frame, &[u8::from(MacCommandId::Unpairing)])
    }

    /// Create a discovery request, broadcast to nodes that have not joined a
    /// PAN yet.
    pub fn create_discovery_request(&mut self) -> Result<FrameRepr> {
        let mut frame = self.create_frame(FrameControlRepr {
            frame_type: FrameType::MacCommand,
            dst_addressing_mode: AddressingMode::Short,
            src_addressing_mode: AddressingMode::Extended,
            ..Default::default()
        });
        frame.addressing_fields.dst_pan_id = Some(PanId::UNSPECIFIED);
        frame.addressing_fields.dst_address = Address::BROADCAST;

        set_payload(frame, &[u8::from(MacCommandId::Discovery)])
    }

    /// Create a data frame carrying `data`.
    ///
    /// A paired node is addressed by its short address, with PAN ID
    /// compression. Otherwise both ends use their extended address and the
    /// source PAN identifier is sent as well.
    pub fn create_command_packet(
        &mut self,
        data: &[u8],
        peer_eui: [u8; 8],
        short_address: u16,
        paired: bool,
    ) -> Result<FrameRepr> {
        let (mode, dst_address) = if paired {
            (AddressingMode::Short, Address::from_short(short_address))
        } else {
            (AddressingMode::Extended, Address::Extended(peer_eui))
        };

        let mut frame = self.create_frame(FrameControlRepr {
            frame_type: FrameType::Data,
            ack_request: true,
            pan_id_compression: paired,
            dst_addressing_mode: mode,
            src_addressing_mode: mode,
            ..Default::default()
        });
        frame.addressing_fields.dst_address = dst_address;

        set_payload(frame, data)
    }

    /// Create the response to `request`.
    ///
    /// The response has the frame type, sequence number and acknowledgement
    /// request of the request, goes back to the address the request came
    /// from, and is sent from the local short address. Its payload is empty.
    pub fn create_response(&self, request: &FrameRepr) -> FrameRepr {
        let dst_address = request.addressing_fields.src_address;

        let frame_control = FrameControlRepr {
            frame_type: request.frame_control.frame_type,
            ack_request: request.frame_control.ack_request,
            pan_id_compression: true,
            dst_addressing_mode: dst_address.mode(),
            frame_version: request.frame_control.frame_version,
            src_addressing_mode: AddressingMode::Short,
            ..Default::default()
        };

        let mut frame = FrameRepr {
            frame_control,
            sequence_number: request.sequence_number,
            addressing_fields: Default::default(),
            security_trailer: None,
            payload: Payload::new(),
        };

        let fields = &mut frame.addressing_fields;
        if frame_control.layout().dst_pan_id {
            fields.dst_pan_id = Some(request.src_pan_id().unwrap_or(self.identity.pan_id));
        }
        fields.dst_address = dst_address;
        fields.src_address = Address::Short(self.identity.short_address);

        trace!("mac: response to frame {}", request.sequence_number);

        frame
    }
}

fn set_payload(mut frame: FrameRepr, data: &[u8]) -> Result<FrameRepr> {
    frame.payload = Payload::from_slice(data).map_err(|_| crate::frame::Error::FrameTooLong)?;
    frame.validate()?;
    Ok(frame)
}

#[cfg(test)]
mod tests;
