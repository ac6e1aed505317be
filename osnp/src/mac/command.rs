use osnp_macros::frame;

use crate::command_queue::Command;
use crate::config::TRANSMISSION_TIMEOUT;
use crate::frame::{FrameRepr, FrameType};
use crate::time::Duration;

/// Length of a key carried by a pairing command.
pub const KEY_LEN: usize = 16;

/// Length of a pairing command payload.
pub const PAIRING_COMMAND_LEN: usize = 1 + 2 * KEY_LEN + 2;

/// Identifier of a MAC command, first octet of a MAC command payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum MacCommandId {
    /// Discovery request, `0x01`.
    Discovery,
    /// Pairing command, `0x02`.
    Pairing,
    /// Unpairing command, `0x03`.
    Unpairing,
    /// Key update command, `0x04`.
    KeyUpdate,
    /// Any other identifier, kept as its raw value.
    Unknown(u8),
}

impl From<u8> for MacCommandId {
    fn from(value: u8) -> Self {
        match value {
            0x01 => Self::Discovery,
            0x02 => Self::Pairing,
            0x03 => Self::Unpairing,
            0x04 => Self::KeyUpdate,
            other => Self::Unknown(other),
        }
    }
}

impl From<MacCommandId> for u8 {
    fn from(value: MacCommandId) -> Self {
        match value {
            MacCommandId::Discovery => 0x01,
            MacCommandId::Pairing => 0x02,
            MacCommandId::Unpairing => 0x03,
            MacCommandId::KeyUpdate => 0x04,
            MacCommandId::Unknown(raw) => raw,
        }
    }
}

#[frame]
/// A reader/writer for the payload of a pairing command.
#[derive(Debug)]
pub struct PairingCommand {
    /// Return the command identifier.
    command_id: u8,
    /// Return the key the paired node transmits with.
    #[bytes(16)]
    tx_key: &[u8],
    /// Return the key the paired node receives with.
    #[bytes(16)]
    rx_key: &[u8],
    /// Return the assigned short address, big-endian.
    #[bytes(2)]
    short_address: &[u8],
}

impl<T: AsRef<[u8]>> PairingCommand<T> {
    /// Return the assigned short address.
    pub fn assigned_address(&self) -> u16 {
        let b = self.short_address();
        u16::from_be_bytes([b[0], b[1]])
    }
}

/// A frame scheduled on a [`CommandQueue`](crate::command_queue::CommandQueue).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingCommand {
    /// The frame to transmit.
    pub frame: FrameRepr,
    /// How long to wait for the response.
    pub transmission_timeout: Option<Duration>,
}

impl OutgoingCommand {
    /// Wrap a frame, waiting `TRANSMISSION_TIMEOUT` for its response.
    pub fn new(frame: FrameRepr) -> Self {
        Self {
            frame,
            transmission_timeout: Some(TRANSMISSION_TIMEOUT),
        }
    }

    /// Set how long to wait for the response, `None` waits forever.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.transmission_timeout = timeout;
        self
    }

    /// Return the MAC command identifier, if the frame is a MAC command.
    pub fn command_id(&self) -> Option<MacCommandId> {
        if self.frame.frame_control.frame_type != FrameType::MacCommand {
            return None;
        }

        self.frame.payload.first().map(|&id| MacCommandId::from(id))
    }
}

impl Command for OutgoingCommand {
    fn transmission_timeout(&self) -> Option<Duration> {
        self.transmission_timeout
    }
}
