use super::{Error, Frame, Result};
use super::{FieldLayout, PanId};
use super::{FCS_LEN, MAX_FRAME_LEN, MAX_PAYLOAD_LEN};

mod addressing;
pub use addressing::AddressingFieldsRepr;

mod frame_control;
pub use frame_control::FrameControlRepr;

mod security;
pub use security::SecurityTrailerRepr;

/// An owned frame payload.
pub type Payload = heapless::Vec<u8, MAX_PAYLOAD_LEN>;

/// An owned, encoded frame, without the check sequence.
pub type FrameBuffer = heapless::Vec<u8, MAX_FRAME_LEN>;

/// A high-level representation of an OSNP frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRepr {
    /// The frame control field.
    pub frame_control: FrameControlRepr,
    /// The sequence number.
    pub sequence_number: u8,
    /// The addressing fields.
    pub addressing_fields: AddressingFieldsRepr,
    /// The security trailer.
    pub security_trailer: Option<SecurityTrailerRepr>,
    /// The payload.
    pub payload: Payload,
}

impl FrameRepr {
    /// Parse an OSNP frame.
    pub fn parse(reader: &Frame<&'_ [u8]>) -> Result<Self> {
        let payload = Payload::from_slice(reader.payload()).map_err(|_| Error::FrameTooLong)?;

        Ok(Self {
            frame_control: FrameControlRepr::parse(reader.frame_control()),
            sequence_number: reader.sequence_number(),
            addressing_fields: AddressingFieldsRepr::parse(reader.addressing()),
            security_trailer: reader
                .security_trailer()
                .map(|trailer| SecurityTrailerRepr::parse(&trailer)),
            payload,
        })
    }

    /// Decode an on-wire buffer, check sequence included.
    pub fn decode(data: &[u8]) -> Result<Self> {
        Self::parse(&Frame::new(data)?)
    }

    /// Return the layout of the conditional fields.
    pub fn layout(&self) -> FieldLayout {
        self.frame_control.layout()
    }

    /// Return the destination PAN identifier.
    pub fn dst_pan_id(&self) -> Option<PanId> {
        self.addressing_fields.dst_pan_id
    }

    /// Return the source PAN identifier, derived from the destination PAN
    /// identifier when compressed.
    pub fn src_pan_id(&self) -> Option<PanId> {
        self.addressing_fields.src_pan_id(&self.frame_control)
    }

    /// Validate the frame.
    pub fn validate(&self) -> Result<()> {
        if self.frame_control.security_enabled != self.security_trailer.is_some() {
            return Err(Error::InconsistentSecurity);
        }

        self.addressing_fields.validate(&self.frame_control)?;

        if self.buffer_len() + FCS_LEN > MAX_FRAME_LEN {
            return Err(Error::FrameTooLong);
        }

        Ok(())
    }

    /// Return the length of the frame when emitted into a buffer.
    pub fn buffer_len(&self) -> usize {
        self.layout().header_len() + self.payload.len()
    }

    /// Emit the frame into a buffer, returning the number of octets written.
    ///
    /// The check sequence is not written.
    pub fn emit(&self, buffer: &mut [u8]) -> Result<usize> {
        self.validate()?;

        let len = self.buffer_len();
        if buffer.len() < len {
            return Err(Error::BufferTooSmall);
        }

        let mut frame = Frame::new_unchecked(&mut buffer[..len]);
        frame.set_frame_control(&self.frame_control);
        frame.set_sequence_number(self.sequence_number);
        frame.set_addressing_fields(&self.addressing_fields);

        if let Some(trailer) = &self.security_trailer {
            frame.set_security_trailer(trailer);
        }

        frame.set_payload(&self.payload);

        Ok(len)
    }

    /// Encode the frame into a buffer of exactly [`FrameRepr::buffer_len`]
    /// octets.
    pub fn encode(&self) -> Result<FrameBuffer> {
        let mut buffer = FrameBuffer::new();
        buffer
            .resize(self.buffer_len(), 0)
            .map_err(|_| Error::FrameTooLong)?;
        self.emit(&mut buffer)?;
        Ok(buffer)
    }
}
