//! Reader/writer for complete OSNP frames.

use crate::{Error, Result};
use crate::{FCS_LEN, HEADER_LEN, MAX_FRAME_LEN};

use crate::{AddressingFields, FieldLayout, FrameControl, SecurityTrailer};
use crate::{AddressingFieldsRepr, FrameControlRepr, SecurityTrailerRepr};

/// A reader/writer for an OSNP frame.
///
/// When reading, the buffer is the frame as received: it ends with the
/// two-octet check sequence, which is excluded from the payload. When writing,
/// the buffer is exactly [`FrameRepr::buffer_len`] octets long and has no
/// check sequence.
///
/// [`FrameRepr::buffer_len`]: crate::FrameRepr::buffer_len
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<T: AsRef<[u8]>> {
    buffer: T,
}

impl<T: AsRef<[u8]>> Frame<T> {
    /// Create a new [`Frame`] reader from a received buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TruncatedFrame`] if a field the frame control announces
    /// would be read past the end of the buffer, or if fewer than two octets
    /// are left for the check sequence. Returns [`Error::FrameTooLong`] if the
    /// buffer exceeds [`MAX_FRAME_LEN`].
    pub fn new(buffer: T) -> Result<Self> {
        let frame = Self::new_unchecked(buffer);
        frame.check_len()?;
        Ok(frame)
    }

    fn check_len(&self) -> Result<()> {
        let len = self.buffer.as_ref().len();

        if len > MAX_FRAME_LEN {
            fail!(Error::FrameTooLong);
        }

        if len < HEADER_LEN {
            fail!(Error::TruncatedFrame);
        }

        if len < self.layout().header_len() + FCS_LEN {
            fail!(Error::TruncatedFrame);
        }

        Ok(())
    }

    /// Create a new [`Frame`] reader/writer without checking the length.
    pub fn new_unchecked(buffer: T) -> Self {
        Self { buffer }
    }

    /// Return the underlying buffer.
    pub fn into_inner(self) -> T {
        self.buffer
    }

    /// Return the [`FrameControl`] field.
    pub fn frame_control(&self) -> FrameControl<&'_ [u8]> {
        FrameControl::new_unchecked(&self.buffer.as_ref()[..2])
    }

    /// Return the layout of the conditional fields.
    pub fn layout(&self) -> FieldLayout {
        self.frame_control().layout()
    }

    /// Return the sequence number.
    pub fn sequence_number(&self) -> u8 {
        self.buffer.as_ref()[2]
    }

    /// Return the [`AddressingFields`].
    pub fn addressing(&self) -> AddressingFields<&'_ [u8]> {
        AddressingFields::new_unchecked(&self.buffer.as_ref()[HEADER_LEN..], self.layout())
    }

    /// Return the [`SecurityTrailer`] if the security enabled flag is set.
    pub fn security_trailer(&self) -> Option<SecurityTrailer<&'_ [u8]>> {
        let layout = self.layout();

        layout.security_trailer.then(|| {
            SecurityTrailer::new(
                &self.buffer.as_ref()[layout.security_trailer_offset()..]
                    [..layout.security_trailer_len()],
            )
        })
    }

    /// Return the payload, without the trailing check sequence.
    pub fn payload(&self) -> &[u8] {
        let buffer = self.buffer.as_ref();
        &buffer[self.layout().header_len()..buffer.len() - FCS_LEN]
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> Frame<T> {
    /// Write the frame control field.
    ///
    /// The layout of every other field follows from it, so it must be written
    /// first.
    pub fn set_frame_control(&mut self, fc: &FrameControlRepr) {
        self.buffer.as_mut()[..2].copy_from_slice(&fc.to_bytes());
    }

    /// Set the sequence number.
    pub fn set_sequence_number(&mut self, sequence_number: u8) {
        self.buffer.as_mut()[2] = sequence_number;
    }

    /// Write the addressing fields.
    pub fn set_addressing_fields(&mut self, fields: &AddressingFieldsRepr) {
        let layout = self.layout();
        AddressingFields::new_unchecked(&mut self.buffer.as_mut()[HEADER_LEN..], layout)
            .write_fields(fields);
    }

    /// Write the security trailer.
    pub fn set_security_trailer(&mut self, trailer: &SecurityTrailerRepr) {
        let layout = self.layout();
        let mut writer = SecurityTrailer::new(
            &mut self.buffer.as_mut()[layout.security_trailer_offset()..]
                [..layout.security_trailer_len()],
        );
        trailer.emit(&mut writer);
    }

    /// Write the payload right after the header.
    pub fn set_payload(&mut self, payload: &[u8]) {
        let offset = self.layout().header_len();
        self.buffer.as_mut()[offset..][..payload.len()].copy_from_slice(payload);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Address, AddressingMode, FrameType, PanId};

    #[test]
    fn read_data_frame() {
        let data = hex::decode("618801fecaefbebeba746573740000").unwrap();
        let frame = Frame::new(&data[..]).unwrap();

        let fc = frame.frame_control();
        assert_eq!(fc.frame_type(), FrameType::Data);
        assert!(!fc.security_enabled());
        assert!(fc.ack_request());
        assert!(fc.pan_id_compression());
        assert_eq!(fc.dst_addressing_mode(), AddressingMode::Short);
        assert_eq!(fc.src_addressing_mode(), AddressingMode::Short);

        assert_eq!(frame.sequence_number(), 1);

        let addressing = frame.addressing();
        assert_eq!(addressing.dst_pan_id(), Some(PanId([0xfe, 0xca])));
        assert_eq!(addressing.dst_address(), Address::Short([0xef, 0xbe]));
        assert_eq!(addressing.src_pan_id(), Some(PanId([0xfe, 0xca])));
        assert_eq!(addressing.src_address(), Address::Short([0xbe, 0xba]));

        assert!(frame.security_trailer().is_none());
        assert_eq!(frame.payload(), b"test");
    }

    #[test]
    fn read_secured_frame() {
        let data = hex::decode("699801fecaefbebebaa7faaf7a01746573740000").unwrap();
        let frame = Frame::new(&data[..]).unwrap();

        let trailer = frame.security_trailer().unwrap();
        assert_eq!(trailer.frame_counter(), 0x7aaffaa7);
        assert_eq!(trailer.key_counter(), 0x01);
        assert_eq!(frame.payload(), b"test");
    }

    #[test]
    fn empty_payload() {
        let data = [0x41, 0x88, 0x07, 0xfe, 0xca, 0xef, 0xbe, 0xbe, 0xba, 0x12, 0x34];
        let frame = Frame::new(&data[..]).unwrap();
        assert_eq!(frame.sequence_number(), 7);
        assert!(frame.payload().is_empty());
    }

    #[test]
    fn truncated() {
        // Shorter than the fixed header.
        assert_eq!(Frame::new(&[0x61, 0x88][..]).err(), Some(Error::TruncatedFrame));

        // The source address runs past the end of the buffer.
        assert_eq!(
            Frame::new(&[0x61, 0x88, 0x01, 0xfe, 0xca, 0xef, 0xbe, 0xbe][..]).err(),
            Some(Error::TruncatedFrame)
        );

        // Header complete, but no room left for the check sequence.
        assert_eq!(
            Frame::new(&[0x61, 0x88, 0x01, 0xfe, 0xca, 0xef, 0xbe, 0xbe, 0xba, 0x00][..]).err(),
            Some(Error::TruncatedFrame)
        );

        // The security flag announces a trailer the frame does not have.
        let data = hex::decode("698801fecaefbebeba746573740000").unwrap();
        assert_eq!(Frame::new(&data[..]).err(), Some(Error::TruncatedFrame));
    }

    #[test]
    fn too_long() {
        let data = [0x01; MAX_FRAME_LEN + 1];
        assert_eq!(Frame::new(&data[..]).err(), Some(Error::FrameTooLong));
    }
}
