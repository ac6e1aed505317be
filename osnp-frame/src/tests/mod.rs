use super::*;

/// Assert that each expression evaluates to the expected value.
macro_rules! test {
    ($($value:expr => $expected:expr),* $(,)?) => {
        $(assert_eq!($value, $expected, stringify!($value));)*
    };
}


fn sample_data_frame() -> FrameRepr {
    FrameRepr {
        frame_control: FrameControlRepr {
            frame_type: FrameType::Data,
            ack_request: true,
            pan_id_compression: true,
            dst_addressing_mode: AddressingMode::Short,
            src_addressing_mode: AddressingMode::Short,
            ..Default::default()
        },
        sequence_number: 1,
        addressing_fields: AddressingFieldsRepr {
            dst_pan_id: Some(PanId([0xfe, 0xca])),
            dst_address: Address::Short([0xef, 0xbe]),
            src_pan_id: None,
            src_address: Address::Short([0xbe, 0xba]),
        },
        security_trailer: None,
        payload: Payload::from_slice(b"test").unwrap(),
    }
}

#[test]
fn emit_data_frame() {
    let frame = sample_data_frame();

    let mut buffer = vec![0; frame.buffer_len()];
    assert_eq!(frame.emit(&mut buffer).unwrap(), 13);

    assert_eq!(
        buffer,
        [0x61, 0x88, 0x01, 0xfe, 0xca, 0xef, 0xbe, 0xbe, 0xba, 0x74, 0x65, 0x73, 0x74]
    );
}

#[test]
fn emit_into_larger_buffer() {
    let frame = sample_data_frame();

    let mut buffer = [0xaa; 20];
    assert_eq!(frame.emit(&mut buffer).unwrap(), 13);
    assert_eq!(buffer[..3], [0x61, 0x88, 0x01]);
    assert_eq!(buffer[13..], [0xaa; 7]);
}

#[test]
fn emit_buffer_too_small() {
    let frame = sample_data_frame();

    let mut buffer = [0u8; 12];
    assert_eq!(frame.emit(&mut buffer), Err(Error::BufferTooSmall));
}

#[test]
fn emit_secured_frame() {
    let mut frame = sample_data_frame();
    frame.frame_control.security_enabled = true;
    frame.frame_control.frame_version = FrameVersion::Ieee802154_2006;
    frame.security_trailer = Some(SecurityTrailerRepr {
        frame_counter: 0x7aaffaa7,
        key_counter: 0x01,
    });

    assert_eq!(frame.buffer_len(), 18);
    assert_eq!(
        frame.encode().unwrap(),
        [
            0x69, 0x98, 0x01, 0xfe, 0xca, 0xef, 0xbe, 0xbe, 0xba, 0xa7, 0xfa, 0xaf, 0x7a, 0x01,
            0x74, 0x65, 0x73, 0x74,
        ]
    );
}

#[test]
fn emit_uncompressed_extended_source() {
    let frame = FrameRepr {
        frame_control: FrameControlRepr {
            frame_type: FrameType::MacCommand,
            dst_addressing_mode: AddressingMode::Short,
            src_addressing_mode: AddressingMode::Extended,
            ..Default::default()
        },
        sequence_number: 5,
        addressing_fields: AddressingFieldsRepr {
            dst_pan_id: Some(PanId::UNSPECIFIED),
            dst_address: Address::BROADCAST,
            src_pan_id: Some(PanId([0x34, 0x12])),
            src_address: Address::Extended([0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]),
        },
        security_trailer: None,
        payload: Payload::from_slice(&[0x01]).unwrap(),
    };

    assert_eq!(
        frame.encode().unwrap(),
        [
            0x03, 0xc8, 0x05, 0x00, 0x00, 0xff, 0xff, 0x34, 0x12, 0x01, 0x02, 0x03, 0x04, 0x05,
            0x06, 0x07, 0x08, 0x01,
        ]
    );
}

#[test]
fn inconsistent_security() {
    let mut frame = sample_data_frame();
    frame.frame_control.security_enabled = true;
    assert_eq!(frame.encode(), Err(Error::InconsistentSecurity));

    let mut frame = sample_data_frame();
    frame.security_trailer = Some(SecurityTrailerRepr::default());
    assert_eq!(frame.validate(), Err(Error::InconsistentSecurity));
}

#[test]
fn inconsistent_addressing() {
    let mut frame = sample_data_frame();
    frame.addressing_fields.src_address = Address::Extended([0x01; 8]);
    assert_eq!(frame.encode(), Err(Error::InconsistentAddressing));
}

#[test]
fn frame_too_long() {
    let mut frame = sample_data_frame();
    frame.frame_control.dst_addressing_mode = AddressingMode::Extended;
    frame.frame_control.src_addressing_mode = AddressingMode::Extended;
    frame.addressing_fields.dst_address = Address::Extended([0x01; 8]);
    frame.addressing_fields.src_address = Address::Extended([0x02; 8]);
    frame.payload = Payload::from_slice(&[0x00; MAX_PAYLOAD_LEN]).unwrap();

    assert_eq!(frame.validate(), Err(Error::FrameTooLong));
    assert_eq!(frame.encode(), Err(Error::FrameTooLong));

    // The longest payload that still fits.
    frame.payload.truncate(MAX_FRAME_LEN - FCS_LEN - frame.layout().header_len());
    assert_eq!(frame.encode().unwrap().len() + FCS_LEN, MAX_FRAME_LEN);
}
