#![no_main]

use arbitrary::Arbitrary;
use osnp_frame::{
    AddressingFieldsRepr, FrameControlRepr, FrameRepr, Payload, SecurityTrailerRepr,
};

use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Parts {
    frame_control: FrameControlRepr,
    sequence_number: u8,
    addressing_fields: AddressingFieldsRepr,
    security_trailer: Option<SecurityTrailerRepr>,
    payload: Vec<u8>,
}

fuzz_target!(|parts: Parts| {
    let Ok(payload) = Payload::from_slice(&parts.payload) else {
        return;
    };

    let repr = FrameRepr {
        frame_control: parts.frame_control,
        sequence_number: parts.sequence_number,
        addressing_fields: parts.addressing_fields,
        security_trailer: parts.security_trailer,
        payload,
    };

    if repr.validate().is_err() {
        assert!(repr.encode().is_err());
        return;
    }

    let len = repr.buffer_len();
    let mut buffer = vec![0; len];
    assert_eq!(repr.emit(&mut buffer), Ok(len));

    // Reserved frame types are only kept by their low bits, compare the
    // bytes rather than the representations.
    buffer.extend_from_slice(&[0, 0]);
    let decoded = FrameRepr::decode(&buffer).unwrap();
    assert_eq!(decoded.encode(), repr.encode());
});
