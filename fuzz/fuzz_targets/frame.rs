#![no_main]

use osnp_frame::{Frame, FrameRepr, MAX_FRAME_LEN};

use libfuzzer_sys::{fuzz_target, Corpus};

fuzz_target!(|data: &[u8]| -> Corpus {
    if data.len() > MAX_FRAME_LEN {
        return Corpus::Reject;
    }

    let Ok(frame) = Frame::new(data) else {
        return Corpus::Keep;
    };

    // Whatever parses and validates must be emitted back as it was read,
    // the frame control octets aside: reserved bits and modes are cleared.
    if let Ok(repr) = FrameRepr::parse(&frame) {
        if let Ok(encoded) = repr.encode() {
            assert_eq!(encoded.len(), data.len() - 2);
            assert_eq!(encoded[2..], data[2..data.len() - 2]);
        }
    }

    Corpus::Keep
});
