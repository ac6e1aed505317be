use super::*;

use crate::address_table::AddressTable;
use crate::command_queue::{CommandQueue, DefaultCommandQueue, QueueEvent, TimeoutList};
use crate::config::TRANSMISSION_TIMEOUT;
use crate::frame::{Error as FrameError, FrameVersion};
use crate::utils::test::init_logger;
use crate::Error;

const EUI: [u8; 8] = [0x00, 0x12, 0x4b, 0x00, 0x14, 0xb5, 0xd9, 0xc7];
const PEER_EUI: [u8; 8] = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];

fn mac(start: u8) -> MacLayer {
    MacLayer::new(
        NodeIdentity::new(0xfeca, 0xbeba, EUI),
        SequenceNumber::new(start),
    )
}

#[test]
fn identity() {
    let identity = NodeIdentity::new(0xfeca, 0xbeba, EUI);
    assert_eq!(identity.pan_id, PanId([0xfe, 0xca]));
    assert_eq!(identity.short_address, [0xbe, 0xba]);
    assert_eq!(mac(0).identity(), &identity);
}

#[test]
fn create_frame() {
    init_logger();
    let mut mac = mac(1);

    let frame = mac.create_frame(FrameControlRepr {
        frame_type: FrameType::Data,
        ack_request: true,
        pan_id_compression: true,
        dst_addressing_mode: AddressingMode::Short,
        src_addressing_mode: AddressingMode::Short,
        ..Default::default()
    });

    assert_eq!(frame.sequence_number, 1);
    assert_eq!(frame.dst_pan_id(), Some(PanId([0xfe, 0xca])));
    assert_eq!(frame.src_pan_id(), Some(PanId([0xfe, 0xca])));
    assert_eq!(frame.addressing_fields.src_pan_id, None);
    assert_eq!(frame.addressing_fields.dst_address, Address::Short([0, 0]));
    assert_eq!(frame.addressing_fields.src_address, Address::Short([0xbe, 0xba]));
    assert_eq!(frame.security_trailer, None);
    assert!(frame.payload.is_empty());

    assert_eq!(
        frame.encode().unwrap(),
        [0x61, 0x88, 0x01, 0xfe, 0xca, 0x00, 0x00, 0xbe, 0xba]
    );
}

#[test]
fn create_frame_uncompressed_extended() {
    let mut mac = mac(0);

    let frame = mac.create_frame(FrameControlRepr {
        dst_addressing_mode: AddressingMode::Extended,
        src_addressing_mode: AddressingMode::Extended,
        ..Default::default()
    });

    assert_eq!(frame.dst_pan_id(), Some(PanId([0xfe, 0xca])));
    assert_eq!(frame.addressing_fields.src_pan_id, Some(PanId([0xfe, 0xca])));
    assert_eq!(frame.addressing_fields.dst_address, Address::Extended([0; 8]));
    assert_eq!(frame.addressing_fields.src_address, Address::Extended(EUI));
    assert_eq!(frame.buffer_len(), 3 + 2 + 8 + 2 + 8);
    assert!(frame.validate().is_ok());
}

#[test]
fn create_frame_without_addressing() {
    let mut mac = mac(0);

    let frame = mac.create_frame(FrameControlRepr {
        frame_type: FrameType::Ack,
        ..Default::default()
    });

    assert_eq!(frame.addressing_fields, Default::default());
    assert_eq!(frame.encode().unwrap(), [0x02, 0x00, 0x00]);
}

#[test]
fn create_frame_reserved_addressing_mode() {
    let mut mac = mac(0);

    let frame = mac.create_frame(FrameControlRepr {
        dst_addressing_mode: AddressingMode::Short,
        src_addressing_mode: AddressingMode::Reserved,
        ..Default::default()
    });

    assert_eq!(frame.frame_control.src_addressing_mode, AddressingMode::Absent);
    assert_eq!(frame.addressing_fields.src_address, Address::Absent);
    assert_eq!(
        frame.encode().unwrap(),
        [0x01, 0x08, 0x00, 0xfe, 0xca, 0x00, 0x00]
    );
}

#[test]
fn create_secured_frame() {
    let mut mac = mac(0);

    let frame = mac.create_frame(FrameControlRepr {
        security_enabled: true,
        pan_id_compression: true,
        dst_addressing_mode: AddressingMode::Short,
        frame_version: FrameVersion::Ieee802154_2006,
        src_addressing_mode: AddressingMode::Short,
        ..Default::default()
    });

    assert_eq!(
        frame.security_trailer,
        Some(SecurityTrailerRepr {
            frame_counter: 0,
            key_counter: KEY_COUNTER_UNSET,
        })
    );
    assert_eq!(
        frame.encode().unwrap(),
        [0x49, 0x98, 0x00, 0xfe, 0xca, 0x00, 0x00, 0xbe, 0xba, 0x00, 0x00, 0x00, 0x00, 0xff]
    );
}

#[test]
fn sequence_numbers() {
    let mut mac = mac(254);

    let numbers: std::vec::Vec<u8> = (0..3)
        .map(|_| mac.create_frame(FrameControlRepr::default()).sequence_number)
        .collect();

    assert_eq!(numbers, [254, 0, 1]);
}

#[test]
fn pairing_command() {
    init_logger();
    let mut mac = mac(7);

    let frame = mac
        .create_pairing_command(PEER_EUI, 0x0042, &[0x11; 16], &[0x22; 16])
        .unwrap();

    assert_eq!(frame.frame_control.frame_type, FrameType::MacCommand);
    assert!(frame.frame_control.ack_request);
    assert!(frame.frame_control.pan_id_compression);
    assert_eq!(frame.addressing_fields.dst_address, Address::Extended(PEER_EUI));
    assert_eq!(frame.addressing_fields.src_address, Address::Short([0xbe, 0xba]));
    assert_eq!(frame.payload.len(), PAIRING_COMMAND_LEN);

    let command = PairingCommand::new(&frame.payload[..]);
    assert_eq!(MacCommandId::from(command.command_id()), MacCommandId::Pairing);
    assert_eq!(command.tx_key(), &[0x11u8; 16]);
    assert_eq!(command.rx_key(), &[0x22u8; 16]);
    assert_eq!(command.short_address(), &[0x00u8, 0x42]);
    assert_eq!(command.assigned_address(), 0x0042);

    let encoded = frame.encode().unwrap();
    assert_eq!(encoded.len(), frame.buffer_len());
    assert_eq!(encoded.len(), 3 + 2 + 8 + 2 + PAIRING_COMMAND_LEN);
    assert_eq!(
        encoded[..15],
        [
            0x63, 0x8c, 0x07, 0xfe, 0xca, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0xbe,
            0xba,
        ]
    );
}

#[test]
fn unpairing_command() {
    let mut mac = mac(3);

    let frame = mac.create_unpairing_command(0x1234).unwrap();

    assert_eq!(
        frame.encode().unwrap(),
        [0x63, 0x88, 0x03, 0xfe, 0xca, 0x12, 0x34, 0xbe, 0xba, 0x03]
    );
}

#[test]
fn discovery_request() {
    let mut mac = mac(0);

    let frame = mac.create_discovery_request().unwrap();

    assert_eq!(frame.dst_pan_id(), Some(PanId::UNSPECIFIED));
    assert_eq!(frame.addressing_fields.dst_address, Address::BROADCAST);
    assert_eq!(frame.src_pan_id(), Some(PanId([0xfe, 0xca])));
    assert_eq!(frame.addressing_fields.src_address, Address::Extended(EUI));
    assert!(!frame.frame_control.ack_request);

    assert_eq!(
        frame.encode().unwrap(),
        [
            0x03, 0xc8, 0x00, 0x00, 0x00, 0xff, 0xff, 0xfe, 0xca, 0x00, 0x12, 0x4b, 0x00, 0x14,
            0xb5, 0xd9, 0xc7, 0x01,
        ]
    );
}

#[test]
fn command_packet_paired() {
    let mut mac = mac(9);

    let frame = mac
        .create_command_packet(b"test", PEER_EUI, 0xefbe, true)
        .unwrap();

    assert_eq!(
        frame.encode().unwrap(),
        [0x61, 0x88, 0x09, 0xfe, 0xca, 0xef, 0xbe, 0xbe, 0xba, 0x74, 0x65, 0x73, 0x74]
    );
}

#[test]
fn command_packet_unpaired() {
    let mut mac = mac(9);

    let frame = mac
        .create_command_packet(b"test", PEER_EUI, 0xefbe, false)
        .unwrap();

    assert!(!frame.frame_control.pan_id_compression);
    assert_eq!(frame.dst_pan_id(), Some(PanId([0xfe, 0xca])));
    assert_eq!(frame.src_pan_id(), Some(PanId([0xfe, 0xca])));
    assert_eq!(frame.addressing_fields.dst_address, Address::Extended(PEER_EUI));
    assert_eq!(frame.addressing_fields.src_address, Address::Extended(EUI));

    let encoded = frame.encode().unwrap();
    assert_eq!(encoded[..3], [0x21, 0xcc, 0x09]);
    assert_eq!(encoded.len(), 3 + 2 + 8 + 2 + 8 + 4);
}

#[test]
fn command_packet_too_long() {
    let mut mac = mac(0);

    // 23 octets of header and 2 of check sequence leave room for 102.
    assert!(mac
        .create_command_packet(&[0xaa; 102], PEER_EUI, 0x0001, false)
        .is_ok());
    assert_eq!(
        mac.create_command_packet(&[0xaa; 103], PEER_EUI, 0x0001, false),
        Err(Error::Frame(FrameError::FrameTooLong))
    );
    assert_eq!(
        mac.create_command_packet(&[0xaa; 200], PEER_EUI, 0x0001, true),
        Err(Error::Frame(FrameError::FrameTooLong))
    );
}

#[test]
fn response() {
    let request = FrameRepr::decode(&[
        0x61, 0xc8, 0x01, 0xfe, 0xca, 0xbe, 0xba, 0xef, 0xbe, 0xef, 0xbe, 0xef, 0xbe, 0xef, 0xbe,
        0x74, 0x65, 0x73, 0x74, 0x00, 0x00,
    ])
    .unwrap();

    let mac = mac(100);
    let response = mac.create_response(&request);

    assert_eq!(response.sequence_number, 1);
    assert!(response.payload.is_empty());
    assert_eq!(
        response.encode().unwrap(),
        [
            0x61, 0x8c, 0x01, 0xfe, 0xca, 0xef, 0xbe, 0xef, 0xbe, 0xef, 0xbe, 0xef, 0xbe, 0xbe,
            0xba,
        ]
    );
}

#[test]
fn response_without_source_pan_id() {
    // Source address only, so the response falls back to the local PAN.
    let request = FrameRepr::decode(&[0x41, 0x80, 0x05, 0x12, 0x34, 0x00, 0x00]).unwrap();

    let response = mac(0).create_response(&request);

    assert_eq!(response.dst_pan_id(), Some(PanId([0xfe, 0xca])));
    assert_eq!(response.addressing_fields.dst_address, Address::Short([0x12, 0x34]));
    assert_eq!(
        response.encode().unwrap(),
        [0x41, 0x88, 0x05, 0xfe, 0xca, 0x12, 0x34, 0xbe, 0xba]
    );
}

#[test]
fn buffer_len_matches_encoding() {
    let mut mac = mac(0);

    let frames = [
        mac.create_pairing_command(PEER_EUI, 0x0001, &[0; 16], &[0; 16])
            .unwrap(),
        mac.create_unpairing_command(0x0001).unwrap(),
        mac.create_discovery_request().unwrap(),
        mac.create_command_packet(&[1, 2, 3], PEER_EUI, 0x0001, true)
            .unwrap(),
        mac.create_command_packet(&[], PEER_EUI, 0x0001, false)
            .unwrap(),
    ];

    for frame in frames {
        let response = mac.create_response(&frame);
        assert_eq!(frame.buffer_len(), frame.encode().unwrap().len());
        assert_eq!(response.buffer_len(), response.encode().unwrap().len());
    }
}

#[test]
fn outgoing_command() {
    let mut mac = mac(0);

    let command = OutgoingCommand::new(mac.create_discovery_request().unwrap());
    assert_eq!(command.transmission_timeout, Some(TRANSMISSION_TIMEOUT));
    assert_eq!(command.command_id(), Some(MacCommandId::Discovery));

    let command = OutgoingCommand::new(
        mac.create_command_packet(&[0x02], PEER_EUI, 0x0001, true)
            .unwrap(),
    )
    .with_timeout(None);
    assert_eq!(command.transmission_timeout, None);
    assert_eq!(command.command_id(), None);
}

#[test]
fn pair_nodes() {
    init_logger();

    let mut mac = mac(0);
    let mut addresses = AddressTable::new(&[0x0001]);
    let mut queue: DefaultCommandQueue<OutgoingCommand, TimeoutList<2>> =
        CommandQueue::new(TimeoutList::new());

    for peer in 0..3u8 {
        let short_address = addresses.allocate().unwrap();
        let frame = mac
            .create_pairing_command([peer; 8], short_address, &[peer; 16], &[!peer; 16])
            .unwrap();
        queue.queue(OutgoingCommand::new(frame)).unwrap();
    }

    // The first node answers.
    let sent = queue.dequeue().unwrap().frame.clone();
    assert_eq!(
        PairingCommand::new(&sent.payload[..]).assigned_address(),
        0x0002
    );
    let response = mac.create_response(&sent);
    assert_eq!(response.sequence_number, sent.sequence_number);
    assert!(queue.device_responded().is_some());
    let stale = queue.timer_mut().pop().unwrap();

    // The second one does not, its address goes back to the table.
    queue.dequeue().unwrap();
    assert_eq!(queue.timeout_elapsed(stale.id), None);
    let timeout = queue.timer_mut().pop().unwrap();
    let Some(QueueEvent::TransmissionTimeout(command)) = queue.timeout_elapsed(timeout.id) else {
        panic!("expected a timeout");
    };
    let address = PairingCommand::new(&command.frame.payload[..]).assigned_address();
    assert_eq!(address, 0x0003);
    addresses.free(address as u32).unwrap();
    assert!(!addresses.is_allocated(0x0003));

    // The third one is still pending.
    assert_eq!(queue.len(), 1);
    assert_eq!(
        queue.dequeue().map(|command| command.command_id()),
        Some(Some(MacCommandId::Pairing))
    );
}
