#![no_std]

use osnp::address_table::AddressTable;
use osnp::mac::{MacLayer, NodeIdentity, SequenceNumber};

pub fn build_discovery_request(eui: [u8; 8]) -> Option<osnp::frame::FrameBuffer> {
    let mut mac = MacLayer::new(NodeIdentity::new(0, 0, eui), SequenceNumber::default());
    mac.create_discovery_request().ok()?.encode().ok()
}

pub fn first_address() -> Option<u16> {
    AddressTable::default().allocate()
}
