//! Security trailer readers and writers.
//!
//! The trailer only carries the replay counters that a security provider
//! needs to build its nonce. Encryption and integrity are handled outside of
//! this crate.

use osnp_macros::frame;

/// Length of the security trailer in octets.
pub const SECURITY_TRAILER_LEN: usize = 5;

#[frame]
/// A reader/writer for the OSNP security trailer.
#[derive(Debug)]
pub struct SecurityTrailer {
    /// Return the frame counter field value.
    frame_counter: u32,
    /// Return the key counter field value.
    key_counter: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size() {
        assert_eq!(SecurityTrailer::<&[u8]>::size(), SECURITY_TRAILER_LEN);
    }

    #[test]
    fn read() {
        let trailer = SecurityTrailer::new(&[0xa7, 0xfa, 0xaf, 0x7a, 0x01][..]);
        assert!(trailer.check_len());
        assert_eq!(trailer.frame_counter(), 0x7aaf_faa7);
        assert_eq!(trailer.key_counter(), 0x01);
    }

    #[test]
    fn write() {
        let mut buffer = [0u8; 5];
        let mut trailer = SecurityTrailer::new(&mut buffer[..]);
        trailer.set_frame_counter(0x0102_0304);
        trailer.set_key_counter(0xff);
        assert_eq!(buffer, [0x04, 0x03, 0x02, 0x01, 0xff]);
    }
}
