use crate::SecurityTrailer;

/// A high-level representation of the OSNP security trailer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct SecurityTrailerRepr {
    /// Frame counter, little-endian on the wire.
    pub frame_counter: u32,
    /// Key counter.
    pub key_counter: u8,
}

impl SecurityTrailerRepr {
    /// Parse the security trailer.
    pub fn parse(trailer: &SecurityTrailer<&'_ [u8]>) -> Self {
        Self {
            frame_counter: trailer.frame_counter(),
            key_counter: trailer.key_counter(),
        }
    }

    /// Write the security trailer.
    pub fn emit(&self, trailer: &mut SecurityTrailer<&'_ mut [u8]>) {
        trailer.set_frame_counter(self.frame_counter);
        trailer.set_key_counter(self.key_counter);
    }
}
