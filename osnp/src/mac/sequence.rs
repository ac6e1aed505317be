use rand_core::RngCore;

/// Source of frame sequence numbers.
///
/// Yields `0..=254` in order and wraps around. `255` is never issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SequenceNumber(u8);

impl SequenceNumber {
    /// Highest sequence number that is issued.
    pub const MAX: u8 = 254;

    /// Start counting at `start`. `255` starts at `0`.
    pub const fn new(start: u8) -> Self {
        if start > Self::MAX {
            Self(0)
        } else {
            Self(start)
        }
    }

    /// Start counting at a random value.
    pub fn random<R: RngCore>(rng: &mut R) -> Self {
        Self::new((rng.next_u32() % (Self::MAX as u32 + 1)) as u8)
    }

    /// Return the next sequence number.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> u8 {
        let current = self.0;
        self.0 = if current == Self::MAX { 0 } else { current + 1 };
        current
    }

    /// Return the sequence number [`SequenceNumber::next`] yields, without
    /// consuming it.
    pub fn peek(&self) -> u8 {
        self.0
    }
}

impl Default for SequenceNumber {
    fn default() -> Self {
        Self::new(0)
    }
}
