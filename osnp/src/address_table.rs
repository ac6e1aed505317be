//! Short address allocation.
//!
//! A coordinator hands out 16-bit short addresses to the nodes it pairs
//! with. [`AddressTable`] keeps track of which addresses are taken, using one
//! bit per address, and keeps a cursor on the next free address so that
//! allocation never has to search from the start.
//!
//! Addresses `0x0000`, `0xfffe` and `0xffff` are reserved and never handed
//! out.

use crate::{Error, Result};

/// Number of addresses in the 16-bit address space.
const ADDRESS_SPACE: usize = 0x1_0000;

const WORD_BITS: usize = u32::BITS as usize;

/// Addresses that are never allocated nor freed.
pub const RESERVED_ADDRESSES: [u16; 3] = [0x0000, 0xfffe, 0xffff];

/// Lowest address that can be allocated.
pub const FIRST_ADDRESS: u16 = 0x0001;

/// Highest address that can be allocated.
pub const LAST_ADDRESS: u16 = 0xfffd;

/// Allocator for 16-bit short addresses.
#[derive(Clone)]
pub struct AddressTable {
    allocated: [u32; ADDRESS_SPACE / WORD_BITS],
    next_free_address: Option<u16>,
}

impl AddressTable {
    /// Create a table where the reserved addresses and every address of
    /// `seed` are already allocated.
    pub fn new(seed: &[u16]) -> Self {
        let mut table = Self {
            allocated: [0; ADDRESS_SPACE / WORD_BITS],
            next_free_address: None,
        };

        for &address in RESERVED_ADDRESSES.iter().chain(seed) {
            table.mark(address);
        }

        table.next_free_address = table.find_free(0x0000);

        if table.next_free_address.is_none() {
            warn!("address table: no free address after seeding");
        }

        table
    }

    /// Allocate the next free address.
    ///
    /// Returns `None` when every address is taken. This has no side effect,
    /// so it can be retried after [`AddressTable::free`].
    pub fn allocate(&mut self) -> Option<u16> {
        let address = self.next_free_address?;

        self.mark(address);
        self.next_free_address = self.find_free(address.wrapping_add(1));

        debug!("address table: allocated {:#x}", address);

        if self.next_free_address.is_none() {
            warn!("address table: all addresses allocated");
        }

        Some(address)
    }

    /// Free an address so that it can be allocated again.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReservedOrOutOfRangeAddress`] unless
    /// `FIRST_ADDRESS <= address <= LAST_ADDRESS`. The table is left
    /// untouched in that case.
    pub fn free(&mut self, address: u32) -> Result<()> {
        let address = u16::try_from(address)
            .ok()
            .filter(|address| (FIRST_ADDRESS..=LAST_ADDRESS).contains(address))
            .ok_or(Error::ReservedOrOutOfRangeAddress)?;

        self.allocated[address as usize / WORD_BITS] &= !Self::bit(address);

        if self.next_free_address.is_none() {
            info!("address table: reclaimed {:#x}", address);
            self.next_free_address = Some(address);
        }

        Ok(())
    }

    /// Returns `true` when the address is allocated or reserved.
    pub fn is_allocated(&self, address: u16) -> bool {
        self.allocated[address as usize / WORD_BITS] & Self::bit(address) != 0
    }

    /// Return the address the next call to [`AddressTable::allocate`] hands
    /// out.
    pub fn next_free_address(&self) -> Option<u16> {
        self.next_free_address
    }

    /// Return the number of allocated addresses, reserved ones excluded.
    pub fn allocated_count(&self) -> usize {
        let marked: u32 = self.allocated.iter().map(|word| word.count_ones()).sum();
        marked as usize - RESERVED_ADDRESSES.len()
    }

    fn bit(address: u16) -> u32 {
        1 << (address as usize % WORD_BITS)
    }

    fn mark(&mut self, address: u16) {
        self.allocated[address as usize / WORD_BITS] |= Self::bit(address);
    }

    /// Find the first free address at or after `start`, wrapping around past
    /// `0xffff`. Fully allocated words are skipped at once.
    fn find_free(&self, start: u16) -> Option<u16> {
        let mut address = start as usize;
        let mut remaining = ADDRESS_SPACE;

        while remaining > 0 {
            let bit = address % WORD_BITS;
            let free = !self.allocated[address / WORD_BITS] >> bit;

            if free != 0 {
                let offset = free.trailing_zeros() as usize;
                return (offset < remaining).then_some((address + offset) as u16);
            }

            let step = WORD_BITS - bit;
            remaining = remaining.saturating_sub(step);
            address = (address + step) % ADDRESS_SPACE;
        }

        None
    }
}

impl Default for AddressTable {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl core::fmt::Debug for AddressTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AddressTable")
            .field("allocated", &self.allocated_count())
            .field("next_free_address", &self.next_free_address)
            .finish()
    }
}
