//! Page and slot identifiers for SiltDB storage.

use serde::{Deserialize, Serialize};

/// Default page size in bytes (64 KB): the `PAGE_SIZE` the page store and
/// heap allocator use unless instantiated with another size.
pub const DEFAULT_PAGE_SIZE: usize = 64 * 1024;

/// Unique identifier for a page within a page store.
///
/// Page ids are assigned densely starting at 0 and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PageId(pub u32);

impl PageId {
    /// Creates a new PageId.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the id as a usize index into the page store.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "page:{}", self.0)
    }
}

/// Slot identifier within a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotId(pub u16);

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "slot:{}", self.0)
    }
}

/// Stable address of a stored value: a page id plus a slot within it.
///
/// Addresses returned by the heap allocator remain valid for the life of
/// the allocator; slots are never renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    /// Page holding the value.
    pub page: PageId,
    /// Slot within the page.
    pub slot: SlotId,
}

impl Address {
    /// Creates a new Address.
    pub fn new(page: PageId, slot: SlotId) -> Self {
        Self { page, slot }
    }

    /// Returns the address packed into 48 bits of a u64 (page high, slot low).
    pub fn as_u64(&self) -> u64 {
        ((self.page.0 as u64) << 16) | (self.slot.0 as u64)
    }

    /// Unpacks an address from its u64 representation.
    pub fn from_u64(value: u64) -> Self {
        Self {
            page: PageId((value >> 16) as u32),
            slot: SlotId(value as u16),
        }
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.page.0, self.slot.0)
    }
}
