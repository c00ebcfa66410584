//! Storage engine core for SiltDB.
//!
//! This crate provides:
//! - Page store managing a dense collection of in-memory page buffers
//! - Slotted pages for variable-length value storage, configurable along
//!   four compile-time axes
//! - Heap allocator placing payloads by free space, best fit first

mod heap;
mod slotted;
mod store;

pub use heap::{Heap, HeapPage};
pub use slotted::{
    ByteAligned, ByteOffset, Capacity, DirectoryLayout, DynamicCap, Mutability, Mutable,
    NibbleAligned, NibbleOffset, Readonly, SlotWidth, SlottedPage, StaticCap, U12, U4,
};
pub use store::PageStore;
