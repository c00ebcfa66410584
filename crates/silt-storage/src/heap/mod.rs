//! Heap allocation over slotted pages.
//!
//! This module provides:
//! - FreeSpaceQueue: priority queue of per-page free-space snapshots
//! - Heap: best-fit placement of byte payloads, returning stable addresses

mod allocator;
mod queue;

pub use allocator::{Heap, HeapPage};
