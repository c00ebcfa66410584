//! Configuration structures for SiltDB.

use serde::{Deserialize, Serialize};

/// Configuration for the heap allocator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeapConfig {
    /// Number of page buffers to allocate up front.
    pub preallocate_pages: usize,
    /// Initial capacity of the free-space queue, in entries.
    pub queue_capacity: usize,
}

impl Default for HeapConfig {
    fn default() -> Self {
        Self {
            preallocate_pages: 0,
            queue_capacity: 64,
        }
    }
}
