//! Best-fit heap allocator over slotted pages.
//!
//! Payloads are placed on the page with the most free space; when even
//! that page cannot fit the request, a fresh page is allocated from the
//! store. The page written most recently is kept out of the queue as a
//! "hot" page so that runs of small inserts skip the queue entirely.

use crate::slotted::{ByteAligned, Mutable, SlottedPage, StaticCap};
use crate::store::PageStore;
use silt_common::{Address, HeapConfig, PageId, Result, SiltError, SlotId, DEFAULT_PAGE_SIZE};
use tracing::{debug, trace};

use super::queue::{FreeSpace, FreeSpaceQueue};

/// The page shape the heap allocates into: 16-bit slot indices and
/// offsets, byte-aligned directory, compile-time capacity.
pub type HeapPage<const PAGE_SIZE: usize> =
    SlottedPage<u16, StaticCap<PAGE_SIZE>, ByteAligned<u16>, Mutable<u16>>;

/// Heap allocator: places byte payloads into page-backed slots and returns
/// stable [`Address`]es.
///
/// The allocator exclusively holds its page store for its own lifetime;
/// drop the heap to share the store read-only.
///
/// Invariants maintained across every operation:
/// - each allocated page is reachable through the hot-page cache or
///   through exactly one queue entry, never both and never neither;
/// - queue entries carry the page's exact free count at enqueue time, and
///   pages are only written while hot or freshly popped;
/// - a failing [`Heap::push`] leaves the allocator state untouched.
pub struct Heap<'s, const PAGE_SIZE: usize = DEFAULT_PAGE_SIZE> {
    store: &'s mut PageStore<PAGE_SIZE>,
    queue: FreeSpaceQueue,
    /// Most recently written page, held out of the queue.
    hot: Option<PageId>,
}

impl<'s, const PAGE_SIZE: usize> Heap<'s, PAGE_SIZE> {
    /// Largest payload a freshly initialized page can hold: the page minus
    /// its header and the one directory entry the payload consumes.
    pub const MAX_PAYLOAD: usize =
        PAGE_SIZE - HeapPage::<PAGE_SIZE>::HEADER_SIZE - std::mem::size_of::<u16>();

    /// Creates a heap allocator over `store` with default configuration.
    ///
    /// Pages already present in the store are adopted: each is enqueued
    /// with its current free count.
    pub fn new(store: &'s mut PageStore<PAGE_SIZE>) -> Result<Self> {
        Self::with_config(store, HeapConfig::default())
    }

    /// Creates a heap allocator with explicit configuration.
    pub fn with_config(store: &'s mut PageStore<PAGE_SIZE>, config: HeapConfig) -> Result<Self> {
        let mut queue = FreeSpaceQueue::new();
        queue.reserve(config.queue_capacity.max(store.page_count()))?;

        for (page, data) in store.iter() {
            let free = HeapPage::<PAGE_SIZE>::available(data);
            queue.enqueue(FreeSpace { free, page })?;
        }

        let mut heap = Self {
            store,
            queue,
            hot: None,
        };
        for _ in 0..config.preallocate_pages {
            let page = heap.allocate_page()?;
            let free = HeapPage::<PAGE_SIZE>::available(heap.store.get(page));
            heap.queue.enqueue(FreeSpace { free, page })?;
        }
        Ok(heap)
    }

    /// Places `payload` into some page and returns its stable address.
    ///
    /// Fails with [`SiltError::PayloadTooLarge`] when even an empty page
    /// could not hold the payload, and with [`SiltError::OutOfHostMemory`]
    /// when a fresh page or bookkeeping growth cannot be allocated. A
    /// failed push has no observable effect.
    pub fn push(&mut self, payload: &[u8]) -> Result<Address> {
        let size = payload.len();
        if size > Self::MAX_PAYLOAD {
            return Err(SiltError::PayloadTooLarge {
                size,
                max: Self::MAX_PAYLOAD,
            });
        }

        // Hot-page fast path: consecutive small writes land on the page
        // written last, no queue traffic.
        if let Some(page) = self.hot {
            let data = self.store.get_mut(page);
            let free = HeapPage::<PAGE_SIZE>::available(data);
            if free >= size {
                let slot = HeapPage::<PAGE_SIZE>::push(data, payload);
                return Ok(Address::new(page, SlotId(slot as u16)));
            }
            // The hot page cannot fit this payload: return it to the
            // queue with its current free count. On enqueue failure the
            // cache entry stays valid, so state is unchanged.
            self.queue.enqueue(FreeSpace { free, page })?;
            trace!(page = page.0, free, "hot page returned to queue");
            self.hot = None;
        }

        // The queue's best page either fits or nothing queued does.
        let page = match self.queue.pop_if(size) {
            Some(entry) => entry.page,
            None => self.allocate_page()?,
        };

        let data = self.store.get_mut(page);
        let slot = HeapPage::<PAGE_SIZE>::push(data, payload);
        self.hot = Some(page);
        Ok(Address::new(page, SlotId(slot as u16)))
    }

    /// Returns a cursor to the bytes stored at `addr`: the page suffix
    /// beginning at the value body. The caller supplies the length.
    pub fn get(&self, addr: Address) -> &[u8] {
        HeapPage::<PAGE_SIZE>::get(self.store.get(addr.page), addr.slot.0 as usize)
    }

    /// Number of pages the underlying store holds.
    pub fn page_count(&self) -> usize {
        self.store.page_count()
    }

    /// Number of pages currently waiting in the free-space queue.
    pub fn queued_page_count(&self) -> usize {
        self.queue.len()
    }

    /// Read access to the underlying page store.
    pub fn store(&self) -> &PageStore<PAGE_SIZE> {
        self.store
    }

    /// Allocates and initializes a fresh page. The caller decides whether
    /// it becomes hot or is enqueued; a failed allocation changes nothing.
    fn allocate_page(&mut self) -> Result<PageId> {
        let (page, data) = self.store.allocate_page()?;
        HeapPage::<PAGE_SIZE>::init(data, PAGE_SIZE);
        debug!(page = page.0, "allocated fresh heap page");
        Ok(page)
    }
}
