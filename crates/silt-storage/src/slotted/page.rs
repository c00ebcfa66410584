//! The slotted page view.
//!
//! `SlottedPage` holds no data of its own: every operation borrows a page
//! buffer for exactly one call, so the same buffer can be handed between
//! owners (page store, heap allocator, tests) without a wrapper object.

use super::capacity::Capacity;
use super::directory::DirectoryLayout;
use super::index::SlotWidth;
use super::mutability::{Mutability, Mutable};
use super::ByteOffset;
use std::marker::PhantomData;

/// A slotted-page shape: one choice per configuration axis.
///
/// All operations are associated functions over a borrowed buffer. The
/// header sits at byte 0 (`len`, then the capacity field, then the write
/// frontier, as present); value bodies are packed upward from the header;
/// the slot directory is packed downward from the end of the capacity
/// region.
pub struct SlottedPage<I, C, D, M>(PhantomData<(I, C, D, M)>);

impl<I, C, D, M> SlottedPage<I, C, D, M>
where
    I: SlotWidth,
    C: Capacity,
    D: DirectoryLayout,
    M: Mutability,
{
    /// Header size in bytes for this shape.
    pub const HEADER_SIZE: usize = I::LEN_BYTES + C::FIELD_BYTES + M::FIELD_BYTES;

    const CAP_AT: usize = I::LEN_BYTES;
    const POS_AT: usize = I::LEN_BYTES + C::FIELD_BYTES;

    /// Initializes the header over `data`, returning the bytes immediately
    /// usable for one value (its directory entry already accounted for).
    pub fn init(data: &mut [u8], capacity: usize) -> usize {
        debug_assert!(capacity <= data.len());
        debug_assert!(capacity > Self::HEADER_SIZE);
        I::write_len(data, 0);
        C::init(&mut data[Self::CAP_AT..], capacity);
        M::write_frontier(&mut data[Self::POS_AT..], 0);
        Self::available(data)
    }

    /// Number of live slots.
    pub fn count(data: &[u8]) -> usize {
        I::read_len(data)
    }

    /// Capacity of the page in bytes.
    pub fn capacity(data: &[u8]) -> usize {
        C::capacity(&data[Self::CAP_AT..], data.len())
    }

    /// Bytes still usable for one more value, after accounting for the
    /// directory entry its insertion would consume. Always 0 for readonly
    /// shapes, and 0 whenever no further slot is addressable.
    pub fn available(data: &[u8]) -> usize {
        if !M::WRITABLE {
            return 0;
        }
        let len = Self::count(data);
        let pos = M::read_frontier(&data[Self::POS_AT..]);
        if len >= I::MAX_SLOTS || pos > D::OFFSET_MAX {
            return 0;
        }
        let used = Self::HEADER_SIZE + pos + D::directory_bytes(len + 1);
        Self::capacity(data).saturating_sub(used)
    }

    /// Returns a cursor to the body of `slot`: the page suffix starting at
    /// the value's first byte. The caller supplies the length externally;
    /// an out-of-range slot is a caller bug.
    pub fn get(data: &[u8], slot: usize) -> &[u8] {
        debug_assert!(slot < Self::count(data));
        let cap = Self::capacity(data);
        let offset = D::read_entry(&data[..cap], slot);
        &data[Self::HEADER_SIZE + offset..]
    }
}

impl<I, C, D, O> SlottedPage<I, C, D, Mutable<O>>
where
    I: SlotWidth,
    C: Capacity,
    D: DirectoryLayout,
    O: ByteOffset,
{
    /// Reserves `size` bytes at the value frontier, records the new slot,
    /// and returns the slot index together with a cursor to the reserved
    /// bytes for the caller to fill.
    ///
    /// Requires `size <= available(data)`; the check belongs to the caller.
    pub fn alloc(data: &mut [u8], size: usize) -> (usize, &mut [u8]) {
        debug_assert!(size <= Self::available(data));

        let len = Self::count(data);
        let pos = Mutable::<O>::read_frontier(&data[Self::POS_AT..]);
        let cap = Self::capacity(data);

        D::write_entry(&mut data[..cap], len, pos);
        I::write_len(data, len + 1);
        Mutable::<O>::write_frontier(&mut data[Self::POS_AT..], pos + size);

        let at = Self::HEADER_SIZE + pos;
        (len, &mut data[at..at + size])
    }

    /// `alloc` followed by a copy of `src`, returning the new slot index.
    pub fn push(data: &mut [u8], src: &[u8]) -> usize {
        let (slot, body) = Self::alloc(data, src.len());
        body.copy_from_slice(src);
        slot
    }
}

#[cfg(test)]
mod tests {
    use super::super::{
        ByteAligned, DynamicCap, NibbleAligned, Readonly, StaticCap, U12, U4,
    };
    use super::*;

    type SmallPage = SlottedPage<u8, StaticCap<16>, ByteAligned<u8>, Mutable<u8>>;
    type DynPage = SlottedPage<u8, DynamicCap<u8>, ByteAligned<u8>, Mutable<u8>>;
    type WidePage = SlottedPage<u16, StaticCap<4096>, ByteAligned<u16>, Mutable<u16>>;
    type NibblePage = SlottedPage<u8, StaticCap<64>, NibbleAligned<U12>, Mutable<u8>>;
    type FrozenNibblePage = SlottedPage<U4, StaticCap<16>, NibbleAligned<U4>, Readonly>;

    #[test]
    fn test_header_sizes() {
        // len(1) + frontier(1)
        assert_eq!(SmallPage::HEADER_SIZE, 2);
        // len(1) + last_byte(1) + frontier(1)
        assert_eq!(DynPage::HEADER_SIZE, 3);
        // len(2) + frontier(2)
        assert_eq!(WidePage::HEADER_SIZE, 4);
        // len(1), no frontier
        assert_eq!(FrozenNibblePage::HEADER_SIZE, 1);
    }

    #[test]
    fn test_init_returns_available() {
        let mut buf = [0u8; 16];
        let available = SmallPage::init(&mut buf, 16);
        // 16 - header(2) - one directory entry(1)
        assert_eq!(available, 13);
        assert_eq!(SmallPage::count(&buf), 0);
    }

    #[test]
    fn test_sixteen_byte_walkthrough() {
        let mut buf = [0u8; 16];
        SmallPage::init(&mut buf, 16);

        let (s0, body) = SmallPage::alloc(&mut buf, 3);
        body.copy_from_slice(b"abc");
        let (s1, body) = SmallPage::alloc(&mut buf, 2);
        body.copy_from_slice(b"de");

        assert_eq!((s0, s1), (0, 1));
        assert_eq!(SmallPage::count(&buf), 2);
        // 16 - header(2) - values(5) - directory for three entries
        assert_eq!(SmallPage::available(&buf), 16 - 2 - 5 - 3);
        assert_eq!(&SmallPage::get(&buf, 0)[..3], b"abc");
        assert_eq!(&SmallPage::get(&buf, 1)[..2], b"de");
    }

    #[test]
    fn test_push_reads_back() {
        let mut buf = [0u8; 4096];
        WidePage::init(&mut buf, 4096);

        let values: Vec<Vec<u8>> = (0..10u8).map(|i| vec![i; 1 + i as usize * 7]).collect();
        let slots: Vec<usize> = values.iter().map(|v| WidePage::push(&mut buf, v)).collect();

        for (slot, value) in slots.iter().zip(&values) {
            assert_eq!(&WidePage::get(&buf, *slot)[..value.len()], &value[..]);
        }
    }

    #[test]
    fn test_frontier_is_monotonic_and_dense() {
        let mut buf = [0u8; 4096];
        WidePage::init(&mut buf, 4096);

        let sizes = [5usize, 1, 42, 0, 17];
        let mut expected_offset = 0;
        for (k, &size) in sizes.iter().enumerate() {
            let (slot, _) = WidePage::alloc(&mut buf, size);
            assert_eq!(slot, k);
            let body = WidePage::get(&buf, k);
            // Offset relative to the value region equals the sum of all
            // previous sizes.
            assert_eq!(
                body.as_ptr() as usize - buf.as_ptr() as usize,
                WidePage::HEADER_SIZE + expected_offset
            );
            expected_offset += size;
        }
    }

    #[test]
    fn test_available_never_increases() {
        let mut buf = [0u8; 4096];
        let mut last = WidePage::init(&mut buf, 4096);

        for size in [100usize, 3, 977, 0, 250] {
            WidePage::alloc(&mut buf, size);
            let now = WidePage::available(&buf);
            assert!(now <= last, "available went {last} -> {now}");
            assert_eq!(now, last - size - 2);
            last = now;
        }
    }

    #[test]
    fn test_fill_to_exact_capacity() {
        let mut buf = [0u8; 16];
        SmallPage::init(&mut buf, 16);

        // Consume exactly everything: available shrinks by size + 1 slot.
        let a = SmallPage::available(&buf);
        SmallPage::push(&mut buf, &vec![0xEE; a]);
        assert_eq!(SmallPage::available(&buf), 0);
    }

    #[test]
    fn test_zero_size_values() {
        let mut buf = [0u8; 16];
        SmallPage::init(&mut buf, 16);

        let (s0, _) = SmallPage::alloc(&mut buf, 0);
        let (s1, _) = SmallPage::alloc(&mut buf, 0);
        assert_eq!((s0, s1), (0, 1));
        assert_eq!(SmallPage::count(&buf), 2);

        // Both bodies sit at offset 0 of the value region.
        let base = buf.as_ptr() as usize;
        assert_eq!(SmallPage::get(&buf, 0).as_ptr() as usize - base, 2);
        assert_eq!(SmallPage::get(&buf, 1).as_ptr() as usize - base, 2);
    }

    #[test]
    fn test_dynamic_capacity_limits_page() {
        // A 64-byte buffer holding a 32-byte page: the directory must
        // grow down from byte 32, not from the buffer end.
        let mut buf = [0u8; 64];
        let available = DynPage::init(&mut buf, 32);
        assert_eq!(available, 32 - 3 - 1);

        DynPage::push(&mut buf, b"xyz");
        assert_eq!(&DynPage::get(&buf, 0)[..3], b"xyz");
        // Directory entry 0 lives at the last byte of the capacity region.
        assert_eq!(buf[31], 0);
        assert!(buf[32..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_nibble_directory_page() {
        let mut buf = [0u8; 64];
        NibblePage::init(&mut buf, 64);

        let slots: Vec<usize> = [b"one".as_slice(), b"two", b"three"]
            .iter()
            .map(|v| NibblePage::push(&mut buf, v))
            .collect();
        assert_eq!(slots, vec![0, 1, 2]);

        assert_eq!(&NibblePage::get(&buf, 0)[..3], b"one");
        assert_eq!(&NibblePage::get(&buf, 1)[..3], b"two");
        assert_eq!(&NibblePage::get(&buf, 2)[..5], b"three");
    }

    #[test]
    fn test_nibble_directory_available_rounds_up() {
        let mut buf = [0u8; 64];
        NibblePage::init(&mut buf, 64);
        // header(2) + one 12-bit entry rounded to 2 bytes
        assert_eq!(NibblePage::available(&buf), 64 - 2 - 2);

        NibblePage::push(&mut buf, b"abcd");
        // Two entries occupy 3 bytes.
        assert_eq!(NibblePage::available(&buf), 64 - 2 - 4 - 3);
    }

    #[test]
    fn test_readonly_page_reads_prebuilt_buffer() {
        // Three one-byte values at value-region offsets 0, 1, 2; the
        // directory nibbles pack into the last two bytes.
        let mut buf = [0u8; 16];
        buf[0] = 3; // len
        buf[1] = b'X';
        buf[2] = b'Y';
        buf[3] = b'Z';
        buf[14] = 0x23;
        buf[15] = 0x01;

        assert_eq!(FrozenNibblePage::count(&buf), 3);
        assert_eq!(FrozenNibblePage::available(&buf), 0);
        assert_eq!(FrozenNibblePage::get(&buf, 0)[0], b'X');
        assert_eq!(FrozenNibblePage::get(&buf, 1)[0], b'Y');
        assert_eq!(FrozenNibblePage::get(&buf, 2)[0], b'Z');
    }

    #[test]
    fn test_available_zero_when_slots_exhausted() {
        // U4 index caps a page at 15 slots even if bytes remain.
        type Tiny = SlottedPage<U4, StaticCap<64>, ByteAligned<u8>, Mutable<u8>>;
        let mut buf = [0u8; 64];
        Tiny::init(&mut buf, 64);

        for _ in 0..15 {
            Tiny::alloc(&mut buf, 1);
        }
        assert_eq!(Tiny::count(&buf), 15);
        assert_eq!(Tiny::available(&buf), 0);
    }

    #[test]
    fn test_available_zero_when_offset_unrepresentable() {
        // u8 offsets cannot address value-region bytes past 255.
        type Long = SlottedPage<u16, StaticCap<1024>, ByteAligned<u8>, Mutable<u16>>;
        let mut buf = [0u8; 1024];
        Long::init(&mut buf, 1024);

        Long::push(&mut buf, &[1u8; 200]);
        assert!(Long::available(&buf) > 0);
        Long::push(&mut buf, &[2u8; 55]);
        // Frontier is now 255: one more slot is still addressable.
        assert!(Long::available(&buf) > 0);
        Long::push(&mut buf, &[3u8; 1]);
        // Frontier 256: no further entry can record its offset.
        assert_eq!(Long::available(&buf), 0);
    }

    #[test]
    fn test_configuration_identity() {
        // The same vectors behave identically across shapes; only header
        // and directory overhead differ.
        let vectors: [&[u8]; 4] = [b"a", b"bb", b"", b"dddd"];

        fn exercise<I, C, D, O>(buf: &mut [u8], capacity: usize, vectors: &[&[u8]])
        where
            I: SlotWidth,
            C: Capacity,
            D: DirectoryLayout,
            O: ByteOffset,
        {
            let mut expected_available = SlottedPage::<I, C, D, Mutable<O>>::init(buf, capacity);
            for (k, v) in vectors.iter().enumerate() {
                let slot = SlottedPage::<I, C, D, Mutable<O>>::push(buf, v);
                assert_eq!(slot, k);
                let now = SlottedPage::<I, C, D, Mutable<O>>::available(buf);
                assert!(now <= expected_available.saturating_sub(v.len()));
                expected_available = now;
            }
            assert_eq!(SlottedPage::<I, C, D, Mutable<O>>::count(buf), vectors.len());
            for (k, v) in vectors.iter().enumerate() {
                assert_eq!(
                    &SlottedPage::<I, C, D, Mutable<O>>::get(buf, k)[..v.len()],
                    *v
                );
            }
        }

        let mut buf = [0u8; 256];
        exercise::<u8, StaticCap<256>, ByteAligned<u8>, u8>(&mut buf, 256, &vectors);
        let mut buf = [0u8; 256];
        exercise::<u8, DynamicCap<u8>, ByteAligned<u8>, u8>(&mut buf, 128, &vectors);
        let mut buf = [0u8; 256];
        exercise::<u16, StaticCap<256>, ByteAligned<u16>, u16>(&mut buf, 256, &vectors);
        let mut buf = [0u8; 256];
        exercise::<u16, DynamicCap<u16>, ByteAligned<u16>, u16>(&mut buf, 256, &vectors);
        let mut buf = [0u8; 256];
        exercise::<u8, StaticCap<256>, NibbleAligned<U12>, u8>(&mut buf, 256, &vectors);
        let mut buf = [0u8; 256];
        exercise::<U4, DynamicCap<u8>, NibbleAligned<U12>, u8>(&mut buf, 256, &vectors);
    }
}
