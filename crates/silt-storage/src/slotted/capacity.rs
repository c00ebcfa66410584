//! Capacity axis: whether a page knows its size at compile time or reads
//! it from the header.

use super::directory::ByteOffset;
use super::Sealed;
use std::marker::PhantomData;

/// Source of a page's capacity in bytes.
pub trait Capacity: Sealed {
    /// Bytes the capacity field occupies in the header (0 when static).
    const FIELD_BYTES: usize;

    /// Records the capacity during page initialization.
    fn init(field: &mut [u8], capacity: usize);
    /// Returns the capacity of a page over a `buf_len`-byte buffer.
    fn capacity(field: &[u8], buf_len: usize) -> usize;
}

/// Compile-time capacity: the page always spans exactly `N` bytes and the
/// header carries no capacity field.
#[derive(Debug, Clone, Copy)]
pub struct StaticCap<const N: usize>;

impl<const N: usize> Sealed for StaticCap<N> {}

impl<const N: usize> Capacity for StaticCap<N> {
    const FIELD_BYTES: usize = 0;

    fn init(_field: &mut [u8], capacity: usize) {
        debug_assert_eq!(capacity, N);
    }

    fn capacity(_field: &[u8], _buf_len: usize) -> usize {
        N
    }
}

/// Runtime capacity recorded in the header as `last_byte = capacity - 1`,
/// so a capacity of up to `2^bits(O)` fits in an `O`-wide field.
#[derive(Debug, Clone, Copy)]
pub struct DynamicCap<O>(PhantomData<O>);

impl<O> Sealed for DynamicCap<O> {}

impl<O: ByteOffset> Capacity for DynamicCap<O> {
    const FIELD_BYTES: usize = O::BYTES;

    fn init(field: &mut [u8], capacity: usize) {
        debug_assert!(capacity > 0);
        O::write(&mut field[..O::BYTES], capacity - 1);
    }

    fn capacity(field: &[u8], _buf_len: usize) -> usize {
        O::read(&field[..O::BYTES]) + 1
    }
}
