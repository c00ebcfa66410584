//! Mutability axis: whether a page carries a write frontier.

use super::directory::ByteOffset;
use super::Sealed;
use std::marker::PhantomData;

/// Presence and width of the `write_position` header field.
pub trait Mutability: Sealed {
    /// Bytes the frontier field occupies in the header (0 when readonly).
    const FIELD_BYTES: usize;
    /// True if the shape accepts `alloc`/`push`.
    const WRITABLE: bool;

    /// Reads the write frontier (0 for readonly shapes).
    fn read_frontier(field: &[u8]) -> usize;
    /// Writes the write frontier (no-op for readonly shapes).
    fn write_frontier(field: &mut [u8], pos: usize);
}

/// Appendable page: the header records the first unused byte of the value
/// region.
#[derive(Debug, Clone, Copy)]
pub struct Mutable<O>(PhantomData<O>);

impl<O> Sealed for Mutable<O> {}

impl<O: ByteOffset> Mutability for Mutable<O> {
    const FIELD_BYTES: usize = O::BYTES;
    const WRITABLE: bool = true;

    fn read_frontier(field: &[u8]) -> usize {
        O::read(&field[..O::BYTES])
    }

    fn write_frontier(field: &mut [u8], pos: usize) {
        O::write(&mut field[..O::BYTES], pos);
    }
}

/// Frozen page: no frontier field, no insertions, `available()` is 0.
#[derive(Debug, Clone, Copy)]
pub struct Readonly;

impl Sealed for Readonly {}

impl Mutability for Readonly {
    const FIELD_BYTES: usize = 0;
    const WRITABLE: bool = false;

    fn read_frontier(_field: &[u8]) -> usize {
        0
    }

    fn write_frontier(_field: &mut [u8], _pos: usize) {}
}
