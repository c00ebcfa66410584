//! Order-preserving variable-length encoding of unsigned 64-bit integers.
//!
//! The encoding sorts: for any `a < b`, the encoding of `a` compares
//! strictly less than the encoding of `b` under unsigned lexicographic
//! byte comparison. This makes the format usable both as a length prefix
//! and as a sortable key component.
//!
//! The first byte selects the total width and contributes payload:
//!
//! ```text
//! first byte    width   value range
//! 0x00 - 0xF0   1       0 - 240
//! 0xF1 - 0xF8   2       241 - 2287
//! 0xF9          3       2288 - 67823
//! 0xFA          4       67824 - 2^24 - 1
//! 0xFB          5       up to 2^32 - 1
//! 0xFC          6       up to 2^40 - 1
//! 0xFD          7       up to 2^48 - 1
//! 0xFE          8       up to 2^56 - 1
//! 0xFF          9       up to 2^64 - 1
//! ```
//!
//! Two-byte values are encoded biased by 240 and three-byte values by 2288,
//! keeping the numeric ranges contiguous across width transitions. Wider
//! values store their payload big-endian so byte-wise comparison agrees
//! with numeric comparison.

use bytes::{Buf, BufMut};

/// Maximum encoded length of a u64 in bytes.
pub const MAX_LEN: usize = 9;

/// Bias subtracted from two-byte values before encoding.
const BIAS2: u64 = 240;

/// Bias subtracted from three-byte values before encoding.
const BIAS3: u64 = 2288;

/// Returns the number of bytes `encode` will produce for `v` (1..=9).
pub fn bytes_needed(v: u64) -> usize {
    if v <= 240 {
        1
    } else if v <= 2287 {
        2
    } else if v <= 67823 {
        3
    } else if v < 1 << 24 {
        4
    } else if v < 1 << 32 {
        5
    } else if v < 1 << 40 {
        6
    } else if v < 1 << 48 {
        7
    } else if v < 1 << 56 {
        8
    } else {
        9
    }
}

/// Returns the total encoded length implied by the first byte (1..=9).
pub fn encoded_size(first: u8) -> usize {
    match first {
        0x00..=0xF0 => 1,
        0xF1..=0xF8 => 2,
        0xF9 => 3,
        _ => first as usize - 0xFA + 4,
    }
}

/// Encodes `v` into the front of `buf`, returning the number of bytes
/// written.
///
/// `buf` must be at least [`MAX_LEN`] bytes long; passing a shorter buffer
/// is a caller bug.
pub fn encode(buf: &mut [u8], v: u64) -> usize {
    debug_assert!(buf.len() >= MAX_LEN);
    let width = bytes_needed(v);
    match width {
        1 => buf[0] = v as u8,
        2 => {
            let w = v - BIAS2;
            buf[0] = 0xF1 + (w >> 8) as u8;
            buf[1] = w as u8;
        }
        3 => {
            let w = v - BIAS3;
            buf[0] = 0xF9;
            buf[1] = (w >> 8) as u8;
            buf[2] = w as u8;
        }
        _ => {
            buf[0] = 0xFA + (width as u8 - 4);
            let payload = width - 1;
            buf[1..width].copy_from_slice(&v.to_be_bytes()[8 - payload..]);
        }
    }
    width
}

/// Decodes a value from the front of `buf`, returning it together with the
/// number of bytes consumed.
///
/// `buf` must hold at least `encoded_size(buf[0])` bytes; reading past that
/// is the caller's bug.
pub fn decode(buf: &[u8]) -> (u64, usize) {
    let first = buf[0];
    let width = encoded_size(first);
    debug_assert!(buf.len() >= width);
    let v = match width {
        1 => first as u64,
        2 => BIAS2 + (((first - 0xF1) as u64) << 8) + buf[1] as u64,
        3 => BIAS3 + ((buf[1] as u64) << 8) + buf[2] as u64,
        _ => buf[1..width]
            .iter()
            .fold(0u64, |acc, &b| (acc << 8) | b as u64),
    };
    (v, width)
}

/// Extension trait writing varints through a [`BufMut`].
pub trait VarintBufMutExt: BufMut {
    /// Appends the encoding of `v`.
    fn put_varint(&mut self, v: u64) {
        let mut tmp = [0u8; MAX_LEN];
        let n = encode(&mut tmp, v);
        self.put_slice(&tmp[..n]);
    }
}

impl<B: BufMut + ?Sized> VarintBufMutExt for B {}

/// Extension trait reading varints through a [`Buf`].
pub trait VarintBufExt: Buf {
    /// Consumes and returns one varint.
    fn get_varint(&mut self) -> u64 {
        let first = self.get_u8();
        match encoded_size(first) {
            1 => first as u64,
            2 => BIAS2 + (((first - 0xF1) as u64) << 8) + self.get_u8() as u64,
            3 => BIAS3 + self.get_u16() as u64,
            width => {
                let mut v = 0u64;
                for _ in 1..width {
                    v = (v << 8) | self.get_u8() as u64;
                }
                v
            }
        }
    }
}

impl<B: Buf + ?Sized> VarintBufExt for B {}
