// Copyright 2016 Brian Smith.
//
// Permission to use, copy, modify, and/or distribute this software for any
// purpose with or without fee is hereby granted, provided that the above
// copyright notice and this permission notice appear in all copies.
//
// THE SOFTWARE IS PROVIDED "AS IS" AND THE AUTHORS DISCLAIM ALL WARRANTIES
// WITH REGARD TO THIS SOFTWARE INCLUDING ALL IMPLIED WARRANTIES OF
// MERCHANTABILITY AND FITNESS. IN NO EVENT SHALL THE AUTHORS BE LIABLE FOR ANY
// SPECIAL, DIRECT, INDIRECT, OR CONSEQUENTIAL DAMAGES OR ANY DAMAGES
// WHATSOEVER RESULTING FROM LOSS OF USE, DATA OR PROFITS, WHETHER IN AN ACTION
// OF CONTRACT, NEGLIGENCE OR OTHER TORTIOUS ACTION, ARISING OUT OF OR IN
// CONNECTION WITH THE USE OR PERFORMANCE OF THIS SOFTWARE.

//! Loads and stores of fixed-width words from byte slices.
//!
//! Every function reads or writes exactly `size_of::<T>()` bytes at the start
//! of the slice and panics if the slice is shorter; callers always pass
//! slices cut from fixed-size state arrays.

macro_rules! define_load_store {
    ($load:ident, $store:ident, $T:ty, $from_bytes:ident, $to_bytes:ident) => {
        #[inline(always)]
        pub fn $load(b: &[u8]) -> $T {
            let mut a = [0u8; core::mem::size_of::<$T>()];
            a.copy_from_slice(&b[..core::mem::size_of::<$T>()]);
            <$T>::$from_bytes(a)
        }

        #[inline(always)]
        pub fn $store(b: &mut [u8], x: $T) {
            b[..core::mem::size_of::<$T>()].copy_from_slice(&x.$to_bytes());
        }
    };
}

define_load_store!(load_be_u16, store_be_u16, u16, from_be_bytes, to_be_bytes);
define_load_store!(load_le_u16, store_le_u16, u16, from_le_bytes, to_le_bytes);
define_load_store!(load_be_u32, store_be_u32, u32, from_be_bytes, to_be_bytes);
define_load_store!(load_le_u32, store_le_u32, u32, from_le_bytes, to_le_bytes);
define_load_store!(load_be_u64, store_be_u64, u64, from_be_bytes, to_be_bytes);
define_load_store!(load_le_u64, store_le_u64, u64, from_le_bytes, to_le_bytes);

/// Loads consecutive little-endian words from `b` into `out`.
#[inline]
pub fn load_le_u32s(out: &mut [u32], b: &[u8]) {
    out.iter_mut()
        .zip(b.chunks_exact(4))
        .for_each(|(w, b)| *w = load_le_u32(b));
}

/// Stores the words of `words` into `b` in little-endian order.
#[inline]
pub fn store_le_u32s(b: &mut [u8], words: &[u32]) {
    b.chunks_exact_mut(4)
        .zip(words)
        .for_each(|(b, w)| store_le_u32(b, *w));
}

/// Loads consecutive big-endian words from `b` into `out`.
#[inline]
pub fn load_be_u32s(out: &mut [u32], b: &[u8]) {
    out.iter_mut()
        .zip(b.chunks_exact(4))
        .for_each(|(w, b)| *w = load_be_u32(b));
}

/// Stores the words of `words` into `b` in big-endian order.
#[inline]
pub fn store_be_u32s(b: &mut [u8], words: &[u32]) {
    b.chunks_exact_mut(4)
        .zip(words)
        .for_each(|(b, w)| store_be_u32(b, *w));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_order() {
        let b = [1u8, 2, 3, 4, 5, 6, 7, 8];
        assert_eq!(load_be_u16(&b), 0x0102);
        assert_eq!(load_le_u16(&b), 0x0201);
        assert_eq!(load_be_u32(&b), 0x01020304);
        assert_eq!(load_le_u32(&b), 0x04030201);
        assert_eq!(load_be_u64(&b), 0x0102030405060708);
        assert_eq!(load_le_u64(&b), 0x0807060504030201);
    }

    #[test]
    fn test_store_leaves_tail_untouched() {
        let mut b = [0xffu8; 6];
        store_be_u32(&mut b, 0x01020304);
        assert_eq!(b, [1, 2, 3, 4, 0xff, 0xff]);
        store_le_u16(&mut b[4..], 0x0605);
        assert_eq!(b, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_word_slices() {
        let mut words = [0u32; 2];
        load_le_u32s(&mut words, &[1, 0, 0, 0, 0, 0, 0, 0x80]);
        assert_eq!(words, [1, 0x8000_0000]);
        let mut b = [0u8; 8];
        store_be_u32s(&mut b, &words);
        assert_eq!(b, [0, 0, 0, 1, 0x80, 0, 0, 0]);
    }
}
