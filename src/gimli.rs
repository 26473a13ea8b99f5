// Copyright 2020 Brian Smith.
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

//! The Gimli-24 permutation.

use crate::endian::{load_le_u32s, store_le_u32s};

pub(crate) const STATE_LEN: usize = 48;

/// A 384-bit Gimli state in its byte form.
pub(crate) type State = [u8; STATE_LEN];

/// Applies the SP-box to column `col`.
#[inline(always)]
fn sp_box(s: &mut [u32; 12], col: usize) {
    let x = s[col].rotate_left(24);
    let y = s[col + 4].rotate_left(9);
    let z = s[col + 8];
    s[col + 8] = x ^ (z << 1) ^ ((y & z) << 2);
    s[col + 4] = y ^ x ^ ((x | z) << 1);
    s[col] = z ^ y ^ ((x & y) << 3);
}

fn sp_layer(s: &mut [u32; 12]) {
    (0..4).for_each(|col| sp_box(s, col));
}

/// Gimli-24 over the state words.
pub(crate) fn permute_words(s: &mut [u32; 12]) {
    for round in (1..=6u32).rev().map(|r| r * 4) {
        sp_layer(s);
        s.swap(0, 1);
        s.swap(2, 3);
        s[0] ^= 0x9e377900 ^ round;

        sp_layer(s);

        sp_layer(s);
        s.swap(0, 2);
        s.swap(1, 3);

        sp_layer(s);
    }
}

/// Gimli-24 over the byte form of the state.
pub(crate) fn permute(state: &mut State) {
    let mut s = [0u32; 12];
    load_le_u32s(&mut s, state);
    permute_words(&mut s);
    store_le_u32s(state, &s);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permute_words() {
        // The Gimli paper's test vector: word i is i^3 + i * 0x9e3779b9.
        let mut s: [u32; 12] = core::array::from_fn(|i| {
            let i = i as u32;
            i.wrapping_mul(i)
                .wrapping_mul(i)
                .wrapping_add(i.wrapping_mul(0x9e3779b9))
        });
        permute_words(&mut s);
        assert_eq!(
            s,
            [
                0xba11c85a, 0x91bad119, 0x380ce880, 0xd24c2c68, 0x3eceffea, 0x277a921c, 0x4f73a0bd,
                0xda5a9cd8, 0x84b673f0, 0x34e52ff7, 0x9e2bef49, 0xf41bb8d6
            ]
        );
    }

    #[test]
    fn test_permute_bytes_matches_words() {
        let mut words = [0u32; 12];
        let mut bytes = [0u8; STATE_LEN];
        permute_words(&mut words);
        permute(&mut bytes);
        let mut expected = [0u8; STATE_LEN];
        store_le_u32s(&mut expected, &words);
        assert_eq!(bytes, expected);
    }
}
