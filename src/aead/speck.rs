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

//! SPECK-64/128, encryption only.

use crate::endian::{load_le_u32, store_le_u32};

const ROUNDS: u32 = 27;

pub(super) fn speck64_128_encrypt(key: &[u8; 16], block: &mut [u8; 8]) {
    let mut s = load_le_u32(&key[..4]);
    let mut l = [
        load_le_u32(&key[4..8]),
        load_le_u32(&key[8..12]),
        load_le_u32(&key[12..]),
    ];
    let mut y = load_le_u32(&block[..4]);
    let mut x = load_le_u32(&block[4..]);

    for round in 0..ROUNDS {
        x = x.rotate_right(8).wrapping_add(y) ^ s;
        y = y.rotate_left(3) ^ x;

        // The key schedule runs the same round function with the round
        // number in place of the key.
        let li = &mut l[(round % 3) as usize];
        *li = s.wrapping_add(li.rotate_right(8)) ^ round;
        s = s.rotate_left(3) ^ *li;
    }

    store_le_u32(&mut block[..4], y);
    store_le_u32(&mut block[4..], x);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::from_hex;

    fn check(key: &str, plaintext: &str, ciphertext: &str) {
        let key = from_hex(key).unwrap();
        let mut block = [0u8; 8];
        block.copy_from_slice(&from_hex(plaintext).unwrap());
        speck64_128_encrypt(key[..].try_into().unwrap(), &mut block);
        assert_eq!(&block[..], &from_hex(ciphertext).unwrap()[..]);
    }

    #[test]
    fn test_speck64_128() {
        check(
            "e0841f8fb90783136aa8b7f192f5c474",
            "e491c665522031cf",
            "71b08ae3a20a9496",
        );
    }

    #[test]
    fn test_speck64_128_paper() {
        // SPECK paper, appendix C, with its words stored little-endian.
        check(
            "0001020308090a0b1011121318191a1b",
            "2d4375747465723b",
            "8b024e4548a56f8c",
        );
    }
}
