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

//! The CHAM-128/128 and CHAM-64/128 block ciphers.
//!
//! Only encryption is needed. Both use 80 rounds of a four-branch ARX
//! Feistel with a 128-bit key; they differ in the word size.

use crate::endian::{load_le_u16, load_le_u32, store_le_u16, store_le_u32};

const ROUNDS: usize = 80;

macro_rules! cham {
    ( $name:ident, $Word:ty, $BLOCK_LEN:expr, $load:ident, $store:ident ) => {
        #[allow(clippy::cast_possible_truncation)]
        pub(super) fn $name(key: &[u8; 16], block: &mut [u8; $BLOCK_LEN]) {
            const WORD_LEN: usize = $BLOCK_LEN / 4;
            const KEY_WORDS: usize = 16 / WORD_LEN;

            let mut k = [0 as $Word; 2 * KEY_WORDS];
            let (k1, k2) = k.split_at_mut(KEY_WORDS);
            for (i, b) in key.chunks_exact(WORD_LEN).enumerate() {
                let w = $load(b);
                k1[i] = w ^ w.rotate_left(1) ^ w.rotate_left(8);
                k2[i ^ 1] = w ^ w.rotate_left(1) ^ w.rotate_left(11);
            }

            let mut x = [0 as $Word; 4];
            x.iter_mut()
                .zip(block.chunks_exact(WORD_LEN))
                .for_each(|(x, b)| *x = $load(b));

            for round in 0..ROUNDS {
                let i = round % 4;
                let rk = k[round % (2 * KEY_WORDS)];
                let t = x[i] ^ (round as $Word);
                let next = x[(i + 1) % 4];
                x[i] = if round % 2 == 0 {
                    t.wrapping_add(next.rotate_left(1) ^ rk).rotate_left(8)
                } else {
                    t.wrapping_add(next.rotate_left(8) ^ rk).rotate_left(1)
                };
            }

            block
                .chunks_exact_mut(WORD_LEN)
                .zip(&x)
                .for_each(|(b, x)| $store(b, *x));
        }
    };
}

cham!(cham128_128_encrypt, u32, 16, load_le_u32, store_le_u32);
cham!(cham64_128_encrypt, u16, 8, load_le_u16, store_le_u16);
