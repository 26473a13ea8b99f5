// Copyright 2021 Brian Smith.
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

//! Spook: a Shadow sponge between two calls to Clyde-128.
//!
//! The sponge starts from `P || N || 0 .. || E(K, P, N)`, where `P` is the
//! public tweak. In the single-user ("su") variants `P` is zero. In the
//! multi-user ("mu") variants the second half of the 256-bit key is `P`,
//! with its top two bits forced to `01`.
//!
//! The tag is Clyde-128 of the first block of the final state, tweaked by the
//! second block. Opening inverts Clyde on the received tag and compares the
//! result with the first block, so the cipher runs in the same direction on
//! both sides.

use super::{
    algorithm::AlgorithmID,
    check_tag,
    clyde::{self, shadow384, shadow512, BLOCK_LEN, SHADOW384_STATE_LEN, SHADOW512_STATE_LEN},
    init_key_bytes, Aad, Algorithm, Flags, KeyInner, Nonce, OpenError, Tag,
};
use crate::{error, polyfill::sliceutil::xor_at_start};

const SU_KEY_LEN: usize = 16;
const MU_KEY_LEN: usize = 32;
const NONCE_LEN: usize = 16;
const TAG_LEN: usize = 16;

/// Spook-128-512-su: Shadow-512, 128-bit key.
pub static SPOOK_128_512_SU: Algorithm = Algorithm {
    name: "Spook-128-512-su",
    key_len: SU_KEY_LEN,
    nonce_len: NONCE_LEN,
    tag_len: TAG_LEN,
    max_input_len: u64::MAX,
    flags: Flags::LITTLE_ENDIAN,
    init: init_key_bytes,
    seal: seal_512,
    open: open_512,
    id: AlgorithmID::SPOOK_128_512_SU,
};

/// Spook-128-384-su: Shadow-384, 128-bit key.
pub static SPOOK_128_384_SU: Algorithm = Algorithm {
    name: "Spook-128-384-su",
    key_len: SU_KEY_LEN,
    nonce_len: NONCE_LEN,
    tag_len: TAG_LEN,
    max_input_len: u64::MAX,
    flags: Flags::LITTLE_ENDIAN,
    init: init_key_bytes,
    seal: seal_384,
    open: open_384,
    id: AlgorithmID::SPOOK_128_384_SU,
};

/// Spook-128-512-mu: Shadow-512, 128-bit key followed by a 128-bit public
/// tweak.
pub static SPOOK_128_512_MU: Algorithm = Algorithm {
    name: "Spook-128-512-mu",
    key_len: MU_KEY_LEN,
    nonce_len: NONCE_LEN,
    tag_len: TAG_LEN,
    max_input_len: u64::MAX,
    flags: Flags::LITTLE_ENDIAN,
    init: init_key_bytes,
    seal: seal_512,
    open: open_512,
    id: AlgorithmID::SPOOK_128_512_MU,
};

/// Spook-128-384-mu: Shadow-384, 128-bit key followed by a 128-bit public
/// tweak.
pub static SPOOK_128_384_MU: Algorithm = Algorithm {
    name: "Spook-128-384-mu",
    key_len: MU_KEY_LEN,
    nonce_len: NONCE_LEN,
    tag_len: TAG_LEN,
    max_input_len: u64::MAX,
    flags: Flags::LITTLE_ENDIAN,
    init: init_key_bytes,
    seal: seal_384,
    open: open_384,
    id: AlgorithmID::SPOOK_128_384_MU,
};

struct Spook<const N: usize> {
    permute: fn(&mut [u8; N]),
    rate: usize,
}

const SPOOK_512: Spook<SHADOW512_STATE_LEN> = Spook {
    permute: shadow512,
    rate: 32,
};

const SPOOK_384: Spook<SHADOW384_STATE_LEN> = Spook {
    permute: shadow384,
    rate: 16,
};

#[derive(Clone, Copy)]
enum Direction {
    Sealing,
    Opening,
}

impl<const N: usize> Spook<N> {
    fn new_state(&self, key: &[u8], nonce: &[u8]) -> [u8; N] {
        let mut state = [0u8; N];
        if key.len() == MU_KEY_LEN {
            state[..BLOCK_LEN].copy_from_slice(&key[SU_KEY_LEN..]);
            state[BLOCK_LEN - 1] = (state[BLOCK_LEN - 1] & 0x7f) | 0x40;
        }
        state[BLOCK_LEN..(2 * BLOCK_LEN)].copy_from_slice(nonce);
        let block = clyde::encrypt(&key[..SU_KEY_LEN], &state[..BLOCK_LEN], nonce);
        state[(N - BLOCK_LEN)..].copy_from_slice(&block);
        (self.permute)(&mut state);
        state
    }

    /// Pads a partial final block: `0x01` after the data and `0x02` in the
    /// first capacity byte.
    fn pad_and_permute(&self, state: &mut [u8; N], len: usize) {
        state[len] ^= 0x01;
        state[self.rate] ^= 0x02;
        (self.permute)(state);
    }

    /// Absorbs the AAD. Empty AAD and whole blocks add no padding.
    fn absorb(&self, state: &mut [u8; N], aad: &[u8]) {
        let mut blocks = aad.chunks_exact(self.rate);
        for block in blocks.by_ref() {
            xor_at_start(state, block);
            (self.permute)(state);
        }
        let remainder = blocks.remainder();
        if !remainder.is_empty() {
            xor_at_start(state, remainder);
            self.pad_and_permute(state, remainder.len());
        }
    }

    /// Encrypts or decrypts `in_out`, leaving the ciphertext in the rate.
    fn crypt(&self, state: &mut [u8; N], in_out: &mut [u8], direction: Direction) {
        if in_out.is_empty() {
            return;
        }
        state[self.rate] ^= 0x01;
        for block in in_out.chunks_mut(self.rate) {
            state.iter_mut().zip(block.iter_mut()).for_each(|(s, b)| {
                let input = *b;
                *b ^= *s;
                *s = match direction {
                    Direction::Sealing => *b,
                    Direction::Opening => input,
                };
            });
            if block.len() < self.rate {
                self.pad_and_permute(state, block.len());
            } else {
                (self.permute)(state);
            }
        }
    }

    /// The final state with the tag domain bit set.
    fn finish(
        &self,
        key: &[u8],
        nonce: &[u8],
        aad: &[u8],
        in_out: &mut [u8],
        direction: Direction,
    ) -> [u8; N] {
        let mut state = self.new_state(key, nonce);
        self.absorb(&mut state, aad);
        self.crypt(&mut state, in_out, direction);
        state[2 * BLOCK_LEN - 1] |= 0x80;
        state
    }

    fn seal(&self, key: &KeyInner, nonce: &Nonce, aad: Aad<&[u8]>, in_out: &mut [u8]) -> Tag {
        let key = key.bytes();
        let state = self.finish(key, nonce.as_ref(), aad.as_ref(), in_out, Direction::Sealing);
        let tag = clyde::encrypt(
            &key[..SU_KEY_LEN],
            &state[BLOCK_LEN..(2 * BLOCK_LEN)],
            &state[..BLOCK_LEN],
        );
        Tag::new(&tag)
    }

    fn open(
        &self,
        key: &KeyInner,
        nonce: &Nonce,
        aad: Aad<&[u8]>,
        in_out: &mut [u8],
        received_tag: &Tag,
    ) -> Result<(), OpenError> {
        let key = key.bytes();
        let state = self.finish(key, nonce.as_ref(), aad.as_ref(), in_out, Direction::Opening);
        let expected = clyde::decrypt(
            &key[..SU_KEY_LEN],
            &state[BLOCK_LEN..(2 * BLOCK_LEN)],
            received_tag.as_ref(),
        );
        check_tag(in_out, &state[..BLOCK_LEN], &expected)?;
        Ok(())
    }
}

macro_rules! spook_glue {
    ( $seal:ident, $open:ident, $params:ident ) => {
        fn $seal(
            key: &KeyInner,
            nonce: &Nonce,
            aad: Aad<&[u8]>,
            in_out: &mut [u8],
        ) -> Result<Tag, error::InputTooLongError> {
            Ok($params.seal(key, nonce, aad, in_out))
        }

        fn $open(
            key: &KeyInner,
            nonce: &Nonce,
            aad: Aad<&[u8]>,
            in_out: &mut [u8],
            received_tag: &Tag,
        ) -> Result<(), OpenError> {
            $params.open(key, nonce, aad, in_out, received_tag)
        }
    };
}

spook_glue!(seal_512, open_512, SPOOK_512);
spook_glue!(seal_384, open_384, SPOOK_384);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_tweak_ignores_top_bits() {
        // Only 126 bits of the public tweak are used.
        let nonce = [0u8; NONCE_LEN];
        let mut a = [0u8; MU_KEY_LEN];
        let mut b = [0u8; MU_KEY_LEN];
        a[MU_KEY_LEN - 1] = 0x00;
        b[MU_KEY_LEN - 1] = 0xc0;
        assert_eq!(SPOOK_384.new_state(&a, &nonce), SPOOK_384.new_state(&b, &nonce));

        // An all-zero public tweak still differs from the su variant because
        // of the forced bit.
        assert_ne!(
            SPOOK_384.new_state(&a, &nonce),
            SPOOK_384.new_state(&a[..SU_KEY_LEN], &nonce)
        );
    }

    #[test]
    fn test_open_inverts_seal() {
        let key = init_key_bytes(&[0x11; SU_KEY_LEN]).unwrap();
        for len in [0, 1, 16, 31, 32, 33, 64] {
            let plaintext: std::vec::Vec<u8> = (0..len).map(|i| i as u8).collect();
            let mut in_out = plaintext.clone();
            let nonce = Nonce::try_assume_unique_for_key(&[2; NONCE_LEN]).unwrap();
            let tag = SPOOK_512.seal(&key, &nonce, Aad::from(&b"ad"[..]), &mut in_out);

            let nonce = Nonce::try_assume_unique_for_key(&[2; NONCE_LEN]).unwrap();
            assert!(SPOOK_512
                .open(&key, &nonce, Aad::from(&b"ad"[..]), &mut in_out, &tag)
                .is_ok());
            assert_eq!(in_out, plaintext);
        }
    }
}
