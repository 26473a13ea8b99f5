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

//! SpoC-128 and SpoC-64: masked sponges over sLiSCP-light.
//!
//! Data is XORed into the "masked" capacity half of the state while the
//! keystream is read from the other half. The key never re-enters the state
//! after initialization. Domain flags go into the first byte.

use super::{
    algorithm::AlgorithmID,
    check_tag, init_key_bytes,
    sliscp_light::{
        sliscp_light192, sliscp_light256, SLISCP_LIGHT192_STATE_LEN, SLISCP_LIGHT256_STATE_LEN,
    },
    Aad, Algorithm, Flags, KeyInner, Nonce, OpenError, Tag,
};
use crate::{error, polyfill::sliceutil::xor_at_start};

const KEY_LEN: usize = 16;
const NONCE_LEN: usize = 16;
const STEPS: usize = 18;

/// SpoC-128: sLiSCP-light-256, 128-bit tag.
pub static SPOC_128: Algorithm = Algorithm {
    name: "SpoC-128",
    key_len: KEY_LEN,
    nonce_len: NONCE_LEN,
    tag_len: 16,
    max_input_len: u64::MAX,
    flags: Flags::NONE,
    init: init_key_bytes,
    seal: seal_128,
    open: open_128,
    id: AlgorithmID::SPOC_128,
};

/// SpoC-64: sLiSCP-light-192, 64-bit tag.
pub static SPOC_64: Algorithm = Algorithm {
    name: "SpoC-64",
    key_len: KEY_LEN,
    nonce_len: NONCE_LEN,
    tag_len: 8,
    max_input_len: u64::MAX,
    flags: Flags::NONE,
    init: init_key_bytes,
    seal: seal_64,
    open: open_64,
    id: AlgorithmID::SPOC_64,
};

mod domain {
    pub const AAD: u8 = 0x20;
    pub const AAD_PARTIAL: u8 = 0x30;
    pub const MESSAGE: u8 = 0x40;
    pub const MESSAGE_PARTIAL: u8 = 0x50;
    pub const TAG: u8 = 0x80;
}

/// `N` is the state length and `R` the rate, which is also the tag length.
struct Spoc<const N: usize, const R: usize> {
    permute: fn(&mut [u8; N]),
    new_state: fn(&[u8], &[u8]) -> [u8; N],
    /// Where data is absorbed, in subblocks 1 and 3.
    masked: [usize; R],
    /// Where keystream is read, in subblocks 0 and 2.
    keystream: [usize; R],
}

const SPOC_128_PARAMS: Spoc<SLISCP_LIGHT256_STATE_LEN, 16> = Spoc {
    permute: permute_256,
    new_state: new_state_128,
    masked: [8, 9, 10, 11, 12, 13, 14, 15, 24, 25, 26, 27, 28, 29, 30, 31],
    keystream: [0, 1, 2, 3, 4, 5, 6, 7, 16, 17, 18, 19, 20, 21, 22, 23],
};

const SPOC_64_PARAMS: Spoc<SLISCP_LIGHT192_STATE_LEN, 8> = Spoc {
    permute: permute_192,
    new_state: new_state_64,
    masked: [6, 7, 8, 9, 18, 19, 20, 21],
    keystream: [0, 1, 2, 3, 12, 13, 14, 15],
};

fn permute_256(state: &mut [u8; SLISCP_LIGHT256_STATE_LEN]) {
    sliscp_light256(state, STEPS);
}

fn permute_192(state: &mut [u8; SLISCP_LIGHT192_STATE_LEN]) {
    sliscp_light192(state, STEPS);
}

/// Nonce and key alternate by subblock; nothing is permuted yet.
fn new_state_128(key: &[u8], nonce: &[u8]) -> [u8; SLISCP_LIGHT256_STATE_LEN] {
    let mut state = [0u8; SLISCP_LIGHT256_STATE_LEN];
    state[..8].copy_from_slice(&nonce[..8]);
    state[8..16].copy_from_slice(&key[..8]);
    state[16..24].copy_from_slice(&nonce[8..]);
    state[24..].copy_from_slice(&key[8..]);
    state
}

/// Only half the nonce fits beside the key; the rest is added to the masked
/// positions after one permutation.
fn new_state_64(key: &[u8], nonce: &[u8]) -> [u8; SLISCP_LIGHT192_STATE_LEN] {
    let mut state = [0u8; SLISCP_LIGHT192_STATE_LEN];
    for (half, (key, nonce)) in state
        .chunks_exact_mut(12)
        .zip(key.chunks_exact(8).zip(nonce[..8].chunks_exact(4)))
    {
        half[..4].copy_from_slice(nonce);
        half[4..6].copy_from_slice(&key[6..]);
        half[6..].copy_from_slice(&key[..6]);
    }
    sliscp_light192(&mut state, STEPS);
    xor_at_start(&mut state[6..], &nonce[8..12]);
    xor_at_start(&mut state[18..], &nonce[12..]);
    state
}

#[derive(Clone, Copy)]
enum Direction {
    Sealing,
    Opening,
}

impl<const N: usize, const R: usize> Spoc<N, R> {
    fn absorb(&self, state: &mut [u8; N], aad: &[u8]) {
        for block in aad.chunks(R) {
            (self.permute)(state);
            if block.len() < R {
                state[self.masked[block.len()]] ^= 0x80;
            }
            self.masked
                .iter()
                .zip(block)
                .for_each(|(&i, b)| state[i] ^= b);
            state[0] ^= if block.len() < R {
                domain::AAD_PARTIAL
            } else {
                domain::AAD
            };
        }
    }

    fn crypt(&self, state: &mut [u8; N], in_out: &mut [u8], direction: Direction) {
        for block in in_out.chunks_mut(R) {
            let partial = block.len() < R;
            (self.permute)(state);
            if partial {
                state[self.masked[block.len()]] ^= 0x80;
            }
            self.masked
                .iter()
                .zip(&self.keystream)
                .zip(block.iter_mut())
                .for_each(|((&m, &k), b)| {
                    if let Direction::Sealing = direction {
                        state[m] ^= *b;
                    }
                    *b ^= state[k];
                    if let Direction::Opening = direction {
                        state[m] ^= *b;
                    }
                });
            state[0] ^= if partial {
                domain::MESSAGE_PARTIAL
            } else {
                domain::MESSAGE
            };
        }
    }

    fn finish(
        &self,
        key: &KeyInner,
        nonce: &Nonce,
        aad: Aad<&[u8]>,
        in_out: &mut [u8],
        direction: Direction,
    ) -> [u8; R] {
        let mut state = (self.new_state)(key.bytes(), nonce.as_ref());
        self.absorb(&mut state, aad.as_ref());
        self.crypt(&mut state, in_out, direction);
        state[0] ^= domain::TAG;
        (self.permute)(&mut state);
        self.masked.map(|i| state[i])
    }

    fn seal(&self, key: &KeyInner, nonce: &Nonce, aad: Aad<&[u8]>, in_out: &mut [u8]) -> Tag {
        Tag::new(&self.finish(key, nonce, aad, in_out, Direction::Sealing))
    }

    fn open(
        &self,
        key: &KeyInner,
        nonce: &Nonce,
        aad: Aad<&[u8]>,
        in_out: &mut [u8],
        received_tag: &Tag,
    ) -> Result<(), OpenError> {
        let tag = self.finish(key, nonce, aad, in_out, Direction::Opening);
        check_tag(in_out, &tag, received_tag.as_ref())?;
        Ok(())
    }
}

macro_rules! spoc_glue {
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

spoc_glue!(seal_128, open_128, SPOC_128_PARAMS);
spoc_glue!(seal_64, open_64, SPOC_64_PARAMS);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_64_layout() {
        let key: [u8; KEY_LEN] = core::array::from_fn(|i| 0x10 + i as u8);
        let nonce: [u8; NONCE_LEN] = core::array::from_fn(|i| 0x20 + i as u8);
        let mut expected = [
            0x20, 0x21, 0x22, 0x23, 0x16, 0x17, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15, //
            0x24, 0x25, 0x26, 0x27, 0x1e, 0x1f, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d,
        ];
        sliscp_light192(&mut expected, STEPS);
        for i in 0..4 {
            expected[6 + i] ^= nonce[8 + i];
            expected[18 + i] ^= nonce[12 + i];
        }
        assert_eq!(new_state_64(&key, &nonce), expected);
    }

    #[test]
    fn test_positions_are_disjoint() {
        fn check<const N: usize, const R: usize>(params: &Spoc<N, R>) {
            for m in params.masked {
                assert!(m > 0 && m < N);
                assert!(!params.keystream.contains(&m));
            }
        }
        check(&SPOC_128_PARAMS);
        check(&SPOC_64_PARAMS);
    }
}
