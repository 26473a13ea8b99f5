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

//! SPIX: a monkey-duplex over sLiSCP-light-256.
//!
//! The key is absorbed at both ends with full-strength permutations; the
//! AAD and the message go through 9-step permutations, 8 bytes at a time.

use super::{
    algorithm::AlgorithmID,
    check_tag, init_key_bytes,
    sliscp_light::{sliscp_light256, SLISCP_LIGHT256_STATE_LEN},
    Aad, Algorithm, Flags, KeyInner, Nonce, OpenError, Tag,
};
use crate::error;

const KEY_LEN: usize = 16;
const NONCE_LEN: usize = 16;
const TAG_LEN: usize = 16;
const RATE: usize = 8;

const INIT_STEPS: usize = 18;
const DUPLEX_STEPS: usize = 9;

/// SPIX: 128-bit key, 128-bit nonce, 128-bit tag.
pub static SPIX: Algorithm = Algorithm {
    name: "SPIX",
    key_len: KEY_LEN,
    nonce_len: NONCE_LEN,
    tag_len: TAG_LEN,
    max_input_len: u64::MAX,
    flags: Flags::NONE,
    init: init_key_bytes,
    seal: spix_seal,
    open: spix_open,
    id: AlgorithmID::SPIX,
};

type State = [u8; SLISCP_LIGHT256_STATE_LEN];

/// The rate is the left half of subblocks 1 and 3.
const RATE_POSITIONS: [usize; RATE] = [8, 9, 10, 11, 24, 25, 26, 27];

mod domain {
    pub const AAD: u8 = 0x01;
    pub const MESSAGE: u8 = 0x02;
}

fn xor_rate(state: &mut State, data: &[u8]) {
    RATE_POSITIONS
        .iter()
        .zip(data)
        .for_each(|(&i, b)| state[i] ^= b);
}

/// XORs `key` into the rate in two halves, with a full permutation after
/// each.
fn absorb_key(state: &mut State, key: &[u8]) {
    for half in key.chunks_exact(RATE) {
        xor_rate(state, half);
        sliscp_light256(state, INIT_STEPS);
    }
}

fn new_state(key: &[u8], nonce: &[u8]) -> State {
    let mut state = [0u8; SLISCP_LIGHT256_STATE_LEN];
    for (i, chunk) in state.chunks_exact_mut(8).enumerate() {
        let src = if i % 2 == 0 { nonce } else { key };
        chunk.copy_from_slice(&src[(i / 2) * 8..][..8]);
    }
    sliscp_light256(&mut state, INIT_STEPS);
    absorb_key(&mut state, key);
    state
}

/// Starts the block at `index` (less than `RATE`) with `0x80` padding and the
/// domain bit.
fn pad(state: &mut State, index: usize, domain: u8) {
    state[RATE_POSITIONS[index]] ^= 0x80;
    state[SLISCP_LIGHT256_STATE_LEN - 1] ^= domain;
}

fn absorb(state: &mut State, aad: &[u8]) {
    if aad.is_empty() {
        return;
    }
    let mut blocks = aad.chunks_exact(RATE);
    for block in blocks.by_ref() {
        xor_rate(state, block);
        state[SLISCP_LIGHT256_STATE_LEN - 1] ^= domain::AAD;
        sliscp_light256(state, DUPLEX_STEPS);
    }
    let remainder = blocks.remainder();
    pad(state, remainder.len(), domain::AAD);
    xor_rate(state, remainder);
    sliscp_light256(state, DUPLEX_STEPS);
}

#[derive(Clone, Copy)]
enum Direction {
    Sealing,
    Opening,
}

/// Duplexes one block through the rate, leaving the ciphertext there.
fn duplex(state: &mut State, block: &mut [u8], direction: Direction) {
    RATE_POSITIONS
        .iter()
        .zip(block.iter_mut())
        .for_each(|(&i, b)| match direction {
            Direction::Sealing => {
                state[i] ^= *b;
                *b = state[i];
            }
            Direction::Opening => {
                let c = *b;
                *b ^= state[i];
                state[i] = c;
            }
        });
}

/// The message always ends with a padded block, even when it is empty.
fn crypt(state: &mut State, in_out: &mut [u8], direction: Direction) {
    let mut blocks = in_out.chunks_exact_mut(RATE);
    for block in blocks.by_ref() {
        duplex(state, block, direction);
        state[SLISCP_LIGHT256_STATE_LEN - 1] ^= domain::MESSAGE;
        sliscp_light256(state, DUPLEX_STEPS);
    }
    let remainder = blocks.into_remainder();
    pad(state, remainder.len(), domain::MESSAGE);
    duplex(state, remainder, direction);
    sliscp_light256(state, DUPLEX_STEPS);
}

fn finish(
    key: &KeyInner,
    nonce: &Nonce,
    aad: Aad<&[u8]>,
    in_out: &mut [u8],
    direction: Direction,
) -> [u8; TAG_LEN] {
    let key = key.bytes();
    let mut state = new_state(key, nonce.as_ref());
    absorb(&mut state, aad.as_ref());
    crypt(&mut state, in_out, direction);
    absorb_key(&mut state, key);

    let mut tag = [0u8; TAG_LEN];
    tag[..8].copy_from_slice(&state[8..16]);
    tag[8..].copy_from_slice(&state[24..]);
    tag
}

fn spix_seal(
    key: &KeyInner,
    nonce: &Nonce,
    aad: Aad<&[u8]>,
    in_out: &mut [u8],
) -> Result<Tag, error::InputTooLongError> {
    Ok(Tag::new(&finish(key, nonce, aad, in_out, Direction::Sealing)))
}

fn spix_open(
    key: &KeyInner,
    nonce: &Nonce,
    aad: Aad<&[u8]>,
    in_out: &mut [u8],
    received_tag: &Tag,
) -> Result<(), OpenError> {
    let tag = finish(key, nonce, aad, in_out, Direction::Opening);
    check_tag(in_out, &tag, received_tag.as_ref())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_layout() {
        // Nonce and key alternate by 64-bit subblock before the first
        // permutation.
        let key: [u8; KEY_LEN] = core::array::from_fn(|i| 0x10 + i as u8);
        let nonce: [u8; NONCE_LEN] = core::array::from_fn(|i| 0x20 + i as u8);
        let mut expected = [0u8; SLISCP_LIGHT256_STATE_LEN];
        expected[..8].copy_from_slice(&nonce[..8]);
        expected[8..16].copy_from_slice(&key[..8]);
        expected[16..24].copy_from_slice(&nonce[8..]);
        expected[24..].copy_from_slice(&key[8..]);
        sliscp_light256(&mut expected, INIT_STEPS);
        absorb_key(&mut expected, &key);
        assert_eq!(new_state(&key, &nonce), expected);
    }

    #[test]
    fn test_duplex_inverts() {
        let mut a: State = core::array::from_fn(|i| i as u8);
        let mut b = a;
        let mut block = *b"plaintxt";
        duplex(&mut a, &mut block, Direction::Sealing);
        assert_ne!(&block, b"plaintxt");
        duplex(&mut b, &mut block, Direction::Opening);
        assert_eq!(&block, b"plaintxt");
        assert_eq!(a, b);
    }
}
