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

//! TinyJAMBU: a 128-bit keyed NLFSR permutation in a duplex mode.
//!
//! Data enters 32 bits at a time through `state[3]` and keystream leaves
//! through `state[2]`. Frame bits in `state[1]` separate the phases, and a
//! short final word also adds its byte count there.

use super::{
    algorithm::AlgorithmID, check_tag, init_key_bytes, Aad, Algorithm, Flags, KeyInner, Nonce,
    OpenError, Tag,
};
use crate::{
    endian::{load_le_u32s, store_le_u32},
    error,
};

const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 8;
const MAX_KEY_WORDS: usize = 8;

const FRAME_NONCE: u32 = 0x10;
const FRAME_AD: u32 = 0x30;
const FRAME_MESSAGE: u32 = 0x50;
const FRAME_FINAL: u32 = 0x70;

/// Rounds of 128 steps used for nonce, AAD and the second tag word.
const SHORT_ROUNDS: usize = 3;

/// TinyJAMBU-128: 128-bit key, 96-bit nonce, 64-bit tag.
pub static TINYJAMBU_128: Algorithm = Algorithm {
    name: "TinyJAMBU-128",
    key_len: 16,
    nonce_len: NONCE_LEN,
    tag_len: TAG_LEN,
    max_input_len: u64::MAX,
    flags: Flags::LITTLE_ENDIAN,
    init: init_key_bytes,
    seal,
    open,
    id: AlgorithmID::TINYJAMBU_128,
};

/// TinyJAMBU-192: 192-bit key, 96-bit nonce, 64-bit tag.
pub static TINYJAMBU_192: Algorithm = Algorithm {
    name: "TinyJAMBU-192",
    key_len: 24,
    nonce_len: NONCE_LEN,
    tag_len: TAG_LEN,
    max_input_len: u64::MAX,
    flags: Flags::LITTLE_ENDIAN,
    init: init_key_bytes,
    seal,
    open,
    id: AlgorithmID::TINYJAMBU_192,
};

/// TinyJAMBU-256: 256-bit key, 96-bit nonce, 64-bit tag.
pub static TINYJAMBU_256: Algorithm = Algorithm {
    name: "TinyJAMBU-256",
    key_len: 32,
    nonce_len: NONCE_LEN,
    tag_len: TAG_LEN,
    max_input_len: u64::MAX,
    flags: Flags::LITTLE_ENDIAN,
    init: init_key_bytes,
    seal,
    open,
    id: AlgorithmID::TINYJAMBU_256,
};

/// Runs `rounds * 128` steps of the NLFSR. Round `j` consumes key words
/// `4j .. 4j + 4`, wrapping around the key.
pub(super) fn permutation(state: &mut [u32; 4], key: &[u32], rounds: usize) {
    let mut k = key.iter().cycle();
    for _ in 0..rounds {
        for i in 0..4 {
            let s1 = state[(i + 1) % 4];
            let s2 = state[(i + 2) % 4];
            let s3 = state[(i + 3) % 4];
            let t1 = (s1 >> 15) | (s2 << 17);
            let t2 = (s2 >> 6) | (s3 << 26);
            let t3 = (s2 >> 21) | (s3 << 11);
            let t4 = (s2 >> 27) | (s3 << 5);
            let kword = k.next().copied().unwrap_or_default();
            state[i] ^= t1 ^ !(t2 & t3) ^ t4 ^ kword;
        }
    }
}

/// Loads up to four bytes as a little-endian word.
fn load_partial(b: &[u8]) -> u32 {
    b.iter()
        .enumerate()
        .fold(0, |w, (i, b)| w | (u32::from(*b) << (8 * i)))
}

#[allow(clippy::cast_possible_truncation)]
fn store_partial(b: &mut [u8], w: u32) {
    b.iter_mut()
        .enumerate()
        .for_each(|(i, b)| *b = (w >> (8 * i)) as u8);
}

struct TinyJambu {
    state: [u32; 4],
    key: [u32; MAX_KEY_WORDS],
    key_words: usize,
    /// Rounds for setup, message words and the first tag word: 8, 9 or 10
    /// for 128-, 192- and 256-bit keys.
    long_rounds: usize,
}

#[derive(Clone, Copy)]
enum Direction {
    Sealing,
    Opening,
}

impl TinyJambu {
    fn new(key: &[u8], nonce: &[u8], aad: &[u8]) -> Self {
        let key_words = key.len() / 4;
        let mut k = [0u32; MAX_KEY_WORDS];
        load_le_u32s(&mut k[..key_words], key);
        let mut s = Self {
            state: [0; 4],
            key: k,
            key_words,
            long_rounds: 8 + (key_words - 4) / 2,
        };

        s.permute(s.long_rounds);
        for word in nonce.chunks_exact(4) {
            s.state[1] ^= FRAME_NONCE;
            s.permute(SHORT_ROUNDS);
            s.state[3] ^= load_partial(word);
        }

        for word in aad.chunks(4) {
            s.state[1] ^= FRAME_AD;
            s.permute(SHORT_ROUNDS);
            s.state[3] ^= load_partial(word);
            if word.len() < 4 {
                s.state[1] ^= len_frame(word.len());
            }
        }
        s
    }

    fn permute(&mut self, rounds: usize) {
        permutation(&mut self.state, &self.key[..self.key_words], rounds);
    }

    fn crypt(&mut self, in_out: &mut [u8], direction: Direction) {
        for word in in_out.chunks_mut(4) {
            self.state[1] ^= FRAME_MESSAGE;
            self.permute(self.long_rounds);
            let keystream = self.state[2];
            let input = load_partial(word);
            let plaintext = match direction {
                Direction::Sealing => input,
                Direction::Opening => mask(input ^ keystream, word.len()),
            };
            self.state[3] ^= plaintext;
            if word.len() < 4 {
                self.state[1] ^= len_frame(word.len());
            }
            store_partial(word, input ^ keystream);
        }
    }

    fn tag(mut self) -> [u8; TAG_LEN] {
        let mut tag = [0u8; TAG_LEN];
        self.state[1] ^= FRAME_FINAL;
        self.permute(self.long_rounds);
        store_le_u32(&mut tag[..4], self.state[2]);
        self.state[1] ^= FRAME_FINAL;
        self.permute(SHORT_ROUNDS);
        store_le_u32(&mut tag[4..], self.state[2]);
        tag
    }
}

#[allow(clippy::cast_possible_truncation)]
fn len_frame(len: usize) -> u32 {
    len as u32
}

/// Keeps the low `len` bytes of `w`.
fn mask(w: u32, len: usize) -> u32 {
    if len >= 4 {
        w
    } else {
        w & ((1 << (8 * len)) - 1)
    }
}

fn seal(
    key: &KeyInner,
    nonce: &Nonce,
    aad: Aad<&[u8]>,
    in_out: &mut [u8],
) -> Result<Tag, error::InputTooLongError> {
    let mut t = TinyJambu::new(key.bytes(), nonce.as_ref(), aad.as_ref());
    t.crypt(in_out, Direction::Sealing);
    Ok(Tag::new(&t.tag()))
}

fn open(
    key: &KeyInner,
    nonce: &Nonce,
    aad: Aad<&[u8]>,
    in_out: &mut [u8],
    received_tag: &Tag,
) -> Result<(), OpenError> {
    let mut t = TinyJambu::new(key.bytes(), nonce.as_ref(), aad.as_ref());
    t.crypt(in_out, Direction::Opening);
    check_tag(in_out, &t.tag(), received_tag.as_ref())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_words() {
        assert_eq!(load_partial(&[1, 2, 3]), 0x030201);
        let mut b = [0u8; 2];
        store_partial(&mut b, 0xaabbccdd);
        assert_eq!(b, [0xdd, 0xcc]);
        assert_eq!(mask(0xaabbccdd, 3), 0xbbccdd);
        assert_eq!(mask(0xaabbccdd, 4), 0xaabbccdd);
    }

    #[test]
    fn test_permutation() {
        const KEY: [u32; 8] = [
            0x33221100, 0x77665544, 0xbbaa9988, 0xffeeddcc, 0x9687b4a5, 0xd2c3f0e1, 0x1e0f3c2d,
            0x5a4b7869,
        ];
        for (key_words, rounds, expected) in [
            (4, 8, [0xd9025b75, 0xdea7c711, 0xc42bfe5c, 0x361e5016]),
            (6, 9, [0xeb03d4da, 0x14894342, 0xb0d7ba4d, 0x025b53a6]),
            (8, 10, [0xf066f253, 0xa8cf13ed, 0xd46f2eb9, 0xbd4c5e4a]),
        ] {
            let mut state = [0x03020100, 0x07060504, 0x0b0a0908, 0x0f0e0d0c];
            permutation(&mut state, &KEY[..key_words], rounds);
            assert_eq!(state, expected);
        }
    }

    #[test]
    fn test_key_words_cycle() {
        // A 192-bit key uses words 4, 5, 0, 1 in the second round, so running
        // one round with the rotated key must match the second round.
        let key: [u32; 6] = [1, 2, 3, 4, 5, 6];
        let mut a = [0x11111111u32, 0x22222222, 0x33333333, 0x44444444];
        permutation(&mut a, &key, 2);

        let mut b = [0x11111111u32, 0x22222222, 0x33333333, 0x44444444];
        permutation(&mut b, &key[..4], 1);
        permutation(&mut b, &[5, 6, 1, 2], 1);
        assert_eq!(a, b);
    }

    #[test]
    fn test_long_rounds() {
        for (key_len, rounds) in [(16, 8), (24, 9), (32, 10)] {
            let key = [0u8; 32];
            let t = TinyJambu::new(&key[..key_len], &[0; NONCE_LEN], &[]);
            assert_eq!(t.long_rounds, rounds);
        }
    }
}
