// Copyright 2019 Brian Smith.
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

//! GIFT-COFB: combined feedback mode over bit-sliced GIFT-128.
//!
//! The chaining value `Y` is kept as a big-endian `u128` and the 64-bit mask
//! `L` as a `u64`, so doubling and the feedback function are plain shifts.

use super::{
    algorithm::AlgorithmID, check_tag, gift128::KeySchedule, Aad, Algorithm, Flags, KeyInner,
    Nonce, OpenError, Tag,
};
use crate::error;

const BLOCK_LEN: usize = 16;

/// GIFT-COFB: 128-bit key, 128-bit nonce, 128-bit tag.
pub static GIFT_COFB: Algorithm = Algorithm {
    name: "GIFT-COFB",
    key_len: 16,
    nonce_len: 16,
    tag_len: 16,
    max_input_len: u64::MAX,
    flags: Flags::NONE,
    init,
    seal,
    open,
    id: AlgorithmID::GIFT_COFB,
};

/// Multiplies `l` by x modulo x^64 + x^4 + x^3 + x + 1.
fn double(l: u64) -> u64 {
    let mask = 0u64.wrapping_sub(l >> 63);
    (l << 1) ^ (mask & 0x1b)
}

fn triple(l: u64) -> u64 {
    l ^ double(l)
}

/// Splits `y` into halves `(L, R)` and returns `(R, L <<< 1)`.
fn feedback(y: u128) -> u128 {
    #[allow(clippy::cast_possible_truncation)]
    let hi = (y >> 64) as u64;
    (y << 64) | u128::from(hi.rotate_left(1))
}

fn load(block: &[u8]) -> u128 {
    let mut b = [0u8; BLOCK_LEN];
    b.copy_from_slice(block);
    u128::from_be_bytes(b)
}

/// Pads a partial block with `0x80` followed by zeros.
fn pad(partial: &[u8]) -> u128 {
    let mut b = [0u8; BLOCK_LEN];
    b[..partial.len()].copy_from_slice(partial);
    b[partial.len()] = 0x80;
    u128::from_be_bytes(b)
}

fn mask(l: u64) -> u128 {
    u128::from(l) << 64
}

#[derive(Clone, Copy)]
enum Direction {
    Sealing,
    Opening,
}

struct Cofb<'k> {
    ks: &'k KeySchedule,
    y: u128,
    l: u64,
}

impl<'k> Cofb<'k> {
    fn new(ks: &'k KeySchedule, nonce: &[u8]) -> Self {
        let mut cofb = Self { ks, y: 0, l: 0 };
        cofb.y = cofb.encrypt(load(nonce));
        #[allow(clippy::cast_possible_truncation)]
        let l = (cofb.y >> 64) as u64;
        cofb.l = l;
        cofb
    }

    fn encrypt(&self, y: u128) -> u128 {
        let mut block = y.to_be_bytes();
        self.ks.encrypt_block(&mut block);
        u128::from_be_bytes(block)
    }

    fn absorb_aad(&mut self, aad: &[u8], in_out_len: usize) {
        let mut aad = aad;
        while aad.len() > BLOCK_LEN {
            let (block, rest) = aad.split_at(BLOCK_LEN);
            self.l = double(self.l);
            self.y = self.encrypt(feedback(self.y) ^ mask(self.l) ^ load(block));
            aad = rest;
        }

        self.y = feedback(self.y);
        if aad.len() == BLOCK_LEN {
            self.y ^= load(aad);
            self.l = triple(self.l);
        } else {
            self.y ^= pad(aad);
            self.l = triple(triple(self.l));
        }
        if in_out_len == 0 {
            self.l = triple(triple(self.l));
        }
        self.y = self.encrypt(self.y ^ mask(self.l));
    }

    fn crypt(&mut self, in_out: &mut [u8], direction: Direction) {
        if in_out.is_empty() {
            return;
        }
        let last_len = ((in_out.len() - 1) % BLOCK_LEN) + 1;
        let (full, last) = in_out.split_at_mut(in_out.len() - last_len);

        for block in full.chunks_exact_mut(BLOCK_LEN) {
            let p = self.crypt_block(block, direction);
            self.l = double(self.l);
            self.y = self.encrypt(feedback(self.y) ^ mask(self.l) ^ p);
        }

        let p = self.crypt_block(last, direction);
        self.y = feedback(self.y) ^ p;
        self.l = if last.len() == BLOCK_LEN {
            triple(self.l)
        } else {
            triple(triple(self.l))
        };
        self.y = self.encrypt(self.y ^ mask(self.l));
    }

    /// XORs the keystream `Y` into a full or partial block and returns the
    /// padded plaintext block.
    fn crypt_block(&self, block: &mut [u8], direction: Direction) -> u128 {
        let keystream = self.y.to_be_bytes();
        let plaintext = |b: &[u8]| {
            if b.len() == BLOCK_LEN {
                load(b)
            } else {
                pad(b)
            }
        };
        let p = match direction {
            Direction::Sealing => plaintext(block),
            Direction::Opening => 0,
        };
        block
            .iter_mut()
            .zip(keystream.iter())
            .for_each(|(b, k)| *b ^= k);
        match direction {
            Direction::Sealing => p,
            Direction::Opening => plaintext(block),
        }
    }

    fn tag(&self) -> [u8; BLOCK_LEN] {
        self.y.to_be_bytes()
    }
}

fn init(key: &[u8]) -> Result<KeyInner, error::Unspecified> {
    let key = key.try_into().map_err(|_| error::Unspecified)?;
    Ok(KeyInner::Gift128(KeySchedule::new(key)))
}

fn key_schedule(key: &KeyInner) -> &KeySchedule {
    match key {
        KeyInner::Gift128(ks) => ks,
        _ => unreachable!(),
    }
}

fn seal(
    key: &KeyInner,
    nonce: &Nonce,
    aad: Aad<&[u8]>,
    in_out: &mut [u8],
) -> Result<Tag, error::InputTooLongError> {
    let mut cofb = Cofb::new(key_schedule(key), nonce.as_ref());
    cofb.absorb_aad(aad.as_ref(), in_out.len());
    cofb.crypt(in_out, Direction::Sealing);
    Ok(Tag::new(&cofb.tag()))
}

fn open(
    key: &KeyInner,
    nonce: &Nonce,
    aad: Aad<&[u8]>,
    in_out: &mut [u8],
    received_tag: &Tag,
) -> Result<(), OpenError> {
    let mut cofb = Cofb::new(key_schedule(key), nonce.as_ref());
    cofb.absorb_aad(aad.as_ref(), in_out.len());
    cofb.crypt(in_out, Direction::Opening);
    check_tag(in_out, &cofb.tag(), received_tag.as_ref())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_and_triple() {
        assert_eq!(double(1), 2);
        assert_eq!(double(0x8000_0000_0000_0000), 0x1b);
        assert_eq!(triple(1), 3);
        assert_eq!(triple(0x8000_0000_0000_0000), 0x8000_0000_0000_001b);
    }

    #[test]
    fn test_feedback() {
        let y = (0x8000_0000_0000_0001u128 << 64) | 0x1234;
        assert_eq!(feedback(y), (0x1234u128 << 64) | 0x3);
    }
}
