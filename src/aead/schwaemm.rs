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

//! The Schwaemm AEADs over the SPARKLE permutations.
//!
//! The state is split into a left part of `rate` bytes, which initially holds
//! the nonce, and a right part that initially holds the key. Before each
//! block is absorbed the rate is fed back through `rho`, and the last block
//! of each phase carries a domain constant in the top byte of the state.

use super::{
    algorithm::AlgorithmID, check_tag, init_key_bytes, Aad, Algorithm, Flags, KeyInner, Nonce,
    OpenError, Tag,
};
use crate::{
    endian::load_le_u32s,
    error,
    polyfill::sliceutil::xor_at_start,
    sparkle::{self, SPARKLE_256_WORDS, SPARKLE_384_WORDS, SPARKLE_512_WORDS},
};

/// Schwaemm256-128: 128-bit key, 256-bit nonce, 128-bit tag.
pub static SCHWAEMM_256_128: Algorithm = Algorithm {
    name: "Schwaemm256-128",
    key_len: 16,
    nonce_len: 32,
    tag_len: 16,
    max_input_len: u64::MAX,
    flags: Flags::LITTLE_ENDIAN,
    init: init_key_bytes,
    seal: seal_256_128,
    open: open_256_128,
    id: AlgorithmID::SCHWAEMM_256_128,
};

/// Schwaemm192-192: 192-bit key, 192-bit nonce, 192-bit tag.
pub static SCHWAEMM_192_192: Algorithm = Algorithm {
    name: "Schwaemm192-192",
    key_len: 24,
    nonce_len: 24,
    tag_len: 24,
    max_input_len: u64::MAX,
    flags: Flags::LITTLE_ENDIAN,
    init: init_key_bytes,
    seal: seal_192_192,
    open: open_192_192,
    id: AlgorithmID::SCHWAEMM_192_192,
};

/// Schwaemm128-128: 128-bit key, 128-bit nonce, 128-bit tag.
pub static SCHWAEMM_128_128: Algorithm = Algorithm {
    name: "Schwaemm128-128",
    key_len: 16,
    nonce_len: 16,
    tag_len: 16,
    max_input_len: u64::MAX,
    flags: Flags::LITTLE_ENDIAN,
    init: init_key_bytes,
    seal: seal_128_128,
    open: open_128_128,
    id: AlgorithmID::SCHWAEMM_128_128,
};

/// Schwaemm256-256: 256-bit key, 256-bit nonce, 256-bit tag.
pub static SCHWAEMM_256_256: Algorithm = Algorithm {
    name: "Schwaemm256-256",
    key_len: 32,
    nonce_len: 32,
    tag_len: 32,
    max_input_len: u64::MAX,
    flags: Flags::LITTLE_ENDIAN,
    init: init_key_bytes,
    seal: seal_256_256,
    open: open_256_256,
    id: AlgorithmID::SCHWAEMM_256_256,
};

const MAX_RATE: usize = 32;

/// Domain constants for the last block of a phase.
struct Domains {
    partial: u8,
    full: u8,
}

struct Variant<const N: usize> {
    rate: usize,
    permute: fn(&mut [u32; N], usize),
    slim_steps: usize,
    big_steps: usize,
    ad: Domains,
    message: Domains,
}

static VARIANT_256_128: Variant<SPARKLE_384_WORDS> = Variant {
    rate: 32,
    permute: sparkle::sparkle384,
    slim_steps: 7,
    big_steps: 11,
    ad: Domains { partial: 0x04, full: 0x05 },
    message: Domains { partial: 0x06, full: 0x07 },
};

static VARIANT_192_192: Variant<SPARKLE_384_WORDS> = Variant {
    rate: 24,
    permute: sparkle::sparkle384,
    slim_steps: 7,
    big_steps: 11,
    ad: Domains { partial: 0x08, full: 0x09 },
    message: Domains { partial: 0x0a, full: 0x0b },
};

static VARIANT_128_128: Variant<SPARKLE_256_WORDS> = Variant {
    rate: 16,
    permute: sparkle::sparkle256,
    slim_steps: 7,
    big_steps: 10,
    ad: Domains { partial: 0x04, full: 0x05 },
    message: Domains { partial: 0x06, full: 0x07 },
};

static VARIANT_256_256: Variant<SPARKLE_512_WORDS> = Variant {
    rate: 32,
    permute: sparkle::sparkle512,
    slim_steps: 8,
    big_steps: 12,
    ad: Domains { partial: 0x10, full: 0x11 },
    message: Domains { partial: 0x12, full: 0x13 },
};

#[derive(Clone, Copy)]
enum Direction {
    Sealing,
    Opening,
}

#[allow(clippy::cast_possible_truncation)]
fn state_byte(s: &[u32], i: usize) -> u8 {
    (s[i / 4] >> (8 * (i % 4))) as u8
}

fn xor_into_state(s: &mut [u32], data: &[u8]) {
    data.iter()
        .enumerate()
        .for_each(|(i, b)| s[i / 4] ^= u32::from(*b) << (8 * (i % 4)));
}

impl<const N: usize> Variant<N> {
    fn start(&self, key: &[u8], nonce: &[u8]) -> [u32; N] {
        let rate_words = self.rate / 4;
        let mut s = [0u32; N];
        load_le_u32s(&mut s[..rate_words], nonce);
        load_le_u32s(&mut s[rate_words..], key);
        (self.permute)(&mut s, self.big_steps);
        s
    }

    /// The rho feedback over the rate, combined with rate whitening from the
    /// capacity.
    fn rho(&self, s: &mut [u32; N], domain: u8) {
        let rate_words = self.rate / 4;
        let half = rate_words / 2;
        let capacity_words = N - rate_words;
        if domain != 0 {
            s[N - 1] ^= u32::from(domain) << 24;
        }
        for i in 0..half {
            let t = s[i];
            s[i] = s[i + half] ^ s[rate_words + (i % capacity_words)];
            s[i + half] ^= t ^ s[rate_words + ((i + half) % capacity_words)];
        }
    }

    fn absorb_aad(&self, s: &mut [u32; N], aad: &[u8]) {
        if aad.is_empty() {
            return;
        }
        let mut aad = aad;
        while aad.len() > self.rate {
            let (block, rest) = aad.split_at(self.rate);
            self.rho(s, 0);
            xor_into_state(s, block);
            (self.permute)(s, self.slim_steps);
            aad = rest;
        }
        if aad.len() == self.rate {
            self.rho(s, self.ad.full);
            xor_into_state(s, aad);
        } else {
            self.rho(s, self.ad.partial);
            xor_into_state(s, aad);
            pad(s, aad.len());
        }
        (self.permute)(s, self.big_steps);
    }

    fn crypt(&self, s: &mut [u32; N], in_out: &mut [u8], direction: Direction) {
        if in_out.is_empty() {
            return;
        }
        let last_len = ((in_out.len() - 1) % self.rate) + 1;
        let (full, last) = in_out.split_at_mut(in_out.len() - last_len);

        for block in full.chunks_exact_mut(self.rate) {
            self.crypt_block(s, block, 0, direction);
            (self.permute)(s, self.slim_steps);
        }

        if last.len() == self.rate {
            self.crypt_block(s, last, self.message.full, direction);
        } else {
            self.crypt_block(s, last, self.message.partial, direction);
            pad(s, last.len());
        }
        (self.permute)(s, self.big_steps);
    }

    /// Both directions take the keystream from the state before `rho` and
    /// absorb the plaintext after it.
    fn crypt_block(&self, s: &mut [u32; N], block: &mut [u8], domain: u8, direction: Direction) {
        let mut keystream = [0u8; MAX_RATE];
        keystream
            .iter_mut()
            .take(block.len())
            .enumerate()
            .for_each(|(i, k)| *k = state_byte(s, i));

        match direction {
            Direction::Sealing => {
                self.rho(s, domain);
                xor_into_state(s, block);
                xor_at_start(block, &keystream);
            }
            Direction::Opening => {
                xor_at_start(block, &keystream);
                self.rho(s, domain);
                xor_into_state(s, block);
            }
        }
    }

    /// The right part of the state XORed with the key.
    fn tag(&self, s: &[u32; N], key: &[u8]) -> Tag {
        let mut tag = [0u8; super::MAX_TAG_LEN];
        tag.iter_mut()
            .zip(key)
            .enumerate()
            .for_each(|(i, (t, k))| *t = state_byte(s, self.rate + i) ^ k);
        Tag::new(&tag[..key.len()])
    }

    fn seal(&self, key: &KeyInner, nonce: &Nonce, aad: Aad<&[u8]>, in_out: &mut [u8]) -> Tag {
        let key = key.bytes();
        let mut s = self.start(key, nonce.as_ref());
        self.absorb_aad(&mut s, aad.as_ref());
        self.crypt(&mut s, in_out, Direction::Sealing);
        self.tag(&s, key)
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
        let mut s = self.start(key, nonce.as_ref());
        self.absorb_aad(&mut s, aad.as_ref());
        self.crypt(&mut s, in_out, Direction::Opening);
        let tag = self.tag(&s, key);
        check_tag(in_out, tag.as_ref(), received_tag.as_ref())?;
        Ok(())
    }
}

/// Adds the `0x80` padding byte after a partial block of `len` bytes.
fn pad(s: &mut [u32], len: usize) {
    s[len / 4] ^= 0x80 << (8 * (len % 4));
}

macro_rules! schwaemm_glue {
    ( $seal:ident, $open:ident, $variant:ident ) => {
        fn $seal(
            key: &KeyInner,
            nonce: &Nonce,
            aad: Aad<&[u8]>,
            in_out: &mut [u8],
        ) -> Result<Tag, error::InputTooLongError> {
            Ok($variant.seal(key, nonce, aad, in_out))
        }

        fn $open(
            key: &KeyInner,
            nonce: &Nonce,
            aad: Aad<&[u8]>,
            in_out: &mut [u8],
            received_tag: &Tag,
        ) -> Result<(), OpenError> {
            $variant.open(key, nonce, aad, in_out, received_tag)
        }
    };
}

schwaemm_glue!(seal_256_128, open_256_128, VARIANT_256_128);
schwaemm_glue!(seal_192_192, open_192_192, VARIANT_192_192);
schwaemm_glue!(seal_128_128, open_128_128, VARIANT_128_128);
schwaemm_glue!(seal_256_256, open_256_256, VARIANT_256_256);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rho_256_128() {
        let mut s: [u32; 12] = core::array::from_fn(|i| 1 << i);
        VARIANT_256_128.rho(&mut s, 0);
        // s[0] = s[4] ^ s[8], s[4] = s[4] ^ s[0] ^ s[8]
        assert_eq!(s[0], (1 << 4) | (1 << 8));
        assert_eq!(s[4], (1 << 4) | (1 << 0) | (1 << 8));
        assert_eq!(s[8], 1 << 8);
    }

    #[test]
    fn test_rho_192_192_uses_domain() {
        let mut s = [0u32; 12];
        VARIANT_192_192.rho(&mut s, 0x0b);
        assert_eq!(s[11], 0x0b00_0000);
        // s[5] ^= s[2] ^ s[11]
        assert_eq!(s[5], 0x0b00_0000);
    }

    #[test]
    fn test_state_byte_order() {
        let mut s = [0u32; 2];
        xor_into_state(&mut s, &[1, 2, 3, 4, 5]);
        assert_eq!(s, [0x04030201, 0x05]);
        assert_eq!(state_byte(&s, 4), 5);
    }
}
