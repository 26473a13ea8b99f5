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

//! COMET: CHAM-128/128, CHAM-64/128 and SPECK-64/128 in COMET mode.
//!
//! COMET chains a state block `Y` through the block cipher keyed by a
//! 128-bit `Z`. Before every call the low 64 bits of `Z` are doubled in
//! GF(2^64), and its last byte carries the domain flags. The ciphertext is
//! the message XORed with a shuffled copy of `Y`; the message itself is
//! absorbed into `Y`.

use super::{
    algorithm::AlgorithmID,
    cham::{cham128_128_encrypt, cham64_128_encrypt},
    check_tag, init_key_bytes,
    speck::speck64_128_encrypt,
    Aad, Algorithm, Flags, KeyInner, Nonce, OpenError, Tag,
};
use crate::{
    endian::{load_le_u16, load_le_u32, load_le_u64, store_le_u16, store_le_u32, store_le_u64},
    error,
    polyfill::sliceutil::xor_at_start,
};

const KEY_LEN: usize = 16;

/// COMET-128 with CHAM-128/128.
pub static COMET_128_CHAM: Algorithm = Algorithm {
    name: "COMET-128_CHAM-128/128",
    key_len: KEY_LEN,
    nonce_len: 16,
    tag_len: 16,
    max_input_len: u64::MAX,
    flags: Flags::LITTLE_ENDIAN,
    init: init_key_bytes,
    seal: seal_128_cham,
    open: open_128_cham,
    id: AlgorithmID::COMET_128_CHAM,
};

/// COMET-64 with CHAM-64/128.
pub static COMET_64_CHAM: Algorithm = Algorithm {
    name: "COMET-64_CHAM-64/128",
    key_len: KEY_LEN,
    nonce_len: 15,
    tag_len: 8,
    max_input_len: u64::MAX,
    flags: Flags::LITTLE_ENDIAN,
    init: init_key_bytes,
    seal: seal_64_cham,
    open: open_64_cham,
    id: AlgorithmID::COMET_64_CHAM,
};

/// COMET-64 with SPECK-64/128.
pub static COMET_64_SPECK: Algorithm = Algorithm {
    name: "COMET-64_SPECK-64/128",
    key_len: KEY_LEN,
    nonce_len: 15,
    tag_len: 8,
    max_input_len: u64::MAX,
    flags: Flags::LITTLE_ENDIAN,
    init: init_key_bytes,
    seal: seal_64_speck,
    open: open_64_speck,
    id: AlgorithmID::COMET_64_SPECK,
};

mod domain {
    pub const AAD: u8 = 0x08;
    pub const AAD_PARTIAL: u8 = 0x10;
    pub const MESSAGE: u8 = 0x20;
    pub const MESSAGE_PARTIAL: u8 = 0x40;
    pub const TAG: u8 = 0x80;
}

/// How `Y` and `Z` are derived from the key and nonce.
enum Init {
    /// COMET-128: `Y = K`, `Z = E_K(N)`.
    EncryptNonce,
    /// COMET-64: `Y = E_K(0)`, `Z = (N || 0) ^ K`.
    EncryptZero,
}

struct Comet<const B: usize> {
    encrypt: fn(&[u8; KEY_LEN], &mut [u8; B]),
    shuffle: fn(&[u8; B]) -> [u8; B],
    init: Init,
}

const COMET_128_CHAM_PARAMS: Comet<16> = Comet {
    encrypt: cham128_128_encrypt,
    shuffle: shuffle_128,
    init: Init::EncryptNonce,
};

const COMET_64_CHAM_PARAMS: Comet<8> = Comet {
    encrypt: cham64_128_encrypt,
    shuffle: shuffle_64,
    init: Init::EncryptZero,
};

const COMET_64_SPECK_PARAMS: Comet<8> = Comet {
    encrypt: speck64_128_encrypt,
    shuffle: shuffle_64,
    init: Init::EncryptZero,
};

/// `(x0, x1, x2, x3) -> (x3, x2 >>> 1, x0, x1)` over 32-bit words.
fn shuffle_128(y: &[u8; 16]) -> [u8; 16] {
    let mut out = [0u8; 16];
    store_le_u32(&mut out[0..], load_le_u32(&y[12..]));
    store_le_u32(&mut out[4..], load_le_u32(&y[8..]).rotate_right(1));
    store_le_u32(&mut out[8..], load_le_u32(&y[0..]));
    store_le_u32(&mut out[12..], load_le_u32(&y[4..]));
    out
}

/// The same shuffle over 16-bit words.
fn shuffle_64(y: &[u8; 8]) -> [u8; 8] {
    let mut out = [0u8; 8];
    store_le_u16(&mut out[0..], load_le_u16(&y[6..]));
    store_le_u16(&mut out[2..], load_le_u16(&y[4..]).rotate_right(1));
    store_le_u16(&mut out[4..], load_le_u16(&y[0..]));
    store_le_u16(&mut out[6..], load_le_u16(&y[2..]));
    out
}

/// Doubles the low 64 bits of `z` in GF(2^64).
fn adjust_block_key(z: &mut [u8; KEY_LEN]) {
    let x = load_le_u64(&z[..8]);
    let reduce = 0u64.wrapping_sub(x >> 63) & 0x1b;
    store_le_u64(&mut z[..8], (x << 1) ^ reduce);
}

#[derive(Clone, Copy)]
enum Direction {
    Sealing,
    Opening,
}

impl<const B: usize> Comet<B> {
    fn new_state(&self, key: &[u8], nonce: &[u8]) -> ([u8; B], [u8; KEY_LEN]) {
        let mut k = [0u8; KEY_LEN];
        k.copy_from_slice(key);
        let mut y = [0u8; B];
        let mut z = [0u8; KEY_LEN];
        match self.init {
            Init::EncryptNonce => {
                y.copy_from_slice(&k[..B]);
                let mut n = [0u8; B];
                n.copy_from_slice(nonce);
                (self.encrypt)(&k, &mut n);
                z[..B].copy_from_slice(&n);
            }
            Init::EncryptZero => {
                (self.encrypt)(&k, &mut y);
                z[..nonce.len()].copy_from_slice(nonce);
                xor_at_start(&mut z, &k);
            }
        }
        (y, z)
    }

    fn step(&self, y: &mut [u8; B], z: &mut [u8; KEY_LEN]) {
        adjust_block_key(z);
        (self.encrypt)(z, y);
    }

    fn absorb(&self, y: &mut [u8; B], z: &mut [u8; KEY_LEN], aad: &[u8]) {
        if aad.is_empty() {
            return;
        }
        z[KEY_LEN - 1] ^= domain::AAD;
        for block in aad.chunks(B) {
            if block.len() < B {
                z[KEY_LEN - 1] ^= domain::AAD_PARTIAL;
            }
            self.step(y, z);
            xor_at_start(y, block);
            if block.len() < B {
                y[block.len()] ^= 0x01;
            }
        }
    }

    fn crypt(
        &self,
        y: &mut [u8; B],
        z: &mut [u8; KEY_LEN],
        in_out: &mut [u8],
        direction: Direction,
    ) {
        if in_out.is_empty() {
            return;
        }
        z[KEY_LEN - 1] ^= domain::MESSAGE;
        for block in in_out.chunks_mut(B) {
            if block.len() < B {
                z[KEY_LEN - 1] ^= domain::MESSAGE_PARTIAL;
            }
            self.step(y, z);
            let keystream = (self.shuffle)(y);
            if let Direction::Sealing = direction {
                xor_at_start(y, block);
            }
            xor_at_start(block, &keystream);
            if let Direction::Opening = direction {
                xor_at_start(y, block);
            }
            if block.len() < B {
                y[block.len()] ^= 0x01;
            }
        }
    }

    fn finish(
        &self,
        key: &KeyInner,
        nonce: &Nonce,
        aad: Aad<&[u8]>,
        in_out: &mut [u8],
        direction: Direction,
    ) -> [u8; B] {
        let (mut y, mut z) = self.new_state(key.bytes(), nonce.as_ref());
        self.absorb(&mut y, &mut z, aad.as_ref());
        self.crypt(&mut y, &mut z, in_out, direction);
        z[KEY_LEN - 1] ^= domain::TAG;
        self.step(&mut y, &mut z);
        y
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

macro_rules! comet_glue {
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

comet_glue!(seal_128_cham, open_128_cham, COMET_128_CHAM_PARAMS);
comet_glue!(seal_64_cham, open_64_cham, COMET_64_CHAM_PARAMS);
comet_glue!(seal_64_speck, open_64_speck, COMET_64_SPECK_PARAMS);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjust_block_key() {
        let mut z = [0u8; KEY_LEN];
        z[0] = 0x01;
        z[15] = 0xaa;
        adjust_block_key(&mut z);
        assert_eq!(z[0], 0x02);
        assert_eq!(z[15], 0xaa);

        // The top bit of the low half wraps around as the reduction.
        let mut z = [0u8; KEY_LEN];
        z[7] = 0x80;
        z[8] = 0x55;
        adjust_block_key(&mut z);
        assert_eq!(&z[..9], &[0x1b, 0, 0, 0, 0, 0, 0, 0, 0x55]);
    }

    #[test]
    fn test_shuffle() {
        let y: [u8; 8] = [0x00, 0x01, 0x02, 0x03, 0x03, 0x00, 0x06, 0x07];
        assert_eq!(
            shuffle_64(&y),
            [0x06, 0x07, 0x01, 0x80, 0x00, 0x01, 0x02, 0x03]
        );
        let y: [u8; 16] = core::array::from_fn(|i| i as u8 * 2);
        let out = shuffle_128(&y);
        assert_eq!(&out[..4], &y[12..]);
        assert_eq!(&out[8..], &y[..8]);
        assert_eq!(
            load_le_u32(&out[4..]),
            load_le_u32(&y[8..]).rotate_right(1)
        );
    }

    #[test]
    fn test_initial_state() {
        let key: [u8; KEY_LEN] = core::array::from_fn(|i| i as u8);
        let nonce = [0xa0u8; 15];
        let (y, z) = COMET_64_SPECK_PARAMS.new_state(&key, &nonce);
        let mut expected_y = [0u8; 8];
        speck64_128_encrypt(&key, &mut expected_y);
        assert_eq!(y, expected_y);
        assert_eq!(z[14], 0xa0 ^ 14);
        assert_eq!(z[15], 15);

        let nonce = [0xb0u8; 16];
        let (y, z) = COMET_128_CHAM_PARAMS.new_state(&key, &nonce);
        assert_eq!(y, key);
        let mut expected_z = nonce;
        cham128_128_encrypt(&key, &mut expected_z);
        assert_eq!(z, expected_z);
    }
}
