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

//! ISAP-K-128 and ISAP-K-128A.
//!
//! Encrypt-then-MAC over Keccak-p[400]. Both halves first derive a session
//! key by absorbing the nonce (encryption) or the MAC's intermediate tag
//! (authentication) into a keyed state one bit per permutation call, which
//! limits what a single trace of the device can reveal about the key.

use super::{
    algorithm::AlgorithmID,
    check_tag, init_key_bytes,
    keccak::{keccakp_400, KECCAKP_400_STATE_LEN},
    Aad, Algorithm, Flags, KeyInner, Nonce, OpenError, Tag,
};
use crate::{error, polyfill::sliceutil::xor_at_start};

const KEY_LEN: usize = 16;
const NONCE_LEN: usize = 16;
const TAG_LEN: usize = 16;
const RATE: usize = 18;

type State = [u8; KECCAKP_400_STATE_LEN];

/// ISAP-K-128A: 128-bit key, 128-bit nonce, 128-bit tag.
pub static ISAP_K_128A: Algorithm = Algorithm {
    name: "ISAP-K-128A",
    key_len: KEY_LEN,
    nonce_len: NONCE_LEN,
    tag_len: TAG_LEN,
    max_input_len: u64::MAX,
    flags: Flags::SC_PROTECT_KEY,
    init: init_key_bytes,
    seal: seal_128a,
    open: open_128a,
    id: AlgorithmID::ISAP_K_128A,
};

/// ISAP-K-128: 128-bit key, 128-bit nonce, 128-bit tag.
pub static ISAP_K_128: Algorithm = Algorithm {
    name: "ISAP-K-128",
    key_len: KEY_LEN,
    nonce_len: NONCE_LEN,
    tag_len: TAG_LEN,
    max_input_len: u64::MAX,
    flags: Flags::SC_PROTECT_KEY,
    init: init_key_bytes,
    seal: seal_128,
    open: open_128,
    id: AlgorithmID::ISAP_K_128,
};

/// Round counts for each use of the permutation.
struct Isap {
    /// Hashing the AAD and ciphertext.
    s_h: u8,
    /// Each bit absorbed while re-keying.
    s_b: u8,
    /// Each keystream block.
    s_e: u8,
    /// Before and after the bits while re-keying.
    s_k: u8,
}

const ISAP_128A: Isap = Isap {
    s_h: 16,
    s_b: 1,
    s_e: 8,
    s_k: 8,
};

const ISAP_128: Isap = Isap {
    s_h: 20,
    s_b: 12,
    s_e: 12,
    s_k: 12,
};

mod domain {
    pub const MAC: u8 = 0x01;
    pub const REKEY_MAC: u8 = 0x02;
    pub const REKEY_ENCRYPT: u8 = 0x03;
}

#[allow(clippy::cast_possible_truncation)]
const KEY_BITS: u8 = (KEY_LEN * 8) as u8;
#[allow(clippy::cast_possible_truncation)]
const RATE_BITS: u8 = (RATE * 8) as u8;

fn permute(state: &mut State, rounds: u8) {
    keccakp_400(state, usize::from(rounds));
}

impl Isap {
    /// Writes the IV for `domain` into the start of `out`.
    fn iv(&self, domain: u8, out: &mut [u8]) {
        out[..8].copy_from_slice(&[
            domain, KEY_BITS, RATE_BITS, 1, self.s_h, self.s_b, self.s_e, self.s_k,
        ]);
    }

    /// Derives a session state from `key`, absorbing `data` most significant
    /// bit first.
    fn rekey(&self, key: &[u8], domain: u8, data: &[u8]) -> State {
        let mut state = [0u8; KECCAKP_400_STATE_LEN];
        state[..KEY_LEN].copy_from_slice(key);
        self.iv(domain, &mut state[KEY_LEN..]);
        permute(&mut state, self.s_k);

        let bits = data.len() * 8;
        for bit in 0..bits {
            state[0] ^= (data[bit / 8] << (bit % 8)) & 0x80;
            let rounds = if bit + 1 == bits { self.s_k } else { self.s_b };
            permute(&mut state, rounds);
        }
        state
    }

    /// XORs the keystream into `in_out`; the same operation both ways.
    fn crypt(&self, key: &[u8], nonce: &[u8], in_out: &mut [u8]) {
        let mut state = self.rekey(key, domain::REKEY_ENCRYPT, nonce);
        state[KECCAKP_400_STATE_LEN - NONCE_LEN..].copy_from_slice(nonce);
        for block in in_out.chunks_mut(RATE) {
            permute(&mut state, self.s_e);
            xor_at_start(block, &state[..RATE]);
        }
    }

    /// Absorbs `data` with `0x80` padding. A whole number of blocks is
    /// followed by a block of padding alone.
    fn absorb(&self, state: &mut State, data: &[u8]) {
        let mut blocks = data.chunks_exact(RATE);
        for block in blocks.by_ref() {
            xor_at_start(state, block);
            permute(state, self.s_h);
        }
        let remainder = blocks.remainder();
        xor_at_start(state, remainder);
        state[remainder.len()] ^= 0x80;
        permute(state, self.s_h);
    }

    fn mac(&self, key: &[u8], nonce: &[u8], aad: &[u8], ciphertext: &[u8]) -> [u8; TAG_LEN] {
        let mut state = [0u8; KECCAKP_400_STATE_LEN];
        state[..NONCE_LEN].copy_from_slice(nonce);
        self.iv(domain::MAC, &mut state[NONCE_LEN..]);
        permute(&mut state, self.s_h);

        self.absorb(&mut state, aad);
        state[KECCAKP_400_STATE_LEN - 1] ^= 0x01;
        self.absorb(&mut state, ciphertext);

        // The first half of the hash re-keys; the rest is carried over.
        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(&state[..TAG_LEN]);
        let mut rekeyed = self.rekey(key, domain::REKEY_MAC, &tag);
        rekeyed[TAG_LEN..].copy_from_slice(&state[TAG_LEN..]);
        permute(&mut rekeyed, self.s_h);
        tag.copy_from_slice(&rekeyed[..TAG_LEN]);
        tag
    }

    fn seal(&self, key: &KeyInner, nonce: &Nonce, aad: Aad<&[u8]>, in_out: &mut [u8]) -> Tag {
        self.crypt(key.bytes(), nonce.as_ref(), in_out);
        Tag::new(&self.mac(key.bytes(), nonce.as_ref(), aad.as_ref(), in_out))
    }

    fn open(
        &self,
        key: &KeyInner,
        nonce: &Nonce,
        aad: Aad<&[u8]>,
        in_out: &mut [u8],
        received_tag: &Tag,
    ) -> Result<(), OpenError> {
        let tag = self.mac(key.bytes(), nonce.as_ref(), aad.as_ref(), in_out);
        self.crypt(key.bytes(), nonce.as_ref(), in_out);
        check_tag(in_out, &tag, received_tag.as_ref())?;
        Ok(())
    }
}

macro_rules! isap_glue {
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

isap_glue!(seal_128a, open_128a, ISAP_128A);
isap_glue!(seal_128, open_128, ISAP_128);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iv() {
        let mut iv = [0u8; 8];
        ISAP_128A.iv(domain::MAC, &mut iv);
        assert_eq!(iv, [0x01, 128, 144, 1, 16, 1, 8, 8]);
        ISAP_128.iv(domain::REKEY_ENCRYPT, &mut iv);
        assert_eq!(iv, [0x03, 128, 144, 1, 20, 12, 12, 12]);
    }

    #[test]
    fn test_rekey_depends_on_every_bit() {
        let key = [0x42u8; KEY_LEN];
        let base = ISAP_128A.rekey(&key, domain::REKEY_MAC, &[0u8; TAG_LEN]);
        for bit in [0, 7, 64, 127] {
            let mut data = [0u8; TAG_LEN];
            data[bit / 8] = 0x80 >> (bit % 8);
            assert_ne!(ISAP_128A.rekey(&key, domain::REKEY_MAC, &data), base);
        }
    }
}
