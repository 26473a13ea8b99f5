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

//! Elephant: Dumbo, Jumbo and Delirium.
//!
//! Encryption is a counter mode over a masked permutation. The masks come
//! from an LFSR over the whole state, seeded by the permuted key. The tag is
//! a Wegman-Carter-style sum over the nonce, the AAD and the ciphertext,
//! each block masked with two consecutive LFSR outputs.

use super::{
    algorithm::AlgorithmID,
    check_tag, init_key_bytes,
    keccak::{keccakp_200, KECCAKP_200_STATE_LEN},
    spongent::{spongent160, spongent176, SPONGENT160_STATE_LEN, SPONGENT176_STATE_LEN},
    Aad, Algorithm, Flags, KeyInner, Nonce, OpenError, Tag,
};
use crate::{error, polyfill::sliceutil::xor_at_start};

const KEY_LEN: usize = 16;
const NONCE_LEN: usize = 12;
const MAX_TAG_LEN: usize = 16;

/// Dumbo: Elephant over Spongent-pi[160] with a 64-bit tag.
pub static DUMBO: Algorithm = Algorithm {
    name: "Dumbo",
    key_len: KEY_LEN,
    nonce_len: NONCE_LEN,
    tag_len: DUMBO_PARAMS.tag_len,
    max_input_len: u64::MAX,
    flags: Flags::LITTLE_ENDIAN,
    init: init_key_bytes,
    seal: seal_dumbo,
    open: open_dumbo,
    id: AlgorithmID::DUMBO,
};

/// Jumbo: Elephant over Spongent-pi[176] with a 64-bit tag.
pub static JUMBO: Algorithm = Algorithm {
    name: "Jumbo",
    key_len: KEY_LEN,
    nonce_len: NONCE_LEN,
    tag_len: JUMBO_PARAMS.tag_len,
    max_input_len: u64::MAX,
    flags: Flags::LITTLE_ENDIAN,
    init: init_key_bytes,
    seal: seal_jumbo,
    open: open_jumbo,
    id: AlgorithmID::JUMBO,
};

/// Delirium: Elephant over Keccak-p[200] with a 128-bit tag.
pub static DELIRIUM: Algorithm = Algorithm {
    name: "Delirium",
    key_len: KEY_LEN,
    nonce_len: NONCE_LEN,
    tag_len: DELIRIUM_PARAMS.tag_len,
    max_input_len: u64::MAX,
    flags: Flags::LITTLE_ENDIAN,
    init: init_key_bytes,
    seal: seal_delirium,
    open: open_delirium,
    id: AlgorithmID::DELIRIUM,
};

struct Elephant<const N: usize> {
    permute: fn(&mut [u8; N]),
    lfsr: fn(&[u8; N]) -> [u8; N],
    tag_len: usize,
}

const DUMBO_PARAMS: Elephant<SPONGENT160_STATE_LEN> = Elephant {
    permute: spongent160,
    lfsr: dumbo_lfsr,
    tag_len: 8,
};

const JUMBO_PARAMS: Elephant<SPONGENT176_STATE_LEN> = Elephant {
    permute: spongent176,
    lfsr: jumbo_lfsr,
    tag_len: 8,
};

const DELIRIUM_PARAMS: Elephant<KECCAKP_200_STATE_LEN> = Elephant {
    permute: keccakp_200,
    lfsr: delirium_lfsr,
    tag_len: 16,
};

/// Shifts the mask down by one byte and appends `feedback`.
fn shift_in<const N: usize>(mask: &[u8; N], feedback: u8) -> [u8; N] {
    core::array::from_fn(|i| if i + 1 < N { mask[i + 1] } else { feedback })
}

fn dumbo_lfsr(mask: &[u8; SPONGENT160_STATE_LEN]) -> [u8; SPONGENT160_STATE_LEN] {
    shift_in(mask, mask[0].rotate_left(3) ^ (mask[3] << 7) ^ (mask[13] >> 7))
}

fn jumbo_lfsr(mask: &[u8; SPONGENT176_STATE_LEN]) -> [u8; SPONGENT176_STATE_LEN] {
    shift_in(mask, mask[0].rotate_left(1) ^ (mask[3] << 7) ^ (mask[19] >> 7))
}

fn delirium_lfsr(mask: &[u8; KECCAKP_200_STATE_LEN]) -> [u8; KECCAKP_200_STATE_LEN] {
    shift_in(
        mask,
        mask[0].rotate_left(1) ^ mask[2].rotate_left(1) ^ (mask[13] << 1),
    )
}

fn xor<const N: usize>(a: &[u8; N], b: &[u8; N]) -> [u8; N] {
    core::array::from_fn(|i| a[i] ^ b[i])
}

impl<const N: usize> Elephant<N> {
    /// The permuted key, truncated to the key length and zero-extended.
    fn initial_mask(&self, key: &[u8]) -> [u8; N] {
        let mut state = [0u8; N];
        state[..KEY_LEN].copy_from_slice(key);
        (self.permute)(&mut state);
        let mut mask = [0u8; N];
        mask[..KEY_LEN].copy_from_slice(&state[..KEY_LEN]);
        mask
    }

    /// Permutes `state`, which already carries `mask ^ next`, and adds the
    /// re-masked result to the tag.
    fn accumulate(&self, mut state: [u8; N], mask: &[u8; N], next: &[u8; N], tag: &mut [u8]) {
        (self.permute)(&mut state);
        tag.iter_mut()
            .zip(state.iter().zip(mask.iter().zip(next)))
            .for_each(|(t, (s, (m, n)))| *t ^= s ^ m ^ n);
    }

    /// Authenticates the nonce followed by the AAD. The nonce fills the start
    /// of the first block.
    fn absorb_aad(&self, mut mask: [u8; N], nonce: &[u8], mut aad: &[u8], tag: &mut [u8]) {
        let mut next = (self.lfsr)(&(self.lfsr)(&mask));
        let mut state = xor(&mask, &next);
        xor_at_start(&mut state, nonce);

        let mut posn = NONCE_LEN;
        while aad.len() >= N - posn {
            let (block, rest) = aad.split_at(N - posn);
            xor_at_start(&mut state[posn..], block);
            self.accumulate(state, &mask, &next, tag);
            mask = (self.lfsr)(&mask);
            next = (self.lfsr)(&next);
            state = xor(&mask, &next);
            posn = 0;
            aad = rest;
        }
        xor_at_start(&mut state[posn..], aad);
        state[posn + aad.len()] ^= 0x01;
        self.accumulate(state, &mask, &next, tag);
    }

    /// Authenticates one ciphertext block, padding it when it is shorter
    /// than the state. An empty block is the padding block that follows an
    /// aligned message.
    fn absorb_ciphertext(&self, mask: &[u8; N], ciphertext: &[u8], tag: &mut [u8]) {
        let next = (self.lfsr)(mask);
        let mut state = xor(mask, &next);
        xor_at_start(&mut state, ciphertext);
        if ciphertext.len() < N {
            state[ciphertext.len()] ^= 0x01;
        }
        self.accumulate(state, mask, &next, tag);
    }

    fn keystream(&self, mask: &[u8; N], nonce: &[u8]) -> [u8; N] {
        let mut state = *mask;
        xor_at_start(&mut state, nonce);
        (self.permute)(&mut state);
        xor(&state, mask)
    }

    /// Runs the whole mode. `in_out` is transformed in place and the
    /// ciphertext side of each block is authenticated.
    fn crypt(
        &self,
        key: &[u8],
        nonce: &[u8],
        aad: &[u8],
        in_out: &mut [u8],
        direction: Direction,
    ) -> [u8; MAX_TAG_LEN] {
        let mut tag = [0u8; MAX_TAG_LEN];
        let tag_out = &mut tag[..self.tag_len];

        let mut mask = self.initial_mask(key);
        self.absorb_aad(mask, nonce, aad, tag_out);

        let aligned = !in_out.is_empty() && in_out.len() % N == 0;
        for block in in_out.chunks_mut(N) {
            if let Direction::Opening = direction {
                self.absorb_ciphertext(&mask, block, tag_out);
            }
            xor_at_start(block, &self.keystream(&mask, nonce));
            if let Direction::Sealing = direction {
                self.absorb_ciphertext(&mask, block, tag_out);
            }
            mask = (self.lfsr)(&mask);
        }
        if aligned {
            self.absorb_ciphertext(&mask, &[], tag_out);
        }
        tag
    }

    fn seal(&self, key: &KeyInner, nonce: &Nonce, aad: Aad<&[u8]>, in_out: &mut [u8]) -> Tag {
        let tag = self.crypt(
            key.bytes(),
            nonce.as_ref(),
            aad.as_ref(),
            in_out,
            Direction::Sealing,
        );
        Tag::new(&tag[..self.tag_len])
    }

    fn open(
        &self,
        key: &KeyInner,
        nonce: &Nonce,
        aad: Aad<&[u8]>,
        in_out: &mut [u8],
        received_tag: &Tag,
    ) -> Result<(), OpenError> {
        let tag = self.crypt(
            key.bytes(),
            nonce.as_ref(),
            aad.as_ref(),
            in_out,
            Direction::Opening,
        );
        check_tag(in_out, &tag[..self.tag_len], received_tag.as_ref())?;
        Ok(())
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Sealing,
    Opening,
}

macro_rules! elephant_glue {
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

elephant_glue!(seal_dumbo, open_dumbo, DUMBO_PARAMS);
elephant_glue!(seal_jumbo, open_jumbo, JUMBO_PARAMS);
elephant_glue!(seal_delirium, open_delirium, DELIRIUM_PARAMS);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lfsr_feedback() {
        let mut mask = [0u8; SPONGENT160_STATE_LEN];
        mask[0] = 0x21;
        mask[1] = 0xaa;
        let next = dumbo_lfsr(&mask);
        assert_eq!(next[0], 0xaa);
        assert_eq!(next[SPONGENT160_STATE_LEN - 1], 0x09);

        let mut mask = [0u8; SPONGENT176_STATE_LEN];
        mask[3] = 0x01;
        mask[19] = 0x80;
        let next = jumbo_lfsr(&mask);
        assert_eq!(next[2], 0x01);
        assert_eq!(next[SPONGENT176_STATE_LEN - 1], 0x81);

        let mut mask = [0u8; KECCAKP_200_STATE_LEN];
        mask[0] = 0x80;
        mask[2] = 0x01;
        mask[13] = 0x81;
        let next = delirium_lfsr(&mask);
        assert_eq!(next[KECCAKP_200_STATE_LEN - 1], 0x01 ^ 0x02 ^ 0x02);
    }

    #[test]
    fn test_initial_mask_is_zero_extended() {
        let mask = DELIRIUM_PARAMS.initial_mask(&[0x5a; KEY_LEN]);
        assert_eq!(mask[KEY_LEN..], [0u8; KECCAKP_200_STATE_LEN - KEY_LEN]);
        assert_ne!(mask[..KEY_LEN], [0u8; KEY_LEN]);
    }

    #[test]
    fn test_open_inverts_seal_at_block_boundaries() {
        let key = init_key_bytes(&[7; KEY_LEN]).unwrap();
        let aad = [3u8; 30];
        for len in [0, 1, 19, 20, 21, 40, 45] {
            let nonce = Nonce::try_assume_unique_for_key(&[9; NONCE_LEN]).unwrap();
            let plaintext: std::vec::Vec<u8> = (0..len).map(|i| i as u8).collect();
            let mut in_out = plaintext.clone();
            let tag = DUMBO_PARAMS.seal(&key, &nonce, Aad::from(&aad[..]), &mut in_out);

            let nonce = Nonce::try_assume_unique_for_key(&[9; NONCE_LEN]).unwrap();
            assert!(DUMBO_PARAMS
                .open(&key, &nonce, Aad::from(&aad[..]), &mut in_out, &tag)
                .is_ok());
            assert_eq!(in_out, plaintext);
        }
    }
}
