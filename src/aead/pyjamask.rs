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

//! Pyjamask-128 and Pyjamask-96 in OCB mode.

use super::{
    algorithm::AlgorithmID, block_cipher::BlockCipher, check_tag, ocb, Aad, Algorithm, Flags,
    KeyInner, Nonce, OpenError, Tag,
};
use crate::{endian::*, error};

const ROUNDS: usize = 14;

/// Pyjamask-128-AEAD: 128-bit key, 96-bit nonce, 128-bit tag.
pub static PYJAMASK_128: Algorithm = Algorithm {
    name: "Pyjamask-128-AEAD",
    key_len: 16,
    nonce_len: 12,
    tag_len: 16,
    max_input_len: u64::MAX,
    flags: Flags::NONE,
    init: init_128,
    seal: seal_128,
    open: open_128,
    id: AlgorithmID::PYJAMASK_128,
};

/// Pyjamask-96-AEAD: 128-bit key, 64-bit nonce, 96-bit tag.
pub static PYJAMASK_96: Algorithm = Algorithm {
    name: "Pyjamask-96-AEAD",
    key_len: 16,
    nonce_len: 8,
    tag_len: 12,
    max_input_len: u64::MAX,
    flags: Flags::NONE,
    init: init_96,
    seal: seal_96,
    open: open_96,
    id: AlgorithmID::PYJAMASK_96,
};

/// The round keys shared by both block sizes. Pyjamask-96 uses the first
/// three words of each four-word round key.
#[derive(Clone)]
struct KeySchedule {
    rk: [[u32; 4]; ROUNDS + 1],
}

impl KeySchedule {
    fn new(key: &[u8; 16]) -> Self {
        let mut k = [0u32; 4];
        load_be_u32s(&mut k, key);

        let mut rk = [[0u32; 4]; ROUNDS + 1];
        rk[0] = k;
        for (round, rk) in (0u32..).zip(rk[1..].iter_mut()) {
            let [k0, k1, k2, k3] = k;
            let temp = k0 ^ k1 ^ k2 ^ k3;

            // Rotations are to the right, as in the published test vectors.
            k = [
                matrix_multiply(0xb881b9ca, k0 ^ temp) ^ 0x00000080 ^ round,
                (k1 ^ temp).rotate_right(8) ^ 0x00006a00,
                (k2 ^ temp).rotate_right(15) ^ 0x003f0000,
                (k3 ^ temp).rotate_right(18) ^ 0x24000000,
            ];
            *rk = k;
        }
        Self { rk }
    }
}

/// Multiplies the vector `y` by the circulant binary matrix whose first row
/// is `x`.
fn matrix_multiply(mut x: u32, y: u32) -> u32 {
    let mut result = 0;
    for bit in (0..32).rev() {
        result ^= x & ((y >> bit) & 1).wrapping_neg();
        x = x.rotate_right(1);
    }
    result
}

#[derive(Clone)]
pub(super) struct Pyjamask128(KeySchedule);

impl Pyjamask128 {
    pub(super) fn new(key: &[u8; 16]) -> Self {
        Self(KeySchedule::new(key))
    }
}

impl BlockCipher for Pyjamask128 {
    const BLOCK_LEN: usize = 16;

    type Block = [u8; 16];

    fn encrypt_block(&self, block: &mut [u8; 16]) {
        let mut s = [0u32; 4];
        load_be_u32s(&mut s, block);
        let [mut s0, mut s1, mut s2, mut s3] = s;

        let rk = &self.0.rk;
        for rk in &rk[..ROUNDS] {
            s0 ^= rk[0];
            s1 ^= rk[1];
            s2 ^= rk[2];
            s3 ^= rk[3];

            s0 ^= s3;
            s3 ^= s0 & s1;
            s0 ^= s1 & s2;
            s1 ^= s2 & s3;
            s2 ^= s0 & s3;
            s2 ^= s1;
            s1 ^= s0;
            s3 = !s3;
            core::mem::swap(&mut s2, &mut s3);

            s0 = matrix_multiply(0xa3861085, s0);
            s1 = matrix_multiply(0x63417021, s1);
            s2 = matrix_multiply(0x692cf280, s2);
            s3 = matrix_multiply(0x48a54813, s3);
        }
        let last = &rk[ROUNDS];
        store_be_u32s(
            block,
            &[s0 ^ last[0], s1 ^ last[1], s2 ^ last[2], s3 ^ last[3]],
        );
    }

    fn decrypt_block(&self, block: &mut [u8; 16]) {
        let mut s = [0u32; 4];
        load_be_u32s(&mut s, block);
        let rk = &self.0.rk;
        let [mut s0, mut s1, mut s2, mut s3] = s;
        s0 ^= rk[ROUNDS][0];
        s1 ^= rk[ROUNDS][1];
        s2 ^= rk[ROUNDS][2];
        s3 ^= rk[ROUNDS][3];

        for rk in rk[..ROUNDS].iter().rev() {
            s0 = matrix_multiply(0x2037a121, s0);
            s1 = matrix_multiply(0x108ff2a0, s1);
            s2 = matrix_multiply(0x9054d8c0, s2);
            s3 = matrix_multiply(0x3354b117, s3);

            core::mem::swap(&mut s2, &mut s3);
            s3 = !s3;
            s1 ^= s0;
            s2 ^= s1;
            s2 ^= s0 & s3;
            s1 ^= s2 & s3;
            s0 ^= s1 & s2;
            s3 ^= s0 & s1;
            s0 ^= s3;

            s0 ^= rk[0];
            s1 ^= rk[1];
            s2 ^= rk[2];
            s3 ^= rk[3];
        }
        store_be_u32s(block, &[s0, s1, s2, s3]);
    }
}

#[derive(Clone)]
pub(super) struct Pyjamask96(KeySchedule);

impl Pyjamask96 {
    pub(super) fn new(key: &[u8; 16]) -> Self {
        Self(KeySchedule::new(key))
    }
}

impl BlockCipher for Pyjamask96 {
    const BLOCK_LEN: usize = 12;

    type Block = [u8; 12];

    fn encrypt_block(&self, block: &mut [u8; 12]) {
        let mut s = [0u32; 3];
        load_be_u32s(&mut s, block);
        let [mut s0, mut s1, mut s2] = s;

        let rk = &self.0.rk;
        for rk in &rk[..ROUNDS] {
            s0 ^= rk[0];
            s1 ^= rk[1];
            s2 ^= rk[2];

            s0 ^= s1;
            s1 ^= s2;
            s2 ^= s0 & s1;
            s0 ^= s1 & s2;
            s1 ^= s0 & s2;
            s2 ^= s0;
            s0 ^= s1;
            s2 = !s2;
            core::mem::swap(&mut s0, &mut s1);

            s0 = matrix_multiply(0xa3861085, s0);
            s1 = matrix_multiply(0x63417021, s1);
            s2 = matrix_multiply(0x692cf280, s2);
        }
        let last = &rk[ROUNDS];
        store_be_u32s(block, &[s0 ^ last[0], s1 ^ last[1], s2 ^ last[2]]);
    }

    fn decrypt_block(&self, block: &mut [u8; 12]) {
        let mut s = [0u32; 3];
        load_be_u32s(&mut s, block);
        let rk = &self.0.rk;
        let [mut s0, mut s1, mut s2] = s;
        s0 ^= rk[ROUNDS][0];
        s1 ^= rk[ROUNDS][1];
        s2 ^= rk[ROUNDS][2];

        for rk in rk[..ROUNDS].iter().rev() {
            s0 = matrix_multiply(0x2037a121, s0);
            s1 = matrix_multiply(0x108ff2a0, s1);
            s2 = matrix_multiply(0x9054d8c0, s2);

            core::mem::swap(&mut s0, &mut s1);
            s2 = !s2;
            s0 ^= s1;
            s2 ^= s0;
            s1 ^= s0 & s2;
            s0 ^= s1 & s2;
            s2 ^= s0 & s1;
            s1 ^= s2;
            s0 ^= s1;

            s0 ^= rk[0];
            s1 ^= rk[1];
            s2 ^= rk[2];
        }
        store_be_u32s(block, &[s0, s1, s2]);
    }
}

fn key_array(key: &[u8]) -> Result<&[u8; 16], error::Unspecified> {
    key.try_into().map_err(|_| error::Unspecified)
}

fn init_128(key: &[u8]) -> Result<KeyInner, error::Unspecified> {
    Ok(KeyInner::Pyjamask128(Pyjamask128::new(key_array(key)?)))
}

fn init_96(key: &[u8]) -> Result<KeyInner, error::Unspecified> {
    Ok(KeyInner::Pyjamask96(Pyjamask96::new(key_array(key)?)))
}

fn seal_128(
    key: &KeyInner,
    nonce: &Nonce,
    aad: Aad<&[u8]>,
    in_out: &mut [u8],
) -> Result<Tag, error::InputTooLongError> {
    let cipher = match key {
        KeyInner::Pyjamask128(cipher) => cipher,
        _ => unreachable!(),
    };
    let tag = ocb::seal(cipher, nonce.as_ref(), 16, aad.as_ref(), in_out);
    Ok(Tag::new(&tag))
}

fn open_128(
    key: &KeyInner,
    nonce: &Nonce,
    aad: Aad<&[u8]>,
    in_out: &mut [u8],
    received_tag: &Tag,
) -> Result<(), OpenError> {
    let cipher = match key {
        KeyInner::Pyjamask128(cipher) => cipher,
        _ => unreachable!(),
    };
    let tag = ocb::open(cipher, nonce.as_ref(), 16, aad.as_ref(), in_out);
    check_tag(in_out, &tag, received_tag.as_ref())?;
    Ok(())
}

fn seal_96(
    key: &KeyInner,
    nonce: &Nonce,
    aad: Aad<&[u8]>,
    in_out: &mut [u8],
) -> Result<Tag, error::InputTooLongError> {
    let cipher = match key {
        KeyInner::Pyjamask96(cipher) => cipher,
        _ => unreachable!(),
    };
    let tag = ocb::seal(cipher, nonce.as_ref(), 12, aad.as_ref(), in_out);
    Ok(Tag::new(&tag))
}

fn open_96(
    key: &KeyInner,
    nonce: &Nonce,
    aad: Aad<&[u8]>,
    in_out: &mut [u8],
    received_tag: &Tag,
) -> Result<(), OpenError> {
    let cipher = match key {
        KeyInner::Pyjamask96(cipher) => cipher,
        _ => unreachable!(),
    };
    let tag = ocb::open(cipher, nonce.as_ref(), 12, aad.as_ref(), in_out);
    check_tag(in_out, &tag, received_tag.as_ref())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::from_hex;

    const KEY: [u8; 16] = [
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
        0xff,
    ];

    #[test]
    fn test_pyjamask_128() {
        let cipher = Pyjamask128::new(&KEY);
        let plaintext = *b"Pyjamask-128:):)";
        let mut block = plaintext;
        cipher.encrypt_block(&mut block);
        assert_eq!(
            &block[..],
            &from_hex("48f139a109bdd9c0726e8261f8d68e7d").unwrap()[..]
        );
        cipher.decrypt_block(&mut block);
        assert_eq!(block, plaintext);
    }

    #[test]
    fn test_pyjamask_96() {
        let cipher = Pyjamask96::new(&KEY);
        let plaintext = *b"Pyjamask96:)";
        let mut block = plaintext;
        cipher.encrypt_block(&mut block);
        assert_eq!(
            &block[..],
            &from_hex("ca9c6e1abbde4edc27073da6").unwrap()[..]
        );
        cipher.decrypt_block(&mut block);
        assert_eq!(block, plaintext);
    }

    #[test]
    fn test_decrypt_inverts_encrypt() {
        let key: [u8; 16] = core::array::from_fn(|i| i as u8);
        let cipher = Pyjamask96::new(&key);
        for seed in 0u8..8 {
            let plaintext: [u8; 12] = core::array::from_fn(|i| seed.wrapping_mul(37) ^ i as u8);
            let mut block = plaintext;
            cipher.encrypt_block(&mut block);
            assert_ne!(block, plaintext);
            cipher.decrypt_block(&mut block);
            assert_eq!(block, plaintext);
        }
    }
}
