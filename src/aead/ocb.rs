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

//! OCB3 over any 96-bit or 128-bit block cipher.
//!
//! The offsets follow the Gray code: block `i` adds `L_{ntz(i)}` to the
//! running offset. `L_0` and `L_1` are cached; higher `L_j` are derived by
//! doubling on demand, which is rare.

use super::block_cipher::BlockCipher;
use crate::polyfill::sliceutil::xor_at_start;

struct Ocb<'c, C: BlockCipher> {
    cipher: &'c C,
    l_star: C::Block,
    l_dollar: C::Block,
    l0: C::Block,
    l1: C::Block,
}

impl<'c, C: BlockCipher> Ocb<'c, C> {
    /// Derives the L table and the initial offset for `nonce`.
    fn new(cipher: &'c C, nonce: &[u8], tag_len: usize) -> (Self, C::Block) {
        let mut l_star = C::Block::default();
        cipher.encrypt_block(&mut l_star);
        let mut l_dollar = l_star;
        double(l_dollar.as_mut());
        let mut l0 = l_dollar;
        double(l0.as_mut());
        let mut l1 = l0;
        double(l1.as_mut());

        let ocb = Self {
            cipher,
            l_star,
            l_dollar,
            l0,
            l1,
        };
        let offset = ocb.initial_offset(nonce, tag_len);
        (ocb, offset)
    }

    fn initial_offset(&self, nonce: &[u8], tag_len: usize) -> C::Block {
        let block_len = C::BLOCK_LEN;

        let mut nonce_block = C::Block::default();
        {
            let n = nonce_block.as_mut();
            n[(block_len - nonce.len())..].copy_from_slice(nonce);
            #[allow(clippy::cast_possible_truncation)]
            let tag_bits = ((tag_len * 8) & 0x7f) as u8;
            n[0] = tag_bits << 1;
            n[block_len - nonce.len() - 1] |= 0x01;
        }
        let bottom = usize::from(nonce_block.as_ref()[block_len - 1] & 0x3f);
        nonce_block.as_mut()[block_len - 1] &= 0xc0;

        let mut ktop = nonce_block;
        self.cipher.encrypt_block(&mut ktop);
        let ktop = ktop.as_ref();

        // Stretch = Ktop || (Ktop[0..8] ^ (Ktop << 8)) for 128-bit blocks. The
        // 96-bit variant shifts by 9 bits instead.
        let mut stretch = [0u8; 16 + 8];
        stretch[..block_len].copy_from_slice(ktop);
        if block_len == 16 {
            for i in 0..8 {
                stretch[16 + i] = ktop[i] ^ ktop[i + 1];
            }
        } else {
            for i in 0..8 {
                stretch[block_len + i] = ktop[i] ^ ((ktop[i + 1] << 1) | (ktop[i + 2] >> 7));
            }
        }

        let byte_posn = bottom / 8;
        let bit_posn = bottom % 8;
        let mut offset = C::Block::default();
        offset
            .as_mut()
            .iter_mut()
            .enumerate()
            .for_each(|(i, o)| {
                let hi = stretch[i + byte_posn];
                *o = if bit_posn == 0 {
                    hi
                } else {
                    (hi << bit_posn) | (stretch[i + byte_posn + 1] >> (8 - bit_posn))
                };
            });
        offset
    }

    /// Returns `L_{ntz(i)}` for the 1-based block number `i`.
    fn l_for_block(&self, i: u64) -> C::Block {
        match i.trailing_zeros() {
            0 => self.l0,
            1 => self.l1,
            n => {
                let mut l = self.l1;
                for _ in 1..n {
                    double(l.as_mut());
                }
                l
            }
        }
    }

    fn encrypt(&self, block: &mut C::Block) {
        self.cipher.encrypt_block(block)
    }

    /// XORs HASH(K, A) into `sum`.
    fn hash_aad(&self, sum: &mut C::Block, aad: &[u8]) {
        let mut offset = C::Block::default();
        let mut blocks = aad.chunks_exact(C::BLOCK_LEN);
        for (i, a) in (1u64..).zip(&mut blocks) {
            xor_at_start(offset.as_mut(), self.l_for_block(i).as_ref());
            let mut block = offset;
            xor_at_start(block.as_mut(), a);
            self.encrypt(&mut block);
            xor_at_start(sum.as_mut(), block.as_ref());
        }

        let remainder = blocks.remainder();
        if !remainder.is_empty() {
            xor_at_start(offset.as_mut(), self.l_star.as_ref());
            let mut block = offset;
            xor_at_start(block.as_mut(), remainder);
            block.as_mut()[remainder.len()] ^= 0x80;
            self.encrypt(&mut block);
            xor_at_start(sum.as_mut(), block.as_ref());
        }
    }

    fn finish(&self, mut sum: C::Block, offset: &C::Block, aad: &[u8]) -> C::Block {
        xor_at_start(sum.as_mut(), offset.as_ref());
        xor_at_start(sum.as_mut(), self.l_dollar.as_ref());
        self.encrypt(&mut sum);
        self.hash_aad(&mut sum, aad);
        sum
    }
}

/// Encrypts `in_out` in place and returns the full-width tag block.
pub(super) fn seal<C: BlockCipher>(
    cipher: &C,
    nonce: &[u8],
    tag_len: usize,
    aad: &[u8],
    in_out: &mut [u8],
) -> C::Block {
    let (ocb, mut offset) = Ocb::new(cipher, nonce, tag_len);
    let mut sum = C::Block::default();

    let mut blocks = in_out.chunks_exact_mut(C::BLOCK_LEN);
    for (i, m) in (1u64..).zip(&mut blocks) {
        xor_at_start(offset.as_mut(), ocb.l_for_block(i).as_ref());
        xor_at_start(sum.as_mut(), m);
        let mut block = offset;
        xor_at_start(block.as_mut(), m);
        ocb.encrypt(&mut block);
        xor_at_start(block.as_mut(), offset.as_ref());
        m.copy_from_slice(block.as_ref());
    }

    let remainder = blocks.into_remainder();
    if !remainder.is_empty() {
        xor_at_start(sum.as_mut(), remainder);
        sum.as_mut()[remainder.len()] ^= 0x80;
        xor_at_start(offset.as_mut(), ocb.l_star.as_ref());
        let mut pad = offset;
        ocb.encrypt(&mut pad);
        xor_at_start(remainder, pad.as_ref());
    }

    ocb.finish(sum, &offset, aad)
}

/// Decrypts `in_out` in place and returns the full-width expected tag block.
pub(super) fn open<C: BlockCipher>(
    cipher: &C,
    nonce: &[u8],
    tag_len: usize,
    aad: &[u8],
    in_out: &mut [u8],
) -> C::Block {
    let (ocb, mut offset) = Ocb::new(cipher, nonce, tag_len);
    let mut sum = C::Block::default();

    let mut blocks = in_out.chunks_exact_mut(C::BLOCK_LEN);
    for (i, c) in (1u64..).zip(&mut blocks) {
        xor_at_start(offset.as_mut(), ocb.l_for_block(i).as_ref());
        let mut block = offset;
        xor_at_start(block.as_mut(), c);
        cipher.decrypt_block(&mut block);
        xor_at_start(block.as_mut(), offset.as_ref());
        c.copy_from_slice(block.as_ref());
        xor_at_start(sum.as_mut(), c);
    }

    let remainder = blocks.into_remainder();
    if !remainder.is_empty() {
        xor_at_start(offset.as_mut(), ocb.l_star.as_ref());
        let mut pad = offset;
        ocb.encrypt(&mut pad);
        xor_at_start(remainder, pad.as_ref());
        xor_at_start(sum.as_mut(), remainder);
        sum.as_mut()[remainder.len()] ^= 0x80;
    }

    ocb.finish(sum, &offset, aad)
}

/// Doubles `l` in GF(2^128) or in the 96-bit field used by Pyjamask-96.
fn double(l: &mut [u8]) {
    let last = l.len() - 1;
    #[allow(clippy::cast_sign_loss)]
    let mask = ((l[0] as i8) >> 7) as u8;
    for i in 0..last {
        l[i] = (l[i] << 1) | (l[i + 1] >> 7);
    }
    l[last] <<= 1;
    if l.len() == 16 {
        l[last] ^= mask & 0x87;
    } else {
        l[last] ^= mask & 0x41;
        l[last - 1] ^= mask & 0x06;
    }
}
