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

//! A duplex sponge over an unkeyed permutation.
//!
//! Every phase ends with a padded, possibly empty, block: `0x01` follows the
//! last input byte and the domain byte `0x01` is added to the final byte of
//! the state. A phase whose input is a whole number of blocks is therefore
//! followed by an extra permutation over the padding alone.

use crate::polyfill::sliceutil::xor_at_start;

/// A permutation over a `STATE_LEN`-byte state, `RATE` bytes of which are
/// exposed to the data.
pub(super) trait Permutation {
    const STATE_LEN: usize;
    const RATE: usize;

    type State: AsRef<[u8]> + AsMut<[u8]>;

    fn permute(state: &mut Self::State);
}

pub(super) struct Duplex<P: Permutation> {
    state: P::State,
}

impl<P: Permutation> Duplex<P> {
    /// Permutes `state` once and starts absorbing.
    pub fn new(mut state: P::State) -> Self {
        P::permute(&mut state);
        Self { state }
    }

    pub fn absorb(&mut self, data: &[u8]) {
        let mut blocks = data.chunks_exact(P::RATE);
        for block in blocks.by_ref() {
            xor_at_start(self.state.as_mut(), block);
            P::permute(&mut self.state);
        }
        let remainder = blocks.remainder();
        xor_at_start(self.state.as_mut(), remainder);
        self.pad_and_permute(remainder.len());
    }

    /// Encrypts `in_out`. The state absorbs the ciphertext.
    pub fn encrypt(&mut self, in_out: &mut [u8]) {
        let mut blocks = in_out.chunks_exact_mut(P::RATE);
        for block in blocks.by_ref() {
            xor_at_start(self.state.as_mut(), block);
            block.copy_from_slice(&self.state.as_ref()[..P::RATE]);
            P::permute(&mut self.state);
        }
        let remainder = blocks.into_remainder();
        let len = remainder.len();
        xor_at_start(self.state.as_mut(), remainder);
        remainder.copy_from_slice(&self.state.as_ref()[..len]);
        self.pad_and_permute(len);
    }

    /// Decrypts `in_out`. The state takes the ciphertext in place of the
    /// plaintext bytes it covered.
    pub fn decrypt(&mut self, in_out: &mut [u8]) {
        let mut blocks = in_out.chunks_exact_mut(P::RATE);
        for block in blocks.by_ref() {
            swap_xor(&mut self.state.as_mut()[..P::RATE], block);
            P::permute(&mut self.state);
        }
        let remainder = blocks.into_remainder();
        let len = remainder.len();
        swap_xor(&mut self.state.as_mut()[..len], remainder);
        self.pad_and_permute(len);
    }

    /// The first `len` bytes of the state.
    pub fn squeeze(&self, len: usize) -> &[u8] {
        &self.state.as_ref()[..len]
    }

    fn pad_and_permute(&mut self, len: usize) {
        let state = self.state.as_mut();
        state[len] ^= 0x01;
        state[P::STATE_LEN - 1] ^= 0x01;
        P::permute(&mut self.state);
    }
}

/// `data[i] ^= state[i]` followed by `state[i] = old data[i]`.
fn swap_xor(state: &mut [u8], data: &mut [u8]) {
    state.iter_mut().zip(data.iter_mut()).for_each(|(s, d)| {
        let c = *d;
        *d ^= *s;
        *s = c;
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A toy permutation that rotates the state by one byte and adds one to
    /// each byte, enough to check the duplex bookkeeping.
    struct Toy;

    impl Permutation for Toy {
        const STATE_LEN: usize = 8;
        const RATE: usize = 4;
        type State = [u8; 8];

        fn permute(state: &mut [u8; 8]) {
            state.rotate_left(1);
            state.iter_mut().for_each(|b| *b = b.wrapping_add(1));
        }
    }

    #[test]
    fn test_decrypt_inverts_encrypt() {
        for len in 0..=13 {
            let plaintext: std::vec::Vec<u8> = (0..len).map(|i| (i as u8) * 7).collect();

            let mut sealer = Duplex::<Toy>::new([3u8; 8]);
            sealer.absorb(b"ad");
            let mut in_out = plaintext.clone();
            sealer.encrypt(&mut in_out);

            let mut opener = Duplex::<Toy>::new([3u8; 8]);
            opener.absorb(b"ad");
            opener.decrypt(&mut in_out);

            assert_eq!(in_out, plaintext);
            assert_eq!(sealer.squeeze(8), opener.squeeze(8));
        }
    }

    #[test]
    fn test_full_block_gets_padding_block() {
        let mut a = Duplex::<Toy>::new([0u8; 8]);
        a.absorb(&[1, 2, 3, 4]);
        let mut b = Duplex::<Toy>::new([0u8; 8]);
        b.absorb(&[1, 2, 3]);
        assert_ne!(a.squeeze(8), b.squeeze(8));
    }
}
