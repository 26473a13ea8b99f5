// Copyright 2015-2019 Brian Smith.
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

//! Sponge-based hash functions: Gimli-24-Hash, Esch256 and Esch384.
//!
//! If all the data is available in a single contiguous slice then the `digest`
//! function should be used. Otherwise, the digest can be calculated in
//! multiple steps using `Context`.

use self::dynstate::DynState;

mod dynstate;
mod esch;
mod gimli_hash;

/// A context for multi-step (Init-Update-Finish) digest calculations.
///
/// # Examples
///
/// ```
/// use lwc::digest;
///
/// let one_shot = digest::digest(&digest::ESCH256, b"hello, world");
///
/// let mut ctx = digest::Context::new(&digest::ESCH256);
/// ctx.update(b"hello");
/// ctx.update(b", ");
/// ctx.update(b"world");
/// let multi_part = ctx.finish();
///
/// assert_eq!(&one_shot.as_ref(), &multi_part.as_ref());
/// ```
#[derive(Clone)]
pub struct Context {
    state: DynState,

    // Invariant: `num_pending <= algorithm.block_len`. A full pending block is
    // only absorbed once more input arrives, because the final block is
    // absorbed differently from the others.
    pending: [u8; MAX_BLOCK_LEN],
    num_pending: usize,

    algorithm: &'static Algorithm,
}

impl Context {
    /// Constructs a new context.
    pub fn new(algorithm: &'static Algorithm) -> Self {
        Self {
            state: algorithm.initial_state.clone(),
            pending: [0u8; MAX_BLOCK_LEN],
            num_pending: 0,
            algorithm,
        }
    }

    /// Updates the digest with all the data in `data`.
    pub fn update(&mut self, data: &[u8]) {
        let block_len = self.algorithm.block_len;

        let to_copy = core::cmp::min(block_len - self.num_pending, data.len());
        let (head, mut remaining) = data.split_at(to_copy);
        self.pending[self.num_pending..][..to_copy].copy_from_slice(head);
        self.num_pending += to_copy;
        if remaining.is_empty() {
            return;
        }

        // More input follows, so the pending block is not the last one.
        (self.algorithm.block_data_order)(&mut self.state, &self.pending[..block_len]);

        while remaining.len() > block_len {
            let (block, rest) = remaining.split_at(block_len);
            (self.algorithm.block_data_order)(&mut self.state, block);
            remaining = rest;
        }

        self.pending[..remaining.len()].copy_from_slice(remaining);
        self.num_pending = remaining.len();
    }

    /// Finalizes the digest calculation and returns the digest value.
    ///
    /// `finish` consumes the context so it cannot be (mis-)used after `finish`
    /// has been called.
    pub fn finish(self) -> Digest {
        let value = (self.algorithm.finish)(self.state, &self.pending[..self.num_pending]);
        Digest {
            value,
            algorithm: self.algorithm,
        }
    }

    /// The algorithm that this context is using.
    #[inline(always)]
    pub fn algorithm(&self) -> &'static Algorithm {
        self.algorithm
    }
}

/// Returns the digest of `data` using the given digest algorithm.
///
/// # Examples:
///
/// ```
/// use lwc::digest;
///
/// let expected = [
///     0xc0, 0xe8, 0x15, 0xd7, 0x8b, 0x87, 0x5d, 0xc7, 0x68, 0xc6, 0xc8, 0xb3, 0xaf, 0xa5, 0x19,
///     0x87, 0xcd, 0x69, 0xe5, 0xc0, 0x87, 0xd3, 0x87, 0x36, 0x86, 0x28, 0xa5, 0x11, 0xcf, 0xad,
///     0x57, 0x30,
/// ];
/// let actual = digest::digest(&digest::ESCH256, b"");
///
/// assert_eq!(&expected, &actual.as_ref());
/// ```
pub fn digest(algorithm: &'static Algorithm, data: &[u8]) -> Digest {
    let mut ctx = Context::new(algorithm);
    ctx.update(data);
    ctx.finish()
}

/// A calculated digest value.
///
/// Use [`Self::as_ref`] to get the value as a `&[u8]`.
#[derive(Clone, Copy)]
pub struct Digest {
    value: Output,
    algorithm: &'static Algorithm,
}

impl Digest {
    /// The algorithm that was used to calculate the digest value.
    #[inline(always)]
    pub fn algorithm(&self) -> &'static Algorithm {
        self.algorithm
    }
}

impl AsRef<[u8]> for Digest {
    #[inline(always)]
    fn as_ref(&self) -> &[u8] {
        &self.value[..self.algorithm.output_len]
    }
}

impl core::fmt::Debug for Digest {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(fmt, "{:?}:", self.algorithm)?;
        self.as_ref()
            .iter()
            .try_for_each(|byte| write!(fmt, "{:02x}", byte))
    }
}

/// A digest algorithm.
pub struct Algorithm {
    output_len: usize,
    block_len: usize,

    initial_state: DynState,

    /// Absorbs one block that is known not to be the last.
    block_data_order: fn(state: &mut DynState, block: &[u8]),

    /// Absorbs the last, possibly empty, block and squeezes the output.
    finish: fn(state: DynState, last: &[u8]) -> Output,

    id: AlgorithmID,
}

#[derive(Debug, Eq, PartialEq)]
enum AlgorithmID {
    GIMLI24_HASH,
    ESCH256,
    ESCH384,
}

impl PartialEq for Algorithm {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Algorithm {}

derive_debug_via_id!(Algorithm);

impl Algorithm {
    /// The length of a finalized digest.
    #[inline(always)]
    pub fn output_len(&self) -> usize {
        self.output_len
    }

    /// The number of bytes absorbed per permutation call.
    #[inline(always)]
    pub fn block_len(&self) -> usize {
        self.block_len
    }
}

/// Gimli-24-Hash: the Gimli-24 sponge with a 256-bit output.
pub static GIMLI24_HASH: Algorithm = Algorithm {
    output_len: 32,
    block_len: gimli_hash::RATE,
    initial_state: DynState::new_gimli(),
    block_data_order: gimli_hash::block_data_order,
    finish: gimli_hash::finish,
    id: AlgorithmID::GIMLI24_HASH,
};

/// Esch256: SPARKLE-384 in sponge mode with a 256-bit output.
pub static ESCH256: Algorithm = Algorithm {
    output_len: 32,
    block_len: esch::RATE,
    initial_state: DynState::new_sparkle384(),
    block_data_order: esch::esch256_block_data_order,
    finish: esch::esch256_finish,
    id: AlgorithmID::ESCH256,
};

/// Esch384: SPARKLE-512 in sponge mode with a 384-bit output.
pub static ESCH384: Algorithm = Algorithm {
    output_len: 48,
    block_len: esch::RATE,
    initial_state: DynState::new_sparkle512(),
    block_data_order: esch::esch384_block_data_order,
    finish: esch::esch384_finish,
    id: AlgorithmID::ESCH384,
};

/// The maximum block length ([`Algorithm::block_len()`]) of all the
/// algorithms in this module.
pub const MAX_BLOCK_LEN: usize = 16;

/// The maximum output length ([`Algorithm::output_len()`]) of all the
/// algorithms in this module.
pub const MAX_OUTPUT_LEN: usize = 48;

type Output = [u8; MAX_OUTPUT_LEN];

#[cfg(test)]
mod tests {
    use super::*;

    fn check(algorithm: &'static Algorithm, input: &[u8], expected_hex: &str) {
        let expected = crate::test::from_hex(expected_hex).unwrap();
        assert_eq!(digest(algorithm, input).as_ref(), &expected[..]);
    }

    #[test]
    fn test_empty_input() {
        check(
            &GIMLI24_HASH,
            b"",
            "27ae20e95fbc2bf01e972b0015eea431c20fc8818f25bc6dbe66232230db352f",
        );
        check(
            &ESCH256,
            b"",
            "c0e815d78b875dc768c6c8b3afa51987cd69e5c087d387368628a511cfad5730",
        );
        check(
            &ESCH384,
            b"",
            "2981715e2263ebd0cb6e5c2c99d0776d5e691ee737fde05247895e75d02e7447\
             fd6ab707e2ec8385a539777965e472ee",
        );
    }

    #[test]
    fn test_split_matches_one_shot() {
        let input: std::vec::Vec<u8> = (0..=70u8).collect();
        for algorithm in [&GIMLI24_HASH, &ESCH256, &ESCH384] {
            for len in [0, 1, 15, 16, 17, 31, 32, 33, 70] {
                let input = &input[..len];
                let one_shot = digest(algorithm, input);
                for split in 0..=len {
                    let mut ctx = Context::new(algorithm);
                    let (a, b) = input.split_at(split);
                    ctx.update(a);
                    ctx.update(&[]);
                    ctx.update(b);
                    assert_eq!(ctx.finish().as_ref(), one_shot.as_ref());
                }
            }
        }
    }

    #[test]
    fn test_max_lens() {
        for algorithm in [&GIMLI24_HASH, &ESCH256, &ESCH384] {
            assert!(algorithm.output_len() <= MAX_OUTPUT_LEN);
            assert!(algorithm.block_len() <= MAX_BLOCK_LEN);
        }
    }
}
