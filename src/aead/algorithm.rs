// Copyright 2015-2021 Brian Smith.
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

use super::{Aad, KeyInner, Nonce, OpenError, Tag};
use crate::error::{self, InputTooLongError};

/// Properties of an algorithm's implementation.
///
/// These are informational; they never change the input/output behavior of
/// an algorithm.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Flags(u32);

impl Flags {
    /// No special properties.
    pub const NONE: Self = Self(0);

    /// The underlying primitive is specified in terms of little-endian words.
    pub const LITTLE_ENDIAN: Self = Self(0x01);

    /// The key schedule or state handling has been hardened against
    /// side-channel analysis of the key.
    pub const SC_PROTECT_KEY: Self = Self(0x02);

    /// Returns true if every flag in `other` is also set in `self`.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl core::ops::BitOr for Flags {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// An AEAD Algorithm.
pub struct Algorithm {
    pub(super) init: fn(key: &[u8]) -> Result<KeyInner, error::Unspecified>,

    pub(super) seal: fn(
        key: &KeyInner,
        nonce: &Nonce,
        aad: Aad<&[u8]>,
        in_out: &mut [u8],
    ) -> Result<Tag, InputTooLongError>,
    pub(super) open: fn(
        key: &KeyInner,
        nonce: &Nonce,
        aad: Aad<&[u8]>,
        in_out: &mut [u8],
        received_tag: &Tag,
    ) -> Result<(), OpenError>,

    pub(super) name: &'static str,
    pub(super) key_len: usize,
    pub(super) nonce_len: usize,
    pub(super) tag_len: usize,
    pub(super) flags: Flags,

    /// The longest AAD or message accepted under a single nonce.
    pub(super) max_input_len: u64,
    pub(super) id: AlgorithmID,
}

impl Algorithm {
    /// The name of the algorithm, as it appears in its specification.
    #[inline(always)]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The length of the key.
    #[inline(always)]
    pub fn key_len(&self) -> usize {
        self.key_len
    }

    /// The length of a tag.
    ///
    /// See also `MAX_TAG_LEN`.
    #[inline(always)]
    pub fn tag_len(&self) -> usize {
        self.tag_len
    }

    /// The length of the nonces.
    ///
    /// See also `MAX_NONCE_LEN`.
    #[inline(always)]
    pub fn nonce_len(&self) -> usize {
        self.nonce_len
    }

    /// Properties of this implementation.
    #[inline(always)]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub(super) fn new_key(&self, key_bytes: &[u8]) -> Result<KeyInner, error::KeyRejected> {
        if key_bytes.len() != self.key_len {
            return Err(error::KeyRejected::wrong_length());
        }
        (self.init)(key_bytes).map_err(|_| error::KeyRejected::wrong_length())
    }
}

derive_debug_via_id!(Algorithm);

#[derive(Debug, Eq, PartialEq)]
pub(super) enum AlgorithmID {
    COMET_128_CHAM,
    COMET_64_CHAM,
    COMET_64_SPECK,
    DELIRIUM,
    DUMBO,
    ESTATE_TWEGIFT_128,
    GIFT_COFB,
    GIMLI24,
    ISAP_K_128,
    ISAP_K_128A,
    JUMBO,
    PAEF_FORKSKINNY_64_192,
    PAEF_FORKSKINNY_128_192,
    PAEF_FORKSKINNY_128_256,
    PAEF_FORKSKINNY_128_288,
    PYJAMASK_128,
    PYJAMASK_96,
    SAEF_FORKSKINNY_128_192,
    SAEF_FORKSKINNY_128_256,
    SCHWAEMM_128_128,
    SCHWAEMM_192_192,
    SCHWAEMM_256_128,
    SCHWAEMM_256_256,
    SPIX,
    SPOC_128,
    SPOC_64,
    SPOOK_128_384_MU,
    SPOOK_128_384_SU,
    SPOOK_128_512_MU,
    SPOOK_128_512_SU,
    TINYJAMBU_128,
    TINYJAMBU_192,
    TINYJAMBU_256,
}

impl PartialEq for Algorithm {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Algorithm {}

#[cfg(test)]
mod tests {
    use super::Flags;

    #[test]
    fn test_flags() {
        let both = Flags::LITTLE_ENDIAN | Flags::SC_PROTECT_KEY;
        assert!(both.contains(Flags::LITTLE_ENDIAN));
        assert!(both.contains(Flags::SC_PROTECT_KEY));
        assert!(!Flags::NONE.contains(Flags::LITTLE_ENDIAN));
        assert!(Flags::LITTLE_ENDIAN.contains(Flags::NONE));
    }
}
