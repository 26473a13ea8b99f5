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

//! Authenticated Encryption with Associated Data (AEAD).
//!
//! See [Authenticated encryption: relations among notions and analysis of the
//! generic composition paradigm][AEAD] for an introduction to the concept of
//! AEADs.
//!
//! Every algorithm here is a lightweight design: a small block cipher or
//! permutation driven by a mode of operation. The key, nonce and tag sizes
//! differ from algorithm to algorithm; query them through [`Algorithm`]
//! rather than assuming 16 bytes.
//!
//! [AEAD]: https://eprint.iacr.org/2000/025.pdf

use crate::{
    constant_time,
    error::{self, InputTooLongError},
};

pub use self::{
    algorithm::{Algorithm, Flags},
    comet::{COMET_128_CHAM, COMET_64_CHAM, COMET_64_SPECK},
    elephant::{DELIRIUM, DUMBO, JUMBO},
    estate::ESTATE_TWEGIFT_128,
    forkae::{
        PAEF_FORKSKINNY_128_192, PAEF_FORKSKINNY_128_256, PAEF_FORKSKINNY_128_288,
        PAEF_FORKSKINNY_64_192, SAEF_FORKSKINNY_128_192, SAEF_FORKSKINNY_128_256,
    },
    gift_cofb::GIFT_COFB,
    gimli24::GIMLI24,
    isap::{ISAP_K_128, ISAP_K_128A},
    less_safe_key::LessSafeKey,
    nonce::{Nonce, MAX_NONCE_LEN},
    opening_key::OpeningKey,
    pyjamask::{PYJAMASK_128, PYJAMASK_96},
    schwaemm::{SCHWAEMM_128_128, SCHWAEMM_192_192, SCHWAEMM_256_128, SCHWAEMM_256_256},
    sealing_key::SealingKey,
    spix::SPIX,
    spoc::{SPOC_128, SPOC_64},
    spook::{SPOOK_128_384_MU, SPOOK_128_384_SU, SPOOK_128_512_MU, SPOOK_128_512_SU},
    tinyjambu::{TINYJAMBU_128, TINYJAMBU_192, TINYJAMBU_256},
    unbound_key::UnboundKey,
};

use self::{auth_error::AuthError, open_error::OpenError};

/// A sequences of unique nonces.
///
/// A given `NonceSequence` must never return the same `Nonce` twice from
/// `advance()`.
///
/// A simple counter is a reasonable (but probably not ideal) `NonceSequence`.
///
/// Intentionally not `Clone` or `Copy` since cloning would allow duplication
/// of the sequence.
pub trait NonceSequence {
    /// Returns the next nonce in the sequence.
    ///
    /// This may fail if "too many" nonces have been requested, where how many
    /// is too many is up to the implementation of `NonceSequence`. An
    /// implementation may that enforce a maximum number of records are
    /// sent/received under a key this way. Once `advance()` fails, it must
    /// fail for all subsequent calls.
    fn advance(&mut self) -> Result<Nonce, error::Unspecified>;
}

/// An AEAD key bound to a nonce sequence.
pub trait BoundKey<N: NonceSequence>: core::fmt::Debug {
    /// Constructs a new key from the given `UnboundKey` and `NonceSequence`.
    fn new(key: UnboundKey, nonce_sequence: N) -> Self;

    /// The key's AEAD algorithm.
    fn algorithm(&self) -> &'static Algorithm;
}

/// The additionally authenticated data (AAD) for an opening or sealing
/// operation. This data is authenticated but is **not** encrypted.
///
/// The type `A` could be a byte slice `&[u8]`, a byte array `[u8; N]`
/// for some constant `N`, `Vec<u8>`, etc.
#[derive(Clone, Copy)]
pub struct Aad<A>(A);

impl<A: AsRef<[u8]>> Aad<A> {
    /// Construct the `Aad` from the given bytes.
    #[inline]
    pub fn from(aad: A) -> Self {
        Self(aad)
    }
}

impl<A> AsRef<[u8]> for Aad<A>
where
    A: AsRef<[u8]>,
{
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl Aad<[u8; 0]> {
    /// Construct an empty `Aad`.
    pub fn empty() -> Self {
        Self::from([])
    }
}

impl<A> core::fmt::Debug for Aad<A>
where
    A: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_tuple("Aad").field(&self.0).finish()
    }
}

impl<A> PartialEq for Aad<A>
where
    A: PartialEq,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl<A> Eq for Aad<A> where A: Eq {}

/// A possibly valid authentication tag.
///
/// Its length is the `tag_len()` of the algorithm that produced it.
#[must_use]
#[derive(Clone, Copy)]
pub struct Tag {
    bytes: [u8; MAX_TAG_LEN],
    len: usize,
}

impl Tag {
    pub(super) fn new(tag: &[u8]) -> Self {
        let mut bytes = [0u8; MAX_TAG_LEN];
        bytes[..tag.len()].copy_from_slice(tag);
        Self {
            bytes,
            len: tag.len(),
        }
    }
}

impl AsRef<[u8]> for Tag {
    fn as_ref(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

impl TryFrom<&[u8]> for Tag {
    type Error = error::Unspecified;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        if value.len() > MAX_TAG_LEN {
            return Err(error::Unspecified);
        }
        Ok(Self::new(value))
    }
}

/// The maximum length of a key for the algorithms in this module.
pub const MAX_KEY_LEN: usize = 32;

/// The maximum length of a tag for the algorithms in this module.
pub const MAX_TAG_LEN: usize = 32;

/// Key material in its raw form, for algorithms whose key is consumed
/// directly by the permutation or whose cipher key changes per block.
#[derive(Clone)]
pub(super) struct KeyBytes {
    bytes: [u8; MAX_KEY_LEN],
    len: usize,
}

impl KeyBytes {
    fn new(key: &[u8]) -> Self {
        let mut bytes = [0u8; MAX_KEY_LEN];
        bytes[..key.len()].copy_from_slice(key);
        Self {
            bytes,
            len: key.len(),
        }
    }
}

impl AsRef<[u8]> for KeyBytes {
    fn as_ref(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

#[derive(Clone)]
enum KeyInner {
    Gift128(gift128::KeySchedule),
    Pyjamask128(pyjamask::Pyjamask128),
    Pyjamask96(pyjamask::Pyjamask96),
    Bytes(KeyBytes),
}

impl KeyInner {
    /// The raw key of an algorithm whose `init` is [`init_key_bytes`].
    fn bytes(&self) -> &[u8] {
        match self {
            Self::Bytes(key) => key.as_ref(),
            _ => unreachable!(),
        }
    }
}

/// `init` for algorithms that keep the key as bytes and expand nothing.
fn init_key_bytes(key: &[u8]) -> Result<KeyInner, error::Unspecified> {
    Ok(KeyInner::Bytes(KeyBytes::new(key)))
}

cold_exhaustive_error! {
    struct auth_error::AuthError with pub(super) constructor {
        plaintext_len: usize
    }
}

cold_exhaustive_error! {
    enum open_error::OpenError {
        auth_failed => AuthFailed(AuthError),
        input_too_long => InputTooLong(InputTooLongError),
    }
}

impl From<AuthError> for OpenError {
    fn from(source: AuthError) -> Self {
        Self::auth_failed(source)
    }
}

impl From<InputTooLongError> for OpenError {
    fn from(source: InputTooLongError) -> Self {
        Self::input_too_long(source)
    }
}

/// Compares `calculated` against `received` in constant time. On mismatch
/// every byte of `plaintext` is overwritten with zero.
///
/// The comparison never exits early; the mask derived from the accumulated
/// difference is applied to the plaintext whether or not the tags match.
pub(super) fn check_tag(
    plaintext: &mut [u8],
    calculated: &[u8],
    received: &[u8],
) -> Result<(), AuthError> {
    if calculated.len() != received.len() {
        return Err(AuthError::new(plaintext.len()));
    }
    let difference = calculated
        .iter()
        .zip(received)
        .fold(0u8, |accum, (a, b)| accum | (a ^ b));
    let keep = constant_time::is_zero_mask_w(difference.into());
    #[allow(clippy::cast_possible_truncation)]
    let keep = keep as u8;
    plaintext.iter_mut().for_each(|b| *b &= keep);
    if keep == 0 {
        return Err(AuthError::new(plaintext.len()));
    }
    Ok(())
}

mod algorithm;
mod block_cipher;
mod cham;
mod clyde;
mod comet;
mod elephant;
mod estate;
mod forkae;
mod forkskinny;
mod gift128;
mod gift_cofb;
mod gimli24;
mod isap;
mod keccak;
mod less_safe_key;
mod nonce;
mod ocb;
mod opening_key;
mod pyjamask;
mod schwaemm;
mod sealing_key;
mod simeck;
mod sliscp_light;
mod speck;
mod spix;
mod spoc;
mod sponge;
mod spongent;
mod spook;
mod tinyjambu;
mod unbound_key;
