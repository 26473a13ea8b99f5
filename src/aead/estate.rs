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

//! ESTATE with TweGIFT-128.
//!
//! The tag is an FCBC-MAC over the nonce, the AAD and the plaintext. The
//! plaintext is then encrypted in OFB mode starting from the tag, so opening
//! decrypts with the received tag first and authenticates afterwards.

use super::{
    algorithm::AlgorithmID, check_tag, gift128::KeySchedule, Aad, Algorithm, Flags, KeyInner,
    Nonce, OpenError, Tag,
};
use crate::{error, polyfill::sliceutil::xor_at_start};

const BLOCK_LEN: usize = 16;

/// ESTATE_TweGIFT-128: 128-bit key, 128-bit nonce, 128-bit tag.
pub static ESTATE_TWEGIFT_128: Algorithm = Algorithm {
    name: "ESTATE_TweGIFT-128",
    key_len: 16,
    nonce_len: 16,
    tag_len: 16,
    max_input_len: u64::MAX,
    flags: Flags::NONE,
    init,
    seal,
    open,
    id: AlgorithmID::ESTATE_TWEGIFT_128,
};

/// FCBC-MAC of `data` into `tag`. The final block is encrypted with `full` if
/// it is complete and with `partial` after `0x01` padding otherwise.
fn fcbc(ks: &KeySchedule, tag: &mut [u8; BLOCK_LEN], data: &[u8], full: u8, partial: u8) {
    let mut data = data;
    while data.len() > BLOCK_LEN {
        let (block, rest) = data.split_at(BLOCK_LEN);
        xor_at_start(tag, block);
        ks.encrypt_nibbles(tag);
        data = rest;
    }
    xor_at_start(tag, data);
    if data.len() == BLOCK_LEN {
        ks.encrypt_tweaked(tag, full);
    } else {
        tag[data.len()] ^= 0x01;
        ks.encrypt_tweaked(tag, partial);
    }
}

fn authenticate(ks: &KeySchedule, nonce: &[u8], aad: &[u8], plaintext: &[u8]) -> [u8; BLOCK_LEN] {
    let mut tag = [0u8; BLOCK_LEN];
    tag.copy_from_slice(nonce);

    if aad.is_empty() && plaintext.is_empty() {
        ks.encrypt_tweaked(&mut tag, 8);
        return tag;
    }

    ks.encrypt_tweaked(&mut tag, 1);
    if !aad.is_empty() {
        if plaintext.is_empty() {
            fcbc(ks, &mut tag, aad, 6, 7);
        } else {
            fcbc(ks, &mut tag, aad, 2, 3);
        }
    }
    if !plaintext.is_empty() {
        fcbc(ks, &mut tag, plaintext, 4, 5);
    }
    tag
}

/// OFB keystream seeded with the tag. Encryption and decryption are the same.
fn ofb(ks: &KeySchedule, tag: &[u8], in_out: &mut [u8]) {
    let mut block = [0u8; BLOCK_LEN];
    block.copy_from_slice(tag);
    for chunk in in_out.chunks_mut(BLOCK_LEN) {
        ks.encrypt_nibbles(&mut block);
        xor_at_start(chunk, &block);
    }
}

fn init(key: &[u8]) -> Result<KeyInner, error::Unspecified> {
    let key = key.try_into().map_err(|_| error::Unspecified)?;
    Ok(KeyInner::Gift128(KeySchedule::new_nibbles(key)))
}

fn key_schedule(key: &KeyInner) -> &KeySchedule {
    match key {
        KeyInner::Gift128(ks) => ks,
        _ => unreachable!(),
    }
}

fn seal(
    key: &KeyInner,
    nonce: &Nonce,
    aad: Aad<&[u8]>,
    in_out: &mut [u8],
) -> Result<Tag, error::InputTooLongError> {
    let ks = key_schedule(key);
    let tag = authenticate(ks, nonce.as_ref(), aad.as_ref(), in_out);
    ofb(ks, &tag, in_out);
    Ok(Tag::new(&tag))
}

fn open(
    key: &KeyInner,
    nonce: &Nonce,
    aad: Aad<&[u8]>,
    in_out: &mut [u8],
    received_tag: &Tag,
) -> Result<(), OpenError> {
    let ks = key_schedule(key);
    ofb(ks, received_tag.as_ref(), in_out);
    let tag = authenticate(ks, nonce.as_ref(), aad.as_ref(), in_out);
    check_tag(in_out, &tag, received_tag.as_ref())?;
    Ok(())
}
