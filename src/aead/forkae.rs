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

//! ForkAE: the PAEF and SAEF modes over ForkSkinny.
//!
//! The tweakey is the 16-byte key, then the nonce, then mode-specific
//! domain bits. The last message block is encrypted with both branches: the
//! left output becomes ciphertext and the right output the tag. When the
//! last block is partial only as many bytes of the right output as the block
//! has are emitted, so the sealed output is always the message length plus
//! one block. The final `BLOCK_LEN` bytes of that output are the `Tag`.

use super::{
    algorithm::AlgorithmID,
    check_tag,
    forkskinny::{ForkCipher, ForkSkinny128_256, ForkSkinny128_384, ForkSkinny64_192},
    init_key_bytes, Aad, Algorithm, Flags, KeyInner, Nonce, OpenError, Tag,
};
use crate::{
    error::{self, InputTooLongError},
    polyfill::{sliceutil::xor_at_start, u64_from_usize},
};

const KEY_LEN: usize = 16;
const MAX_BLOCK_LEN: usize = 16;
const MAX_TWEAKEY_LEN: usize = 48;

/// PAEF-ForkSkinny-64-192: 128-bit key, 48-bit nonce, 64-bit tag.
pub static PAEF_FORKSKINNY_64_192: Algorithm = Algorithm {
    name: "PAEF-ForkSkinny-64-192",
    key_len: KEY_LEN,
    nonce_len: PAEF_64_192.nonce_len,
    tag_len: ForkSkinny64_192::BLOCK_LEN,
    max_input_len: PAEF_64_192.max_input_len(ForkSkinny64_192::BLOCK_LEN),
    flags: Flags::NONE,
    init: init_key_bytes,
    seal: seal_paef_64_192,
    open: open_paef_64_192,
    id: AlgorithmID::PAEF_FORKSKINNY_64_192,
};

/// PAEF-ForkSkinny-128-192: 128-bit key, 48-bit nonce, 128-bit tag.
pub static PAEF_FORKSKINNY_128_192: Algorithm = Algorithm {
    name: "PAEF-ForkSkinny-128-192",
    key_len: KEY_LEN,
    nonce_len: PAEF_128_192.nonce_len,
    tag_len: ForkSkinny128_256::BLOCK_LEN,
    max_input_len: PAEF_128_192.max_input_len(ForkSkinny128_256::BLOCK_LEN),
    flags: Flags::NONE,
    init: init_key_bytes,
    seal: seal_paef_128_192,
    open: open_paef_128_192,
    id: AlgorithmID::PAEF_FORKSKINNY_128_192,
};

/// PAEF-ForkSkinny-128-256: 128-bit key, 112-bit nonce, 128-bit tag.
pub static PAEF_FORKSKINNY_128_256: Algorithm = Algorithm {
    name: "PAEF-ForkSkinny-128-256",
    key_len: KEY_LEN,
    nonce_len: PAEF_128_256.nonce_len,
    tag_len: ForkSkinny128_256::BLOCK_LEN,
    max_input_len: PAEF_128_256.max_input_len(ForkSkinny128_256::BLOCK_LEN),
    flags: Flags::NONE,
    init: init_key_bytes,
    seal: seal_paef_128_256,
    open: open_paef_128_256,
    id: AlgorithmID::PAEF_FORKSKINNY_128_256,
};

/// PAEF-ForkSkinny-128-288: 128-bit key, 104-bit nonce, 128-bit tag.
pub static PAEF_FORKSKINNY_128_288: Algorithm = Algorithm {
    name: "PAEF-ForkSkinny-128-288",
    key_len: KEY_LEN,
    nonce_len: PAEF_128_288.nonce_len,
    tag_len: ForkSkinny128_384::BLOCK_LEN,
    max_input_len: PAEF_128_288.max_input_len(ForkSkinny128_384::BLOCK_LEN),
    flags: Flags::NONE,
    init: init_key_bytes,
    seal: seal_paef_128_288,
    open: open_paef_128_288,
    id: AlgorithmID::PAEF_FORKSKINNY_128_288,
};

/// SAEF-ForkSkinny-128-192: 128-bit key, 56-bit nonce, 128-bit tag.
pub static SAEF_FORKSKINNY_128_192: Algorithm = Algorithm {
    name: "SAEF-ForkSkinny-128-192",
    key_len: KEY_LEN,
    nonce_len: SAEF_128_192.nonce_len,
    tag_len: ForkSkinny128_256::BLOCK_LEN,
    max_input_len: u64::MAX,
    flags: Flags::NONE,
    init: init_key_bytes,
    seal: seal_saef_128_192,
    open: open_saef_128_192,
    id: AlgorithmID::SAEF_FORKSKINNY_128_192,
};

/// SAEF-ForkSkinny-128-256: 128-bit key, 120-bit nonce, 128-bit tag.
pub static SAEF_FORKSKINNY_128_256: Algorithm = Algorithm {
    name: "SAEF-ForkSkinny-128-256",
    key_len: KEY_LEN,
    nonce_len: SAEF_128_256.nonce_len,
    tag_len: ForkSkinny128_256::BLOCK_LEN,
    max_input_len: u64::MAX,
    flags: Flags::NONE,
    init: init_key_bytes,
    seal: seal_saef_128_256,
    open: open_saef_128_256,
    id: AlgorithmID::SAEF_FORKSKINNY_128_256,
};

/// Splits `data` into the blocks before the last and the last block, which
/// is partial or full. The last block is empty only if `data` is.
fn split_last(data: &[u8], block_len: usize) -> (&[u8], &[u8]) {
    let last_len = match data.len() {
        0 => 0,
        len => (len - 1) % block_len + 1,
    };
    data.split_at(data.len() - last_len)
}

fn split_last_mut(data: &mut [u8], block_len: usize) -> (&mut [u8], &mut [u8]) {
    let last_len = match data.len() {
        0 => 0,
        len => (len - 1) % block_len + 1,
    };
    let mid = data.len() - last_len;
    data.split_at_mut(mid)
}

fn pad(partial: &[u8]) -> [u8; MAX_BLOCK_LEN] {
    let mut block = [0u8; MAX_BLOCK_LEN];
    block[..partial.len()].copy_from_slice(partial);
    block[partial.len()] = 0x80;
    block
}

fn new_tweakey(key: &KeyInner, nonce: &Nonce) -> [u8; MAX_TWEAKEY_LEN] {
    let mut tweakey = [0u8; MAX_TWEAKEY_LEN];
    tweakey[..KEY_LEN].copy_from_slice(key.bytes());
    tweakey[KEY_LEN..][..nonce.len()].copy_from_slice(nonce.as_ref());
    tweakey
}

/// Emits the left output `last` of the final block and the first
/// `tail.len()` bytes of its right output, `right`. `tail` receives the head
/// of that stream and the tag the rest.
fn seal_last(tail: &mut [u8], last: &[u8], right: &[u8]) -> Tag {
    let block_len = last.len();
    let mut stream = [0u8; 2 * MAX_BLOCK_LEN];
    stream[..block_len].copy_from_slice(last);
    stream[block_len..][..tail.len()].copy_from_slice(&right[..tail.len()]);
    let (head, tag) = stream.split_at(tail.len());
    tail.copy_from_slice(head);
    Tag::new(&tag[..block_len])
}

/// The inverse of `seal_last`: returns the left output of the final block
/// and the truncated right output that came with it.
fn open_last(tail: &[u8], received_tag: &[u8]) -> [u8; 2 * MAX_BLOCK_LEN] {
    let mut stream = [0u8; 2 * MAX_BLOCK_LEN];
    stream[..tail.len()].copy_from_slice(tail);
    stream[tail.len()..][..received_tag.len()].copy_from_slice(received_tag);
    stream
}

/// Checks the final block. `padded` is its decrypted plaintext and `right`
/// the recomputed right output. Both the truncated tag and the `0x80 0x00..`
/// padding after the message bytes must match; a mismatch in either zeroes
/// `in_out`.
fn verify_last(
    in_out: &mut [u8],
    tail_len: usize,
    padded: &[u8],
    right: &[u8],
    received_right: &[u8],
) -> Result<(), OpenError> {
    let block_len = padded.len();
    let mut calculated = [0u8; MAX_BLOCK_LEN];
    calculated[..tail_len].copy_from_slice(&right[..tail_len]);
    calculated[tail_len..block_len].copy_from_slice(&padded[tail_len..]);

    let mut expected = [0u8; MAX_BLOCK_LEN];
    expected[..tail_len].copy_from_slice(&received_right[..tail_len]);
    if tail_len < block_len {
        expected[tail_len] = 0x80;
    }

    check_tag(in_out, &calculated[..block_len], &expected[..block_len])?;
    Ok(())
}

/// Parallel AEAD from a forkcipher.
///
/// Every block is processed under its own tweak: a big-endian block counter
/// of `counter_len` bytes after the nonce, whose top three bits carry the
/// domain.
struct Paef {
    nonce_len: usize,
    counter_len: usize,
}

const PAEF_64_192: Paef = Paef {
    nonce_len: 6,
    counter_len: 2,
};
const PAEF_128_192: Paef = Paef {
    nonce_len: 6,
    counter_len: 2,
};
const PAEF_128_256: Paef = Paef {
    nonce_len: 14,
    counter_len: 2,
};
const PAEF_128_288: Paef = Paef {
    nonce_len: 13,
    counter_len: 7,
};

mod paef_domain {
    pub const AD: u8 = 0;
    pub const AD_LAST_FULL: u8 = 1;
    pub const AD_LAST_PARTIAL: u8 = 3;
    pub const MESSAGE: u8 = 4;
    pub const MESSAGE_LAST_FULL: u8 = 5;
    pub const MESSAGE_LAST_PARTIAL: u8 = 7;
}

impl Paef {
    /// The longest AAD or message, in bytes, whose block count fits in the
    /// counter alongside the domain bits.
    const fn max_input_len(&self, block_len: usize) -> u64 {
        let blocks = 1u64 << (8 * self.counter_len - 3);
        let block_len = u64_from_usize(block_len);
        blocks * block_len - block_len
    }

    fn check_len(&self, block_len: usize, len: usize) -> Result<(), InputTooLongError> {
        match u64::try_from(len) {
            Ok(l) if l <= self.max_input_len(block_len) => Ok(()),
            _ => Err(InputTooLongError::new(len)),
        }
    }

    fn set_counter(&self, tweakey: &mut [u8], counter: u64, domain: u8) {
        let value = counter | (u64::from(domain) << (8 * self.counter_len - 3));
        let at = KEY_LEN + self.nonce_len;
        tweakey[at..][..self.counter_len]
            .copy_from_slice(&value.to_be_bytes()[(8 - self.counter_len)..]);
    }

    /// Authenticates the AAD and returns the running tag.
    fn absorb_aad<C: ForkCipher>(
        &self,
        tweakey: &mut [u8],
        aad: &[u8],
        message_is_empty: bool,
    ) -> [u8; MAX_BLOCK_LEN] {
        let block_len = C::BLOCK_LEN;
        let mut tag = [0u8; MAX_BLOCK_LEN];
        let mut right = [0u8; MAX_BLOCK_LEN];
        let (blocks, last) = split_last(aad, block_len);

        let mut counter = 1;
        for block in blocks.chunks_exact(block_len) {
            self.set_counter(tweakey, counter, paef_domain::AD);
            C::encrypt_right(tweakey, &mut right[..block_len], block);
            xor_at_start(&mut tag[..block_len], &right);
            counter += 1;
        }

        if last.len() == block_len {
            self.set_counter(tweakey, counter, paef_domain::AD_LAST_FULL);
            C::encrypt_right(tweakey, &mut right[..block_len], last);
            xor_at_start(&mut tag[..block_len], &right);
        } else if !last.is_empty() || message_is_empty {
            let padded = pad(last);
            self.set_counter(tweakey, counter, paef_domain::AD_LAST_PARTIAL);
            C::encrypt_right(tweakey, &mut right[..block_len], &padded[..block_len]);
            xor_at_start(&mut tag[..block_len], &right);
        }
        tag
    }

    fn last_domain(last_len: usize, block_len: usize) -> u8 {
        if last_len == block_len {
            paef_domain::MESSAGE_LAST_FULL
        } else {
            paef_domain::MESSAGE_LAST_PARTIAL
        }
    }

    fn seal<C: ForkCipher>(
        &self,
        key: &KeyInner,
        nonce: &Nonce,
        aad: Aad<&[u8]>,
        in_out: &mut [u8],
    ) -> Result<Tag, InputTooLongError> {
        let block_len = C::BLOCK_LEN;
        self.check_len(block_len, aad.as_ref().len())?;
        self.check_len(block_len, in_out.len())?;

        let mut tweakey = new_tweakey(key, nonce);
        let tweakey = &mut tweakey[..C::TWEAKEY_LEN];
        let mut tag = self.absorb_aad::<C>(tweakey, aad.as_ref(), in_out.is_empty());
        if in_out.is_empty() {
            return Ok(Tag::new(&tag[..block_len]));
        }

        let mut left = [0u8; MAX_BLOCK_LEN];
        let mut right = [0u8; MAX_BLOCK_LEN];
        let (blocks, last) = split_last_mut(in_out, block_len);

        let mut counter = 1;
        for block in blocks.chunks_exact_mut(block_len) {
            self.set_counter(tweakey, counter, paef_domain::MESSAGE);
            C::encrypt(tweakey, &mut left[..block_len], &mut right[..block_len], block);
            block.copy_from_slice(&left[..block_len]);
            xor_at_start(&mut tag[..block_len], &right);
            counter += 1;
        }

        let input = if last.len() == block_len {
            let mut input = [0u8; MAX_BLOCK_LEN];
            input[..block_len].copy_from_slice(last);
            input
        } else {
            pad(last)
        };
        self.set_counter(tweakey, counter, Self::last_domain(last.len(), block_len));
        C::encrypt(
            tweakey,
            &mut left[..block_len],
            &mut right[..block_len],
            &input[..block_len],
        );
        xor_at_start(&mut left[..block_len], &tag);
        Ok(seal_last(last, &left[..block_len], &right))
    }

    fn open<C: ForkCipher>(
        &self,
        key: &KeyInner,
        nonce: &Nonce,
        aad: Aad<&[u8]>,
        in_out: &mut [u8],
        received_tag: &Tag,
    ) -> Result<(), OpenError> {
        let block_len = C::BLOCK_LEN;
        self.check_len(block_len, aad.as_ref().len())?;
        self.check_len(block_len, in_out.len())?;

        let mut tweakey = new_tweakey(key, nonce);
        let tweakey = &mut tweakey[..C::TWEAKEY_LEN];
        let mut tag = self.absorb_aad::<C>(tweakey, aad.as_ref(), in_out.is_empty());
        if in_out.is_empty() {
            check_tag(in_out, &tag[..block_len], received_tag.as_ref())?;
            return Ok(());
        }

        let mut left = [0u8; MAX_BLOCK_LEN];
        let mut right = [0u8; MAX_BLOCK_LEN];
        let (blocks, last) = split_last_mut(in_out, block_len);
        let tail_len = last.len();

        let mut counter = 1;
        for block in blocks.chunks_exact_mut(block_len) {
            self.set_counter(tweakey, counter, paef_domain::MESSAGE);
            C::decrypt(tweakey, &mut left[..block_len], &mut right[..block_len], block);
            block.copy_from_slice(&left[..block_len]);
            xor_at_start(&mut tag[..block_len], &right);
            counter += 1;
        }

        let stream = open_last(last, received_tag.as_ref());
        let (ciphertext, received_right) = stream.split_at(block_len);
        let mut input = [0u8; MAX_BLOCK_LEN];
        input[..block_len].copy_from_slice(ciphertext);
        xor_at_start(&mut input[..block_len], &tag);
        self.set_counter(tweakey, counter, Self::last_domain(tail_len, block_len));
        C::decrypt(
            tweakey,
            &mut left[..block_len],
            &mut right[..block_len],
            &input[..block_len],
        );
        last.copy_from_slice(&left[..tail_len]);

        verify_last(
            in_out,
            tail_len,
            &left[..block_len],
            &right,
            received_right,
        )
    }
}

/// Sequential AEAD from a forkcipher.
///
/// The nonce is only part of the first tweakey; later blocks chain through
/// the running tag instead. Domain bits live in the low bits of byte
/// `flags_at`.
struct Saef {
    nonce_len: usize,
    flags_at: usize,
}

const SAEF_128_192: Saef = Saef {
    nonce_len: 7,
    flags_at: 23,
};
const SAEF_128_256: Saef = Saef {
    nonce_len: 15,
    flags_at: 31,
};

mod saef_flags {
    pub const INITIAL: u8 = 0x08;
    pub const MESSAGE_EMPTY: u8 = 0x04;
    pub const AD_LAST: u8 = 0x02;
    pub const PARTIAL: u8 = 0x01;
    pub const MESSAGE: u8 = 0x01;
    pub const MESSAGE_LAST_FULL: u8 = 0x04;
    pub const MESSAGE_LAST_PARTIAL: u8 = 0x05;
}

impl Saef {
    fn new_tweakey(&self, key: &KeyInner, nonce: &Nonce) -> [u8; MAX_TWEAKEY_LEN] {
        let mut tweakey = new_tweakey(key, nonce);
        tweakey[self.flags_at] = saef_flags::INITIAL;
        tweakey
    }

    /// Everything after the key is used once, then cleared.
    fn clear_tweak(tweakey: &mut [u8]) {
        tweakey[KEY_LEN..].iter_mut().for_each(|b| *b = 0);
    }

    /// Replaces `tag` with its right output and clears the tweak.
    fn chain<C: ForkCipher>(tweakey: &mut [u8], tag: &mut [u8; MAX_BLOCK_LEN]) {
        let mut right = [0u8; MAX_BLOCK_LEN];
        C::encrypt_right(tweakey, &mut right[..C::BLOCK_LEN], &tag[..C::BLOCK_LEN]);
        *tag = right;
        Self::clear_tweak(tweakey);
    }

    fn absorb_aad<C: ForkCipher>(
        &self,
        tweakey: &mut [u8],
        aad: &[u8],
        message_is_empty: bool,
    ) -> [u8; MAX_BLOCK_LEN] {
        let block_len = C::BLOCK_LEN;
        let mut tag = [0u8; MAX_BLOCK_LEN];
        if aad.is_empty() && !message_is_empty {
            return tag;
        }

        let (blocks, last) = split_last(aad, block_len);
        for block in blocks.chunks_exact(block_len) {
            xor_at_start(&mut tag[..block_len], block);
            Self::chain::<C>(tweakey, &mut tag);
        }

        if message_is_empty {
            tweakey[self.flags_at] ^= saef_flags::MESSAGE_EMPTY;
        }
        tweakey[self.flags_at] ^= saef_flags::AD_LAST;
        if last.len() == block_len {
            xor_at_start(&mut tag[..block_len], last);
            Self::chain::<C>(tweakey, &mut tag);
        } else if !last.is_empty() || message_is_empty {
            xor_at_start(&mut tag[..block_len], last);
            tag[last.len()] ^= 0x80;
            tweakey[self.flags_at] ^= saef_flags::PARTIAL;
            Self::chain::<C>(tweakey, &mut tag);
        }
        tag
    }

    fn last_flags(last_len: usize, block_len: usize) -> u8 {
        if last_len == block_len {
            saef_flags::MESSAGE_LAST_FULL
        } else {
            saef_flags::MESSAGE_LAST_PARTIAL
        }
    }

    fn seal<C: ForkCipher>(
        &self,
        key: &KeyInner,
        nonce: &Nonce,
        aad: Aad<&[u8]>,
        in_out: &mut [u8],
    ) -> Result<Tag, InputTooLongError> {
        let block_len = C::BLOCK_LEN;
        let mut tweakey = self.new_tweakey(key, nonce);
        let tweakey = &mut tweakey[..C::TWEAKEY_LEN];
        let mut tag = self.absorb_aad::<C>(tweakey, aad.as_ref(), in_out.is_empty());
        if in_out.is_empty() {
            return Ok(Tag::new(&tag[..block_len]));
        }

        let mut left = [0u8; MAX_BLOCK_LEN];
        let mut right = [0u8; MAX_BLOCK_LEN];
        let (blocks, last) = split_last_mut(in_out, block_len);
        for block in blocks.chunks_exact_mut(block_len) {
            let mut input = tag;
            xor_at_start(&mut input[..block_len], block);
            tweakey[self.flags_at] ^= saef_flags::MESSAGE;
            C::encrypt(
                tweakey,
                &mut left[..block_len],
                &mut right[..block_len],
                &input[..block_len],
            );
            block.copy_from_slice(&left[..block_len]);
            xor_at_start(block, &tag);
            tag = right;
            Self::clear_tweak(tweakey);
        }

        let mut input = tag;
        xor_at_start(&mut input[..block_len], last);
        if last.len() < block_len {
            input[last.len()] ^= 0x80;
        }
        tweakey[self.flags_at] ^= Self::last_flags(last.len(), block_len);
        C::encrypt(
            tweakey,
            &mut left[..block_len],
            &mut right[..block_len],
            &input[..block_len],
        );
        xor_at_start(&mut left[..block_len], &tag);
        Ok(seal_last(last, &left[..block_len], &right))
    }

    fn open<C: ForkCipher>(
        &self,
        key: &KeyInner,
        nonce: &Nonce,
        aad: Aad<&[u8]>,
        in_out: &mut [u8],
        received_tag: &Tag,
    ) -> Result<(), OpenError> {
        let block_len = C::BLOCK_LEN;
        let mut tweakey = self.new_tweakey(key, nonce);
        let tweakey = &mut tweakey[..C::TWEAKEY_LEN];
        let mut tag = self.absorb_aad::<C>(tweakey, aad.as_ref(), in_out.is_empty());
        if in_out.is_empty() {
            check_tag(in_out, &tag[..block_len], received_tag.as_ref())?;
            return Ok(());
        }

        let mut left = [0u8; MAX_BLOCK_LEN];
        let mut right = [0u8; MAX_BLOCK_LEN];
        let (blocks, last) = split_last_mut(in_out, block_len);
        let tail_len = last.len();
        for block in blocks.chunks_exact_mut(block_len) {
            let mut input = tag;
            xor_at_start(&mut input[..block_len], block);
            tweakey[self.flags_at] ^= saef_flags::MESSAGE;
            C::decrypt(
                tweakey,
                &mut left[..block_len],
                &mut right[..block_len],
                &input[..block_len],
            );
            block.copy_from_slice(&left[..block_len]);
            xor_at_start(block, &tag);
            tag = right;
            Self::clear_tweak(tweakey);
        }

        let stream = open_last(last, received_tag.as_ref());
        let (ciphertext, received_right) = stream.split_at(block_len);
        let mut input = tag;
        xor_at_start(&mut input[..block_len], ciphertext);
        tweakey[self.flags_at] ^= Self::last_flags(tail_len, block_len);
        C::decrypt(
            tweakey,
            &mut left[..block_len],
            &mut right[..block_len],
            &input[..block_len],
        );
        xor_at_start(&mut left[..block_len], &tag);
        last.copy_from_slice(&left[..tail_len]);

        verify_last(
            in_out,
            tail_len,
            &left[..block_len],
            &right,
            received_right,
        )
    }
}

macro_rules! forkae_glue {
    ( $seal:ident, $open:ident, $mode:ident, $cipher:ty ) => {
        fn $seal(
            key: &KeyInner,
            nonce: &Nonce,
            aad: Aad<&[u8]>,
            in_out: &mut [u8],
        ) -> Result<Tag, error::InputTooLongError> {
            $mode.seal::<$cipher>(key, nonce, aad, in_out)
        }

        fn $open(
            key: &KeyInner,
            nonce: &Nonce,
            aad: Aad<&[u8]>,
            in_out: &mut [u8],
            received_tag: &Tag,
        ) -> Result<(), OpenError> {
            $mode.open::<$cipher>(key, nonce, aad, in_out, received_tag)
        }
    };
}

forkae_glue!(seal_paef_64_192, open_paef_64_192, PAEF_64_192, ForkSkinny64_192);
forkae_glue!(seal_paef_128_192, open_paef_128_192, PAEF_128_192, ForkSkinny128_256);
forkae_glue!(seal_paef_128_256, open_paef_128_256, PAEF_128_256, ForkSkinny128_256);
forkae_glue!(seal_paef_128_288, open_paef_128_288, PAEF_128_288, ForkSkinny128_384);
forkae_glue!(seal_saef_128_192, open_saef_128_192, SAEF_128_192, ForkSkinny128_256);
forkae_glue!(seal_saef_128_256, open_saef_128_256, SAEF_128_256, ForkSkinny128_256);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_last() {
        let data = [0u8; 40];
        assert_eq!(split_last(&data[..0], 16).1.len(), 0);
        assert_eq!(split_last(&data[..16], 16).1.len(), 16);
        assert_eq!(split_last(&data[..17], 16).1.len(), 1);
        assert_eq!(split_last(&data[..32], 16).0.len(), 16);
        assert_eq!(split_last(&data[..40], 16).0.len(), 32);
    }

    #[test]
    fn test_paef_counter_encoding() {
        let mut tweakey = [0u8; 32];
        PAEF_128_256.set_counter(&mut tweakey, 0x0102, paef_domain::MESSAGE_LAST_PARTIAL);
        assert_eq!(&tweakey[30..], &[0xe1, 0x02]);

        let mut tweakey = [0u8; 48];
        PAEF_128_288.set_counter(&mut tweakey, 1, paef_domain::AD_LAST_PARTIAL);
        assert_eq!(&tweakey[29..36], &[0x60, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_paef_max_input_len() {
        assert_eq!(PAEF_128_256.max_input_len(16), (1 << 13) * 16 - 16);
        assert_eq!(PAEF_64_192.max_input_len(8), (1 << 13) * 8 - 8);
        assert!(PAEF_64_192.check_len(8, (1 << 13) * 8 - 8).is_ok());
        assert!(PAEF_64_192.check_len(8, (1 << 13) * 8 - 7).is_err());
    }

    #[test]
    fn test_seal_last_splits_stream() {
        let mut tail = [0u8; 3];
        let last = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let right = [9u8, 10, 11, 12, 13, 14, 15, 16];
        let tag = seal_last(&mut tail, &last, &right);
        assert_eq!(tail, [1, 2, 3]);
        assert_eq!(tag.as_ref(), &[4, 5, 6, 7, 8, 9, 10, 11]);

        let stream = open_last(&tail, tag.as_ref());
        assert_eq!(&stream[..8], &last);
        assert_eq!(&stream[8..11], &right[..3]);
    }
}
