// Copyright 2024 Brian Smith.
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

//! Esch256 and Esch384.
//!
//! Each block is injected into the left half of the SPARKLE state through a
//! Feistel-like linear map. The last block is padded with `0x80` unless it is
//! full, and the two cases use different domain constants.

use super::{dynstate::DynState, Output};
use crate::{
    endian::{load_le_u32s, store_le_u32s},
    sparkle::{sparkle384, sparkle512, SPARKLE_384_WORDS, SPARKLE_512_WORDS},
};

pub(super) const RATE: usize = 16;

const DOMAIN_PADDED: u8 = 0x01;
const DOMAIN_FULL: u8 = 0x02;

#[inline(always)]
fn ell(x: u32) -> u32 {
    (x ^ (x << 16)).rotate_left(16)
}

/// Adds `block` to the left half of `s`. A non-zero `domain` goes into the
/// top byte of the last word of the left half.
fn inject<const N: usize>(s: &mut [u32; N], block: &[u8], domain: u8) {
    let mut b = [0u32; RATE / 4];
    load_le_u32s(&mut b, block);
    let tx = ell(b[0] ^ b[2]);
    let ty = ell(b[1] ^ b[3]);

    let half = N / 2;
    if domain != 0 {
        s[half - 1] ^= u32::from(domain) << 24;
    }
    s[..half].chunks_exact_mut(2).enumerate().for_each(|(i, pair)| {
        let (bx, by) = b.get(2 * i).zip(b.get(2 * i + 1)).map_or((0, 0), |(x, y)| (*x, *y));
        pair[0] ^= bx ^ ty;
        pair[1] ^= by ^ tx;
    });
}

/// The last block and its domain constant.
fn last_block(last: &[u8]) -> ([u8; RATE], u8) {
    let mut block = [0u8; RATE];
    block[..last.len()].copy_from_slice(last);
    if last.len() == RATE {
        (block, DOMAIN_FULL)
    } else {
        block[last.len()] = 0x80;
        (block, DOMAIN_PADDED)
    }
}

/// Squeezes `RATE` bytes from the left of the state into each chunk of `out`,
/// permuting between chunks.
fn squeeze<const N: usize>(
    s: &mut [u32; N],
    out: &mut [u8],
    permute: fn(&mut [u32; N], usize),
    steps: usize,
) {
    let mut chunks = out.chunks_mut(RATE).peekable();
    while let Some(chunk) = chunks.next() {
        store_le_u32s(chunk, &s[..(RATE / 4)]);
        if chunks.peek().is_some() {
            permute(s, steps);
        }
    }
}

pub(super) fn esch256_block_data_order(state: &mut DynState, block: &[u8]) {
    let s = state.as_sparkle384();
    inject(s, block, 0);
    sparkle384(s, 7);
}

pub(super) fn esch256_finish(mut state: DynState, last: &[u8]) -> Output {
    let s: &mut [u32; SPARKLE_384_WORDS] = state.as_sparkle384();
    let (block, domain) = last_block(last);
    inject(s, &block, domain);
    sparkle384(s, 11);

    let mut out = [0u8; super::MAX_OUTPUT_LEN];
    squeeze(s, &mut out[..32], sparkle384, 7);
    out
}

pub(super) fn esch384_block_data_order(state: &mut DynState, block: &[u8]) {
    let s = state.as_sparkle512();
    inject(s, block, 0);
    sparkle512(s, 8);
}

pub(super) fn esch384_finish(mut state: DynState, last: &[u8]) -> Output {
    let s: &mut [u32; SPARKLE_512_WORDS] = state.as_sparkle512();
    let (block, domain) = last_block(last);
    inject(s, &block, domain);
    sparkle512(s, 12);

    let mut out = [0u8; super::MAX_OUTPUT_LEN];
    squeeze(s, &mut out[..48], sparkle512, 8);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inject_esch256() {
        let mut s = [0u32; SPARKLE_384_WORDS];
        let mut block = [0u8; RATE];
        block[0] = 1;
        inject(&mut s, &block, DOMAIN_FULL);
        // tx = ell(1) = 0x00010001, ty = 0.
        assert_eq!(s[..6], [1, 0x00010001, 0, 0x00010001, 0, 0x02010001]);
        assert_eq!(s[6..], [0; 6]);
    }

    #[test]
    fn test_last_block_padding() {
        assert_eq!(last_block(&[]).1, DOMAIN_PADDED);
        assert_eq!(last_block(&[]).0[0], 0x80);
        assert_eq!(last_block(&[7; RATE]), ([7; RATE], DOMAIN_FULL));
    }
}
