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

//! The sLiSCP-light-256 and sLiSCP-light-192 permutations.
//!
//! The state is four big-endian subblocks, each a pair of words of 32 or
//! 24 bits. Every step runs a Simeck box over subblocks 1 and 3, adds the
//! step constants to subblocks 0 and 2 and mixes them into a Type-II
//! generalized Feistel rotation.

use super::simeck::{simeck48_box, simeck64_box};
use crate::endian::{load_be_u32, store_be_u32};

pub(super) const SLISCP_LIGHT256_STATE_LEN: usize = 32;
pub(super) const SLISCP_LIGHT192_STATE_LEN: usize = 24;

const STEPS: usize = 18;

/// Per step: the two Simeck round constants, then the two step constants.
const RC_256: [[u8; 4]; STEPS] = [
    [0x0f, 0x47, 0x08, 0x64],
    [0x04, 0xb2, 0x86, 0x6b],
    [0x43, 0xb5, 0xe2, 0x6f],
    [0xf1, 0x37, 0x89, 0x2c],
    [0x44, 0x96, 0xe6, 0xdd],
    [0x73, 0xee, 0xca, 0x99],
    [0xe5, 0x4c, 0x17, 0xea],
    [0x0b, 0xf5, 0x8e, 0x0f],
    [0x47, 0x07, 0x64, 0x04],
    [0xb2, 0x82, 0x6b, 0x43],
    [0xb5, 0xa1, 0x6f, 0xf1],
    [0x37, 0x78, 0x2c, 0x44],
    [0x96, 0xa2, 0xdd, 0x73],
    [0xee, 0xb9, 0x99, 0xe5],
    [0x4c, 0xf2, 0xea, 0x0b],
    [0xf5, 0x85, 0x0f, 0x47],
    [0x07, 0x23, 0x04, 0xb2],
    [0x82, 0xd9, 0x43, 0xb5],
];

const RC_192: [[u8; 4]; STEPS] = [
    [0x07, 0x27, 0x08, 0x29],
    [0x04, 0x34, 0x0c, 0x1d],
    [0x06, 0x2e, 0x0a, 0x33],
    [0x25, 0x19, 0x2f, 0x2a],
    [0x17, 0x35, 0x38, 0x1f],
    [0x1c, 0x0f, 0x24, 0x10],
    [0x12, 0x08, 0x36, 0x18],
    [0x3b, 0x0c, 0x0d, 0x14],
    [0x26, 0x0a, 0x2b, 0x1e],
    [0x15, 0x2f, 0x3e, 0x31],
    [0x3f, 0x38, 0x01, 0x09],
    [0x20, 0x24, 0x21, 0x2d],
    [0x30, 0x36, 0x11, 0x1b],
    [0x28, 0x0d, 0x39, 0x16],
    [0x3c, 0x2b, 0x05, 0x3d],
    [0x22, 0x3e, 0x27, 0x03],
    [0x13, 0x01, 0x34, 0x02],
    [0x1a, 0x21, 0x2e, 0x23],
];

fn load_be_u24(b: &[u8]) -> u32 {
    u32::from_be_bytes([0, b[0], b[1], b[2]])
}

fn store_be_u24(b: &mut [u8], x: u32) {
    b[..3].copy_from_slice(&x.to_be_bytes()[1..]);
}

fn steps(x: &mut [u32; 8], rc: &[[u8; 4]], mask: u32, simeck_box: fn(&mut u32, &mut u32, u8)) {
    for &[rc0, rc1, sc0, sc1] in rc {
        let [mut x0, mut x1, mut x2, mut x3, mut x4, mut x5, mut x6, mut x7] = *x;
        simeck_box(&mut x2, &mut x3, rc0);
        simeck_box(&mut x6, &mut x7, rc1);

        x0 ^= mask;
        x1 ^= (mask & !0xff) ^ u32::from(sc0);
        x4 ^= mask;
        x5 ^= (mask & !0xff) ^ u32::from(sc1);

        *x = [x2, x3, x4 ^ x6, x5 ^ x7, x6, x7, x0 ^ x2, x1 ^ x3];
    }
}

/// sLiSCP-light-256 with `rounds` of its 18 steps.
pub(super) fn sliscp_light256(state: &mut [u8; SLISCP_LIGHT256_STATE_LEN], rounds: usize) {
    let mut x: [u32; 8] = core::array::from_fn(|i| load_be_u32(&state[4 * i..]));
    steps(&mut x, &RC_256[..rounds], u32::MAX, simeck64_box);
    state
        .chunks_exact_mut(4)
        .zip(&x)
        .for_each(|(b, x)| store_be_u32(b, *x));
}

/// sLiSCP-light-192 with `rounds` of its 18 steps.
pub(super) fn sliscp_light192(state: &mut [u8; SLISCP_LIGHT192_STATE_LEN], rounds: usize) {
    let mut x: [u32; 8] = core::array::from_fn(|i| load_be_u24(&state[3 * i..]));
    steps(&mut x, &RC_192[..rounds], 0x00ff_ffff, simeck48_box);
    state
        .chunks_exact_mut(3)
        .zip(&x)
        .for_each(|(b, x)| store_be_u24(b, *x));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::from_hex;

    #[test]
    fn test_sliscp_light256() {
        let mut state = [0u8; SLISCP_LIGHT256_STATE_LEN];
        sliscp_light256(&mut state, STEPS);
        assert_eq!(
            &state[..],
            &from_hex("c14fd32fdd8c4f913d7cd37ce4c0fc4047577247a907f46ab9296703c6788a4c")
                .unwrap()[..]
        );
    }

    #[test]
    fn test_sliscp_light192() {
        let mut state = [0u8; SLISCP_LIGHT192_STATE_LEN];
        sliscp_light192(&mut state, STEPS);
        assert_eq!(
            &state[..],
            &from_hex("2dcaca3466fa126d47f0e14229a11a0b5d4c7f702d8a464d").unwrap()[..]
        );
    }

    #[test]
    fn test_reduced_steps_are_a_prefix() {
        // Nine steps followed by the other nine is the full permutation.
        let mut full: [u32; 8] = core::array::from_fn(|i| i as u32 * 0x01020304);
        let mut split = full;
        steps(&mut full, &RC_256, u32::MAX, simeck64_box);
        steps(&mut split, &RC_256[..9], u32::MAX, simeck64_box);
        steps(&mut split, &RC_256[9..], u32::MAX, simeck64_box);
        assert_eq!(full, split);
    }
}
