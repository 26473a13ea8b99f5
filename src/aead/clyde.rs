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

//! The Clyde-128 tweakable block cipher and the Shadow-384 and Shadow-512
//! permutations built from its round function.
//!
//! All words are little-endian.

use crate::endian::{load_le_u32s, store_le_u32s};

pub(super) const BLOCK_LEN: usize = 16;
pub(super) const SHADOW384_STATE_LEN: usize = 48;
pub(super) const SHADOW512_STATE_LEN: usize = 64;

const STEPS: usize = 6;

/// Two rounds per step; the first four bits go after the first round.
const RC: [[u32; 8]; STEPS] = [
    [1, 0, 0, 0, 0, 1, 0, 0],
    [0, 0, 1, 0, 0, 0, 0, 1],
    [1, 1, 0, 0, 0, 1, 1, 0],
    [0, 0, 1, 1, 1, 1, 0, 1],
    [1, 0, 1, 0, 0, 1, 0, 1],
    [1, 1, 1, 0, 0, 1, 1, 1],
];

type Bundle = [u32; 4];

fn sbox(s: &mut Bundle) {
    let c = (s[0] & s[1]) ^ s[2];
    let d = (s[3] & s[0]) ^ s[1];
    let s2 = (c & d) ^ s[3];
    let s3 = (c & s[3]) ^ s[0];
    *s = [d, c, s2, s3];
}

fn inv_sbox(s: &mut Bundle) {
    let d = (s[0] & s[1]) ^ s[2];
    let a = (s[1] & d) ^ s[3];
    let b = (d & a) ^ s[0];
    let s2 = (a & b) ^ s[1];
    *s = [a, b, s2, d];
}

fn lbox(x: u32, y: u32) -> (u32, u32) {
    let mut c = x ^ x.rotate_right(12);
    let mut d = y ^ y.rotate_right(12);
    c ^= c.rotate_right(3);
    d ^= d.rotate_right(3);
    let mut x = c ^ x.rotate_left(15);
    let mut y = d ^ y.rotate_left(15);
    let c = x ^ x.rotate_left(1);
    let d = y ^ y.rotate_left(1);
    x ^= d.rotate_left(6);
    y ^= c.rotate_left(7);
    x ^= c.rotate_right(15);
    y ^= d.rotate_right(15);
    (x, y)
}

fn inv_lbox(x: u32, y: u32) -> (u32, u32) {
    let a = x ^ x.rotate_left(7);
    let b = y ^ y.rotate_left(7);
    let mut x = x ^ a.rotate_left(1);
    let mut y = y ^ b.rotate_left(1);
    x ^= a.rotate_left(12);
    y ^= b.rotate_left(12);
    let mut a = x ^ x.rotate_left(1);
    let mut b = y ^ y.rotate_left(1);
    x ^= b.rotate_left(6);
    y ^= a.rotate_left(7);
    a ^= x.rotate_left(15);
    b ^= y.rotate_left(15);
    (a.rotate_right(16), b.rotate_right(16))
}

fn lbox_bundle(s: &mut Bundle) {
    (s[0], s[1]) = lbox(s[0], s[1]);
    (s[2], s[3]) = lbox(s[2], s[3]);
}

fn inv_lbox_bundle(s: &mut Bundle) {
    (s[0], s[1]) = inv_lbox(s[0], s[1]);
    (s[2], s[3]) = inv_lbox(s[2], s[3]);
}

/// Adds `rc << shift` for the four constants starting at `rc[0]`.
fn add_constants(s: &mut Bundle, rc: &[u32], shift: u32) {
    s.iter_mut().zip(rc).for_each(|(s, rc)| *s ^= rc << shift);
}

fn load(b: &[u8]) -> Bundle {
    let mut w = [0u32; 4];
    load_le_u32s(&mut w, b);
    w
}

fn add_tweakey(s: &mut Bundle, k: &Bundle, t: &Bundle) {
    s.iter_mut()
        .zip(k.iter().zip(t))
        .for_each(|(s, (k, t))| *s ^= k ^ t);
}

/// The tweak schedule: `(t0, t1, t2, t3) -> (t0 ^ t2, t1 ^ t3, t0, t1)`.
fn next_tweak(t: &Bundle) -> Bundle {
    [t[2] ^ t[0], t[3] ^ t[1], t[0], t[1]]
}

fn prev_tweak(t: &Bundle) -> Bundle {
    [t[2], t[3], t[2] ^ t[0], t[3] ^ t[1]]
}

pub(super) fn encrypt(key: &[u8], tweak: &[u8], input: &[u8]) -> [u8; BLOCK_LEN] {
    let k = load(key);
    let mut t = load(tweak);
    let mut s = load(input);

    add_tweakey(&mut s, &k, &t);
    for rc in &RC {
        sbox(&mut s);
        lbox_bundle(&mut s);
        add_constants(&mut s, &rc[..4], 0);
        sbox(&mut s);
        lbox_bundle(&mut s);
        add_constants(&mut s, &rc[4..], 0);

        t = next_tweak(&t);
        add_tweakey(&mut s, &k, &t);
    }

    let mut output = [0u8; BLOCK_LEN];
    store_le_u32s(&mut output, &s);
    output
}

pub(super) fn decrypt(key: &[u8], tweak: &[u8], input: &[u8]) -> [u8; BLOCK_LEN] {
    let k = load(key);
    let mut t = load(tweak);
    let mut s = load(input);

    // The tweak schedule has period three, so after all six steps it is
    // back to `tweak`.
    for rc in RC.iter().rev() {
        add_tweakey(&mut s, &k, &t);
        t = prev_tweak(&t);

        add_constants(&mut s, &rc[4..], 0);
        inv_lbox_bundle(&mut s);
        inv_sbox(&mut s);
        add_constants(&mut s, &rc[..4], 0);
        inv_lbox_bundle(&mut s);
        inv_sbox(&mut s);
    }
    add_tweakey(&mut s, &k, &t);

    let mut output = [0u8; BLOCK_LEN];
    store_le_u32s(&mut output, &s);
    output
}

/// Runs Shadow over `B` bundles. `diffuse` mixes the `r`th word of every
/// bundle.
fn shadow<const B: usize>(state: &mut [Bundle; B], diffuse: fn([u32; B]) -> [u32; B]) {
    for rc in &RC {
        for (shift, bundle) in (0u32..).zip(state.iter_mut()) {
            sbox(bundle);
            lbox_bundle(bundle);
            add_constants(bundle, &rc[..4], shift);
            sbox(bundle);
        }
        for r in 0..4 {
            let row = diffuse(core::array::from_fn(|i| state[i][r]));
            state.iter_mut().zip(row).for_each(|(bundle, w)| bundle[r] = w);
        }
        for (shift, bundle) in (0u32..).zip(state.iter_mut()) {
            add_constants(bundle, &rc[4..], shift);
        }
    }
}

fn shadow_bytes<const B: usize>(state: &mut [u8], diffuse: fn([u32; B]) -> [u32; B]) {
    let mut bundles: [Bundle; B] = core::array::from_fn(|i| load(&state[BLOCK_LEN * i..]));
    shadow(&mut bundles, diffuse);
    state
        .chunks_exact_mut(BLOCK_LEN)
        .zip(&bundles)
        .for_each(|(b, bundle)| store_le_u32s(b, bundle));
}

pub(super) fn shadow384(state: &mut [u8; SHADOW384_STATE_LEN]) {
    shadow_bytes::<3>(state, |[x, y, z]| [x ^ y ^ z, x ^ z, x ^ y]);
}

pub(super) fn shadow512(state: &mut [u8; SHADOW512_STATE_LEN]) {
    shadow_bytes::<4>(state, |[w, x, y, z]| {
        let c = w ^ x;
        let d = y ^ z;
        [x ^ d, w ^ d, c ^ z, c ^ y]
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::from_hex;

    #[test]
    fn test_clyde128() {
        let key = from_hex("c65af8ddcf9d4a70b7202e959b4bfdb7").unwrap();
        let tweak = from_hex("9cc976bd0c21484c9d19f927b1aa3fe1").unwrap();
        let plaintext = from_hex("d08440223680404fa209b21cf7ff86a6").unwrap();
        let ciphertext = encrypt(&key, &tweak, &plaintext);
        assert_eq!(
            &ciphertext[..],
            &from_hex("6b73fa3e9a5a89952cd29d3ee2038501").unwrap()[..]
        );
        assert_eq!(&decrypt(&key, &tweak, &ciphertext)[..], &plaintext[..]);
    }

    #[test]
    fn test_shadow512() {
        let mut state: [u8; SHADOW512_STATE_LEN] = core::array::from_fn(|i| i as u8);
        shadow512(&mut state);
        assert_eq!(
            &state[..],
            &from_hex(
                "683fa9f900f658a27166e2cc1bb40df832d270f8c01088bfeb92432f0db2e69c\
                 73c64d2a3cf32849bc6ee1be092a4268ad56f078cb2b87924477cc15cd565238"
            )
            .unwrap()[..]
        );
    }

    #[test]
    fn test_shadow384() {
        let mut state: [u8; SHADOW384_STATE_LEN] = core::array::from_fn(|i| i as u8);
        shadow384(&mut state);
        assert_eq!(
            &state[..],
            &from_hex(
                "2814fc1a79c98e3dcbb711ce0fcef8dbfb3bd345aeac7843\
                 ebccb31c41d99d47c6e7c6cc8782e39c4b40b1dfda9643b2"
            )
            .unwrap()[..]
        );
    }

    #[test]
    fn test_inverses() {
        let mut s = [0x01234567u32, 0x89abcdef, 0xdeadbeef, 0x0badf00d];
        let orig = s;
        sbox(&mut s);
        inv_sbox(&mut s);
        assert_eq!(s, orig);
        lbox_bundle(&mut s);
        inv_lbox_bundle(&mut s);
        assert_eq!(s, orig);
        assert_eq!(prev_tweak(&next_tweak(&orig)), orig);
    }
}
