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

//! The SPARKLE family of permutations, shared by the Schwaemm AEADs and the
//! Esch hashes.
//!
//! The state is an array of little-endian words. Branch `i` is the pair
//! `(s[2 * i], s[2 * i + 1])`, the `x` and `y` halves of one Alzette box.

pub(crate) const SPARKLE_256_WORDS: usize = 8;
pub(crate) const SPARKLE_384_WORDS: usize = 12;
pub(crate) const SPARKLE_512_WORDS: usize = 16;

static RC: [u32; 8] = [
    0xb7e15162, 0xbf715880, 0x38b4da56, 0x324e7738, 0xbb1185eb, 0x4f7c7b57, 0xcfbfa1c8,
    0xc2b3293d,
];

#[inline(always)]
fn alzette(x: &mut u32, y: &mut u32, k: u32) {
    *x = x.wrapping_add(y.rotate_left(1));
    *y ^= x.rotate_left(8);
    *x ^= k;
    *x = x.wrapping_add(y.rotate_left(15));
    *y ^= x.rotate_left(15);
    *x ^= k;
    *x = x.wrapping_add(*y);
    *y ^= x.rotate_left(1);
    *x ^= k;
    *x = x.wrapping_add(y.rotate_left(8));
    *y ^= x.rotate_left(16);
    *x ^= k;
}

#[inline(always)]
fn ell(x: u32) -> u32 {
    (x ^ (x << 16)).rotate_left(16)
}

fn sparkle<const N: usize>(s: &mut [u32; N], steps: usize) {
    let branches = N / 2;
    let half = branches / 2;

    for step in 0..steps {
        s[1] ^= RC[step % RC.len()];
        #[allow(clippy::cast_possible_truncation)]
        let step_word = step as u32;
        s[3] ^= step_word;

        for (branch, k) in s.chunks_exact_mut(2).zip(RC.iter()) {
            let (x, y) = branch.split_at_mut(1);
            alzette(&mut x[0], &mut y[0], *k);
        }

        // Feistel step over the two halves, then rotate the left half of the
        // branches by one.
        let (mut tx, mut ty) = (0, 0);
        for branch in s[..branches].chunks_exact(2) {
            tx ^= branch[0];
            ty ^= branch[1];
        }
        let (tx, ty) = (ell(tx), ell(ty));

        let old = *s;
        for j in 0..half {
            let dst = (j + half - 1) % half;
            let right = 2 * (j + half);
            s[2 * dst] = old[right] ^ ty ^ old[2 * j];
            s[2 * dst + 1] = old[right + 1] ^ tx ^ old[2 * j + 1];
            s[right] = old[2 * j];
            s[right + 1] = old[2 * j + 1];
        }
    }
}

/// SPARKLE-256 with the given number of steps.
pub(crate) fn sparkle256(s: &mut [u32; SPARKLE_256_WORDS], steps: usize) {
    sparkle(s, steps)
}

/// SPARKLE-384 with the given number of steps.
pub(crate) fn sparkle384(s: &mut [u32; SPARKLE_384_WORDS], steps: usize) {
    sparkle(s, steps)
}

/// SPARKLE-512 with the given number of steps.
pub(crate) fn sparkle512(s: &mut [u32; SPARKLE_512_WORDS], steps: usize) {
    sparkle(s, steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting<const N: usize>() -> [u32; N] {
        core::array::from_fn(|i| (i as u32).wrapping_mul(0x01010101))
    }

    #[test]
    fn test_sparkle256() {
        let mut s = counting::<SPARKLE_256_WORDS>();
        sparkle256(&mut s, 10);
        assert_eq!(
            s,
            [
                0xd4f97c87, 0x5a7bf982, 0x60a5623b, 0x98261103, 0x42b8281a, 0x95411226, 0xa31f2486,
                0xa948bc7b
            ]
        );

        let mut s = [0u32; SPARKLE_256_WORDS];
        sparkle256(&mut s, 7);
        assert_eq!(
            s,
            [
                0x55ce325e, 0xb6997652, 0x3a53f050, 0x49546f36, 0x86c32d7b, 0xee44b8db, 0x5da5b345,
                0x5772af1f
            ]
        );
    }

    #[test]
    fn test_sparkle384() {
        let mut s = counting::<SPARKLE_384_WORDS>();
        sparkle384(&mut s, 11);
        assert_eq!(
            s,
            [
                0xd500d4bc, 0x3beec759, 0xb2c6f2ea, 0x4c46be1c, 0x3d4f84e7, 0x5d1da7d4, 0xe75f505e,
                0x95465862, 0x75fa7708, 0x89640e6c, 0x65ba8356, 0x42025a0c
            ]
        );
    }

    #[test]
    fn test_sparkle512() {
        let mut s = counting::<SPARKLE_512_WORDS>();
        sparkle512(&mut s, 12);
        assert_eq!(
            s,
            [
                0x8c3a8ed6, 0xfd4ffb97, 0x991f6252, 0x03cebfe4, 0xc214630f, 0x3867ed9c, 0x360cc7df,
                0xb68b2b2e, 0x85f62c24, 0xc5b8c5e9, 0xc6497bd0, 0xe854fe6a, 0xc377fbbc, 0x967d7743,
                0x1b43f076, 0x0fe237dc
            ]
        );
    }
}
