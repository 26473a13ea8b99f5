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

//! The reduced-round Simeck boxes used inside sLiSCP-light.
//!
//! A box is an unkeyed Simeck-2n: each round XORs a round-constant bit
//! into where the round key would go. `x` is the left half.

/// Runs `rounds` Simeck rounds on `N`-bit halves, consuming one bit of `rc`
/// per round, least significant first.
fn simeck_box<const N: u32>(x: &mut u32, y: &mut u32, rc: u8, rounds: usize) {
    let mask = u32::MAX >> (32 - N);
    let rotl = |v: u32, n: u32| ((v << n) | (v >> (N - n))) & mask;
    let f = |v: u32, bit: u8| (rotl(v, 5) & v) ^ rotl(v, 1) ^ (mask - 1) ^ u32::from(bit);
    for round in 0..rounds {
        let bit = (rc >> round) & 1;
        if round % 2 == 0 {
            *y ^= f(*x, bit);
        } else {
            *x ^= f(*y, bit);
        }
    }
}

/// Simeck-64 with 8 rounds.
pub(super) fn simeck64_box(x: &mut u32, y: &mut u32, rc: u8) {
    simeck_box::<32>(x, y, rc, 8);
}

/// Simeck-48 with 6 rounds. Only the low 24 bits of each half are used.
pub(super) fn simeck48_box(x: &mut u32, y: &mut u32, rc: u8) {
    simeck_box::<24>(x, y, rc, 6);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simeck64_box() {
        let (mut x, mut y) = (0, 0);
        simeck64_box(&mut x, &mut y, 0x07);
        assert_eq!((x, y), (0x00001c1e, 0x00000c2d));

        let (mut x, mut y) = (0x01234567, 0x89abcdef);
        simeck64_box(&mut x, &mut y, 0xff);
        assert_eq!((x, y), (0x889c6482, 0x0e0ff785));
    }

    #[test]
    fn test_simeck48_box() {
        let (mut x, mut y) = (0, 0);
        simeck48_box(&mut x, &mut y, 0x07);
        assert_eq!((x, y), (0xffff9a, 0xfffffc));

        let (mut x, mut y) = (0x012345, 0x6789ab);
        simeck48_box(&mut x, &mut y, 0x3f);
        assert_eq!((x, y), (0x370f64, 0xea37ea));
    }
}
