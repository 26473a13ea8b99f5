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

//! Keccak-p[200] and Keccak-p[400].
//!
//! The state is 25 lanes of 8 or 16 bits, lane `(x, y)` at index `x + 5y`,
//! each lane stored little-endian. A reduced-round call runs the *last*
//! rounds of the full permutation, as in FIPS 202 section 3.3.

use crate::endian::{load_le_u16, store_le_u16};

pub(super) const KECCAKP_200_STATE_LEN: usize = 25;
pub(super) const KECCAKP_400_STATE_LEN: usize = 50;

const KECCAKP_200_ROUNDS: usize = 18;
const KECCAKP_400_ROUNDS: usize = 20;

/// Rotation offsets in lane order. They are taken modulo the lane width.
const RHO_OFFSETS: [u32; 25] = [
    0, 1, 62, 28, 27, 36, 44, 6, 55, 20, 3, 10, 43, 25, 39, 41, 45, 15, 21, 8, 18, 2, 61, 56, 14,
];

/// The Keccak-f[1600] round constants; narrower lanes use the low bits.
const ROUND_CONSTANTS: [u64; KECCAKP_400_ROUNDS] = [
    0x0000000000000001,
    0x0000000000008082,
    0x800000000000808a,
    0x8000000080008000,
    0x000000000000808b,
    0x0000000080000001,
    0x8000000080008081,
    0x8000000000008009,
    0x000000000000008a,
    0x0000000000000088,
    0x0000000080008009,
    0x000000008000000a,
    0x000000008000808b,
    0x800000000000008b,
    0x8000000000008089,
    0x8000000000008003,
    0x8000000000008002,
    0x8000000000000080,
    0x000000000000800a,
    0x800000008000000a,
];

macro_rules! keccak_p {
    ( $name:ident, $Lane:ty ) => {
        #[allow(clippy::cast_possible_truncation)]
        fn $name(a: &mut [$Lane; 25], first_round: usize, last_round: usize) {
            for rc in &ROUND_CONSTANTS[first_round..last_round] {
                // theta
                let mut c = [0 as $Lane; 5];
                for (x, cx) in c.iter_mut().enumerate() {
                    *cx = a[x] ^ a[x + 5] ^ a[x + 10] ^ a[x + 15] ^ a[x + 20];
                }
                for x in 0..5 {
                    let d = c[(x + 4) % 5] ^ c[(x + 1) % 5].rotate_left(1);
                    for y in 0..5 {
                        a[x + 5 * y] ^= d;
                    }
                }

                // rho and pi
                let b = *a;
                for x in 0..5 {
                    for y in 0..5 {
                        let to = y + 5 * ((2 * x + 3 * y) % 5);
                        a[to] = b[x + 5 * y].rotate_left(RHO_OFFSETS[x + 5 * y]);
                    }
                }

                // chi
                for row in a.chunks_exact_mut(5) {
                    let r = [row[0], row[1], row[2], row[3], row[4]];
                    for x in 0..5 {
                        row[x] = r[x] ^ (!r[(x + 1) % 5] & r[(x + 2) % 5]);
                    }
                }

                // iota
                a[0] ^= *rc as $Lane;
            }
        }
    };
}

keccak_p!(keccak_p_8, u8);
keccak_p!(keccak_p_16, u16);

/// Keccak-p[200] with its full 18 rounds.
pub(super) fn keccakp_200(state: &mut [u8; KECCAKP_200_STATE_LEN]) {
    keccak_p_8(state, 0, KECCAKP_200_ROUNDS);
}

/// Keccak-p[400] with the last `rounds` of its 20 rounds.
pub(super) fn keccakp_400(state: &mut [u8; KECCAKP_400_STATE_LEN], rounds: usize) {
    let mut lanes = [0u16; 25];
    lanes
        .iter_mut()
        .zip(state.chunks_exact(2))
        .for_each(|(lane, b)| *lane = load_le_u16(b));
    keccak_p_16(&mut lanes, KECCAKP_400_ROUNDS - rounds, KECCAKP_400_ROUNDS);
    state
        .chunks_exact_mut(2)
        .zip(&lanes)
        .for_each(|(b, lane)| store_le_u16(b, *lane));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::from_hex;

    #[test]
    fn test_keccakp_200() {
        let mut state: [u8; KECCAKP_200_STATE_LEN] = core::array::from_fn(|i| i as u8);
        keccakp_200(&mut state);
        assert_eq!(
            &state[..],
            &from_hex("7f0340bd5ef9a9ce6c77d141ea9123772d83f040bf231ca51c").unwrap()[..]
        );
    }

    #[test]
    fn test_keccakp_400() {
        let cases = [
            (20, "4f12060e1127481e58df3c9fef2e02aff4fc03d832957a54acbcbe22514e5ccb0f5895dd1f37e83a2349822cde5caa777d54"),
            (12, "04f3103615ed3500c1589a3cfd4a822763204b82c6569277d8dc2bd06a8a993ec8d70051313500133ef91ee57d4e6316471c"),
            (1, "3e06e28238a82765d85882b202620151c7a742026c6836b44844767070fcf2eaedc41018fcff111326a747468c855652f9f0"),
        ];
        for (rounds, expected) in cases {
            let mut state: [u8; KECCAKP_400_STATE_LEN] = core::array::from_fn(|i| i as u8);
            keccakp_400(&mut state, rounds);
            assert_eq!(&state[..], &from_hex(expected).unwrap()[..]);
        }
    }

    #[test]
    fn test_reduced_rounds_compose() {
        // All 20 rounds are the first 8 followed by the last 12.
        let mut a: [u16; 25] = core::array::from_fn(|i| (i * 0x0101) as u16);
        let mut b = a;
        keccak_p_16(&mut a, 0, 20);
        keccak_p_16(&mut b, 0, 8);
        keccak_p_16(&mut b, 8, 20);
        assert_eq!(a, b);
    }
}
