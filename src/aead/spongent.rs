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

//! Spongent-pi[160] and Spongent-pi[176].
//!
//! Bit `i` of the state is bit `i % 8` of byte `i / 8`.

pub(super) const SPONGENT160_STATE_LEN: usize = 20;
pub(super) const SPONGENT176_STATE_LEN: usize = 22;

/// Applies the 4-bit S-box to the eight nibbles of `x` at once.
fn sbox(x3: u32) -> u32 {
    let x2 = x3 >> 1;
    let x1 = x2 >> 1;
    let x0 = x1 >> 1;
    let q0 = x0 ^ x2;
    let q1 = x1 ^ x2;
    let t0 = q0 & q1;
    let q2 = !(x0 ^ x1 ^ x3 ^ t0);
    let t1 = q2 & !x0;
    let q3 = x1 ^ t1;
    let t2 = q3 & (q3 ^ x2 ^ x3 ^ t0);
    let t3 = (x2 ^ t0) & !(x1 ^ t0);
    let q0 = x1 ^ x2 ^ x3 ^ t2;
    let q1 = x0 ^ x2 ^ x3 ^ t0 ^ t1;
    let q2 = x0 ^ x1 ^ x2 ^ t1;
    let q3 = x0 ^ x3 ^ t0 ^ t3;
    ((q0 << 3) & 0x88888888)
        | ((q1 << 2) & 0x44444444)
        | ((q2 << 1) & 0x22222222)
        | (q3 & 0x11111111)
}

fn sbox_layer(state: &mut [u8]) {
    state.chunks_mut(4).for_each(|chunk| {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        let word = sbox(u32::from_le_bytes(word)).to_le_bytes();
        chunk.copy_from_slice(&word[..chunk.len()]);
    });
}

/// Moves bit `i` to `i * b / 4 mod (b - 1)`, except for the last bit.
fn p_layer<const N: usize>(state: &mut [u8; N]) {
    let bits = 8 * N;
    let mut out = [0u8; N];
    (0..bits).for_each(|i| {
        let bit = (state[i / 8] >> (i % 8)) & 1;
        let j = if i == bits - 1 {
            i
        } else {
            (i * (bits / 4)) % (bits - 1)
        };
        out[j / 8] |= bit << (j % 8);
    });
    *state = out;
}

/// `lfsr` is the initial value of the 7-bit round counter. Each round XORs
/// the counter into the first byte and its bit reversal into the last.
fn permute<const N: usize>(state: &mut [u8; N], rounds: usize, mut lfsr: u8) {
    for _ in 0..rounds {
        state[0] ^= lfsr;
        state[N - 1] ^= lfsr.reverse_bits();
        lfsr = ((lfsr << 1) | (((lfsr >> 6) ^ (lfsr >> 5)) & 1)) & 0x7f;

        sbox_layer(state);
        p_layer(state);
    }
}

pub(super) fn spongent160(state: &mut [u8; SPONGENT160_STATE_LEN]) {
    permute(state, 80, 0x75);
}

pub(super) fn spongent176(state: &mut [u8; SPONGENT176_STATE_LEN]) {
    permute(state, 90, 0x45);
}
