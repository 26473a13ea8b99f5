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

use super::{dynstate::DynState, Output};
use crate::{gimli, polyfill::sliceutil::xor_at_start};

pub(super) const RATE: usize = 16;

pub(super) fn block_data_order(state: &mut DynState, block: &[u8]) {
    let state = state.as_gimli();
    xor_at_start(state, block);
    gimli::permute(state);
}

/// A full last block is absorbed like any other and followed by a block of
/// padding alone.
pub(super) fn finish(mut state: DynState, last: &[u8]) -> Output {
    let state = state.as_gimli();
    let last = if last.len() == RATE {
        xor_at_start(state, last);
        gimli::permute(state);
        &[][..]
    } else {
        last
    };
    xor_at_start(state, last);
    state[last.len()] ^= 0x01;
    state[gimli::STATE_LEN - 1] ^= 0x01;
    gimli::permute(state);

    let mut out = [0u8; super::MAX_OUTPUT_LEN];
    out[..RATE].copy_from_slice(&state[..RATE]);
    gimli::permute(state);
    out[RATE..(2 * RATE)].copy_from_slice(&state[..RATE]);
    out
}
